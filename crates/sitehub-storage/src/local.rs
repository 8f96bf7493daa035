//! Local filesystem storage provider.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use tokio::fs;
use tracing::debug;

use sitehub_core::error::{AppError, ErrorKind};
use sitehub_core::result::AppResult;
use sitehub_core::traits::storage::{StorageObjectMeta, StorageProvider};

/// Local filesystem storage provider.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a provider rooted at `root`, creating the directory if needed.
    pub async fn new(root: impl AsRef<Path>) -> AppResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// The root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key inside the root, rejecting traversal and absolute paths.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        let relative = Path::new(key.trim_start_matches('/'));
        let mut clean = PathBuf::new();
        for component in relative.components() {
            match component {
                Component::Normal(part) => clean.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(AppError::validation(format!("Invalid storage key: {key}")));
                }
            }
        }
        if clean.as_os_str().is_empty() {
            return Err(AppError::validation("Storage key must not be empty"));
        }
        Ok(self.root.join(clean))
    }
}

fn io_error(e: std::io::Error, action: &str, key: &str) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("File not found: {key}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to {action}: {key}"), e)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(fs::metadata(&self.root)
            .await
            .map(|m| m.is_dir())
            .unwrap_or(false))
    }

    async fn read_bytes(&self, key: &str) -> AppResult<Bytes> {
        let path = self.resolve(key)?;
        let data = fs::read(&path).await.map_err(|e| io_error(e, "read file", key))?;
        Ok(Bytes::from(data))
    }

    async fn write(&self, key: &str, data: Bytes) -> AppResult<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error(e, "create directory for", key))?;
        }
        fs::write(&path, &data)
            .await
            .map_err(|e| io_error(e, "write file", key))?;

        debug!(key, bytes = data.len(), "Stored upload");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e, "delete file", key)),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let path = self.resolve(key)?;
        Ok(fs::try_exists(&path).await.unwrap_or(false))
    }

    async fn metadata(&self, key: &str) -> AppResult<StorageObjectMeta> {
        let path = self.resolve(key)?;
        let meta = fs::metadata(&path)
            .await
            .map_err(|e| io_error(e, "stat file", key))?;
        if !meta.is_file() {
            return Err(AppError::not_found(format!("File not found: {key}")));
        }
        Ok(StorageObjectMeta {
            key: key.to_string(),
            size_bytes: meta.len(),
            last_modified: meta.modified().ok().map(DateTime::<Utc>::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitehub_core::error::ErrorKind;

    async fn provider() -> (tempfile::TempDir, LocalStorageProvider) {
        let dir = tempfile::tempdir().unwrap();
        let provider = LocalStorageProvider::new(dir.path()).await.unwrap();
        (dir, provider)
    }

    #[tokio::test]
    async fn test_write_read_delete() {
        let (_dir, provider) = provider().await;
        let data = Bytes::from("section A-A");
        provider.write("abc/section.txt", data.clone()).await.unwrap();

        assert!(provider.exists("abc/section.txt").await.unwrap());
        assert_eq!(provider.read_bytes("abc/section.txt").await.unwrap(), data);
        assert_eq!(provider.metadata("abc/section.txt").await.unwrap().size_bytes, 11);

        provider.delete("abc/section.txt").await.unwrap();
        assert!(!provider.exists("abc/section.txt").await.unwrap());
        provider.delete("abc/section.txt").await.unwrap();
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let (_dir, provider) = provider().await;
        let err = provider.read_bytes("../secret.txt").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
        assert!(provider.write("a/../../b", Bytes::new()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let (_dir, provider) = provider().await;
        let err = provider.read_bytes("nope/missing.pdf").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
