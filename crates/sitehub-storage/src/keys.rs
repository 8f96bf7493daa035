//! Upload key generation and file name handling.

use uuid::Uuid;

/// URL prefix under which uploads are served.
pub const UPLOADS_PREFIX: &str = "/uploads/";

/// A storage key of the form `<uuid>/<sanitized file name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadKey(String);

impl UploadKey {
    /// Generate a fresh key for an uploaded file name.
    pub fn generate(file_name: &str) -> Self {
        Self(format!("{}/{}", Uuid::new_v4(), sanitize_file_name(file_name)))
    }

    /// The key as a string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UploadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Public URL of a stored key.
pub fn public_url(key: &UploadKey) -> String {
    format!("{UPLOADS_PREFIX}{}", key.as_str())
}

/// Reduce a client-supplied file name to a safe single path segment.
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_string();
    if cleaned.is_empty() {
        "file".to_string()
    } else {
        cleaned.chars().take(200).collect()
    }
}

/// Best-effort `Content-Type` from a file extension.
pub fn content_type_for(key: &str) -> &'static str {
    let ext = key
        .rsplit_once('.')
        .map(|(_, e)| e.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "txt" => "text/plain; charset=utf-8",
        "csv" => "text/csv",
        "json" => "application/json",
        "xml" => "application/xml",
        "zip" => "application/zip",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "dwg" => "image/vnd.dwg",
        "dxf" => "image/vnd.dxf",
        "ifc" => "application/x-step",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_strips_directories_and_odd_chars() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name("C:\\plans\\GA plan (rev B).pdf"), "GA_plan__rev_B_.pdf");
        assert_eq!(sanitize_file_name(".."), "file");
    }

    #[test]
    fn test_generated_key_and_url() {
        let key = UploadKey::generate("model.ifc");
        assert!(key.as_str().ends_with("/model.ifc"));
        assert!(public_url(&key).starts_with("/uploads/"));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type_for("a/b/plan.PDF"), "application/pdf");
        assert_eq!(content_type_for("a/b/unknown"), "application/octet-stream");
    }
}
