//! Shared test helpers for integration tests.
//!
//! Tests run against the PostgreSQL database named by
//! `SITEHUB_TEST_DATABASE_URL` and are skipped when it is unset.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use sitehub_auth::PasswordHasher;
use sitehub_core::config::AppConfig;
use sitehub_database::DatabasePool;
use sitehub_database::repositories::UserRepository;
use sitehub_entity::user::{CreateUser, UserRole};

/// Password used for every seeded account.
pub const PASSWORD: &str = "Sitehub-pass1";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct repository access
    pub db: DatabasePool,
    /// Upload root, removed on drop
    _data_root: TempDir,
}

impl TestApp {
    /// Create a new test application, or `None` when no test database is configured.
    pub async fn new() -> Option<Self> {
        let Ok(url) = std::env::var("SITEHUB_TEST_DATABASE_URL") else {
            eprintln!("SITEHUB_TEST_DATABASE_URL not set; skipping");
            return None;
        };

        let data_root = TempDir::new().expect("Failed to create temp dir");
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "database": { "url": url, "max_connections": 5 },
            "auth": {
                "jwt_secret": "integration-test-secret-0123456789",
                "allow_registration": true,
            },
            "storage": {
                "data_root": data_root.path().to_string_lossy(),
                "max_upload_size_bytes": 1_048_576,
            },
        }))
        .expect("Failed to build test config");

        let db = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database");
        sitehub_database::migration::run_migrations(db.pool())
            .await
            .expect("Failed to run migrations");

        let state = sitehub_api::build_state(config, db.clone())
            .await
            .expect("Failed to build state");
        let router = sitehub_api::build_app(state);

        Some(Self {
            router,
            db,
            _data_root: data_root,
        })
    }

    /// Create a user with a unique name derived from `prefix`. Returns the username.
    pub async fn create_test_user(&self, prefix: &str, role: UserRole) -> String {
        let username = unique(prefix);
        let hash = PasswordHasher::new()
            .hash_password(PASSWORD)
            .expect("Failed to hash password");

        UserRepository::new(self.db.pg())
            .create(&CreateUser {
                username: username.clone(),
                email: Some(format!("{username}@example.test")),
                password_hash: hash,
                display_name: Some(username.clone()),
                role,
            })
            .await
            .expect("Failed to create test user");

        username
    }

    /// Create a user and log in as them. Returns the access token.
    pub async fn token_for(&self, prefix: &str, role: UserRole) -> String {
        let username = self.create_test_user(prefix, role).await;
        self.login(&username, PASSWORD).await
    }

    /// Login and return JWT access token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["access_token"]
            .as_str()
            .expect("No access_token in login response")
            .to_string()
    }

    /// Create a project and return its id.
    pub async fn create_project(&self, token: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/projects",
                Some(serde_json::json!({
                    "code": unique_code(),
                    "name": "Riverside Tower",
                })),
                Some(token),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
        response.body["id"].as_str().expect("project id").to_string()
    }

    /// Make an HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");

        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send a multipart request with a single `file` part plus text fields.
    pub async fn upload(
        &self,
        path: &str,
        fields: &[(&str, &str)],
        file_name: &str,
        content: &[u8],
        token: &str,
    ) -> TestResponse {
        const BOUNDARY: &str = "sitehub-test-boundary";

        let mut body = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        let req = Request::builder()
            .method("POST")
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header("Authorization", format!("Bearer {token}"))
            .body(Body::from(body))
            .expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 4 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

/// A username that will not collide with concurrently running tests.
pub fn unique(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}_{}", &suffix[..10])
}

/// A project code matching the 2..=12 uppercase alphanumeric rule.
pub fn unique_code() -> String {
    let suffix = Uuid::new_v4().simple().to_string().to_uppercase();
    format!("P{}", &suffix[..9])
}
