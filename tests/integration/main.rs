//! HTTP-level integration tests. Require `SITEHUB_TEST_DATABASE_URL`.

mod helpers;

mod auth_test;
mod document_test;
mod health_test;
mod permission_test;
mod work_item_test;
