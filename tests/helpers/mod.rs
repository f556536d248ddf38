#![allow(dead_code)]

pub mod grill_helpers;
pub mod test_with_server;

use axum_test::TestServer;
use fake::{faker, Fake};
use grill_server::models::view::user::LoggedUserView;
use serde_json::json;

pub const TEST_PASSWORD: &str = "some3242paSs#$";

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

pub async fn create_fake_login_test_user(server: &TestServer) -> (&TestServer, LoggedUserView) {
    let email = faker::internet::en::FreeEmail().fake::<String>();
    let full_name = faker::name::en::Name().fake::<String>();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": TEST_PASSWORD,
            "full_name": full_name,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);

    (server, response.json::<LoggedUserView>())
}

pub async fn login_admin(server: &TestServer) -> LoggedUserView {
    let response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": "admin@grill.local",
            "password": "admin_pass",
        }))
        .await;
    response.assert_status_ok();
    response.json::<LoggedUserView>()
}
