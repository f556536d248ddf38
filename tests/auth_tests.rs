mod helpers;

use axum::http::StatusCode;
use fake::{faker, Fake};
use grill_server::{
    entities::user_auth::local_user_entity::{LocalUserDbService, Role},
    middleware::ctx::Ctx,
    models::view::user::{LoggedUserView, UserView},
};
use serde_json::json;

use crate::helpers::{bearer, create_fake_login_test_user, login_admin, TEST_PASSWORD};

test_with_server!(register_and_login, |server, ctx_state, config| {
    let email = faker::internet::en::FreeEmail().fake::<String>();

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "secret123",
            "full_name": " Jane Grill ",
            "phone": "+40722123456",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let registered = response.json::<LoggedUserView>();
    assert_eq!(registered.email, email.to_lowercase());
    assert_eq!(registered.full_name.as_deref(), Some("Jane Grill"));
    assert_eq!(registered.role, Role::User);
    assert!(!registered.token.is_empty());

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "secret123" }))
        .await;
    response.assert_status_ok();
    let logged = response.json::<LoggedUserView>();
    assert_eq!(logged.id, registered.id);

    let ctx = Ctx::new(Ok(registered.id.clone()));
    let stored = LocalUserDbService {
        db: &ctx_state.db.client,
        ctx: &ctx,
    }
    .get_by_id(&registered.id)
    .await
    .unwrap();
    assert_ne!(stored.password, "secret123");
    assert_eq!(stored.phone.as_deref(), Some("+40722123456"));
});

test_with_server!(register_rejects_duplicate_email, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": user.email.to_uppercase(), "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(register_validates_input, |server, ctx_state, config| {
    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "not-an-email", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/auth/register")
        .json(&json!({ "email": "short@grill.local", "password": "123" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "email": "phone@grill.local",
            "password": TEST_PASSWORD,
            "phone": "call me",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
});

test_with_server!(login_with_wrong_password_fails, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": user.email, "password": "wrong_password" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@grill.local", "password": TEST_PASSWORD }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
});

test_with_server!(profile_requires_valid_token, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = server
        .get("/api/user/profile")
        .add_header("Authorization", bearer(&user.token))
        .await;
    response.assert_status_ok();
    let profile = response.json::<UserView>();
    assert_eq!(profile.id, user.id);
    assert_eq!(profile.email, user.email);

    server
        .get("/api/user/profile")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    server
        .get("/api/user/profile")
        .add_header("Authorization", bearer("invalid"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // signed with the right secret but for a user that does not exist
    let token = ctx_state.jwt.create_by_login("ghost").unwrap();
    server
        .get("/api/user/profile")
        .add_header("Authorization", bearer(&token))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
});

test_with_server!(default_admin_created_once, |server, ctx_state, config| {
    let admin = login_admin(&server).await;
    assert_eq!(admin.role, Role::Admin);

    grill_server::init::create_default_admin(&ctx_state)
        .await
        .unwrap();
    let again = login_admin(&server).await;
    assert_eq!(again.id, admin.id);
});

test_with_server!(health_check, |server, ctx_state, config| {
    let response = server.get("/hc").await;
    response.assert_status_ok();
    assert!(response.text().starts_with('v'));
});
