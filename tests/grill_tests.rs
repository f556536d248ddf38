mod helpers;

use axum::http::StatusCode;
use grill_server::{
    middleware::error::ErrorResponseBody, models::view::grill::GrillView,
    routes::grills::GrillResponse,
};
use serde_json::json;

use crate::helpers::{
    bearer, create_fake_login_test_user,
    grill_helpers::{create_fake_grill, get_grill, get_grills, toggle_like},
    login_admin,
};

test_with_server!(create_grill, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = server
        .post("/api/grills")
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "name": "  Smoky Joe  ", "description": "Charcoal kettle" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body = response.json::<GrillResponse>();
    assert_eq!(body.message, "Grill created");
    assert_eq!(body.grill.name, "Smoky Joe");
    assert_eq!(body.grill.created_by, user.id);
    assert_eq!(body.grill.mics_count, 0);

    let listed = get_grill(server, &body.grill.id).await;
    assert!(listed.is_some());
});

test_with_server!(create_grill_validates_input, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;

    let response = server
        .post("/api/grills")
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "name": "   ", "description": "Charcoal kettle" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/grills")
        .add_header("Authorization", bearer(&user.token))
        .json(&json!({ "name": "Kettle" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body = response.json::<ErrorResponseBody>();
    assert!(body.error.contains("description"));
    assert!(!body.req_id.is_empty());

    let response = server
        .post("/api/grills")
        .add_header("Authorization", bearer(&user.token))
        .bytes("{ not json".into())
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server
        .post("/api/grills")
        .json(&json!({ "name": "Kettle", "description": "Charcoal kettle" }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    assert!(get_grills(server).await.is_empty());
});

test_with_server!(list_grills_newest_first, |server, ctx_state, config| {
    let (server, user) = create_fake_login_test_user(&server).await;
    let first = create_fake_grill(server, &user.token).await;
    let second = create_fake_grill(server, &user.token).await;
    let third = create_fake_grill(server, &user.token).await;

    let grills = get_grills(server).await;
    let ids: Vec<&str> = grills.iter().map(|grill| grill.id.as_str()).collect();
    assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

    let page = server
        .get("/api/grills")
        .add_query_param("start", 1)
        .add_query_param("count", 1)
        .await
        .json::<Vec<GrillView>>();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, second.id);
});

test_with_server!(best_grills_ordered_by_mics, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let (server, user1) = create_fake_login_test_user(&server).await;
    let (server, user2) = create_fake_login_test_user(&server).await;

    let quiet = create_fake_grill(server, &owner.token).await;
    let popular = create_fake_grill(server, &owner.token).await;
    let liked_once = create_fake_grill(server, &owner.token).await;
    let newest = create_fake_grill(server, &owner.token).await;

    toggle_like(server, &user1.token, &popular.id).await.assert_status_ok();
    toggle_like(server, &user2.token, &popular.id).await.assert_status_ok();
    toggle_like(server, &user1.token, &liked_once.id).await.assert_status_ok();

    let best = server
        .get("/api/grills/best")
        .await
        .json::<Vec<GrillView>>();
    assert_eq!(best.len(), 3);
    assert_eq!(best[0].id, popular.id);
    assert_eq!(best[0].mics_count, 2);
    assert_eq!(best[1].id, liked_once.id);
    // equal counts: the older grill wins
    assert_eq!(best[2].id, quiet.id);
    assert!(best.iter().all(|grill| grill.id != newest.id));
});

test_with_server!(update_grill_by_owner_only, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let (server, other) = create_fake_login_test_user(&server).await;
    let grill = create_fake_grill(server, &owner.token).await;

    let response = server
        .put(&format!("/api/grills/{}", grill.id))
        .add_header("Authorization", bearer(&other.token))
        .json(&json!({ "name": "Stolen" }))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    let response = server
        .put(&format!("/api/grills/{}", grill.id))
        .add_header("Authorization", bearer(&owner.token))
        .json(&json!({ "name": "Renamed" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<GrillResponse>();
    assert_eq!(body.message, "Grill updated");
    assert_eq!(body.grill.name, "Renamed");
    assert_eq!(body.grill.description, grill.description);

    let response = server
        .put("/api/grills/not-a-real-id")
        .add_header("Authorization", bearer(&owner.token))
        .json(&json!({ "name": "Renamed" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
});

test_with_server!(delete_grill_by_owner_or_admin, |server, ctx_state, config| {
    let (server, owner) = create_fake_login_test_user(&server).await;
    let (server, other) = create_fake_login_test_user(&server).await;
    let first = create_fake_grill(server, &owner.token).await;
    let second = create_fake_grill(server, &owner.token).await;

    let response = server
        .delete(&format!("/api/grills/{}", first.id))
        .add_header("Authorization", bearer(&other.token))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);

    server
        .delete(&format!("/api/grills/{}", first.id))
        .add_header("Authorization", bearer(&owner.token))
        .await
        .assert_status_ok();
    assert!(get_grill(server, &first.id).await.is_none());

    let admin = login_admin(server).await;
    server
        .delete(&format!("/api/grills/{}", second.id))
        .add_header("Authorization", bearer(&admin.token))
        .await
        .assert_status_ok();
    assert!(get_grill(server, &second.id).await.is_none());

    let response = server
        .delete(&format!("/api/grills/{}", second.id))
        .add_header("Authorization", bearer(&admin.token))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
});
