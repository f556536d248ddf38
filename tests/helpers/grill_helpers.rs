use axum_test::{TestResponse, TestServer};
use fake::{faker, Fake};
use grill_server::{models::view::grill::GrillView, routes::grills::GrillResponse};
use serde_json::json;

use super::bearer;

pub async fn create_fake_grill(server: &TestServer, token: &str) -> GrillView {
    let name = faker::lorem::en::Word().fake::<String>();
    let description = faker::lorem::en::Sentence(3..7).fake::<String>();

    let response = server
        .post("/api/grills")
        .add_header("Authorization", bearer(token))
        .json(&json!({ "name": name, "description": description }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<GrillResponse>().grill
}

pub async fn toggle_like(server: &TestServer, token: &str, grill_id: &str) -> TestResponse {
    server
        .post(&format!("/api/grills/{grill_id}/like"))
        .add_header("Authorization", bearer(token))
        .await
}

pub async fn get_grills(server: &TestServer) -> Vec<GrillView> {
    let response = server.get("/api/grills").await;
    response.assert_status_ok();
    response.json::<Vec<GrillView>>()
}

pub async fn get_grill(server: &TestServer, grill_id: &str) -> Option<GrillView> {
    get_grills(server)
        .await
        .into_iter()
        .find(|grill| grill.id == grill_id)
}

pub async fn get_mics_count(server: &TestServer, grill_id: &str) -> i64 {
    get_grill(server, grill_id)
        .await
        .map(|grill| grill.mics_count)
        .expect("grill listed")
}
