use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    middleware::{
        bearer_auth::BearerAuth,
        ctx::Ctx,
        error::{CtxError, CtxResult},
        mw_ctx::CtxState,
        utils::{
            db_utils::{Pagination, QryOrder},
            extractor_utils::JsonOrFormValidated,
        },
    },
    models::view::{grill::GrillView, like::LikeView},
    services::{
        grill_service::{GrillInput, GrillService, GrillUpdateInput},
        like_service::{LikeAction, LikeService},
    },
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/grills", get(get_grills).post(create_grill))
        .route("/api/grills/best", get(get_best_grills))
        .route("/api/grills/:grill_id", put(update_grill).delete(delete_grill))
        .route("/api/grills/:grill_id/like", post(toggle_like))
        .route("/api/grills/:grill_id/likes", get(get_grill_likes))
}

#[derive(Debug, Deserialize)]
pub struct GetGrillsQuery {
    pub order_dir: Option<QryOrder>,
    pub start: Option<u32>,
    pub count: Option<u16>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GrillResponse {
    pub message: String,
    pub grill: GrillView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeToggleResponse {
    pub action: LikeAction,
    pub grill_id: String,
    pub message: String,
}

async fn get_grills(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Query(query): Query<GetGrillsQuery>,
) -> CtxResult<Json<Vec<GrillView>>> {
    let defaults = Pagination::default();
    let pagination = Pagination {
        order_dir: query.order_dir,
        count: query.count.unwrap_or(defaults.count),
        start: query.start.unwrap_or(defaults.start),
    };

    let grills = GrillService::new(&state.db.client, &ctx, &state.db.likes)
        .get_all(pagination)
        .await?;
    Ok(Json(grills))
}

async fn get_best_grills(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
) -> CtxResult<Json<Vec<GrillView>>> {
    let grills = GrillService::new(&state.db.client, &ctx, &state.db.likes)
        .get_best()
        .await?;
    Ok(Json(grills))
}

async fn create_grill(
    auth: BearerAuth,
    State(state): State<Arc<CtxState>>,
    JsonOrFormValidated(body): JsonOrFormValidated<GrillInput>,
) -> CtxResult<Response> {
    let grill = GrillService::new(&state.db.client, &auth.ctx, &state.db.likes)
        .create(&auth.user, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(GrillResponse {
            message: "Grill created".to_string(),
            grill,
        }),
    )
        .into_response())
}

async fn update_grill(
    auth: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(grill_id): Path<String>,
    Json(body): Json<GrillUpdateInput>,
) -> CtxResult<Json<GrillResponse>> {
    let grill = GrillService::new(&state.db.client, &auth.ctx, &state.db.likes)
        .update(&auth.user, &grill_id, body)
        .await?;

    Ok(Json(GrillResponse {
        message: "Grill updated".to_string(),
        grill,
    }))
}

async fn delete_grill(
    auth: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(grill_id): Path<String>,
) -> CtxResult<Response> {
    GrillService::new(&state.db.client, &auth.ctx, &state.db.likes)
        .delete(&auth.user, &grill_id)
        .await?;

    Ok(Json(json!({ "message": "Grill deleted" })).into_response())
}

async fn toggle_like(
    auth: BearerAuth,
    State(state): State<Arc<CtxState>>,
    Path(grill_id): Path<String>,
) -> CtxResult<Json<LikeToggleResponse>> {
    let toggled = LikeService::new(&state.db.likes, &state.db.grill_counter)
        .toggle(&auth.user.id, &grill_id)
        .await
        .map_err(CtxError::from(&auth.ctx))?;

    let message = match toggled.action {
        LikeAction::Liked => "MIC added. Rating updated.",
        LikeAction::Unliked => "MIC removed. Rating updated.",
    };

    Ok(Json(LikeToggleResponse {
        action: toggled.action,
        grill_id: toggled.grill_id,
        message: message.to_string(),
    }))
}

async fn get_grill_likes(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    Path(grill_id): Path<String>,
) -> CtxResult<Json<Vec<LikeView>>> {
    let likes = GrillService::new(&state.db.client, &ctx, &state.db.likes)
        .get_likes(&grill_id)
        .await?;
    Ok(Json(likes))
}
