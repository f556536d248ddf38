use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::{
    middleware::{
        ctx::Ctx, error::CtxResult, mw_ctx::CtxState,
        utils::extractor_utils::JsonOrFormValidated,
    },
    models::view::user::LoggedUserView,
    services::auth_service::{AuthLoginInput, AuthRegisterInput, AuthService},
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new()
        .route("/api/auth/login", post(signin))
        .route("/api/auth/register", post(signup))
}

async fn signin(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonOrFormValidated(body): JsonOrFormValidated<AuthLoginInput>,
) -> CtxResult<Json<LoggedUserView>> {
    let auth_service = AuthService::new(&state.db.client, &ctx, &state.jwt);
    let (token, user) = auth_service.login_password(body).await?;

    Ok(Json(LoggedUserView::from((user, token))))
}

async fn signup(
    State(state): State<Arc<CtxState>>,
    ctx: Ctx,
    JsonOrFormValidated(body): JsonOrFormValidated<AuthRegisterInput>,
) -> CtxResult<Response> {
    let auth_service = AuthService::new(&state.db.client, &ctx, &state.jwt);
    let (token, user) = auth_service.register_password(body).await?;

    Ok((StatusCode::CREATED, Json(LoggedUserView::from((user, token)))).into_response())
}
