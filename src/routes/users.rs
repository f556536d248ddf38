use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::{
    middleware::{bearer_auth::BearerAuth, error::CtxResult, mw_ctx::CtxState},
    models::view::user::UserView,
};

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/api/user/profile", get(get_profile))
}

async fn get_profile(auth: BearerAuth) -> CtxResult<Json<UserView>> {
    Ok(Json(UserView::from(auth.user)))
}
