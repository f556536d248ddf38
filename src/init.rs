use std::{sync::Arc, time::Duration};

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::AppConfig,
    database::client::Database,
    entities::{
        community::grill_entity::GrillDbService, user_auth::local_user_entity::LocalUserDbService,
    },
    middleware::{ctx::Ctx, error::AppResult, mw_ctx::CtxState},
    routes::{auth_routes, grills, users},
    services::auth_service::AuthService,
};

pub async fn create_default_admin(ctx_state: &CtxState) -> AppResult<()> {
    let Some(password) = ctx_state.start_password.as_deref() else {
        info!("START_PASSWORD not set, skipping default admin");
        return Ok(());
    };

    let c = Ctx::new(Ok("create_default_admin".to_string()));
    AuthService::new(&ctx_state.db.client, &c, &ctx_state.jwt)
        .create_default_admin(&ctx_state.admin_email, password)
        .await?;
    Ok(())
}

pub async fn run_migrations(database: &Database) -> AppResult<()> {
    let db = database.client.clone();
    let c = Ctx::new(Ok("migrations".to_string()));

    LocalUserDbService { db: &db, ctx: &c }.mutate_db().await?;
    GrillDbService { db: &db, ctx: &c }.mutate_db().await?;
    // like relation references both tables above
    database.run_migrations().await?;
    info!("migrations applied");
    Ok(())
}

pub fn main_router(ctx_state: &Arc<CtxState>, config: &AppConfig) -> Router {
    Router::new()
        .route("/hc", get(get_hc))
        .merge(auth_routes::routes())
        .merge(users::routes())
        .merge(grills::routes())
        .with_state(ctx_state.clone())
        .layer(cors_layer(config.cors_origin.as_deref()))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(origin: Option<&str>) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    match origin.map(HeaderValue::from_str) {
        Some(Ok(value)) => cors.allow_origin(value),
        Some(Err(err)) => {
            warn!("invalid CORS_ORIGIN, allowing any origin: {err}");
            cors.allow_origin(Any)
        }
        None => cors.allow_origin(Any),
    }
}

async fn get_hc() -> Response {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    (StatusCode::OK, format!("v{}", VERSION)).into_response()
}
