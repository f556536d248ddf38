use crate::config::AppConfig;
use crate::database::client::Database;
use crate::utils::jwt::JWT;
use chrono::Duration;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

pub struct CtxState {
    pub db: Database,
    pub start_password: Option<String>,
    pub admin_email: String,
    pub jwt: JWT,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CtxState")
            .field("admin_email", &self.admin_email)
            .finish_non_exhaustive()
    }
}

pub fn create_ctx_state(db: Database, config: &AppConfig) -> Arc<CtxState> {
    Arc::new(CtxState {
        db,
        start_password: config.init_server_password.clone(),
        admin_email: config.admin_email.clone(),
        jwt: JWT::new(
            config.jwt_secret.clone(),
            Duration::days(config.jwt_duration_days),
        ),
    })
}
