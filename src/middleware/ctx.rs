use std::sync::Arc;

use super::error::{AppError, AppResult, CtxError, CtxResult};
use crate::middleware::mw_ctx::CtxState;
use crate::utils::jwt::TokenType;
use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::headers::{authorization::Bearer, Authorization, HeaderMapExt};
use uuid::Uuid;

#[derive(Clone, Debug)]
pub struct Ctx {
    result_user_id: AppResult<String>,
    req_id: Uuid,
}

impl Ctx {
    pub fn new(result_user_id: AppResult<String>) -> Self {
        Self {
            result_user_id,
            req_id: Uuid::new_v4(),
        }
    }

    pub fn req_id(&self) -> Uuid {
        self.req_id
    }

    pub fn user_id(&self) -> CtxResult<String> {
        self.result_user_id
            .clone()
            .map_err(|error| self.to_ctx_error(error))
    }

    pub fn to_ctx_error(&self, error: AppError) -> CtxError {
        CtxError {
            error,
            req_id: self.req_id,
        }
    }
}

/// Never rejects: public routes get a `Ctx` whose user id carries the auth failure.
#[async_trait]
impl FromRequestParts<Arc<CtxState>> for Ctx {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let user_id = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(token) => state
                .jwt
                .decode_by_type(token.token(), TokenType::Login)
                .map(|claims| claims.auth),
            None => Err(AppError::AuthFailNoJwt),
        };

        Ok(Ctx::new(user_id))
    }
}
