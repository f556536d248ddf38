use std::sync::Arc;

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::{
    entities::user_auth::local_user_entity::{LocalUser, LocalUserDbService},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError},
        mw_ctx::CtxState,
    },
};

/// Authenticated caller. Rejects with 401 when the token is missing, invalid or
/// points to a user that no longer exists.
pub struct BearerAuth {
    pub user: LocalUser,
    pub ctx: Ctx,
}

#[async_trait]
impl FromRequestParts<Arc<CtxState>> for BearerAuth {
    type Rejection = CtxError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<CtxState>,
    ) -> Result<Self, Self::Rejection> {
        let ctx = Ctx::from_request_parts(parts, state).await?;
        let user_id = ctx.user_id()?;

        let user = LocalUserDbService {
            db: &state.db.client,
            ctx: &ctx,
        }
        .get_by_id(&user_id)
        .await
        .map_err(|err| match err.error {
            AppError::EntityFailIdNotFound { .. } | AppError::InvalidIdentifier { .. } => {
                ctx.to_ctx_error(AppError::AuthenticationFail)
            }
            _ => err,
        })?;

        Ok(BearerAuth { user, ctx })
    }
}
