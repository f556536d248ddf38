use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    database::client::Db,
    entities::user_auth::local_user_entity::{CreateLocalUser, LocalUser, LocalUserDbService, Role},
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        utils::string_utils::record_key,
    },
    utils::{
        hash::{hash_password, verify_password},
        jwt::JWT,
        validate_utils::{trim_option_string, trim_string, validate_phone_number},
    },
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthRegisterInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Min 6 characters"))]
    pub password: String,
    #[serde(default, deserialize_with = "trim_option_string")]
    #[validate(length(min = 1, max = 100, message = "Max 100 characters"))]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "trim_option_string")]
    #[validate(custom(function = validate_phone_number))]
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct AuthLoginInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(email(message = "Must be a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

pub struct AuthService<'a> {
    ctx: &'a Ctx,
    jwt: &'a JWT,
    user_repository: LocalUserDbService<'a>,
}

impl<'a> AuthService<'a> {
    pub fn new(db: &'a Db, ctx: &'a Ctx, jwt: &'a JWT) -> AuthService<'a> {
        AuthService {
            ctx,
            jwt,
            user_repository: LocalUserDbService { db, ctx },
        }
    }

    pub async fn login_password(&self, input: AuthLoginInput) -> CtxResult<(String, LocalUser)> {
        input.validate().map_err(CtxError::from(self.ctx))?;

        let user = self
            .user_repository
            .get_by_email(&input.email)
            .await?
            .ok_or_else(|| self.ctx.to_ctx_error(AppError::AuthenticationFail))?;

        if !verify_password(&user.password, &input.password) {
            return Err(self.ctx.to_ctx_error(AppError::AuthenticationFail));
        }

        let token = self.build_jwt_token(&user)?;
        Ok((token, user))
    }

    pub async fn register_password(
        &self,
        input: AuthRegisterInput,
    ) -> CtxResult<(String, LocalUser)> {
        input.validate().map_err(CtxError::from(self.ctx))?;

        if self.user_repository.get_by_email(&input.email).await?.is_some() {
            return Err(self.ctx.to_ctx_error(AppError::UserAlreadyExists));
        }

        let password = hash_password(&input.password).map_err(CtxError::from(self.ctx))?;
        let user = self
            .user_repository
            .create(CreateLocalUser {
                id: LocalUserDbService::new_id(),
                email: input.email,
                password,
                full_name: input.full_name,
                phone: input.phone,
                role: Role::User,
            })
            .await?;

        info!(user = %user.id, role = %user.role, "user registered");
        let token = self.build_jwt_token(&user)?;
        Ok((token, user))
    }

    /// Creates the admin account on first start. Does nothing when it already exists.
    pub async fn create_default_admin(&self, email: &str, password: &str) -> CtxResult<()> {
        if self.user_repository.get_by_email(email).await?.is_some() {
            return Ok(());
        }

        let password = hash_password(password).map_err(CtxError::from(self.ctx))?;
        let admin = self
            .user_repository
            .create(CreateLocalUser {
                id: LocalUserDbService::new_id(),
                email: email.to_string(),
                password,
                full_name: Some("Admin".to_string()),
                phone: None,
                role: Role::Admin,
            })
            .await?;

        info!(user = %admin.id, role = %admin.role, "default admin created");
        Ok(())
    }

    fn build_jwt_token(&self, user: &LocalUser) -> CtxResult<String> {
        self.jwt
            .create_by_login(&record_key(&user.id))
            .map_err(CtxError::from(self.ctx))
    }
}
