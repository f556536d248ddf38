use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;
use surrealdb::sql::{Id, Thing};

use crate::database::client::Db;
use crate::database::surrdb_utils::is_index_violation;
use crate::middleware::{
    ctx::Ctx,
    error::{AppError, CtxError, CtxResult},
    utils::{db_utils::with_not_found_err, string_utils::{get_table_thing, record_key}},
};

pub const TABLE_NAME: &str = "local_user";
const INDEX_EMAIL: &str = "local_user_email_idx";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalUser {
    pub id: Thing,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl LocalUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Serialize)]
pub struct CreateLocalUser {
    pub id: Thing,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Role,
}

pub struct LocalUserDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

impl<'a> LocalUserDbService<'a> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS email ON TABLE {TABLE_NAME} TYPE string VALUE string::lowercase(string::trim($value)) ASSERT string::is::email($value);
    DEFINE INDEX IF NOT EXISTS {INDEX_EMAIL} ON TABLE {TABLE_NAME} COLUMNS email UNIQUE;
    DEFINE FIELD IF NOT EXISTS password ON TABLE {TABLE_NAME} TYPE string;
    DEFINE FIELD IF NOT EXISTS full_name ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS phone ON TABLE {TABLE_NAME} TYPE option<string>;
    DEFINE FIELD IF NOT EXISTS role ON TABLE {TABLE_NAME} TYPE string ASSERT $value INSIDE ['user', 'admin'];
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    ");
        self.db.query(sql).await?.check()?;
        Ok(())
    }

    pub fn new_id() -> Thing {
        Thing::from((TABLE_NAME, Id::ulid()))
    }

    pub async fn create(&self, data: CreateLocalUser) -> CtxResult<LocalUser> {
        let created: Option<LocalUser> = self
            .db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(|e| match e {
                e if is_index_violation(&e, INDEX_EMAIL) => {
                    self.ctx.to_ctx_error(AppError::UserAlreadyExists)
                }
                e => CtxError::from(self.ctx)(e),
            })?;
        with_not_found_err(created, self.ctx, TABLE_NAME)
    }

    pub async fn get_by_id(&self, id: &str) -> CtxResult<LocalUser> {
        let thing = get_table_thing(TABLE_NAME, id).map_err(CtxError::from(self.ctx))?;
        let user: Option<LocalUser> = self
            .db
            .select((TABLE_NAME, record_key(&thing)))
            .await
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(user, self.ctx, &thing.to_raw())
    }

    pub async fn get_by_email(&self, email: &str) -> CtxResult<Option<LocalUser>> {
        let mut res = self
            .db
            .query(format!(
                "SELECT * FROM {TABLE_NAME} WHERE email = string::lowercase(string::trim($email)) LIMIT 1;"
            ))
            .bind(("email", email.to_string()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let user = res
            .take::<Option<LocalUser>>(0)
            .map_err(CtxError::from(self.ctx))?;
        Ok(user)
    }
}
