use crate::database::client::Db;
use crate::database::surrdb_utils::{is_index_violation, is_missing_record, with_conflict_retry};
use crate::database::table_names::LIKE_TABLE_NAME;
use crate::entities::community::grill_entity::TABLE_NAME as GRILL_TABLE_NAME;
use crate::entities::like::LikeRecord;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::interfaces::repositories::like::LikesRepositoryInterface;
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use surrealdb::sql::Thing;

pub(crate) const LIKE_UNIQUE_INDEX: &str = "in_out_unique_idx";

#[derive(Debug, Deserialize)]
struct CountRow {
    count: u64,
}

#[derive(Debug)]
pub struct LikesRepository {
    client: Arc<Db>,
}

impl LikesRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    pub(in crate::database) async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {LIKE_TABLE_NAME} TYPE RELATION IN {USER_TABLE_NAME} OUT {GRILL_TABLE_NAME} ENFORCED SCHEMAFULL PERMISSIONS NONE;
    DEFINE INDEX IF NOT EXISTS {LIKE_UNIQUE_INDEX} ON {LIKE_TABLE_NAME} FIELDS in, out UNIQUE;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {LIKE_TABLE_NAME} TYPE datetime DEFAULT time::now() READONLY;
    ");
        self.client.query(sql).await?.check()?;
        Ok(())
    }

    async fn relate_once(&self, user: Thing, grill: Thing) -> Result<(), surrealdb::Error> {
        self.client
            .query(format!("RELATE $user->{LIKE_TABLE_NAME}->$grill RETURN NONE;"))
            .bind(("user", user))
            .bind(("grill", grill))
            .await?
            .check()?;
        Ok(())
    }

    async fn delete_once(&self, user: Thing, grill: Thing) -> Result<Vec<LikeRecord>, surrealdb::Error> {
        let mut res = self
            .client
            .query(format!(
                "DELETE {LIKE_TABLE_NAME} WHERE in = $user AND out = $grill RETURN BEFORE;"
            ))
            .bind(("user", user))
            .bind(("grill", grill))
            .await?;
        res.take::<Vec<LikeRecord>>(0)
    }

    async fn delete_all_once(&self, grill: Thing) -> Result<Vec<LikeRecord>, surrealdb::Error> {
        let mut res = self
            .client
            .query(format!("DELETE {LIKE_TABLE_NAME} WHERE out = $grill RETURN BEFORE;"))
            .bind(("grill", grill))
            .await?;
        res.take::<Vec<LikeRecord>>(0)
    }
}

fn pair_key(user: &Thing, grill: &Thing) -> String {
    format!("({}, {})", user.to_raw(), grill.to_raw())
}

#[async_trait]
impl LikesRepositoryInterface for LikesRepository {
    async fn exists(&self, user: &Thing, grill: &Thing) -> AppResult<bool> {
        let mut res = self
            .client
            .query(format!(
                "SELECT VALUE id FROM {LIKE_TABLE_NAME} WHERE in = $user AND out = $grill LIMIT 1;"
            ))
            .bind(("user", user.clone()))
            .bind(("grill", grill.clone()))
            .await?;
        let ids = res.take::<Vec<Thing>>(0)?;
        Ok(!ids.is_empty())
    }

    async fn insert(&self, user: &Thing, grill: &Thing) -> AppResult<()> {
        with_conflict_retry("like_insert", || self.relate_once(user.clone(), grill.clone()))
            .await
            .map_err(|err| {
                if is_index_violation(&err, LIKE_UNIQUE_INDEX) {
                    AppError::DuplicateKey {
                        key: pair_key(user, grill),
                    }
                } else if is_missing_record(&err, &grill.to_raw()) {
                    AppError::EntityFailIdNotFound {
                        ident: grill.to_raw(),
                    }
                } else {
                    err.into()
                }
            })
    }

    async fn remove(&self, user: &Thing, grill: &Thing) -> AppResult<()> {
        let removed =
            with_conflict_retry("like_remove", || self.delete_once(user.clone(), grill.clone()))
                .await?;
        if removed.is_empty() {
            return Err(AppError::EntityFailIdNotFound {
                ident: pair_key(user, grill),
            });
        }
        Ok(())
    }

    async fn remove_all_for_grill(&self, grill: &Thing) -> AppResult<u64> {
        let removed =
            with_conflict_retry("like_remove_all", || self.delete_all_once(grill.clone())).await?;
        Ok(removed.len() as u64)
    }

    async fn list_by_grill(&self, grill: &Thing) -> AppResult<Vec<LikeRecord>> {
        let mut res = self
            .client
            .query(format!(
                "SELECT * FROM {LIKE_TABLE_NAME} WHERE out = $grill ORDER BY created_at ASC;"
            ))
            .bind(("grill", grill.clone()))
            .await?;
        Ok(res.take::<Vec<LikeRecord>>(0)?)
    }

    async fn count_by_grill(&self, grill: &Thing) -> AppResult<u64> {
        let mut res = self
            .client
            .query(format!(
                "SELECT count() AS count FROM {LIKE_TABLE_NAME} WHERE out = $grill GROUP ALL;"
            ))
            .bind(("grill", grill.clone()))
            .await?;
        let row = res.take::<Option<CountRow>>(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }
}
