use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::{Id, Thing};

use crate::database::client::Db;
use crate::entities::user_auth::local_user_entity::TABLE_NAME as USER_TABLE_NAME;
use crate::middleware::{
    ctx::Ctx,
    error::{AppError, CtxError, CtxResult},
    utils::{
        db_utils::{with_not_found_err, Pagination, QryOrder},
        string_utils::record_key,
    },
};

pub const TABLE_NAME: &str = "grill";
const INDEX_CREATED_BY: &str = "grill_created_by_idx";
const INDEX_MICS_COUNT: &str = "grill_mics_count_idx";
pub const BEST_GRILLS_LIMIT: u16 = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grill {
    // ulid, sortable by creation time
    pub id: Thing,
    pub created_by: Thing,
    pub name: String,
    pub description: String,
    pub mics_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CreateGrill {
    pub id: Thing,
    pub created_by: Thing,
    pub name: String,
    pub description: String,
}

pub struct GrillDbService<'a> {
    pub db: &'a Db,
    pub ctx: &'a Ctx,
}

impl<'a> GrillDbService<'a> {
    pub async fn mutate_db(&self) -> Result<(), AppError> {
        let sql = format!("
    DEFINE TABLE IF NOT EXISTS {TABLE_NAME} SCHEMAFULL;
    DEFINE FIELD IF NOT EXISTS created_by ON TABLE {TABLE_NAME} TYPE record<{USER_TABLE_NAME}> READONLY;
    DEFINE INDEX IF NOT EXISTS {INDEX_CREATED_BY} ON TABLE {TABLE_NAME} COLUMNS created_by;
    DEFINE FIELD IF NOT EXISTS name ON TABLE {TABLE_NAME} TYPE string VALUE string::trim($value) ASSERT string::len($value) > 0;
    DEFINE FIELD IF NOT EXISTS description ON TABLE {TABLE_NAME} TYPE string ASSERT string::len(string::trim($value)) > 0;
    DEFINE FIELD IF NOT EXISTS mics_count ON TABLE {TABLE_NAME} TYPE int DEFAULT 0;
    DEFINE INDEX IF NOT EXISTS {INDEX_MICS_COUNT} ON TABLE {TABLE_NAME} COLUMNS mics_count;
    DEFINE FIELD IF NOT EXISTS created_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE $before OR time::now();
    DEFINE FIELD IF NOT EXISTS updated_at ON TABLE {TABLE_NAME} TYPE datetime DEFAULT time::now() VALUE time::now();
    ");
        self.db.query(sql).await?.check()?;
        Ok(())
    }

    pub fn new_id() -> Thing {
        Thing::from((TABLE_NAME, Id::ulid()))
    }

    pub async fn create(&self, data: CreateGrill) -> CtxResult<Grill> {
        let created: Option<Grill> = self
            .db
            .create(TABLE_NAME)
            .content(data)
            .await
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(created, self.ctx, TABLE_NAME)
    }

    pub async fn get(&self, id: &Thing) -> CtxResult<Grill> {
        let grill: Option<Grill> = self
            .db
            .select((TABLE_NAME, record_key(id)))
            .await
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(grill, self.ctx, &id.to_raw())
    }

    pub async fn get_list(&self, pagination: Pagination) -> CtxResult<Vec<Grill>> {
        let order_dir = pagination.order_dir.unwrap_or(QryOrder::DESC);
        let query = format!(
            "SELECT * FROM {TABLE_NAME} ORDER BY created_at {order_dir}, id {order_dir} LIMIT $limit START $start;"
        );
        let mut res = self
            .db
            .query(query)
            .bind(("limit", pagination.count))
            .bind(("start", pagination.start))
            .await
            .map_err(CtxError::from(self.ctx))?;
        res.take::<Vec<Grill>>(0)
            .map_err(CtxError::from(self.ctx))
    }

    /// Leaderboard: most liked first, older grills win ties.
    pub async fn get_best(&self, limit: u16) -> CtxResult<Vec<Grill>> {
        let query = format!(
            "SELECT * FROM {TABLE_NAME} ORDER BY mics_count DESC, created_at ASC LIMIT $limit;"
        );
        let mut res = self
            .db
            .query(query)
            .bind(("limit", limit))
            .await
            .map_err(CtxError::from(self.ctx))?;
        res.take::<Vec<Grill>>(0)
            .map_err(CtxError::from(self.ctx))
    }

    pub async fn update(&self, id: &Thing, name: &str, description: &str) -> CtxResult<Grill> {
        let mut res = self
            .db
            .query("UPDATE ONLY $grill SET name = $name, description = $description;")
            .bind(("grill", id.clone()))
            .bind(("name", name.to_string()))
            .bind(("description", description.to_string()))
            .await
            .map_err(CtxError::from(self.ctx))?;
        let grill = res
            .take::<Option<Grill>>(0)
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(grill, self.ctx, &id.to_raw())
    }

    pub async fn delete(&self, id: &Thing) -> CtxResult<Grill> {
        let deleted: Option<Grill> = self
            .db
            .delete((TABLE_NAME, record_key(id)))
            .await
            .map_err(CtxError::from(self.ctx))?;
        with_not_found_err(deleted, self.ctx, &id.to_raw())
    }
}
