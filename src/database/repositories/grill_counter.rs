use crate::database::client::Db;
use crate::database::surrdb_utils::with_conflict_retry;
use crate::interfaces::repositories::grill_counter::{CountDelta, GrillCounterInterface};
use crate::middleware::error::{AppError, AppResult};
use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use surrealdb::sql::Thing;

#[derive(Debug, Deserialize)]
struct MicsCount {
    mics_count: i64,
}

/// Store-side maintenance of `grill.mics_count`.
#[derive(Debug)]
pub struct GrillCounterRepository {
    client: Arc<Db>,
}

impl GrillCounterRepository {
    pub fn new(client: Arc<Db>) -> Self {
        Self { client }
    }

    async fn apply_once(&self, grill: Thing, delta: i64) -> Result<Vec<MicsCount>, surrealdb::Error> {
        // additive, evaluated by the store against the current value
        let mut res = self
            .client
            .query("UPDATE $grill SET mics_count += $delta;")
            .bind(("grill", grill))
            .bind(("delta", delta))
            .await?;
        res.take::<Vec<MicsCount>>(0)
    }
}

#[async_trait]
impl GrillCounterInterface for GrillCounterRepository {
    async fn exists(&self, grill: &Thing) -> AppResult<bool> {
        let mut res = self
            .client
            .query("RETURN record::exists($grill);")
            .bind(("grill", grill.clone()))
            .await?;
        let exists: Option<bool> = res.take(0)?;
        Ok(exists.unwrap_or(false))
    }

    async fn increment_mics_count(&self, grill: &Thing, delta: CountDelta) -> AppResult<i64> {
        let updated = with_conflict_retry("mics_count", || {
            self.apply_once(grill.clone(), delta.as_i64())
        })
        .await?;

        updated
            .first()
            .map(|row| row.mics_count)
            .ok_or_else(|| AppError::EntityFailIdNotFound {
                ident: grill.to_raw(),
            })
    }
}
