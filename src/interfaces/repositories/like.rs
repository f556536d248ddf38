use crate::entities::like::LikeRecord;
use crate::middleware::error::AppResult;
use async_trait::async_trait;
use surrealdb::sql::Thing;

/// Set of (user, grill) like pairs. At most one record exists per pair.
#[async_trait]
pub trait LikesRepositoryInterface {
    async fn exists(&self, user: &Thing, grill: &Thing) -> AppResult<bool>;
    /// Fails with `AppError::DuplicateKey` when the pair is already stored.
    async fn insert(&self, user: &Thing, grill: &Thing) -> AppResult<()>;
    /// Fails with `AppError::EntityFailIdNotFound` when there was nothing to delete.
    async fn remove(&self, user: &Thing, grill: &Thing) -> AppResult<()>;
    async fn remove_all_for_grill(&self, grill: &Thing) -> AppResult<u64>;
    async fn list_by_grill(&self, grill: &Thing) -> AppResult<Vec<LikeRecord>>;
    async fn count_by_grill(&self, grill: &Thing) -> AppResult<u64>;
}
