use crate::middleware::error::AppResult;
use async_trait::async_trait;
use surrealdb::sql::Thing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountDelta {
    Increment,
    Decrement,
}

impl CountDelta {
    pub fn as_i64(self) -> i64 {
        match self {
            CountDelta::Increment => 1,
            CountDelta::Decrement => -1,
        }
    }
}

#[async_trait]
pub trait GrillCounterInterface {
    async fn exists(&self, grill: &Thing) -> AppResult<bool>;
    /// Applies `delta` to the stored `mics_count` and returns the new value.
    async fn increment_mics_count(&self, grill: &Thing, delta: CountDelta) -> AppResult<i64>;
}
