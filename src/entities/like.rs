use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;

/// `local_user -> like -> grill` edge. Its existence is the "liked" state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeRecord {
    pub id: Thing,
    #[serde(rename = "in")]
    pub user: Thing,
    #[serde(rename = "out")]
    pub grill: Thing,
    pub created_at: DateTime<Utc>,
}
