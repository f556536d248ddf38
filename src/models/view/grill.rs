use crate::entities::community::grill_entity::Grill;
use crate::middleware::utils::string_utils::record_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct GrillView {
    pub id: String,
    pub created_by: String,
    pub name: String,
    pub description: String,
    pub mics_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Grill> for GrillView {
    fn from(grill: Grill) -> Self {
        GrillView {
            id: record_key(&grill.id),
            created_by: record_key(&grill.created_by),
            name: grill.name,
            description: grill.description,
            mics_count: grill.mics_count,
            created_at: grill.created_at,
            updated_at: grill.updated_at,
        }
    }
}
