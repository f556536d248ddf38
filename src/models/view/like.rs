use crate::entities::like::LikeRecord;
use crate::middleware::utils::string_utils::record_key;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct LikeView {
    pub user_id: String,
    pub grill_id: String,
    pub created_at: DateTime<Utc>,
}

impl From<LikeRecord> for LikeView {
    fn from(like: LikeRecord) -> Self {
        LikeView {
            user_id: record_key(&like.user),
            grill_id: record_key(&like.grill),
            created_at: like.created_at,
        }
    }
}
