use serde::{Deserialize, Serialize};
use strum::Display;
use surrealdb::sql::Thing;
use tracing::{debug, warn};

use crate::{
    entities::community::grill_entity::TABLE_NAME as GRILL_TABLE_NAME,
    interfaces::repositories::{
        grill_counter::{CountDelta, GrillCounterInterface},
        like::LikesRepositoryInterface,
    },
    middleware::{
        error::{AppError, AppResult},
        utils::string_utils::{get_table_thing, record_key},
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LikeAction {
    Liked,
    Unliked,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikeToggle {
    pub action: LikeAction,
    pub grill_id: String,
}

/// Like ("MIC") toggling. Keeps `grill.mics_count` equal to the number of like records.
///
/// The record store's unique (user, grill) index is the only serialization point between
/// concurrent requests: a lost insert race surfaces as `DuplicateKey`, a lost delete race as
/// `EntityFailIdNotFound`. Both are absorbed here and the counter is touched only by the
/// request whose record mutation actually happened.
pub struct LikeService<'a, L, G>
where
    L: LikesRepositoryInterface,
    G: GrillCounterInterface,
{
    likes_repository: &'a L,
    grill_counter: &'a G,
}

impl<'a, L, G> LikeService<'a, L, G>
where
    L: LikesRepositoryInterface + Sync,
    G: GrillCounterInterface + Sync,
{
    pub fn new(likes_repository: &'a L, grill_counter: &'a G) -> Self {
        Self {
            likes_repository,
            grill_counter,
        }
    }

    pub async fn toggle(&self, user: &Thing, grill_id: &str) -> AppResult<LikeToggle> {
        let grill = self.existing_grill(grill_id).await?;

        let action = if self.likes_repository.exists(user, &grill).await? {
            self.unlike_grill(user, &grill).await?
        } else {
            self.like_grill(user, &grill).await?
        };
        debug!(user = %user, grill = %grill, %action, "like toggled");

        Ok(LikeToggle {
            action,
            grill_id: record_key(&grill),
        })
    }

    pub async fn like(&self, user: &Thing, grill_id: &str) -> AppResult<LikeToggle> {
        let grill = self.existing_grill(grill_id).await?;
        let action = self.like_grill(user, &grill).await?;
        Ok(LikeToggle {
            action,
            grill_id: record_key(&grill),
        })
    }

    pub async fn unlike(&self, user: &Thing, grill_id: &str) -> AppResult<LikeToggle> {
        let grill = self.existing_grill(grill_id).await?;
        let action = self.unlike_grill(user, &grill).await?;
        Ok(LikeToggle {
            action,
            grill_id: record_key(&grill),
        })
    }

    async fn existing_grill(&self, grill_id: &str) -> AppResult<Thing> {
        let grill = get_table_thing(GRILL_TABLE_NAME, grill_id)?;
        if !self.grill_counter.exists(&grill).await? {
            return Err(AppError::EntityFailIdNotFound {
                ident: grill.to_raw(),
            });
        }
        Ok(grill)
    }

    async fn like_grill(&self, user: &Thing, grill: &Thing) -> AppResult<LikeAction> {
        match self.likes_repository.insert(user, grill).await {
            Ok(()) => {
                let count = self
                    .grill_counter
                    .increment_mics_count(grill, CountDelta::Increment)
                    .await?;
                debug!(user = %user, grill = %grill, count, "grill liked");
            }
            Err(AppError::DuplicateKey { .. }) => {
                warn!(user = %user, grill = %grill, "concurrent like already stored");
            }
            Err(err) => return Err(err),
        }
        Ok(LikeAction::Liked)
    }

    async fn unlike_grill(&self, user: &Thing, grill: &Thing) -> AppResult<LikeAction> {
        match self.likes_repository.remove(user, grill).await {
            Ok(()) => {
                let count = self
                    .grill_counter
                    .increment_mics_count(grill, CountDelta::Decrement)
                    .await?;
                debug!(user = %user, grill = %grill, count, "grill unliked");
            }
            Err(AppError::EntityFailIdNotFound { .. }) => {
                warn!(user = %user, grill = %grill, "like already removed concurrently");
            }
            Err(err) => return Err(err),
        }
        Ok(LikeAction::Unliked)
    }
}
