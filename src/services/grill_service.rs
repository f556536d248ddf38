use serde::{Deserialize, Serialize};
use tracing::info;
use validator::Validate;

use crate::{
    database::client::Db,
    entities::{
        community::grill_entity::{
            CreateGrill, GrillDbService, BEST_GRILLS_LIMIT, TABLE_NAME as GRILL_TABLE_NAME,
        },
        user_auth::local_user_entity::LocalUser,
    },
    interfaces::repositories::like::LikesRepositoryInterface,
    middleware::{
        ctx::Ctx,
        error::{AppError, CtxError, CtxResult},
        utils::{db_utils::Pagination, string_utils::get_table_thing},
    },
    models::view::{grill::GrillView, like::LikeView},
    utils::validate_utils::{trim_option_string, trim_string},
};

#[derive(Debug, Deserialize, Serialize, Validate)]
pub struct GrillInput {
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Grill name is required"))]
    pub name: String,
    #[serde(deserialize_with = "trim_string")]
    #[validate(length(min = 1, message = "Grill description is required"))]
    pub description: String,
}

#[derive(Debug, Default, Deserialize, Serialize, Validate)]
pub struct GrillUpdateInput {
    #[serde(default, deserialize_with = "trim_option_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "trim_option_string")]
    pub description: Option<String>,
}

pub struct GrillService<'a, L>
where
    L: LikesRepositoryInterface,
{
    ctx: &'a Ctx,
    grills_repository: GrillDbService<'a>,
    likes_repository: &'a L,
}

impl<'a, L> GrillService<'a, L>
where
    L: LikesRepositoryInterface + Sync,
{
    pub fn new(db: &'a Db, ctx: &'a Ctx, likes_repository: &'a L) -> Self {
        Self {
            ctx,
            grills_repository: GrillDbService { db, ctx },
            likes_repository,
        }
    }

    pub async fn create(&self, user: &LocalUser, input: GrillInput) -> CtxResult<GrillView> {
        input.validate().map_err(CtxError::from(self.ctx))?;

        let grill = self
            .grills_repository
            .create(CreateGrill {
                id: GrillDbService::new_id(),
                created_by: user.id.clone(),
                name: input.name,
                description: input.description,
            })
            .await?;

        info!(grill = %grill.id, user = %user.id, "grill created");
        Ok(grill.into())
    }

    pub async fn get_all(&self, pagination: Pagination) -> CtxResult<Vec<GrillView>> {
        let grills = self.grills_repository.get_list(pagination).await?;
        Ok(grills.into_iter().map(GrillView::from).collect())
    }

    pub async fn get_best(&self) -> CtxResult<Vec<GrillView>> {
        let grills = self.grills_repository.get_best(BEST_GRILLS_LIMIT).await?;
        Ok(grills.into_iter().map(GrillView::from).collect())
    }

    pub async fn update(
        &self,
        user: &LocalUser,
        grill_id: &str,
        input: GrillUpdateInput,
    ) -> CtxResult<GrillView> {
        let id = get_table_thing(GRILL_TABLE_NAME, grill_id).map_err(CtxError::from(self.ctx))?;
        let grill = self.grills_repository.get(&id).await?;

        if grill.created_by != user.id {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        let name = input.name.unwrap_or(grill.name);
        let description = input.description.unwrap_or(grill.description);
        let updated = self
            .grills_repository
            .update(&grill.id, &name, &description)
            .await?;

        Ok(updated.into())
    }

    /// Owner or admin. Like records of the grill are removed after the grill itself.
    pub async fn delete(&self, user: &LocalUser, grill_id: &str) -> CtxResult<()> {
        let id = get_table_thing(GRILL_TABLE_NAME, grill_id).map_err(CtxError::from(self.ctx))?;
        let grill = self.grills_repository.get(&id).await?;

        if grill.created_by != user.id && !user.is_admin() {
            return Err(self.ctx.to_ctx_error(AppError::Forbidden));
        }

        self.grills_repository.delete(&grill.id).await?;
        let removed = self
            .likes_repository
            .remove_all_for_grill(&grill.id)
            .await
            .map_err(CtxError::from(self.ctx))?;

        info!(grill = %grill.id, user = %user.id, removed_likes = removed, "grill deleted");
        Ok(())
    }

    /// Empty for grills that never existed or were deleted.
    pub async fn get_likes(&self, grill_id: &str) -> CtxResult<Vec<LikeView>> {
        let id = get_table_thing(GRILL_TABLE_NAME, grill_id).map_err(CtxError::from(self.ctx))?;
        let likes = self
            .likes_repository
            .list_by_grill(&id)
            .await
            .map_err(CtxError::from(self.ctx))?;
        Ok(likes.into_iter().map(LikeView::from).collect())
    }
}
