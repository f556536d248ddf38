use std::sync::Arc;

use surrealdb::engine::any::{connect, Any};
use surrealdb::opt::auth::Root;
use surrealdb::Surreal;
use tracing::info;

use crate::database::repositories::{grill_counter::GrillCounterRepository, like::LikesRepository};
use crate::middleware::error::AppResult;

pub type Db = Surreal<Any>;

#[derive(Debug)]
pub struct DbConfig<'a> {
    pub url: &'a str,
    pub database: &'a str,
    pub namespace: &'a str,
    pub username: Option<&'a str>,
    pub password: Option<&'a str>,
}

/// Storage handle opened once at start and passed to every request through `CtxState`.
#[derive(Debug)]
pub struct Database {
    pub client: Arc<Db>,
    pub likes: LikesRepository,
    pub grill_counter: GrillCounterRepository,
}

impl Database {
    pub async fn connect(config: DbConfig<'_>) -> AppResult<Self> {
        info!(url = config.url, ns = config.namespace, db = config.database, "->> connecting DB");
        let conn = connect(config.url).await?;

        if let (Some(password), Some(username)) = (config.password, config.username) {
            conn.signin(Root { username, password }).await?;
        }

        conn.use_ns(config.namespace)
            .use_db(config.database)
            .await?;

        let version = conn.version().await?;
        info!("->> connected DB version: {version}");

        let client = Arc::new(conn);
        Ok(Self {
            likes: LikesRepository::new(client.clone()),
            grill_counter: GrillCounterRepository::new(client.clone()),
            client,
        })
    }

    pub async fn run_migrations(&self) -> AppResult<()> {
        self.likes.mutate_db().await?;
        Ok(())
    }
}
