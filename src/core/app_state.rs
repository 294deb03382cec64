use std::sync::Arc;

use anyhow::Result;

use crate::auth::AuthService;
use crate::cart::CartStore;
use crate::core::{aliases::DbPool, config::Config, db};

/// Shared handles every handler works against.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: DbPool,
    pub carts: Arc<CartStore>,
    pub auth: AuthService,
}

impl AppState {
    pub async fn init(config: &Config) -> Result<Self> {
        Ok(Self {
            db_pool: db::connect(&config.database.url).await?,
            carts: Arc::new(CartStore::new()),
            auth: AuthService::new(&config.auth),
        })
    }
}
