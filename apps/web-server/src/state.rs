//! Application state - shared across all handlers.

use std::sync::Arc;

use blogly_core::ports::{PostRepository, TagRepository, UserRepository};
use blogly_infra::database::DatabaseConfig;
use blogly_infra::memory::{
    MemoryPostRepository, MemoryStore, MemoryTagRepository, MemoryUserRepository,
};

#[cfg(feature = "postgres")]
use blogly_infra::database::{
    SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository, connect, create_tables,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match Self::with_database(config).await {
                Ok(state) => return state,
                Err(e) => {
                    tracing::error!(
                        "Failed to initialize the database: {}. Using the in-memory store.",
                        e
                    );
                }
            }
        } else {
            tracing::warn!("DATABASE_URL not set. Running with the in-memory store.");
        }

        #[cfg(not(feature = "postgres"))]
        {
            let _ = db_config;
            tracing::info!("Built without the postgres feature - using the in-memory store");
        }

        Self::in_memory()
    }

    #[cfg(feature = "postgres")]
    async fn with_database(config: &DatabaseConfig) -> Result<Self, blogly_infra::database::DbErr> {
        let db = connect(config).await?;
        create_tables(&db).await?;

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            tags: Arc::new(SeaOrmTagRepository::new(db)),
        })
    }

    /// State backed entirely by the in-memory store; also used by the
    /// integration tests.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();
        Self {
            users: Arc::new(MemoryUserRepository::new(store.clone())),
            posts: Arc::new(MemoryPostRepository::new(store.clone())),
            tags: Arc::new(MemoryTagRepository::new(store)),
        }
    }
}
