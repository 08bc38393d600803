//! Application state - shared across all handlers.

use std::sync::Arc;
use std::time::Duration;

use murmur_core::ports::{
    Cache, Clock, CommentRepository, FollowRepository, GroupRepository, PostRepository,
    UserRepository,
};
use murmur_infra::cache::InMemoryCache;
use murmur_infra::clock::SystemClock;
use murmur_infra::database::{
    MemoryCommentRepository, MemoryFollowRepository, MemoryGroupRepository, MemoryPostRepository,
    MemoryStore, MemoryUserRepository,
};

#[cfg(feature = "postgres")]
use murmur_infra::database::{
    DatabaseConnections, PostgresCommentRepository, PostgresFollowRepository,
    PostgresGroupRepository, PostgresPostRepository, PostgresUserRepository,
};

use crate::config::AppConfig;
use crate::feed_cache::HomeFeedCache;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub groups: Arc<dyn GroupRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub follows: Arc<dyn FollowRepository>,
    pub home_feed: HomeFeedCache,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match DatabaseConnections::init(db_config).await {
                Ok(connections) => {
                    let db = connections.main;
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(db.clone())),
                        groups: Arc::new(PostgresGroupRepository::new(db.clone())),
                        posts: Arc::new(PostgresPostRepository::new(db.clone())),
                        comments: Arc::new(PostgresCommentRepository::new(db.clone())),
                        follows: Arc::new(PostgresFollowRepository::new(db)),
                        home_feed: HomeFeedCache::new(
                            Arc::new(InMemoryCache::new()),
                            config.feed_cache_ttl,
                        ),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        #[cfg(feature = "postgres")]
        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }

        Self::in_memory_with_clock(Arc::new(SystemClock), config.feed_cache_ttl)
    }

    /// In-memory state with an injectable clock, used by tests to drive the
    /// home-feed cache across its TTL.
    pub fn in_memory_with_clock(clock: Arc<dyn Clock>, feed_cache_ttl: Duration) -> Self {
        let store = MemoryStore::new();
        let cache: Arc<dyn Cache> = Arc::new(InMemoryCache::with_clock(clock));

        tracing::info!("Application state initialized (in-memory)");

        Self {
            users: Arc::new(MemoryUserRepository(store.clone())),
            groups: Arc::new(MemoryGroupRepository(store.clone())),
            posts: Arc::new(MemoryPostRepository(store.clone())),
            comments: Arc::new(MemoryCommentRepository(store.clone())),
            follows: Arc::new(MemoryFollowRepository(store)),
            home_feed: HomeFeedCache::new(cache, feed_cache_ttl),
        }
    }
}
