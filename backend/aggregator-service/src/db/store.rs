use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Feed, FeedFollow, User};

/// Constraint identities every `Store` implementation reports. Classification
/// downstream keys on these names, never on error message text.
pub const USERS_API_KEY_CONSTRAINT: &str = "users_api_key_key";
pub const FEEDS_URL_CONSTRAINT: &str = "feeds_url_key";
pub const FEED_FOLLOWS_PAIR_CONSTRAINT: &str = "feed_follows_user_id_feed_id_key";
pub const FEED_FOLLOWS_FEED_FK_CONSTRAINT: &str = "feed_follows_feed_id_fkey";

/// Classified storage-layer failure signal.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("database error: {0}")]
    Database(String),
}

/// Storage adapter: one method per query. Handlers and services depend on
/// this trait only, so tests can substitute [`MemoryStore`] for Postgres.
///
/// [`MemoryStore`]: crate::db::memory::MemoryStore
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(&self, user: User) -> Result<User, StoreError>;

    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, StoreError>;

    /// Inserts the feed and its creator's follow in a single atomic write.
    /// Either both rows exist afterwards or neither does.
    async fn create_feed_with_follow(
        &self,
        feed: Feed,
        follow: FeedFollow,
    ) -> Result<(Feed, FeedFollow), StoreError>;

    async fn list_feeds(&self) -> Result<Vec<Feed>, StoreError>;

    async fn create_follow(&self, follow: FeedFollow) -> Result<FeedFollow, StoreError>;

    async fn follow_by_id(&self, id: Uuid) -> Result<Option<FeedFollow>, StoreError>;

    /// Returns the number of rows removed (0 when the follow was already gone).
    async fn delete_follow_by_id(&self, id: Uuid) -> Result<u64, StoreError>;

    async fn follows_for_user(&self, user_id: Uuid) -> Result<Vec<FeedFollow>, StoreError>;
}
