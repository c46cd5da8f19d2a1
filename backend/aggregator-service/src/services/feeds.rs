use std::sync::Arc;

use chrono::Utc;
use url::Url;
use uuid::Uuid;

use crate::db::store::Store;
use crate::error::{AppError, Result};
use crate::models::{Feed, FeedFollow, User};

#[derive(Clone)]
pub struct FeedService {
    store: Arc<dyn Store>,
}

impl FeedService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers a feed and subscribes its creator in one atomic write.
    /// Two concurrent registrations of the same url race at the store; the
    /// unique constraint guarantees exactly one wins.
    pub async fn create_feed(
        &self,
        user: &User,
        name: &str,
        url: &str,
    ) -> Result<(Feed, FeedFollow)> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument(
                "name must not be empty".to_string(),
            ));
        }

        let parsed = Url::parse(url)
            .map_err(|_| AppError::InvalidArgument(format!("invalid feed url: {url}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(AppError::InvalidArgument(format!(
                "unsupported feed url scheme: {}",
                parsed.scheme()
            )));
        }

        let now = Utc::now();
        let feed = Feed {
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: url.to_string(),
            user_id: user.id,
            created_at: now,
            updated_at: now,
        };
        let follow = FeedFollow {
            id: Uuid::new_v4(),
            user_id: user.id,
            feed_id: feed.id,
            created_at: now,
            updated_at: now,
        };

        Ok(self.store.create_feed_with_follow(feed, follow).await?)
    }

    pub async fn list_feeds(&self) -> Result<Vec<Feed>> {
        Ok(self.store.list_feeds().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;
    use crate::error::ConflictKind;
    use crate::services::AccountService;

    async fn setup() -> (AccountService, FeedService, FollowProbe) {
        let store: Arc<MemoryStore> = Arc::new(MemoryStore::default());
        (
            AccountService::new(store.clone()),
            FeedService::new(store.clone()),
            FollowProbe { store },
        )
    }

    /// Direct store access for asserting on follow rows.
    struct FollowProbe {
        store: Arc<MemoryStore>,
    }

    impl FollowProbe {
        async fn follows_for(&self, user: &User) -> Vec<FeedFollow> {
            self.store.follows_for_user(user.id).await.unwrap()
        }
    }

    #[tokio::test]
    async fn create_feed_subscribes_the_creator() {
        let (accounts, feeds, probe) = setup().await;
        let user = accounts.create_user("alice").await.unwrap();

        let (feed, follow) = feeds
            .create_feed(&user, "blog", "https://example.com/rss")
            .await
            .unwrap();

        assert_eq!(feed.user_id, user.id);
        assert_eq!(follow.user_id, user.id);
        assert_eq!(follow.feed_id, feed.id);

        let follows = probe.follows_for(&user).await;
        assert_eq!(follows.len(), 1);
        assert_eq!(follows[0].id, follow.id);
    }

    #[tokio::test]
    async fn duplicate_url_conflicts_and_leaves_no_partial_rows() {
        let (accounts, feeds, probe) = setup().await;
        let alice = accounts.create_user("alice").await.unwrap();
        let bob = accounts.create_user("bob").await.unwrap();

        feeds
            .create_feed(&alice, "blog", "https://example.com/rss")
            .await
            .unwrap();

        let err = feeds
            .create_feed(&bob, "same blog", "https://example.com/rss")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Conflict(ConflictKind::DuplicateFeedUrl)
        ));

        assert_eq!(feeds.list_feeds().await.unwrap().len(), 1);
        assert!(probe.follows_for(&bob).await.is_empty());
    }

    #[tokio::test]
    async fn invalid_urls_are_rejected_before_any_write() {
        let (accounts, feeds, _) = setup().await;
        let user = accounts.create_user("alice").await.unwrap();

        for bad in ["not a url", "ftp://example.com/rss", ""] {
            let err = feeds.create_feed(&user, "blog", bad).await.unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)), "url: {bad}");
        }
        assert!(feeds.list_feeds().await.unwrap().is_empty());
    }
}
