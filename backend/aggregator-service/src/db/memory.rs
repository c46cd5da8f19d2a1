//! In-process fake store for tests. Enforces the same uniqueness and
//! referential rules as Postgres and reports them under the same constraint
//! identities, so conflict paths behave identically against either backend.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::store::{
    Store, StoreError, FEEDS_URL_CONSTRAINT, FEED_FOLLOWS_FEED_FK_CONSTRAINT,
    FEED_FOLLOWS_PAIR_CONSTRAINT, USERS_API_KEY_CONSTRAINT,
};
use crate::models::{Feed, FeedFollow, User};

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    users: HashMap<Uuid, User>,
    feeds: HashMap<Uuid, Feed>,
    follows: HashMap<Uuid, FeedFollow>,
}

impl Inner {
    fn check_feed_url_free(&self, url: &str) -> Result<(), StoreError> {
        if self.feeds.values().any(|f| f.url == url) {
            return Err(StoreError::UniqueViolation(
                FEEDS_URL_CONSTRAINT.to_string(),
            ));
        }
        Ok(())
    }

    fn check_follow_insertable(&self, follow: &FeedFollow) -> Result<(), StoreError> {
        if !self.feeds.contains_key(&follow.feed_id) {
            return Err(StoreError::ForeignKeyViolation(
                FEED_FOLLOWS_FEED_FK_CONSTRAINT.to_string(),
            ));
        }
        if self
            .follows
            .values()
            .any(|f| f.user_id == follow.user_id && f.feed_id == follow.feed_id)
        {
            return Err(StoreError::UniqueViolation(
                FEED_FOLLOWS_PAIR_CONSTRAINT.to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        if inner.users.values().any(|u| u.api_key == user.api_key) {
            return Err(StoreError::UniqueViolation(
                USERS_API_KEY_CONSTRAINT.to_string(),
            ));
        }
        inner.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.users.values().find(|u| u.api_key == api_key).cloned())
    }

    async fn create_feed_with_follow(
        &self,
        feed: Feed,
        follow: FeedFollow,
    ) -> Result<(Feed, FeedFollow), StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        // All checks run before either insert: both rows land or neither does.
        inner.check_feed_url_free(&feed.url)?;
        if follow.user_id != feed.user_id || follow.feed_id != feed.id {
            return Err(StoreError::Database(
                "follow does not reference the inserted feed".to_string(),
            ));
        }
        inner.feeds.insert(feed.id, feed.clone());
        inner.follows.insert(follow.id, follow.clone());
        Ok((feed, follow))
    }

    async fn list_feeds(&self) -> Result<Vec<Feed>, StoreError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        let mut feeds: Vec<Feed> = inner.feeds.values().cloned().collect();
        feeds.sort_by_key(|f| f.created_at);
        Ok(feeds)
    }

    async fn create_follow(&self, follow: FeedFollow) -> Result<FeedFollow, StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        inner.check_follow_insertable(&follow)?;
        inner.follows.insert(follow.id, follow.clone());
        Ok(follow)
    }

    async fn follow_by_id(&self, id: Uuid) -> Result<Option<FeedFollow>, StoreError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(inner.follows.get(&id).cloned())
    }

    async fn delete_follow_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let mut inner = self.inner.lock().expect("memory store lock poisoned");
        Ok(u64::from(inner.follows.remove(&id).is_some()))
    }

    async fn follows_for_user(&self, user_id: Uuid) -> Result<Vec<FeedFollow>, StoreError> {
        let inner = self.inner.lock().expect("memory store lock poisoned");
        let mut follows: Vec<FeedFollow> = inner
            .follows
            .values()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect();
        follows.sort_by_key(|f| f.created_at);
        Ok(follows)
    }
}
