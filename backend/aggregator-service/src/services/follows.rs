use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::db::store::Store;
use crate::error::{AppError, Result};
use crate::models::{FeedFollow, User};

#[derive(Clone)]
pub struct FollowService {
    store: Arc<dyn Store>,
}

impl FollowService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Subscribes `user` to an existing feed. The (user, feed) pair is unique;
    /// a repeat subscription surfaces as a duplicate-follow conflict, and a
    /// nonexistent feed as not-found via the foreign key signal.
    pub async fn create_follow(&self, user: &User, feed_id: Uuid) -> Result<FeedFollow> {
        let now = Utc::now();
        let follow = FeedFollow {
            id: Uuid::new_v4(),
            user_id: user.id,
            feed_id,
            created_at: now,
            updated_at: now,
        };

        Ok(self.store.create_follow(follow).await?)
    }

    /// Unsubscribes by follow id. Only the owning user may delete a follow;
    /// anyone else gets `PermissionDenied` and the row stays.
    pub async fn delete_follow(&self, user: &User, follow_id: Uuid) -> Result<FeedFollow> {
        let follow = self
            .store
            .follow_by_id(follow_id)
            .await?
            .ok_or_else(|| AppError::NotFound("feed follow not found".to_string()))?;

        if follow.user_id != user.id {
            return Err(AppError::PermissionDenied(
                "feed follow belongs to another user".to_string(),
            ));
        }

        let deleted = self.store.delete_follow_by_id(follow_id).await?;
        if deleted == 0 {
            // Raced with another delete of the same row.
            return Err(AppError::NotFound("feed follow not found".to_string()));
        }

        Ok(follow)
    }

    pub async fn list_follows(&self, user: &User) -> Result<Vec<FeedFollow>> {
        Ok(self.store.follows_for_user(user.id).await?)
    }
}
