use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::PgPool;
use uuid::Uuid;

use super::store::{Store, StoreError};
use crate::models::{Feed, FeedFollow, User};

/// Classification happens here, at the driver boundary: `kind()` plus the
/// violated constraint's name. Message text is never inspected.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().map(str::to_owned);
                match (db_err.kind(), constraint) {
                    (ErrorKind::UniqueViolation, Some(c)) => StoreError::UniqueViolation(c),
                    (ErrorKind::ForeignKeyViolation, Some(c)) => StoreError::ForeignKeyViolation(c),
                    _ => StoreError::Database(db_err.message().to_string()),
                }
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, user: User) -> Result<User, StoreError> {
        let row = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, api_key, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.api_key)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn user_by_api_key(&self, api_key: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE api_key = $1")
            .bind(api_key)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn create_feed_with_follow(
        &self,
        feed: Feed,
        follow: FeedFollow,
    ) -> Result<(Feed, FeedFollow), StoreError> {
        let mut tx = self.pool.begin().await?;

        let feed = sqlx::query_as::<_, Feed>(
            r#"
            INSERT INTO feeds (id, name, url, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(feed.id)
        .bind(&feed.name)
        .bind(&feed.url)
        .bind(feed.user_id)
        .bind(feed.created_at)
        .bind(feed.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        let follow = sqlx::query_as::<_, FeedFollow>(
            r#"
            INSERT INTO feed_follows (id, user_id, feed_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(follow.id)
        .bind(follow.user_id)
        .bind(follow.feed_id)
        .bind(follow.created_at)
        .bind(follow.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((feed, follow))
    }

    async fn list_feeds(&self) -> Result<Vec<Feed>, StoreError> {
        let feeds = sqlx::query_as::<_, Feed>("SELECT * FROM feeds ORDER BY created_at")
            .fetch_all(&self.pool)
            .await?;

        Ok(feeds)
    }

    async fn create_follow(&self, follow: FeedFollow) -> Result<FeedFollow, StoreError> {
        let row = sqlx::query_as::<_, FeedFollow>(
            r#"
            INSERT INTO feed_follows (id, user_id, feed_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(follow.id)
        .bind(follow.user_id)
        .bind(follow.feed_id)
        .bind(follow.created_at)
        .bind(follow.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn follow_by_id(&self, id: Uuid) -> Result<Option<FeedFollow>, StoreError> {
        let follow = sqlx::query_as::<_, FeedFollow>("SELECT * FROM feed_follows WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(follow)
    }

    async fn delete_follow_by_id(&self, id: Uuid) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM feed_follows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn follows_for_user(&self, user_id: Uuid) -> Result<Vec<FeedFollow>, StoreError> {
        let follows = sqlx::query_as::<_, FeedFollow>(
            "SELECT * FROM feed_follows WHERE user_id = $1 ORDER BY created_at",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(follows)
    }
}
