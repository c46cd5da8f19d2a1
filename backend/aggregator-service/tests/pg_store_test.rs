//! Postgres-backed store tests. These run against a real database and are
//! skipped unless TEST_DATABASE_URL points at one (see docker-compose in CI).

use chrono::Utc;
use uuid::Uuid;

use aggregator_service::db::store::{
    Store, StoreError, FEEDS_URL_CONSTRAINT, FEED_FOLLOWS_FEED_FK_CONSTRAINT,
    FEED_FOLLOWS_PAIR_CONSTRAINT,
};
use aggregator_service::db::{create_pool, postgres::PgStore, run_migrations};
use aggregator_service::models::{Feed, FeedFollow, User};

async fn test_store() -> Option<PgStore> {
    let url = match std::env::var("TEST_DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("[tests] TEST_DATABASE_URL not set; skipping Postgres store tests");
            return None;
        }
    };

    let pool = create_pool(&url, 5).await.expect("connect to test database");
    run_migrations(&pool).await.expect("run migrations");
    Some(PgStore::new(pool))
}

fn new_user(name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.to_string(),
        // 64 hex chars, unique per call
        api_key: format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple()),
        created_at: now,
        updated_at: now,
    }
}

fn new_feed(user: &User, url: &str) -> Feed {
    let now = Utc::now();
    Feed {
        id: Uuid::new_v4(),
        name: "some feed".to_string(),
        url: url.to_string(),
        user_id: user.id,
        created_at: now,
        updated_at: now,
    }
}

fn new_follow(user: &User, feed_id: Uuid) -> FeedFollow {
    let now = Utc::now();
    FeedFollow {
        id: Uuid::new_v4(),
        user_id: user.id,
        feed_id,
        created_at: now,
        updated_at: now,
    }
}

fn unique_url() -> String {
    format!("https://example.com/{}.xml", Uuid::new_v4())
}

#[tokio::test]
async fn duplicate_url_reports_the_feed_url_constraint_and_rolls_back() {
    let Some(store) = test_store().await else {
        return;
    };

    let alice = store.create_user(new_user("alice")).await.unwrap();
    let bob = store.create_user(new_user("bob")).await.unwrap();
    let url = unique_url();

    let feed = new_feed(&alice, &url);
    let follow = new_follow(&alice, feed.id);
    store.create_feed_with_follow(feed, follow).await.unwrap();

    let feed = new_feed(&bob, &url);
    let follow = new_follow(&bob, feed.id);
    let err = store
        .create_feed_with_follow(feed, follow)
        .await
        .unwrap_err();
    match err {
        StoreError::UniqueViolation(c) => assert_eq!(c, FEEDS_URL_CONSTRAINT),
        other => panic!("expected unique violation, got {other:?}"),
    }

    // The transaction rolled back: no follow row for the losing writer.
    assert!(store.follows_for_user(bob.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn duplicate_follow_pair_reports_the_pair_constraint() {
    let Some(store) = test_store().await else {
        return;
    };

    let alice = store.create_user(new_user("alice")).await.unwrap();
    let bob = store.create_user(new_user("bob")).await.unwrap();

    let feed = new_feed(&alice, &unique_url());
    let follow = new_follow(&alice, feed.id);
    let (feed, _) = store.create_feed_with_follow(feed, follow).await.unwrap();

    store
        .create_follow(new_follow(&bob, feed.id))
        .await
        .unwrap();
    let err = store
        .create_follow(new_follow(&bob, feed.id))
        .await
        .unwrap_err();
    match err {
        StoreError::UniqueViolation(c) => assert_eq!(c, FEED_FOLLOWS_PAIR_CONSTRAINT),
        other => panic!("expected unique violation, got {other:?}"),
    }
}

#[tokio::test]
async fn follow_of_missing_feed_reports_the_feed_foreign_key() {
    let Some(store) = test_store().await else {
        return;
    };

    let bob = store.create_user(new_user("bob")).await.unwrap();

    let err = store
        .create_follow(new_follow(&bob, Uuid::new_v4()))
        .await
        .unwrap_err();
    match err {
        StoreError::ForeignKeyViolation(c) => assert_eq!(c, FEED_FOLLOWS_FEED_FK_CONSTRAINT),
        other => panic!("expected foreign key violation, got {other:?}"),
    }
}

#[tokio::test]
async fn delete_follow_by_id_reports_rows_affected() {
    let Some(store) = test_store().await else {
        return;
    };

    let alice = store.create_user(new_user("alice")).await.unwrap();
    let feed = new_feed(&alice, &unique_url());
    let follow = new_follow(&alice, feed.id);
    let (_, follow) = store.create_feed_with_follow(feed, follow).await.unwrap();

    assert_eq!(store.delete_follow_by_id(follow.id).await.unwrap(), 1);
    assert_eq!(store.delete_follow_by_id(follow.id).await.unwrap(), 0);
}
