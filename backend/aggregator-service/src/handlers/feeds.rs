use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::AuthedUser;
use crate::models::{Feed, FeedFollow};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedRequest {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct CreateFeedResponse {
    pub feed: Feed,
    pub feed_follow: FeedFollow,
}

/// POST /v1/feeds
pub async fn create_feed(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<CreateFeedRequest>,
) -> Result<HttpResponse> {
    let (feed, feed_follow) = state
        .feeds
        .create_feed(&user.0, &body.name, &body.url)
        .await?;
    Ok(HttpResponse::Ok().json(CreateFeedResponse { feed, feed_follow }))
}

/// GET /v1/feeds
pub async fn list_feeds(state: web::Data<AppState>) -> Result<HttpResponse> {
    let feeds = state.feeds.list_feeds().await?;
    Ok(HttpResponse::Ok().json(feeds))
}
