use actix_web::{web, HttpResponse};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::AuthedUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateFeedFollowRequest {
    pub feed_id: String,
}

/// POST /v1/feed_follows
pub async fn create_feed_follow(
    state: web::Data<AppState>,
    user: AuthedUser,
    body: web::Json<CreateFeedFollowRequest>,
) -> Result<HttpResponse> {
    let feed_id = Uuid::parse_str(&body.feed_id)
        .map_err(|_| AppError::InvalidArgument(format!("invalid feed id: {}", body.feed_id)))?;

    let follow = state.follows.create_follow(&user.0, feed_id).await?;
    Ok(HttpResponse::Ok().json(follow))
}

/// GET /v1/feed_follows
pub async fn list_feed_follows(
    state: web::Data<AppState>,
    user: AuthedUser,
) -> Result<HttpResponse> {
    let follows = state.follows.list_follows(&user.0).await?;
    Ok(HttpResponse::Ok().json(follows))
}

/// DELETE /v1/feed_follows/{feed_follow_id}
pub async fn delete_feed_follow(
    state: web::Data<AppState>,
    user: AuthedUser,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let raw = path.into_inner();
    let follow_id = Uuid::parse_str(&raw)
        .map_err(|_| AppError::InvalidArgument(format!("invalid feed follow id: {raw}")))?;

    let deleted = state.follows.delete_follow(&user.0, follow_id).await?;
    Ok(HttpResponse::Ok().json(deleted))
}
