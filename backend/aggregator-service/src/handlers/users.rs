use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::AuthedUser;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
}

/// POST /v1/users
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> Result<HttpResponse> {
    let user = state.accounts.create_user(&body.name).await?;
    Ok(HttpResponse::Created().json(user))
}

/// GET /v1/users
pub async fn get_current_user(user: AuthedUser) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(user.0))
}
