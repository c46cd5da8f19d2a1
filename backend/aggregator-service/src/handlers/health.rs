use actix_web::{HttpResponse, Responder};
use serde::Serialize;

use crate::error::{AppError, Result};

#[derive(Serialize)]
struct ReadinessResponse {
    status: &'static str,
}

/// GET /v1/healthz
pub async fn healthz() -> impl Responder {
    HttpResponse::Ok().json(ReadinessResponse { status: "ok" })
}

/// GET /v1/err
///
/// Always fails. Exercises the error path end to end.
pub async fn err() -> Result<HttpResponse> {
    Err(AppError::Internal)
}
