use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

use crate::db::store::{
    StoreError, FEEDS_URL_CONSTRAINT, FEED_FOLLOWS_FEED_FK_CONSTRAINT,
    FEED_FOLLOWS_PAIR_CONSTRAINT,
};

pub type Result<T> = std::result::Result<T, AppError>;

/// Which uniqueness rule a conflicting write ran into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictKind {
    DuplicateFeedUrl,
    DuplicateFollow,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::DuplicateFeedUrl => write!(f, "a feed with this url already exists"),
            ConflictKind::DuplicateFollow => write!(f, "feed is already followed"),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid or missing credentials")]
    Unauthenticated,

    #[error("{0}")]
    PermissionDenied(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(ConflictKind),

    #[error("Internal Server Error")]
    Internal,
}

/// Maps the classified storage signal into the domain taxonomy. Keyed on
/// constraint identity so it survives storage-engine upgrades; anything
/// unrecognized is logged and collapsed to `Internal` without leaking driver
/// detail to the client.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UniqueViolation(ref c) if c == FEEDS_URL_CONSTRAINT => {
                AppError::Conflict(ConflictKind::DuplicateFeedUrl)
            }
            StoreError::UniqueViolation(ref c) if c == FEED_FOLLOWS_PAIR_CONSTRAINT => {
                AppError::Conflict(ConflictKind::DuplicateFollow)
            }
            StoreError::ForeignKeyViolation(ref c) if c == FEED_FOLLOWS_FEED_FK_CONSTRAINT => {
                AppError::NotFound("feed not found".to_string())
            }
            other => {
                tracing::error!("storage error: {}", other);
                AppError::Internal
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            error: self.to_string(),
        })
    }
}
