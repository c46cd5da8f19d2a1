//! Api-key authentication. Protected handlers declare the [`AuthedUser`]
//! extractor; it is the only path by which an operation obtains an identity.

use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;

use crate::error::AppError;
use crate::models::User;
use crate::AppState;

/// The account resolved from `Authorization: Bearer <api key>`.
#[derive(Debug, Clone)]
pub struct AuthedUser(pub User);

/// Strips the Bearer scheme. Every deviation — no header, wrong scheme,
/// wrong casing — is rejected the same way, so a caller learns nothing about
/// which part failed.
fn bearer_token(header: Option<&str>) -> Option<&str> {
    header?.strip_prefix("Bearer ")
}

impl FromRequest for AuthedUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let header = req
            .headers()
            .get("Authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);

        Box::pin(async move {
            let state = state.ok_or_else(|| {
                tracing::error!("AppState missing from app data");
                AppError::Internal
            })?;

            let token = bearer_token(header.as_deref())
                .ok_or(AppError::Unauthenticated)?
                .to_owned();

            let user = state.accounts.user_for_api_key(&token).await?;
            Ok(AuthedUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_token_accepts_only_the_exact_scheme() {
        assert_eq!(bearer_token(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(bearer_token(None), None);
        assert_eq!(bearer_token(Some("abc123")), None);
        assert_eq!(bearer_token(Some("Basic abc123")), None);
        assert_eq!(bearer_token(Some("bearer abc123")), None);
        assert_eq!(bearer_token(Some("Bearer")), None);
    }
}
