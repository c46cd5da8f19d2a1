use std::sync::Arc;

use chrono::Utc;
use rand::RngCore;
use uuid::Uuid;

use crate::db::store::Store;
use crate::error::{AppError, Result};
use crate::models::User;

#[derive(Clone)]
pub struct AccountService {
    store: Arc<dyn Store>,
}

impl AccountService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Registers a new user and issues its api key. Names are not unique;
    /// the key is, and is never rotated afterwards.
    pub async fn create_user(&self, name: &str) -> Result<User> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::InvalidArgument(
                "name must not be empty".to_string(),
            ));
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            api_key: generate_api_key(),
            created_at: now,
            updated_at: now,
        };

        Ok(self.store.create_user(user).await?)
    }

    /// Resolves a presented api key to its account. An unknown key is
    /// indistinguishable from a missing one: both are `Unauthenticated`.
    pub async fn user_for_api_key(&self, api_key: &str) -> Result<User> {
        self.store
            .user_by_api_key(api_key)
            .await?
            .ok_or(AppError::Unauthenticated)
    }
}

/// 32 random bytes, hex-encoded.
fn generate_api_key() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
