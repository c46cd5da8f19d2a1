pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use db::store::Store;
use services::{AccountService, FeedService, FollowService};

/// Central application state: the services handlers depend on, constructed
/// once at startup over a single shared store.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub feeds: FeedService,
    pub follows: FollowService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            accounts: AccountService::new(store.clone()),
            feeds: FeedService::new(store.clone()),
            follows: FollowService::new(store),
        }
    }
}
