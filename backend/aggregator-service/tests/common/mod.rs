use std::sync::Arc;

use actix_web::web;

use aggregator_service::db::memory::MemoryStore;
use aggregator_service::AppState;

/// Application state over a fresh in-memory store. Each test builds its own,
/// so tests never share rows.
pub fn state() -> web::Data<AppState> {
    web::Data::new(AppState::new(Arc::new(MemoryStore::default())))
}
