//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use nyay_core::{Responder, SqliteStore};

use crate::config::Config;

/// State shared across all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration (env-derived).
    pub config: Arc<Config>,
    /// Conversation, message and user store.  Opened in `main`, closed on
    /// shutdown.
    pub store: Arc<SqliteStore>,
    /// Produces the bot reply for each logged message.
    pub responder: Arc<dyn Responder>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) async fn test_state() -> Arc<AppState> {
    Arc::new(AppState {
        config: Arc::new(Config::default()),
        store: Arc::new(SqliteStore::in_memory().await.expect("in-memory store")),
        responder: Arc::new(nyay_core::KeywordResponder::default()),
    })
}
