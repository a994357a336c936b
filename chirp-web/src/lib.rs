pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;

use models::SessionDefaults;
use services::{ApiKeyCache, RealtimeSessions};
use std::sync::Arc;

/// Shared application state for the session proxy.
#[derive(Clone)]
pub struct AppState {
    pub api_key: Arc<ApiKeyCache>,
    pub realtime: Arc<dyn RealtimeSessions>,
    pub session_defaults: SessionDefaults,
}

impl AppState {
    pub fn new(
        api_key: Arc<ApiKeyCache>,
        realtime: Arc<dyn RealtimeSessions>,
        session_defaults: SessionDefaults,
    ) -> Self {
        Self {
            api_key,
            realtime,
            session_defaults,
        }
    }
}
