//! Application state shared across screens.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::supabase::SupabaseClient;

/// Application state shared by every screen controller.
///
/// Cheaply cloneable via `Arc`; owns the configuration and the Supabase
/// client (which in turn owns the session store).
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AppConfig,
    supabase: SupabaseClient,
}

impl AppState {
    /// Create the application state.
    #[must_use]
    pub fn new(config: AppConfig) -> Self {
        let supabase = SupabaseClient::new(&config);
        Self {
            inner: Arc::new(AppStateInner { config, supabase }),
        }
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    /// The remote record store client.
    #[must_use]
    pub fn supabase(&self) -> &SupabaseClient {
        &self.inner.supabase
    }

    /// The process-scoped session store.
    #[must_use]
    pub fn sessions(&self) -> &SessionStore {
        self.inner.supabase.sessions()
    }
}
