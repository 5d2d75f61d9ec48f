//! Application state.

use std::sync::Arc;

use shopbridge_backend::{BackendClient, BackendError, ClientOptions};

use crate::config::ServiceConfig;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration.
    pub config: ServiceConfig,

    /// Marketplace backend client.
    pub backend: Arc<BackendClient>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend URL is invalid.
    pub fn new(config: ServiceConfig) -> Result<Self, BackendError> {
        let options = ClientOptions {
            timeout_seconds: config.backend_timeout_seconds,
            api_key: config.backend_api_key.clone(),
        };
        let backend = BackendClient::new(&config.backend_url, options)?;
        tracing::info!(backend_url = %backend.base_url(), "Backend client configured");

        if config.payhere_merchant_secret.is_none() {
            tracing::warn!(
                "PayHere merchant secret not configured - payment notifications will be refused"
            );
        }

        Ok(Self {
            config,
            backend: Arc::new(backend),
        })
    }

    /// Check if the gateway secret is configured.
    #[must_use]
    pub fn has_payhere(&self) -> bool {
        self.config.payhere_merchant_secret.is_some()
    }
}
