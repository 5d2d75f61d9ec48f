//! Marketplace backend HTTP client implementation.

use reqwest::header::{HeaderMap, ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{redirect, Client, Url};
use serde::Serialize;
use std::time::Duration;

use shopbridge_core::{GiftCardStatusUpdate, OrderStatusUpdate, StatusUpdate};

use crate::error::BackendError;
use crate::types::{ForwardRequest, ForwardResponse, RELAYED_RESPONSE_HEADERS};

/// Marketplace backend client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl BackendClient {
    /// Create a new backend client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Backend base URL (e.g., `"http://localhost:5000"`)
    /// * `options` - Timeout and optional service credentials
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is not an absolute http(s) URL or the
    /// HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, options: ClientOptions) -> Result<Self, BackendError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        let parsed = Url::parse(&base_url)
            .map_err(|e| BackendError::Configuration(format!("invalid backend URL: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(BackendError::Configuration(format!(
                "unsupported backend URL scheme: {}",
                parsed.scheme()
            )));
        }

        // Redirects are relayed to the caller, not followed.
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .redirect(redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: options.api_key,
        })
    }

    /// Backend base URL without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Record the outcome of a marketplace order payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    pub async fn update_order_payment(
        &self,
        update: &OrderStatusUpdate,
    ) -> Result<(), BackendError> {
        self.post_status("/api/payment/update-status", update).await
    }

    /// Record the outcome of a gift-card payment.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    pub async fn update_gift_card_payment(
        &self,
        update: &GiftCardStatusUpdate,
    ) -> Result<(), BackendError> {
        self.post_status("/api/gift-cards/payment/update-status", update)
            .await
    }

    /// Send a status update to the endpoint matching its kind.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend answers non-2xx.
    pub async fn send_status_update(&self, update: &StatusUpdate) -> Result<(), BackendError> {
        match update {
            StatusUpdate::Order(order) => self.update_order_payment(order).await,
            StatusUpdate::GiftCard(gift_card) => self.update_gift_card_payment(gift_card).await,
        }
    }

    /// Relay a storefront request to the backend.
    ///
    /// Every status the backend answers with, error statuses included, is
    /// returned as a [`ForwardResponse`]. Only transport failures are errors.
    /// Response headers outside [`RELAYED_RESPONSE_HEADERS`] are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be reached or the body cannot
    /// be read.
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, BackendError> {
        let mut url = format!("{}{}", self.base_url, request.path);
        if let Some(query) = request.query.as_deref().filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(query);
        }

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(authorization) = &request.authorization {
            builder = builder.header(AUTHORIZATION, authorization);
        }
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if let Some(accept) = &request.accept {
            builder = builder.header(ACCEPT, accept);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body);
        }

        let response = builder.send().await?;

        let status = response.status().as_u16();
        let mut headers = HeaderMap::new();
        for name in &RELAYED_RESPONSE_HEADERS {
            for value in response.headers().get_all(name) {
                headers.append(name.clone(), value.clone());
            }
        }
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status,
            "Forwarded request to backend"
        );

        Ok(ForwardResponse {
            status,
            headers,
            body,
        })
    }

    async fn post_status<T: Serialize>(&self, path: &str, body: &T) -> Result<(), BackendError> {
        let url = format!("{}{}", self.base_url, path);

        let mut builder = self.client.post(&url).json(body);
        if let Some(api_key) = &self.api_key {
            builder = builder.header(AUTHORIZATION, format!("Bearer {api_key}"));
        }

        let response = builder.send().await?;
        Self::handle_response(response).await
    }

    /// Convert a non-2xx response into an error, keeping the backend's message.
    async fn handle_response(response: reqwest::Response) -> Result<(), BackendError> {
        let status = response.status();

        if status.is_success() {
            return Ok(());
        }

        let message = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| error_message(&body))
            .unwrap_or_else(|| format!("HTTP {status}"));

        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Pull a human-readable message out of a backend error body.
fn error_message(body: &serde_json::Value) -> Option<String> {
    ["message", "error"].iter().find_map(|key| match body.get(key) {
        Some(serde_json::Value::String(message)) => Some(message.clone()),
        Some(nested @ serde_json::Value::Object(_)) => nested
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map(String::from),
        _ => None,
    })
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Service credential sent as a bearer token on status updates.
    pub api_key: Option<String>,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            api_key: None,
        }
    }
}

impl ClientOptions {
    /// Create options with a service credential.
    #[must_use]
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }
}
