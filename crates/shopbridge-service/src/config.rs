//! Service configuration.

use serde::Deserialize;
use std::path::Path;

use shopbridge_core::DEFAULT_GIFT_CARD_PREFIX;

/// Service configuration loaded from environment variables.
///
/// Built once at startup and carried in [`crate::AppState`]; handlers never
/// read the environment themselves.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Marketplace backend base URL (default: `<http://localhost:5000>`).
    pub backend_url: String,

    /// Credential sent to the backend on status updates (optional).
    pub backend_api_key: Option<String>,

    /// Timeout for backend calls in seconds.
    pub backend_timeout_seconds: u64,

    /// Gateway merchant identifier (required for checkout hashes).
    pub payhere_merchant_id: Option<String>,

    /// Gateway merchant secret (required for notifications and checkout).
    pub payhere_merchant_secret: Option<String>,

    /// Order id prefix that marks gift-card purchases.
    pub gift_card_order_prefix: String,

    /// First path segments that anonymous `GET` requests may proxy.
    pub proxy_public_paths: Vec<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

/// Gateway secrets file structure.
#[derive(Debug, Deserialize)]
struct PayHereSecrets {
    merchant_id: String,
    merchant_secret: String,
}

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let (payhere_merchant_id, payhere_merchant_secret) = load_payhere_secrets();
        let defaults = Self::default();

        Self {
            listen_addr: env_or("LISTEN_ADDR", defaults.listen_addr),
            backend_url: env_or("BACKEND_URL", defaults.backend_url),
            backend_api_key: non_empty_env("BACKEND_API_KEY"),
            backend_timeout_seconds: env_parse("BACKEND_TIMEOUT_SECONDS")
                .unwrap_or(defaults.backend_timeout_seconds),
            payhere_merchant_id,
            payhere_merchant_secret,
            gift_card_order_prefix: env_or(
                "GIFT_CARD_ORDER_PREFIX",
                defaults.gift_card_order_prefix,
            ),
            proxy_public_paths: std::env::var("PROXY_PUBLIC_PATHS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.proxy_public_paths),
            cors_origins: std::env::var("CORS_ORIGINS")
                .map(|s| split_list(&s))
                .unwrap_or(defaults.cors_origins),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(defaults.max_body_bytes),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS")
                .unwrap_or(defaults.request_timeout_seconds),
        }
    }

    /// Whether an anonymous `GET` may be proxied to `path`.
    #[must_use]
    pub fn is_public_path(&self, path: &str) -> bool {
        let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
        !first.is_empty() && self.proxy_public_paths.iter().any(|p| p == first)
    }
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).unwrap_or(default)
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Load gateway secrets from file or environment.
fn load_payhere_secrets() -> (Option<String>, Option<String>) {
    let secret_paths = [".secrets/payhere.json", "../.secrets/payhere.json"];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<PayHereSecrets>(path) {
            tracing::info!(path = %path, "Loaded PayHere secrets from file");
            return (Some(secrets.merchant_id), Some(secrets.merchant_secret));
        }
    }

    tracing::debug!("PayHere secrets file not found, using environment variables");
    (
        non_empty_env("PAYHERE_MERCHANT_ID"),
        non_empty_env("PAYHERE_MERCHANT_SECRET"),
    )
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            backend_url: "http://localhost:5000".into(),
            backend_api_key: None,
            backend_timeout_seconds: 30,
            payhere_merchant_id: None,
            payhere_merchant_secret: None,
            gift_card_order_prefix: DEFAULT_GIFT_CARD_PREFIX.into(),
            proxy_public_paths: ["products", "categories", "search", "stores"]
                .into_iter()
                .map(String::from)
                .collect(),
            cors_origins: vec!["*".into()],
            max_body_bytes: 10 * 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
