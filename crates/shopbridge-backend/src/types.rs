//! Request and response types for forwarding.

use reqwest::header::{
    HeaderMap, HeaderName, CACHE_CONTROL, CONTENT_DISPOSITION, CONTENT_TYPE, LOCATION, SET_COOKIE,
};
use reqwest::Method;

/// Backend response headers passed back to the caller. Everything else is dropped.
pub static RELAYED_RESPONSE_HEADERS: [HeaderName; 5] = [
    CONTENT_TYPE,
    CONTENT_DISPOSITION,
    LOCATION,
    SET_COOKIE,
    CACHE_CONTROL,
];

/// A storefront API call to relay to the backend.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the backend base URL, starting with `/`.
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    /// `Authorization` header value.
    pub authorization: Option<String>,
    /// `Content-Type` header value (JSON, multipart boundary, ...).
    pub content_type: Option<String>,
    /// `Accept` header value.
    pub accept: Option<String>,
    /// Raw request body.
    pub body: Vec<u8>,
}

/// The backend's answer, relayed as-is.
#[derive(Debug, Clone)]
pub struct ForwardResponse {
    /// HTTP status code.
    pub status: u16,
    /// The backend's headers that are in [`RELAYED_RESPONSE_HEADERS`].
    pub headers: HeaderMap,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ForwardResponse {
    /// `Content-Type` of the response body.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}
