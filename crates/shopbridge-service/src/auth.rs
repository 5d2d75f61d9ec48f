//! Bearer token extraction.
//!
//! Tokens are issued and validated by the marketplace backend. This service
//! only checks that one is present before forwarding it.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::error::ApiError;

/// The caller's bearer token, as received.
#[derive(Debug, Clone)]
pub struct BearerToken {
    token: String,
}

impl BearerToken {
    /// Parse an `Authorization` header value.
    ///
    /// Returns `None` unless the value is `Bearer <token>` with a non-empty
    /// token. The scheme is matched case-insensitively.
    #[must_use]
    pub fn parse(header: &str) -> Option<Self> {
        let (scheme, token) = header.trim().split_once(' ')?;
        let token = token.trim();
        if !scheme.eq_ignore_ascii_case("bearer") || token.is_empty() {
            return None;
        }
        Some(Self {
            token: token.to_string(),
        })
    }

    /// The raw token.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Header value to forward to the backend.
    #[must_use]
    pub fn header_value(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(Self::parse)
            .ok_or(ApiError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_tokens() {
        let token = BearerToken::parse("Bearer abc.def").unwrap();
        assert_eq!(token.token(), "abc.def");
        assert_eq!(token.header_value(), "Bearer abc.def");

        assert_eq!(BearerToken::parse("bearer xyz").unwrap().token(), "xyz");
    }

    #[test]
    fn rejects_other_schemes_and_empty_tokens() {
        assert!(BearerToken::parse("Basic dXNlcjpwYXNz").is_none());
        assert!(BearerToken::parse("Bearer ").is_none());
        assert!(BearerToken::parse("Bearer").is_none());
        assert!(BearerToken::parse("").is_none());
    }
}
