//! Shopbridge HTTP API Service.
//!
//! This crate provides the HTTP layer between the marketplace storefront and
//! its backend, including:
//!
//! - PayHere payment notifications (signature verified, forwarded as
//!   order or gift-card status updates)
//! - Checkout hashes for the gateway payment form
//! - A pass-through proxy for storefront and dashboard API calls
//!
//! # Authentication
//!
//! Gateway notifications are authenticated by their `md5sig`. Everything
//! else requires a bearer token, which is forwarded to the backend for
//! validation; anonymous catalog `GET`s are the exception.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Handlers need async for the router

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::ServiceConfig;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
