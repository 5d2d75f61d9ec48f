//! Shopbridge backend client.
//!
//! This crate talks to the marketplace backend that owns orders, gift cards
//! and payments. It covers two things:
//!
//! - **Status updates**: recording the outcome of a verified gateway
//!   notification
//! - **Forwarding**: relaying storefront API calls to the backend unchanged
//!
//! # Example
//!
//! ```no_run
//! use shopbridge_backend::{BackendClient, ClientOptions};
//! use shopbridge_core::{PaymentNotification, StatusUpdate};
//!
//! # async fn example(notification: PaymentNotification) -> Result<(), shopbridge_backend::BackendError> {
//! let client = BackendClient::new("http://localhost:5000", ClientOptions::default())?;
//!
//! let update = StatusUpdate::from_notification(&notification, "GC-");
//! client.send_status_update(&update).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod error;
mod types;

pub use client::{BackendClient, ClientOptions};
pub use error::BackendError;
pub use types::{ForwardRequest, ForwardResponse, RELAYED_RESPONSE_HEADERS};
