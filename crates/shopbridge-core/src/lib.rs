//! Core types and utilities for shopbridge.
//!
//! This crate provides the payment types shared by the shopbridge service:
//!
//! - **Notifications**: `PaymentNotification`, `PaymentStatus`
//! - **Status updates**: `StatusUpdate`, `OrderStatusUpdate`, `GiftCardStatusUpdate`
//! - **Signatures**: `verify_notification`, `checkout_hash`
//! - **Checkout**: `Amount`, `Currency`
//!
//! # Gateway Signatures
//!
//! The payment gateway authenticates every notification with an uppercase
//! MD5 code derived from the merchant secret:
//!
//! ```text
//! MD5(merchant_id + order_id + amount + currency + status_code + MD5(secret))
//! ```
//!
//! Nothing in this crate performs I/O.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod checkout;
pub mod error;
pub mod notification;
pub mod signature;

pub use checkout::{Amount, Currency};
pub use error::{CoreError, Result};
pub use notification::{
    GiftCardStatusUpdate, OrderStatusUpdate, PaymentNotification, PaymentOutcome, PaymentStatus,
    StatusUpdate, DEFAULT_GIFT_CARD_PREFIX,
};
pub use signature::{
    checkout_hash, constant_time_eq, md5_upper_hex, notification_signature, verify_notification,
    SignedFields,
};
