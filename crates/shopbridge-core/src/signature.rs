//! Gateway signature computation and verification.
//!
//! The gateway never signs the raw request body. It signs a fixed
//! concatenation of selected fields followed by the MD5 of the merchant
//! secret, and both digests are rendered as uppercase hex.

use md5::{Digest, Md5};

use crate::checkout::Amount;
use crate::notification::PaymentNotification;

/// Fields covered by a notification signature, in signing order.
#[derive(Debug, Clone, Copy)]
pub struct SignedFields<'a> {
    /// Merchant identifier.
    pub merchant_id: &'a str,
    /// Order identifier.
    pub order_id: &'a str,
    /// Amount exactly as the gateway sent it.
    pub amount: &'a str,
    /// Currency code.
    pub currency: &'a str,
    /// Status code.
    pub status_code: &'a str,
}

impl<'a> From<&'a PaymentNotification> for SignedFields<'a> {
    fn from(notification: &'a PaymentNotification) -> Self {
        Self {
            merchant_id: &notification.merchant_id,
            order_id: &notification.order_id,
            amount: &notification.payhere_amount,
            currency: &notification.payhere_currency,
            status_code: &notification.status_code,
        }
    }
}

/// MD5 digest of `input` as uppercase hex (32 characters).
#[must_use]
pub fn md5_upper_hex(input: &str) -> String {
    hex::encode_upper(Md5::digest(input.as_bytes()))
}

/// Compute the authentication code the gateway should have sent.
#[must_use]
pub fn notification_signature(fields: &SignedFields<'_>, secret: &str) -> String {
    let hashed_secret = md5_upper_hex(secret);
    let payload = format!(
        "{}{}{}{}{}{}",
        fields.merchant_id,
        fields.order_id,
        fields.amount,
        fields.currency,
        fields.status_code,
        hashed_secret
    );
    md5_upper_hex(&payload)
}

/// Check the `md5sig` of a notification against the merchant secret.
///
/// The supplied code is compared as given, so a lowercase code never
/// matches.
#[must_use]
pub fn verify_notification(notification: &PaymentNotification, secret: &str) -> bool {
    let expected = notification_signature(&SignedFields::from(notification), secret);
    constant_time_eq(&expected, &notification.md5sig)
}

/// Hash the storefront posts to the gateway when starting a checkout.
///
/// Same composition as a notification signature without the status code,
/// with the amount fixed to two decimals.
#[must_use]
pub fn checkout_hash(
    merchant_id: &str,
    order_id: &str,
    amount: &Amount,
    currency: &str,
    secret: &str,
) -> String {
    let hashed_secret = md5_upper_hex(secret);
    let payload = format!("{merchant_id}{order_id}{amount}{currency}{hashed_secret}");
    md5_upper_hex(&payload)
}

/// Constant-time string comparison.
///
/// Runs over the full length of equal-length inputs regardless of where
/// they first differ. Length itself is not secret.
#[must_use]
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }
    result == 0
}
