//! Payment notifications and the backend status updates derived from them.
//!
//! A notification arrives from the gateway as a flat form. It is classified
//! exactly once, at the boundary, into a [`StatusUpdate`]: either a regular
//! marketplace order payment or a gift-card purchase.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order id prefix that marks a gift-card purchase.
pub const DEFAULT_GIFT_CARD_PREFIX: &str = "GC-";

/// Gateway status code for a successful payment.
const SUCCESS_CODE: &str = "2";

/// Server-to-server payment notification posted by the gateway.
///
/// Every field defaults to the empty string when the gateway omits it. An
/// incomplete notification is not rejected here; it simply fails signature
/// verification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentNotification {
    /// Merchant identifier issued by the gateway.
    pub merchant_id: String,
    /// Order identifier chosen at checkout.
    pub order_id: String,
    /// Gateway payment identifier.
    pub payment_id: String,
    /// Paid amount as a decimal string (e.g. `"100.00"`).
    pub payhere_amount: String,
    /// Currency code (e.g. `"LKR"`).
    pub payhere_currency: String,
    /// Status code as sent by the gateway.
    pub status_code: String,
    /// Uppercase hex authentication code.
    pub md5sig: String,
    /// First merchant-defined passthrough value.
    pub custom_1: String,
    /// Second merchant-defined passthrough value.
    pub custom_2: String,
    /// Payment method (e.g. `"VISA"`).
    pub method: String,
    /// Free-text status message.
    pub status_message: String,
    /// Amount captured for authorized payments.
    pub captured_amount: String,
}

impl PaymentNotification {
    /// Parse the gateway status code.
    #[must_use]
    pub fn status(&self) -> PaymentStatus {
        PaymentStatus::from_code(&self.status_code)
    }

    /// Whether the order id carries the gift-card prefix.
    #[must_use]
    pub fn is_gift_card(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.order_id.starts_with(prefix)
    }
}

/// Payment status reported by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// `2`: payment completed.
    Success,
    /// `0`: payment pending.
    Pending,
    /// `-1`: canceled by the customer.
    Canceled,
    /// `-2`: payment failed.
    Failed,
    /// `-3`: payment charged back.
    ChargedBack,
    /// Any other code.
    Unknown(String),
}

impl PaymentStatus {
    /// Parse a status code string. No trimming: the code is matched exactly
    /// as it was signed.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            SUCCESS_CODE => Self::Success,
            "0" => Self::Pending,
            "-1" => Self::Canceled,
            "-2" => Self::Failed,
            "-3" => Self::ChargedBack,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Whether this is the success sentinel.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Pending => write!(f, "pending"),
            Self::Canceled => write!(f, "canceled"),
            Self::Failed => write!(f, "failed"),
            Self::ChargedBack => write!(f, "charged_back"),
            Self::Unknown(code) => write!(f, "unknown({code})"),
        }
    }
}

/// Terminal outcome recorded against a marketplace order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentOutcome {
    /// Payment went through.
    Success,
    /// Anything other than success.
    Failed,
}

/// Body of `POST /api/payment/update-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderStatusUpdate {
    /// Marketplace order id.
    pub order_id: String,
    /// Gateway payment id.
    pub payment_id: String,
    /// Outcome derived from the status code.
    pub status: PaymentOutcome,
    /// Paid amount.
    pub amount: String,
    /// Currency code.
    pub currency: String,
    /// Payment method.
    pub method: String,
    /// Gateway status message.
    pub status_message: String,
}

/// Body of `POST /api/gift-cards/payment/update-status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GiftCardStatusUpdate {
    /// Backend gift-card payment reference, echoed back in `custom_1`.
    pub payment_id: String,
    /// Gift-card order id, prefix included.
    pub order_id: String,
    /// Gateway payment id.
    pub payhere_payment_id: String,
    /// Raw gateway status code; the backend records every terminal state.
    pub status_code: String,
    /// Gateway status message.
    pub status_message: String,
    /// Payment method.
    pub method: String,
    /// Captured amount.
    pub captured_amount: String,
    /// Paid amount.
    pub payhere_amount: String,
}

/// Status update to send to the backend for one verified notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Regular marketplace order.
    Order(OrderStatusUpdate),
    /// Gift-card purchase.
    GiftCard(GiftCardStatusUpdate),
}

impl StatusUpdate {
    /// Classify a notification by its order id prefix and build the update.
    ///
    /// Gift cards are routed on the prefix alone, whatever the status code.
    /// Orders collapse every non-success code into [`PaymentOutcome::Failed`].
    #[must_use]
    pub fn from_notification(notification: &PaymentNotification, gift_card_prefix: &str) -> Self {
        if notification.is_gift_card(gift_card_prefix) {
            return Self::GiftCard(GiftCardStatusUpdate {
                payment_id: notification.custom_1.clone(),
                order_id: notification.order_id.clone(),
                payhere_payment_id: notification.payment_id.clone(),
                status_code: notification.status_code.clone(),
                status_message: notification.status_message.clone(),
                method: notification.method.clone(),
                captured_amount: notification.captured_amount.clone(),
                payhere_amount: notification.payhere_amount.clone(),
            });
        }

        let status = if notification.status().is_success() {
            PaymentOutcome::Success
        } else {
            PaymentOutcome::Failed
        };

        Self::Order(OrderStatusUpdate {
            order_id: notification.order_id.clone(),
            payment_id: notification.payment_id.clone(),
            status,
            amount: notification.payhere_amount.clone(),
            currency: notification.payhere_currency.clone(),
            method: notification.method.clone(),
            status_message: notification.status_message.clone(),
        })
    }

    /// Short label for logging.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Order(_) => "order",
            Self::GiftCard(_) => "gift_card",
        }
    }

    /// Order id the update refers to.
    #[must_use]
    pub fn order_id(&self) -> &str {
        match self {
            Self::Order(update) => &update.order_id,
            Self::GiftCard(update) => &update.order_id,
        }
    }
}
