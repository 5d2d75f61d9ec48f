//! PayHere gateway handlers: payment notifications and checkout hashes.

use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shopbridge_core::{
    checkout_hash, verify_notification, Amount, CoreError, Currency, PaymentNotification,
    StatusUpdate,
};

use crate::auth::BearerToken;
use crate::error::ApiError;
use crate::state::AppState;

/// Webhook response.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    /// Whether the notification was received.
    pub received: bool,
}

/// Handle a payment notification from the gateway.
///
/// Once the signature checks out the gateway always gets a 200, even if the
/// backend update fails. Only a missing merchant secret (500), an unreadable
/// form or a bad signature (400) are reported back.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    form: Result<Form<PaymentNotification>, FormRejection>,
) -> Result<Json<WebhookResponse>, ApiError> {
    let notification_id = Uuid::new_v4();

    let Form(notification) = form.map_err(|rejection| {
        tracing::warn!(%notification_id, error = %rejection, "Unreadable PayHere notification");
        ApiError::BadRequest(rejection.body_text())
    })?;

    let secret = state
        .config
        .payhere_merchant_secret
        .as_deref()
        .ok_or_else(|| {
            ApiError::Configuration("PayHere merchant secret not configured".into())
        })?;

    if !verify_notification(&notification, secret) {
        tracing::warn!(
            %notification_id,
            order_id = %notification.order_id,
            "Invalid PayHere notification signature"
        );
        return Err(ApiError::BadRequest("Invalid webhook signature".into()));
    }

    let update =
        StatusUpdate::from_notification(&notification, &state.config.gift_card_order_prefix);

    tracing::info!(
        %notification_id,
        order_id = %notification.order_id,
        payment_id = %notification.payment_id,
        kind = update.kind(),
        status = %notification.status(),
        "Received PayHere notification"
    );

    match state.backend.send_status_update(&update).await {
        Ok(()) => {
            tracing::info!(
                %notification_id,
                order_id = %update.order_id(),
                kind = update.kind(),
                "Payment status updated"
            );
        }
        Err(e) => {
            // The gateway is acknowledged anyway; this log line is the only record.
            tracing::error!(
                %notification_id,
                order_id = %update.order_id(),
                kind = update.kind(),
                error = %e,
                "Failed to update payment status"
            );
        }
    }

    Ok(Json(WebhookResponse { received: true }))
}

/// Checkout hash request.
#[derive(Debug, Deserialize)]
pub struct CheckoutHashRequest {
    /// Order the customer is paying for.
    pub order_id: String,
    /// Amount to charge, as a decimal string.
    pub amount: String,
    /// Currency code.
    pub currency: String,
}

/// Checkout hash response: everything the storefront posts to the gateway.
#[derive(Debug, Serialize)]
pub struct CheckoutHashResponse {
    /// Merchant identifier.
    pub merchant_id: String,
    /// Order identifier.
    pub order_id: String,
    /// Amount with two decimals, exactly as hashed.
    pub amount: Amount,
    /// Currency code.
    pub currency: Currency,
    /// Uppercase hex checkout hash.
    pub hash: String,
}

/// Compute the checkout hash for a storefront order.
pub async fn checkout_hash_handler(
    State(state): State<Arc<AppState>>,
    _token: BearerToken,
    Json(request): Json<CheckoutHashRequest>,
) -> Result<Json<CheckoutHashResponse>, ApiError> {
    let order_id = request.order_id.trim();
    if order_id.is_empty() {
        return Err(CoreError::MissingField("order_id").into());
    }
    let amount: Amount = request.amount.parse()?;
    let currency: Currency = request.currency.parse()?;

    let (merchant_id, secret) = state
        .config
        .payhere_merchant_id
        .as_deref()
        .zip(state.config.payhere_merchant_secret.as_deref())
        .ok_or_else(|| {
            ApiError::Configuration("PayHere merchant id or secret not configured".into())
        })?;

    let hash = checkout_hash(merchant_id, order_id, &amount, currency.as_str(), secret);

    tracing::debug!(order_id = %order_id, %amount, "Checkout hash issued");

    Ok(Json(CheckoutHashResponse {
        merchant_id: merchant_id.to_string(),
        order_id: order_id.to_string(),
        amount,
        currency,
        hash,
    }))
}
