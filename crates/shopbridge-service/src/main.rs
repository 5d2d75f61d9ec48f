//! Shopbridge Service - storefront API proxy and payment webhooks.
//!
//! This is the main entry point for the shopbridge service.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shopbridge_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,shopbridge=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Shopbridge Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        backend_url = %config.backend_url,
        payhere_configured = %config.payhere_merchant_secret.is_some(),
        gift_card_prefix = %config.gift_card_order_prefix,
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone())?;

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
