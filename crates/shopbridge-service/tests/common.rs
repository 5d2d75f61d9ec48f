//! Common test utilities for shopbridge integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum_test::TestServer;
use wiremock::MockServer;

use shopbridge_core::{notification_signature, SignedFields};
use shopbridge_service::{create_router, AppState, ServiceConfig};

/// Merchant identifier used across tests.
pub const MERCHANT_ID: &str = "M1";

/// Merchant secret used across tests.
pub const MERCHANT_SECRET: &str = "secret123";

/// A user token the proxy accepts (the backend is mocked).
pub const USER_AUTH_HEADER: &str = "Bearer user-token";

/// Test harness: the service under test plus a mock backend.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Mock marketplace backend; expectations are verified on drop.
    pub backend: MockServer,
}

impl TestHarness {
    /// Harness with gateway credentials configured.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Harness with a customized configuration.
    pub async fn with_config(customize: impl FnOnce(&mut ServiceConfig)) -> Self {
        let backend = MockServer::start().await;

        let mut config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            backend_url: backend.uri(),
            payhere_merchant_id: Some(MERCHANT_ID.into()),
            payhere_merchant_secret: Some(MERCHANT_SECRET.into()),
            ..ServiceConfig::default()
        };
        customize(&mut config);

        let state = AppState::new(config).expect("Failed to build app state");
        let server = TestServer::new(create_router(state)).expect("Failed to create test server");

        Self { server, backend }
    }
}

/// A notification form signed with [`MERCHANT_SECRET`].
pub fn signed_form(order_id: &str, status_code: &str) -> Vec<(String, String)> {
    let amount = "100.00";
    let currency = "LKR";
    let md5sig = notification_signature(
        &SignedFields {
            merchant_id: MERCHANT_ID,
            order_id,
            amount,
            currency,
            status_code,
        },
        MERCHANT_SECRET,
    );

    [
        ("merchant_id", MERCHANT_ID),
        ("order_id", order_id),
        ("payment_id", "320025071278"),
        ("payhere_amount", amount),
        ("payhere_currency", currency),
        ("status_code", status_code),
        ("md5sig", md5sig.as_str()),
        ("custom_1", "gcp_42"),
        ("custom_2", ""),
        ("method", "VISA"),
        ("status_message", "Successfully completed the payment."),
        ("captured_amount", amount),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Replace one field of a form.
pub fn with_field(
    mut form: Vec<(String, String)>,
    key: &str,
    value: &str,
) -> Vec<(String, String)> {
    for (k, v) in &mut form {
        if k == key {
            *v = value.to_string();
        }
    }
    form
}
