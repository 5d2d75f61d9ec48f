//! Backend client integration tests against a mock backend.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use shopbridge_backend::{BackendClient, BackendError, ClientOptions, ForwardRequest};
use shopbridge_core::{PaymentNotification, StatusUpdate};

fn notification(order_id: &str, status_code: &str) -> PaymentNotification {
    PaymentNotification {
        merchant_id: "M1".into(),
        order_id: order_id.into(),
        payment_id: "320025071278".into(),
        payhere_amount: "100.00".into(),
        payhere_currency: "LKR".into(),
        status_code: status_code.into(),
        custom_1: "gcp_42".into(),
        method: "VISA".into(),
        status_message: "Successfully completed the payment.".into(),
        captured_amount: "100.00".into(),
        ..PaymentNotification::default()
    }
}

fn client(server: &MockServer, options: ClientOptions) -> BackendClient {
    BackendClient::new(server.uri(), options).expect("Failed to build client")
}

#[tokio::test]
async fn order_update_posts_to_payment_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/update-status"))
        .and(body_json(json!({
            "order_id": "ORD123",
            "payment_id": "320025071278",
            "status": "success",
            "amount": "100.00",
            "currency": "LKR",
            "method": "VISA",
            "status_message": "Successfully completed the payment."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let update = StatusUpdate::from_notification(&notification("ORD123", "2"), "GC-");
    client(&server, ClientOptions::default())
        .send_status_update(&update)
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn gift_card_update_posts_to_gift_card_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/gift-cards/payment/update-status"))
        .and(body_json(json!({
            "payment_id": "gcp_42",
            "order_id": "GC-77",
            "payhere_payment_id": "320025071278",
            "status_code": "-2",
            "status_message": "Successfully completed the payment.",
            "method": "VISA",
            "captured_amount": "100.00",
            "payhere_amount": "100.00"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let update = StatusUpdate::from_notification(&notification("GC-77", "-2"), "GC-");
    client(&server, ClientOptions::default())
        .send_status_update(&update)
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn status_update_sends_service_credential() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/update-status"))
        .and(header("authorization", "Bearer svc-key"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let update = StatusUpdate::from_notification(&notification("ORD123", "0"), "GC-");
    client(&server, ClientOptions::with_api_key("svc-key"))
        .send_status_update(&update)
        .await
        .expect("update should succeed");
}

#[tokio::test]
async fn non_success_status_becomes_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/update-status"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Order not found" })),
        )
        .mount(&server)
        .await;

    let update = StatusUpdate::from_notification(&notification("ORD404", "2"), "GC-");
    let err = client(&server, ClientOptions::default())
        .send_status_update(&update)
        .await
        .unwrap_err();

    match err {
        BackendError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Order not found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status_line() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/payment/update-status"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let update = StatusUpdate::from_notification(&notification("ORD123", "2"), "GC-");
    let err = client(&server, ClientOptions::default())
        .send_status_update(&update)
        .await
        .unwrap_err();

    assert!(matches!(err, BackendError::Api { status: 502, .. }));
    assert!(err.to_string().contains("HTTP 502"));
}

#[tokio::test]
async fn unreachable_backend_is_http_error() {
    // Nothing listens on port 9 on the test host.
    let client = BackendClient::new("http://127.0.0.1:9", ClientOptions::default()).unwrap();

    let update = StatusUpdate::from_notification(&notification("ORD123", "2"), "GC-");
    let err = client.send_status_update(&update).await.unwrap_err();

    assert!(matches!(err, BackendError::Http(_)));
}

#[tokio::test]
async fn forward_relays_request_and_response() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/api/cart/items/42"))
        .and(query_param("qty", "3"))
        .and(header("authorization", "Bearer user-token"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({ "quantity": 3 })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "updated": true })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server, ClientOptions::default())
        .forward(ForwardRequest {
            method: reqwest::Method::PUT,
            path: "/api/cart/items/42".into(),
            query: Some("qty=3".into()),
            authorization: Some("Bearer user-token".into()),
            content_type: Some("application/json".into()),
            accept: None,
            body: br#"{"quantity":3}"#.to_vec(),
        })
        .await
        .expect("forward should succeed");

    assert_eq!(response.status, 201);
    assert_eq!(response.content_type(), Some("application/json"));
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["updated"], true);
}

#[tokio::test]
async fn forward_relays_backend_errors_without_failing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({ "message": "Order not found" })),
        )
        .mount(&server)
        .await;

    let response = client(&server, ClientOptions::default())
        .forward(ForwardRequest {
            method: reqwest::Method::GET,
            path: "/api/orders/missing".into(),
            query: None,
            authorization: Some("Bearer user-token".into()),
            content_type: None,
            accept: Some("application/json".into()),
            body: Vec::new(),
        })
        .await
        .expect("forward should relay errors");

    assert_eq!(response.status, 404);
    let body: serde_json::Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body["message"], "Order not found");
}

#[tokio::test]
async fn forward_keeps_only_relayed_response_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(303)
                .insert_header("location", "/account")
                .append_header("set-cookie", "session=abc; HttpOnly")
                .append_header("set-cookie", "theme=dark")
                .insert_header("x-backend-node", "db-7"),
        )
        .mount(&server)
        .await;

    let response = client(&server, ClientOptions::default())
        .forward(ForwardRequest {
            method: reqwest::Method::POST,
            path: "/api/auth/login".into(),
            query: None,
            authorization: None,
            content_type: None,
            accept: None,
            body: Vec::new(),
        })
        .await
        .expect("forward should succeed");

    assert_eq!(response.status, 303);
    assert_eq!(response.headers["location"], "/account");
    let cookies: Vec<_> = response.headers.get_all("set-cookie").iter().collect();
    assert_eq!(cookies.len(), 2);
    assert!(response.headers.get("x-backend-node").is_none());
}
