mod common;

use axum::http::StatusCode;
use chrono::{Duration, TimeZone, Utc};
use common::TestApp;
use cryptotap::flow::{ConfirmPolicy, ExpressOrdering, FlowPolicy};
use cryptotap::models::{CheckoutMode, ServiceType, TransactionRecord, TransactionStatus};
use rust_decimal_macros::dec;
use serde_json::json;

fn express_awaited() -> FlowPolicy {
    FlowPolicy {
        express_ordering: ExpressOrdering::AwaitInsert,
        ..FlowPolicy::default()
    }
}

#[tokio::test]
async fn health_reports_store_and_widget() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());

    let (status, body) = app.request("GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], true);
    assert_eq!(body["widget"], true);
    assert_eq!(body["checkout_mode"], "express");

    app.recorder.set_failing(true);
    let (_, body) = app.request("GET", "/health", None).await;
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn keypad_over_http() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());
    let id = app.start(None).await;

    let view = app.key_in(&id, "12.5").await;
    assert_eq!(view["amount"], "12.5");

    let view = app.key_in(&id, "5").await;
    assert_eq!(view["amount"], "12.55");

    let view = app.key_in(&id, "5").await;
    assert_eq!(view["amount"], "12.55");

    let view = app.ok(&id, json!({"type": "clear"})).await;
    assert_eq!(view["amount"], "");
    assert_eq!(view["display_amount"], "0.00");
}

#[tokio::test]
async fn express_checkout_end_to_end() {
    let app = TestApp::new(CheckoutMode::Express, express_awaited());
    let id = app.start(None).await;

    app.key_in(&id, "8.25").await;
    app.ok(&id, json!({"type": "select_service", "service": "Delivery"})).await;
    let view = app.ok(&id, json!({"type": "continue"})).await;
    assert_eq!(view["screen"], "disclaimer");

    // Proceed is a no-op until the agreement is ticked.
    let view = app.ok(&id, json!({"type": "proceed"})).await;
    assert_eq!(view["screen"], "disclaimer");

    app.ok(&id, json!({"type": "toggle_agreement"})).await;
    let view = app.ok(&id, json!({"type": "proceed"})).await;
    assert_eq!(view["screen"], "payment_method_select");

    let view = app.ok(&id, json!({"type": "express_pay"})).await;
    assert_eq!(view["screen"], "receipt");
    assert_eq!(view["receipt"]["service"], "Delivery");
    assert_eq!(view["receipt"]["amount"], "8.25");
    assert_eq!(view["receipt"]["tx_hash"], "simulated_hash_123");
    assert!(view["widget"]["url"].as_str().unwrap().contains("fiatAmount=8.25"));

    let view = app.ok(&id, json!({"type": "view_history"})).await;
    assert_eq!(view["screen"], "history");
    let history = view["history"].as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["status"], "paid");
    assert_eq!(history[0]["service"], "Delivery");

    let view = app.ok(&id, json!({"type": "new_payment"})).await;
    assert_eq!(view["screen"], "entry");
    assert_eq!(view["amount"], "");
    assert_eq!(view["agreed"], false);
}

#[tokio::test]
async fn manual_card_path_records_nothing() {
    let app = TestApp::new(CheckoutMode::Express, express_awaited());
    let id = app.start(None).await;

    app.key_in(&id, "3").await;
    app.ok(&id, json!({"type": "continue"})).await;
    app.ok(&id, json!({"type": "toggle_agreement"})).await;
    app.ok(&id, json!({"type": "proceed"})).await;
    let view = app.ok(&id, json!({"type": "manual_card"})).await;
    assert_eq!(view["screen"], "manual_card_entry");

    let view = app
        .ok(
            &id,
            json!({"type": "submit_card", "card_number": "4242424242424242", "expiry": "12/30", "cvc": "123"}),
        )
        .await;
    assert_eq!(view["screen"], "receipt");
    assert!(app.recorder.is_empty().await);
}

#[tokio::test]
async fn tap_to_pay_confirm_optimistic_on_store_failure() {
    let app = TestApp::new(CheckoutMode::TapToPay, FlowPolicy::default());
    let id = app.start(None).await;

    let view = app.key_in(&id, ".4").await;
    assert_eq!(view["amount"], "4");

    app.ok(&id, json!({"type": "continue"})).await;
    app.ok(&id, json!({"type": "toggle_agreement"})).await;
    let view = app.ok(&id, json!({"type": "proceed"})).await;
    assert_eq!(view["screen"], "tap_to_pay");

    let view = app.ok(&id, json!({"type": "simulate_success"})).await;
    assert_eq!(view["screen"], "processing");

    app.recorder.set_failing(true);
    let view = app.ok(&id, json!({"type": "confirm"})).await;
    assert_eq!(view["screen"], "receipt");

    // History fetch fails too and shows an empty list.
    let view = app.ok(&id, json!({"type": "view_history"})).await;
    assert_eq!(view["history"], json!([]));
}

#[tokio::test]
async fn tap_to_pay_confirm_blocking_on_store_failure() {
    let policy = FlowPolicy {
        confirm: ConfirmPolicy::BlockOnFailure,
        ..FlowPolicy::default()
    };
    let app = TestApp::new(CheckoutMode::TapToPay, policy);
    let id = app.start(None).await;

    app.key_in(&id, "6").await;
    for event in ["continue", "toggle_agreement", "proceed", "simulate_success"] {
        app.ok(&id, json!({ "type": event })).await;
    }

    app.recorder.set_failing(true);
    let (status, body) = app.event(&id, json!({"type": "confirm"})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error_code"], "STORE_ERROR");

    let (_, body) = app.request("GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(body["data"]["screen"], "processing");
}

#[tokio::test]
async fn session_mode_override() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());
    let id = app.start(Some("tap_to_pay")).await;

    let (_, body) = app.request("GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(body["data"]["mode"], "tap_to_pay");
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn history_is_newest_first() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());
    let t1 = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();

    for (id, offset) in [(2, 1), (1, 0), (3, 2)] {
        app.recorder
            .seed(TransactionRecord {
                id,
                amount: dec!(5),
                service: ServiceType::Other,
                status: TransactionStatus::Paid,
                crypto_tx: "simulated_hash_123".to_string(),
                created_at: t1 + Duration::minutes(offset),
            })
            .await;
    }

    let id = app.start(None).await;
    let view = app.ok(&id, json!({"type": "view_history"})).await;
    let ids: Vec<i64> = view["history"]
        .as_array()
        .unwrap()
        .iter()
        .map(|row| row["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let (status, body) = app.request("GET", "/api/transactions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["id"], 3);
    assert_eq!(body["data"][2]["id"], 1);
}

#[tokio::test]
async fn rejects_out_of_place_events() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());
    let id = app.start(None).await;

    let (status, body) = app.event(&id, json!({"type": "confirm"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "INVALID_TRANSITION");

    for event in ["continue", "toggle_agreement", "proceed"] {
        app.ok(&id, json!({ "type": event })).await;
    }
    let (status, body) = app.event(&id, json!({"type": "express_pay"})).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error_code"], "AMOUNT_NOT_POSITIVE");
    assert!(app.recorder.is_empty().await);
}

#[tokio::test]
async fn unknown_and_deleted_sessions() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());

    let (status, body) = app
        .request("GET", "/api/sessions/00000000-0000-0000-0000-000000000000", None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error_code"], "SESSION_NOT_FOUND");

    let id = app.start(None).await;
    let (status, _) = app.request("DELETE", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.event(&id, json!({"type": "clear"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_events_get_bad_request_envelope() {
    let app = TestApp::new(CheckoutMode::Express, FlowPolicy::default());
    let id = app.start(None).await;

    for event in [
        json!({"type": "press_key", "key": "55"}),
        json!({"type": "teleport"}),
        json!({"key": "5"}),
    ] {
        let (status, body) = app.event(&id, event.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "event {}", event);
        assert_eq!(body["success"], false);
        assert_eq!(body["error_code"], "BAD_REQUEST");
        assert!(body["error"].as_str().unwrap().starts_with("Bad request"));
    }

    let (_, body) = app.request("GET", &format!("/api/sessions/{}", id), None).await;
    assert_eq!(body["data"]["amount"], "");
    assert_eq!(body["data"]["screen"], "entry");
}

#[tokio::test]
async fn oversized_amount_stops_at_decimal_range_and_still_pays() {
    let app = TestApp::new(CheckoutMode::Express, express_awaited());
    let id = app.start(None).await;

    let thirty = "123456789012345678901234567890";
    let view = app.key_in(&id, thirty).await;
    let kept = view["amount"].as_str().unwrap().to_string();
    assert!(kept.len() < thirty.len());
    assert!(thirty.starts_with(&kept));

    for event in ["continue", "toggle_agreement", "proceed"] {
        app.ok(&id, json!({ "type": event })).await;
    }
    let view = app.ok(&id, json!({"type": "express_pay"})).await;
    assert_eq!(view["screen"], "receipt");
    assert_eq!(view["receipt"]["amount"], kept.as_str());
    assert_eq!(app.recorder.len().await, 1);
}
