mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn payment_submission_is_validated() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .post(server.url("/api/subscriptions/payments"))
        .bearer_auth(common::user_token())
        .json(&json!({"amount": "10", "currency": "USD", "payment_method": "cheque"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    for field in ["amount", "country_code", "planId", "payment_method"] {
        assert!(body["field_errors"][field].is_string(), "missing violation for {}: {}", field, body);
    }
    assert!(body["field_errors"]["currency"].is_null());
    Ok(())
}

#[tokio::test]
async fn gateway_flags_must_be_booleans() -> Result<()> {
    let server = common::ensure_server().await?;

    let res = reqwest::Client::new()
        .put(server.url("/api/admin/regions/eu-west/gateway"))
        .bearer_auth(common::admin_token())
        .json(&json!({"gateway_type": "paddle", "stripe_enabled": false, "paddle_enabled": "yes"}))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert!(body["field_errors"]["paddle_enabled"].is_string());
    assert!(body["field_errors"]["stripe_enabled"].is_null());
    Ok(())
}
