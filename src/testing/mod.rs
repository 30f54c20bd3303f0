use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

use crate::auth::{generate_jwt, Claims, Role};
use crate::database::models::Plan;
use crate::database::repository::{MockPlanRepository, MockPricingRepository, MockSubscriptionRepository};
use crate::plans::FieldGate;
use crate::router::app;
use crate::state::AppState;

/// Repository mocks wired into an [`AppState`] for handler tests
pub struct TestContext {
    pub plans: MockPlanRepository,
    pub pricing: MockPricingRepository,
    pub subscriptions: MockSubscriptionRepository,
    pub gate: FieldGate,
}

impl TestContext {
    /// Mocks with no expectations; any repository call fails the test
    pub fn new() -> Self {
        Self {
            plans: MockPlanRepository::new(),
            pricing: MockPricingRepository::new(),
            subscriptions: MockSubscriptionRepository::new(),
            gate: FieldGate::default(),
        }
    }

    pub fn into_app(self) -> Router {
        app(AppState {
            plans: Arc::new(self.plans),
            pricing: Arc::new(self.pricing),
            subscriptions: Arc::new(self.subscriptions),
            gate: Arc::new(self.gate),
            db: None,
        })
    }
}

pub fn admin_token() -> String {
    generate_jwt(&Claims::new(1, "admin@example.com", Role::Admin)).expect("admin token")
}

pub fn user_token(user_id: i64) -> String {
    generate_jwt(&Claims::new(user_id, "voter@example.com", Role::User)).expect("user token")
}

/// Drive one request through the router and decode the JSON body
pub async fn send(app: Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("json body")
    };
    (status, json)
}

/// Send a raw, possibly malformed body
pub async fn send_raw(app: Router, method: Method, uri: &str, token: &str, body: &'static str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

pub fn sample_plan(id: i64) -> Plan {
    let now = Utc::now();
    Plan {
        id,
        name: "Gold".to_string(),
        description: Some("For growing organisations".to_string()),
        price: Decimal::new(1000, 2),
        duration: "monthly".to_string(),
        plan_type: "individual".to_string(),
        max_elections: 5,
        max_voters_per_election: 100,
        processing_fee_mandatory: true,
        processing_fee_fixed_amount: None,
        processing_fee_type: Some("percentage".to_string()),
        processing_fee_percentage: Some(Decimal::new(25, 1)),
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}
