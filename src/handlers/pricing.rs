use axum::extract::{Path, State};
use tracing::{info, warn};

use crate::database::models::{GatewayConfig, RegionalPrice};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonObject};
use crate::state::AppState;
use crate::validation::{parse_gateway_config, parse_regional_price};

/// GET /api/plans/:id/pricing
pub async fn list_plan_pricing(State(state): State<AppState>, Path(plan_id): Path<i64>) -> ApiResult<Vec<RegionalPrice>> {
    if state.plans.find_plan(plan_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Plan {} not found", plan_id)));
    }
    let prices = state.pricing.list_prices(plan_id).await?;
    Ok(ApiResponse::success(prices))
}

/// PUT /api/admin/plans/:id/pricing/:region_id
pub async fn upsert_plan_price(
    State(state): State<AppState>,
    Path((plan_id, region_id)): Path<(i64, String)>,
    JsonObject(payload): JsonObject,
) -> ApiResult<RegionalPrice> {
    let price = parse_regional_price(&payload, plan_id, &region_id).map_err(|e| {
        warn!(plan_id, region_id = %region_id, fields = ?e.fields(), "Rejected regional price");
        e
    })?;

    if state.plans.find_plan(plan_id).await?.is_none() {
        return Err(ApiError::not_found(format!("Plan {} not found", plan_id)));
    }

    let stored = state.pricing.upsert_price(price).await?;
    info!(plan_id, region_id = %stored.region_id, "Regional price saved");
    Ok(ApiResponse::success(stored))
}

/// GET /api/regions/:region_id/gateway
pub async fn get_region_gateway(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
) -> ApiResult<GatewayConfig> {
    let config = state
        .pricing
        .find_gateway_config(region_id.clone())
        .await?
        .ok_or_else(|| ApiError::not_found(format!("No gateway configured for region {}", region_id)))?;
    Ok(ApiResponse::success(config))
}

/// PUT /api/admin/regions/:region_id/gateway
pub async fn upsert_region_gateway(
    State(state): State<AppState>,
    Path(region_id): Path<String>,
    JsonObject(payload): JsonObject,
) -> ApiResult<GatewayConfig> {
    let config = parse_gateway_config(&payload, &region_id).map_err(|e| {
        warn!(region_id = %region_id, fields = ?e.fields(), "Rejected gateway config");
        e
    })?;

    let stored = state.pricing.upsert_gateway_config(config).await?;
    info!(region_id = %stored.region_id, gateway = %stored.gateway_type, "Gateway config saved");
    Ok(ApiResponse::success(stored))
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use chrono::Utc;
    use mockall::predicate::eq;
    use rust_decimal::Decimal;
    use serde_json::json;

    use crate::database::models::{GatewayConfig, RegionalPrice};
    use crate::testing::{admin_token, sample_plan, send, TestContext};

    #[tokio::test]
    async fn lists_prices_for_existing_plan() {
        let mut ctx = TestContext::new();
        ctx.plans.expect_find_plan().with(eq(2)).returning(|id| Ok(Some(sample_plan(id))));
        ctx.pricing.expect_list_prices().with(eq(2)).returning(|plan_id| {
            Ok(vec![RegionalPrice {
                id: 1,
                plan_id,
                region_id: "eu".into(),
                country_code: Some("DE".into()),
                currency: "EUR".into(),
                price: Decimal::new(900, 2),
                updated_at: Utc::now(),
            }])
        });

        let (status, body) = send(ctx.into_app(), Method::GET, "/api/plans/2/pricing", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["currency"], "EUR");
    }

    #[tokio::test]
    async fn price_for_missing_plan_is_404() {
        let mut ctx = TestContext::new();
        ctx.plans.expect_find_plan().returning(|_| Ok(None));

        let token = admin_token();
        let (status, _) = send(
            ctx.into_app(),
            Method::PUT,
            "/api/admin/plans/5/pricing/eu",
            Some(&token),
            Some(json!({"currency": "EUR", "price": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalid_price_is_rejected_before_persistence() {
        let token = admin_token();
        let (status, body) = send(
            TestContext::new().into_app(),
            Method::PUT,
            "/api/admin/plans/5/pricing/eu",
            Some(&token),
            Some(json!({"currency": 978, "price": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn gateway_lookup_misses_are_404() {
        let mut ctx = TestContext::new();
        ctx.pricing
            .expect_find_gateway_config()
            .with(eq("mars".to_string()))
            .returning(|_| Ok(None));

        let (status, _) = send(ctx.into_app(), Method::GET, "/api/regions/mars/gateway", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn gateway_flags_must_be_booleans() {
        let token = admin_token();
        let (status, body) = send(
            TestContext::new().into_app(),
            Method::PUT,
            "/api/admin/regions/eu/gateway",
            Some(&token),
            Some(json!({"gateway_type": "paddle", "stripe_enabled": true, "paddle_enabled": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["field_errors"]["paddle_enabled"], "paddle_enabled is required and must be a boolean");
    }

    #[tokio::test]
    async fn gateway_upsert_uses_path_region() {
        let mut ctx = TestContext::new();
        ctx.pricing
            .expect_upsert_gateway_config()
            .withf(|config| config.region_id == "eu" && config.paddle_enabled)
            .times(1)
            .returning(|config| {
                Ok(GatewayConfig {
                    region_id: config.region_id,
                    gateway_type: config.gateway_type,
                    stripe_enabled: config.stripe_enabled,
                    paddle_enabled: config.paddle_enabled,
                    recommendation_reason: config.recommendation_reason,
                    updated_at: Utc::now(),
                })
            });

        let token = admin_token();
        let (status, body) = send(
            ctx.into_app(),
            Method::PUT,
            "/api/admin/regions/eu/gateway",
            Some(&token),
            Some(json!({"gateway_type": "paddle", "stripe_enabled": false, "paddle_enabled": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["gateway_type"], "paddle");
    }
}
