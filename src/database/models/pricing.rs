use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Price of a plan in one region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct RegionalPrice {
    pub id: i64,
    pub plan_id: i64,
    pub region_id: String,
    pub country_code: Option<String>,
    pub currency: String,
    pub price: Decimal,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRegionalPrice {
    pub plan_id: i64,
    pub region_id: String,
    pub country_code: Option<String>,
    pub currency: String,
    pub price: Decimal,
}

/// Which payment gateways are offered in a region
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct GatewayConfig {
    pub region_id: String,
    pub gateway_type: String,
    pub stripe_enabled: bool,
    pub paddle_enabled: bool,
    pub recommendation_reason: Option<String>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGatewayConfig {
    pub region_id: String,
    pub gateway_type: String,
    pub stripe_enabled: bool,
    pub paddle_enabled: bool,
    pub recommendation_reason: Option<String>,
}
