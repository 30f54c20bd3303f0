use async_trait::async_trait;
use sqlx::PgPool;

use super::manager::DatabaseError;
use super::models::{GatewayConfig, NewGatewayConfig, NewRegionalPrice, RegionalPrice};
use super::repository::PricingRepository;

pub struct PgPricingRepository {
    pool: PgPool,
}

impl PgPricingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PricingRepository for PgPricingRepository {
    async fn list_prices(&self, plan_id: i64) -> Result<Vec<RegionalPrice>, DatabaseError> {
        let prices = sqlx::query_as::<_, RegionalPrice>(
            "SELECT id, plan_id, region_id, country_code, currency, price, updated_at
             FROM regional_pricing
             WHERE plan_id = $1
             ORDER BY region_id",
        )
        .bind(plan_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(prices)
    }

    async fn upsert_price(&self, price: NewRegionalPrice) -> Result<RegionalPrice, DatabaseError> {
        let stored = sqlx::query_as::<_, RegionalPrice>(
            "INSERT INTO regional_pricing (plan_id, region_id, country_code, currency, price)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (plan_id, region_id) DO UPDATE SET
                country_code = EXCLUDED.country_code,
                currency = EXCLUDED.currency,
                price = EXCLUDED.price,
                updated_at = NOW()
             RETURNING id, plan_id, region_id, country_code, currency, price, updated_at",
        )
        .bind(price.plan_id)
        .bind(&price.region_id)
        .bind(&price.country_code)
        .bind(&price.currency)
        .bind(price.price)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;
        Ok(stored)
    }

    async fn find_gateway_config(&self, region_id: String) -> Result<Option<GatewayConfig>, DatabaseError> {
        let config = sqlx::query_as::<_, GatewayConfig>(
            "SELECT region_id, gateway_type, stripe_enabled, paddle_enabled, recommendation_reason, updated_at
             FROM region_gateway_configs
             WHERE region_id = $1",
        )
        .bind(region_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(config)
    }

    async fn upsert_gateway_config(&self, config: NewGatewayConfig) -> Result<GatewayConfig, DatabaseError> {
        let stored = sqlx::query_as::<_, GatewayConfig>(
            "INSERT INTO region_gateway_configs
                (region_id, gateway_type, stripe_enabled, paddle_enabled, recommendation_reason)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (region_id) DO UPDATE SET
                gateway_type = EXCLUDED.gateway_type,
                stripe_enabled = EXCLUDED.stripe_enabled,
                paddle_enabled = EXCLUDED.paddle_enabled,
                recommendation_reason = EXCLUDED.recommendation_reason,
                updated_at = NOW()
             RETURNING region_id, gateway_type, stripe_enabled, paddle_enabled, recommendation_reason, updated_at",
        )
        .bind(&config.region_id)
        .bind(&config.gateway_type)
        .bind(config.stripe_enabled)
        .bind(config.paddle_enabled)
        .bind(&config.recommendation_reason)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)?;
        Ok(stored)
    }
}
