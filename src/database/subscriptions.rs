use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use super::manager::DatabaseError;
use super::models::{NewPayment, Payment, PaymentReceipt, UserSubscription};
use super::repository::SubscriptionRepository;
use crate::billing::{STATUS_ACTIVE, STATUS_CANCELLED};

const SUBSCRIPTION_COLUMNS: &str = "user_id, plan_id, status, started_at, expires_at, updated_at";

const PAYMENT_STATUS_COMPLETED: &str = "completed";

pub struct PgSubscriptionRepository {
    pool: PgPool,
}

impl PgSubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SubscriptionRepository for PgSubscriptionRepository {
    async fn find_subscription(&self, user_id: i64) -> Result<Option<UserSubscription>, DatabaseError> {
        let sql = format!("SELECT {} FROM user_subscriptions WHERE user_id = $1", SUBSCRIPTION_COLUMNS);
        let subscription = sqlx::query_as::<_, UserSubscription>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }

    async fn record_payment(&self, payment: NewPayment) -> Result<PaymentReceipt, DatabaseError> {
        let mut tx = self.pool.begin().await?;

        let stored = sqlx::query_as::<_, Payment>(
            "INSERT INTO payments
                (user_id, plan_id, amount, processing_fee, currency, country_code, payment_method, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id, user_id, plan_id, amount, processing_fee, currency, country_code,
                       payment_method, status, created_at",
        )
        .bind(payment.user_id)
        .bind(payment.plan_id)
        .bind(payment.amount)
        .bind(payment.processing_fee)
        .bind(&payment.currency)
        .bind(&payment.country_code)
        .bind(payment.payment_method.map(|m| m.as_str()))
        .bind(PAYMENT_STATUS_COMPLETED)
        .fetch_one(&mut *tx)
        .await
        .map_err(DatabaseError::from_query)?;

        let sql = format!(
            "INSERT INTO user_subscriptions (user_id, plan_id, status, started_at, expires_at, updated_at)
             VALUES ($1, $2, $3, NOW(), $4, NOW())
             ON CONFLICT (user_id) DO UPDATE SET
                plan_id = EXCLUDED.plan_id,
                status = EXCLUDED.status,
                started_at = EXCLUDED.started_at,
                expires_at = EXCLUDED.expires_at,
                updated_at = NOW()
             RETURNING {}",
            SUBSCRIPTION_COLUMNS
        );
        let subscription = sqlx::query_as::<_, UserSubscription>(&sql)
            .bind(payment.user_id)
            .bind(payment.plan_id)
            .bind(STATUS_ACTIVE)
            .bind(payment.expires_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(DatabaseError::from_query)?;

        tx.commit().await?;

        info!(
            payment_id = stored.id,
            user_id = payment.user_id,
            plan_id = payment.plan_id,
            "recorded payment and activated subscription"
        );
        Ok(PaymentReceipt {
            payment: stored,
            subscription,
        })
    }

    async fn cancel_subscription(&self, user_id: i64) -> Result<Option<UserSubscription>, DatabaseError> {
        let sql = format!(
            "UPDATE user_subscriptions SET status = $2, updated_at = NOW() WHERE user_id = $1 RETURNING {}",
            SUBSCRIPTION_COLUMNS
        );
        let subscription = sqlx::query_as::<_, UserSubscription>(&sql)
            .bind(user_id)
            .bind(STATUS_CANCELLED)
            .fetch_optional(&self.pool)
            .await?;
        Ok(subscription)
    }
}
