use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::plans::PaymentMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserSubscription {
    pub user_id: i64,
    pub plan_id: i64,
    pub status: String,
    pub started_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub plan_id: i64,
    pub amount: Decimal,
    pub processing_fee: Decimal,
    pub currency: String,
    pub country_code: String,
    pub payment_method: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPayment {
    pub user_id: i64,
    pub plan_id: i64,
    pub amount: Decimal,
    pub processing_fee: Decimal,
    pub currency: String,
    pub country_code: String,
    pub payment_method: Option<PaymentMethod>,
    /// End of the paid period; `None` for plans that never lapse
    pub expires_at: Option<DateTime<Utc>>,
}

/// A recorded payment together with the subscription it activated
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentReceipt {
    pub payment: Payment,
    pub subscription: UserSubscription,
}
