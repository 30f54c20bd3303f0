//! Persistence seams used by the HTTP handlers.
//!
//! Handlers only see these traits; the Postgres implementations live next to
//! them and tests swap in mocks.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use super::manager::DatabaseError;
use super::models::{
    EditablePlanChanges, GatewayConfig, GeneralPlanChanges, NewGatewayConfig, NewPayment, NewPlan, NewRegionalPrice,
    PaymentReceipt, Plan, RegionalPrice, UserSubscription,
};

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PlanRepository {
    async fn list_plans(&self, include_inactive: bool) -> Result<Vec<Plan>, DatabaseError>;

    async fn find_plan(&self, id: i64) -> Result<Option<Plan>, DatabaseError>;

    async fn create_plan(&self, plan: NewPlan) -> Result<Plan, DatabaseError>;

    /// Applies the general-channel changes atomically. `None` when the plan does not exist.
    async fn update_general_fields(&self, id: i64, changes: GeneralPlanChanges)
        -> Result<Option<Plan>, DatabaseError>;

    /// Applies the editable-channel changes atomically. `None` when the plan does not exist.
    async fn update_editable_fields(
        &self,
        id: i64,
        changes: EditablePlanChanges,
    ) -> Result<Option<Plan>, DatabaseError>;

    /// `false` when there was nothing to delete
    async fn delete_plan(&self, id: i64) -> Result<bool, DatabaseError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PricingRepository {
    async fn list_prices(&self, plan_id: i64) -> Result<Vec<RegionalPrice>, DatabaseError>;

    async fn upsert_price(&self, price: NewRegionalPrice) -> Result<RegionalPrice, DatabaseError>;

    async fn find_gateway_config(&self, region_id: String) -> Result<Option<GatewayConfig>, DatabaseError>;

    async fn upsert_gateway_config(&self, config: NewGatewayConfig) -> Result<GatewayConfig, DatabaseError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubscriptionRepository {
    async fn find_subscription(&self, user_id: i64) -> Result<Option<UserSubscription>, DatabaseError>;

    /// Stores the payment and (re)activates the user's subscription in one transaction
    async fn record_payment(&self, payment: NewPayment) -> Result<PaymentReceipt, DatabaseError>;

    async fn cancel_subscription(&self, user_id: i64) -> Result<Option<UserSubscription>, DatabaseError>;
}
