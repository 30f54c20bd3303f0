use async_trait::async_trait;

use super::manager::DatabaseError;
use super::models::{
    EditablePlanChanges, GatewayConfig, GeneralPlanChanges, NewGatewayConfig, NewPayment, NewPlan, NewRegionalPrice,
    PaymentReceipt, Plan, RegionalPrice, UserSubscription,
};
use super::repository::{PlanRepository, PricingRepository, SubscriptionRepository};

/// Stands in for every repository when no database URL is configured.
/// Every call fails with `ConfigMissing`, which the API reports as 503.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineRepository;

fn missing<T>() -> Result<T, DatabaseError> {
    Err(DatabaseError::ConfigMissing("DATABASE_URL"))
}

#[async_trait]
impl PlanRepository for OfflineRepository {
    async fn list_plans(&self, _include_inactive: bool) -> Result<Vec<Plan>, DatabaseError> {
        missing()
    }

    async fn find_plan(&self, _id: i64) -> Result<Option<Plan>, DatabaseError> {
        missing()
    }

    async fn create_plan(&self, _plan: NewPlan) -> Result<Plan, DatabaseError> {
        missing()
    }

    async fn update_general_fields(
        &self,
        _id: i64,
        _changes: GeneralPlanChanges,
    ) -> Result<Option<Plan>, DatabaseError> {
        missing()
    }

    async fn update_editable_fields(
        &self,
        _id: i64,
        _changes: EditablePlanChanges,
    ) -> Result<Option<Plan>, DatabaseError> {
        missing()
    }

    async fn delete_plan(&self, _id: i64) -> Result<bool, DatabaseError> {
        missing()
    }
}

#[async_trait]
impl PricingRepository for OfflineRepository {
    async fn list_prices(&self, _plan_id: i64) -> Result<Vec<RegionalPrice>, DatabaseError> {
        missing()
    }

    async fn upsert_price(&self, _price: NewRegionalPrice) -> Result<RegionalPrice, DatabaseError> {
        missing()
    }

    async fn find_gateway_config(&self, _region_id: String) -> Result<Option<GatewayConfig>, DatabaseError> {
        missing()
    }

    async fn upsert_gateway_config(&self, _config: NewGatewayConfig) -> Result<GatewayConfig, DatabaseError> {
        missing()
    }
}

#[async_trait]
impl SubscriptionRepository for OfflineRepository {
    async fn find_subscription(&self, _user_id: i64) -> Result<Option<UserSubscription>, DatabaseError> {
        missing()
    }

    async fn record_payment(&self, _payment: NewPayment) -> Result<PaymentReceipt, DatabaseError> {
        missing()
    }

    async fn cancel_subscription(&self, _user_id: i64) -> Result<Option<UserSubscription>, DatabaseError> {
        missing()
    }
}
