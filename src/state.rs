use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{
    DatabaseError, DatabaseManager, OfflineRepository, PgPlanRepository, PgPricingRepository,
    PgSubscriptionRepository, PlanRepository, PricingRepository, SubscriptionRepository,
};
use crate::plans::FieldGate;

/// Shared handler state: repositories, the field gate and the pool handle
#[derive(Clone)]
pub struct AppState {
    pub plans: Arc<dyn PlanRepository + Send + Sync>,
    pub pricing: Arc<dyn PricingRepository + Send + Sync>,
    pub subscriptions: Arc<dyn SubscriptionRepository + Send + Sync>,
    pub gate: Arc<FieldGate>,
    /// `None` when no database is configured
    pub db: Option<DatabaseManager>,
}

impl AppState {
    /// Wire Postgres repositories when a database URL is configured, offline ones otherwise
    pub fn from_config(config: &AppConfig) -> Result<Self, DatabaseError> {
        let gate = FieldGate::new(config.plans.general_field_policy);

        match DatabaseManager::connect_lazy(&config.database) {
            Ok(db) => Ok(Self::with_database(db, gate)),
            Err(DatabaseError::ConfigMissing(key)) => {
                tracing::warn!("{} not set; plan and subscription routes will answer 503", key);
                Ok(Self::offline(gate))
            }
            Err(e) => Err(e),
        }
    }

    pub fn with_database(db: DatabaseManager, gate: FieldGate) -> Self {
        let pool = db.pool().clone();
        Self {
            plans: Arc::new(PgPlanRepository::new(pool.clone())),
            pricing: Arc::new(PgPricingRepository::new(pool.clone())),
            subscriptions: Arc::new(PgSubscriptionRepository::new(pool)),
            gate: Arc::new(gate),
            db: Some(db),
        }
    }

    pub fn offline(gate: FieldGate) -> Self {
        Self {
            plans: Arc::new(OfflineRepository),
            pricing: Arc::new(OfflineRepository),
            subscriptions: Arc::new(OfflineRepository),
            gate: Arc::new(gate),
            db: None,
        }
    }
}
