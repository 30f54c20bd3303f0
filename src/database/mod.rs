pub mod manager;
pub mod models;
pub mod offline;
pub mod plans;
pub mod pricing;
pub mod repository;
pub mod subscriptions;

pub use manager::{DatabaseError, DatabaseManager};
pub use offline::OfflineRepository;
pub use plans::PgPlanRepository;
pub use pricing::PgPricingRepository;
pub use repository::{PlanRepository, PricingRepository, SubscriptionRepository};
pub use subscriptions::PgSubscriptionRepository;
