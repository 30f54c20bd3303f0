pub mod plan;
pub mod pricing;
pub mod subscription;

pub use plan::{EditablePlanChanges, GeneralPlanChanges, NewPlan, Plan};
pub use pricing::{GatewayConfig, NewGatewayConfig, NewRegionalPrice, RegionalPrice};
pub use subscription::{NewPayment, Payment, PaymentReceipt, UserSubscription};
