//! Billing rules applied when a payment is recorded.

pub mod fees;
pub mod pricing;
pub mod status;

pub use fees::processing_fee;
pub use pricing::{quote_price, PriceQuote};
pub use status::{period_end, SubscriptionStatus, STATUS_ACTIVE, STATUS_CANCELLED};
