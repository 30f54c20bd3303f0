// Handlers grouped by resource. Access tiers are applied in the router:
// public (no auth), authenticated (JWT) and admin (JWT with admin role).
pub mod plans;
pub mod pricing;
pub mod subscriptions;
pub mod system;
