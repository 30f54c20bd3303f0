use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware::from_fn,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{self, AppConfig};
use crate::handlers::{plans, pricing, subscriptions, system};
use crate::middleware::{jwt_auth_middleware, require_admin};
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let config = config::config();

    let mut router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .merge(public_routes())
        // Protected
        .merge(subscription_routes())
        .merge(admin_routes())
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if let Some(cors) = cors_layer(config) {
        router = router.layer(cors);
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/plans", get(plans::list_plans))
        .route("/api/plans/:id", get(plans::get_plan))
        .route("/api/plans/:id/pricing", get(pricing::list_plan_pricing))
        .route("/api/regions/:region_id/gateway", get(pricing::get_region_gateway))
}

fn subscription_routes() -> Router<AppState> {
    Router::new()
        .route("/api/subscriptions/me", get(subscriptions::my_subscription))
        .route("/api/subscriptions/payments", post(subscriptions::submit_payment))
        .route("/api/subscriptions/me/cancel", post(subscriptions::cancel_subscription))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/plans", get(plans::admin_list_plans).post(plans::create_plan))
        .route("/api/admin/plans/:id", put(plans::update_plan).delete(plans::delete_plan))
        .route("/api/admin/plans/:id/editable-fields", patch(plans::update_editable_fields))
        .route("/api/admin/plans/:id/pricing/:region_id", put(pricing::upsert_plan_price))
        .route("/api/admin/regions/:region_id/gateway", put(pricing::upsert_region_gateway))
        // Layers run bottom-up: authenticate, then check the role
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn(jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if crate::is_development!() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any),
    )
}
