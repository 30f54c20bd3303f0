use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET / - service banner
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Ballot Plans API",
            "version": version,
            "description": "Subscription plans, regional pricing and subscriptions",
            "endpoints": {
                "plans": "/api/plans[/:id[/pricing]] (public)",
                "gateways": "/api/regions/:region_id/gateway (public)",
                "subscriptions": "/api/subscriptions/* (authenticated)",
                "admin": "/api/admin/* (admin role)",
                "health": "/health (public)"
            }
        }
    }))
}

/// GET /health - 503 whenever the database is unreachable or not configured
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(db) = state.db.as_ref() else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database not configured",
                "data": { "status": "degraded", "timestamp": now, "database": "not_configured" }
            })),
        );
    };

    match db.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "database": "ok" }
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "database unavailable",
                    "data": { "status": "degraded", "timestamp": now, "database": "unavailable" }
                })),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};

    use crate::testing::{send, TestContext};

    #[tokio::test]
    async fn root_lists_endpoints() {
        let (status, body) = send(TestContext::new().into_app(), Method::GET, "/", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "Ballot Plans API");
    }

    #[tokio::test]
    async fn health_without_database_is_503() {
        let (status, body) = send(TestContext::new().into_app(), Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["data"]["database"], "not_configured");
    }
}
