use serde_json::Value;

use super::{is_bool, is_text, is_truthy, text, Checklist, Payload, ValidationError};
use crate::database::models::NewGatewayConfig;

/// Checks a region's gateway settings. The region id comes from the route, not the body.
pub fn validate_gateway_config(payload: &Payload, path_region_id: &str) -> Result<(), ValidationError> {
    let mut checklist = Checklist::new();

    checklist
        .check("region_id", !path_region_id.trim().is_empty(), "Region ID is required")
        .check("gateway_type", is_truthy(payload.get("gateway_type")), "Gateway type is required")
        .check(
            "stripe_enabled",
            is_bool(payload.get("stripe_enabled")),
            "stripe_enabled is required and must be a boolean",
        )
        .check(
            "paddle_enabled",
            is_bool(payload.get("paddle_enabled")),
            "paddle_enabled is required and must be a boolean",
        )
        .check_present(
            payload,
            "recommendation_reason",
            |v| is_text(Some(v)),
            "recommendation_reason must be a string",
        );

    checklist.finish()
}

pub fn parse_gateway_config(payload: &Payload, path_region_id: &str) -> Result<NewGatewayConfig, ValidationError> {
    validate_gateway_config(payload, path_region_id)?;

    // Any truthy gateway type is accepted; non-strings are stored as their JSON text
    let gateway_type = match payload.get("gateway_type") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => return Err(ValidationError::single("gateway_type", "Gateway type is required")),
    };

    Ok(NewGatewayConfig {
        region_id: path_region_id.trim().to_string(),
        gateway_type,
        stripe_enabled: payload.get("stripe_enabled").and_then(Value::as_bool).unwrap_or(false),
        paddle_enabled: payload.get("paddle_enabled").and_then(Value::as_bool).unwrap_or(false),
        recommendation_reason: text(payload.get("recommendation_reason")),
    })
}
