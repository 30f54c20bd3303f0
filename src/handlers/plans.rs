use axum::extract::{Path, State};
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::database::models::Plan;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, JsonObject};
use crate::state::AppState;
use crate::validation::{parse_plan_creation, parse_plan_update};

/// GET /api/plans - active plans, cheapest first
pub async fn list_plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    let plans = state.plans.list_plans(false).await?;
    Ok(ApiResponse::success(plans))
}

/// GET /api/plans/:id
pub async fn get_plan(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Plan> {
    let plan = state
        .plans
        .find_plan(id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Plan {} not found", id)))?;
    Ok(ApiResponse::success(plan))
}

/// GET /api/admin/plans - every plan, including inactive ones
pub async fn admin_list_plans(State(state): State<AppState>) -> ApiResult<Vec<Plan>> {
    let plans = state.plans.list_plans(true).await?;
    Ok(ApiResponse::success(plans))
}

/// POST /api/admin/plans
pub async fn create_plan(State(state): State<AppState>, JsonObject(payload): JsonObject) -> ApiResult<Plan> {
    let new_plan = parse_plan_creation(&payload).map_err(|e| {
        warn!(fields = ?e.fields(), "Rejected plan creation");
        e
    })?;

    let plan = state.plans.create_plan(new_plan).await?;
    info!(plan_id = plan.id, name = %plan.name, "Plan created");
    Ok(ApiResponse::created(plan))
}

/// PUT /api/admin/plans/:id - general channel; editable fields are refused
pub async fn update_plan(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonObject(payload): JsonObject,
) -> ApiResult<Plan> {
    state.gate.route_general_update(&payload).map_err(|e| {
        warn!(plan_id = id, channel = ?state.gate.channel_of(&payload), "Rejected general plan update: {}", e);
        e
    })?;

    let changes = parse_plan_update(&payload).map_err(|e| {
        warn!(plan_id = id, fields = ?e.fields(), "Rejected general plan update");
        e
    })?;
    if changes.is_empty() {
        return Err(ApiError::bad_request("No updatable plan fields provided"));
    }

    let plan = state
        .plans
        .update_general_fields(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Plan {} not found", id)))?;
    info!(plan_id = id, "Plan updated");
    Ok(ApiResponse::success(plan))
}

/// PATCH /api/admin/plans/:id/editable-fields
pub async fn update_editable_fields(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    JsonObject(payload): JsonObject,
) -> ApiResult<Plan> {
    let accepted = state.gate.route_editable_update(&payload).map_err(|e| {
        warn!(plan_id = id, channel = ?state.gate.channel_of(&payload), "Rejected editable-field update: {}", e);
        e
    })?;
    if accepted.is_empty() {
        return Err(ApiError::bad_request("No editable fields provided"));
    }

    let fields: Vec<String> = accepted.fields().iter().map(|f| f.to_string()).collect();
    let changes = accepted.into_changes().map_err(|e| {
        warn!(plan_id = id, fields = ?e.fields(), "Rejected editable-field values");
        e
    })?;

    let plan = state
        .plans
        .update_editable_fields(id, changes)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Plan {} not found", id)))?;
    info!(plan_id = id, ?fields, "Editable plan fields updated");
    Ok(ApiResponse::success(plan))
}

/// DELETE /api/admin/plans/:id
pub async fn delete_plan(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Value> {
    if !state.plans.delete_plan(id).await? {
        return Err(ApiError::not_found(format!("Plan {} not found", id)));
    }
    info!(plan_id = id, "Plan deleted");
    Ok(ApiResponse::success(json!({ "id": id, "deleted": true })))
}
