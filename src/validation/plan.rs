use serde_json::Value;

use super::{
    is_bool, is_non_empty_text, is_number, is_one_of, is_positive_number, is_storable_if_positive, money_message,
    text, to_i32, to_money, to_percentage, Checklist, Payload, ValidationError,
};
use crate::database::models::{GeneralPlanChanges, NewPlan};
use crate::plans::{PlanDuration, PlanType, ProcessingFeeType};

const NAME_MESSAGE: &str = "Name is required and must be a non-empty string";
const PRICE_MESSAGE: &str = "Price is required and must be a positive number";

fn duration_message() -> String {
    format!("Duration is required and must be one of: {}", PlanDuration::NAMES.join(", "))
}

fn type_message() -> String {
    format!("Type is required and must be one of: {}", PlanType::NAMES.join(", "))
}

/// Checks for a new plan. Capacity limits are only type-checked; any number is accepted.
pub fn validate_plan_creation(payload: &Payload) -> Result<(), ValidationError> {
    let mut checklist = Checklist::new();

    checklist
        .check("name", is_non_empty_text(payload.get("name")), NAME_MESSAGE)
        .check("price", is_positive_number(payload.get("price")), PRICE_MESSAGE)
        .check_present(payload, "price", is_storable_if_positive, money_message("Price"))
        .check(
            "duration",
            is_one_of(payload.get("duration"), PlanDuration::NAMES),
            duration_message(),
        )
        .check("type", is_one_of(payload.get("type"), PlanType::NAMES), type_message())
        .check(
            "max_elections",
            is_number(payload.get("max_elections")),
            "max_elections is required and must be a number",
        )
        .check(
            "max_voters_per_election",
            is_number(payload.get("max_voters_per_election")),
            "max_voters_per_election is required and must be a number",
        );

    checklist.check_present(
        payload,
        "description",
        |v| v.is_null() || v.is_string(),
        "description must be a string",
    );
    check_fee_values(&mut checklist, payload, true);

    checklist.finish()
}

/// Checks for the general update channel: only the fields that are present.
pub fn validate_plan_update(payload: &Payload) -> Result<(), ValidationError> {
    let mut checklist = Checklist::new();

    checklist
        .check_present(payload, "name", |v| is_non_empty_text(Some(v)), "Name must be a non-empty string")
        .check_present(payload, "price", |v| is_positive_number(Some(v)), "Price must be a positive number")
        .check_present(payload, "price", is_storable_if_positive, money_message("Price"))
        .check_present(
            payload,
            "duration",
            |v| is_one_of(Some(v), PlanDuration::NAMES),
            format!("Duration must be one of: {}", PlanDuration::NAMES.join(", ")),
        )
        .check_present(
            payload,
            "type",
            |v| is_one_of(Some(v), PlanType::NAMES),
            format!("Type must be one of: {}", PlanType::NAMES.join(", ")),
        )
        .check_present(
            payload,
            "description",
            |v| v.is_null() || v.is_string(),
            "description must be a string",
        )
        .check_present(payload, "is_active", |v| is_bool(Some(v)), "is_active must be a boolean");

    checklist.finish()
}

/// Type checks shared by plan creation and the editable channel.
///
/// With `allow_null`, a JSON null counts as "not set".
pub(crate) fn check_fee_values(checklist: &mut Checklist, payload: &Payload, allow_null: bool) {
    let nullable = |v: &Value| allow_null && v.is_null();

    checklist
        .check_present(
            payload,
            "processing_fee_mandatory",
            |v| nullable(v) || v.is_boolean(),
            "processing_fee_mandatory must be a boolean",
        )
        .check_present(
            payload,
            "processing_fee_fixed_amount",
            |v| nullable(v) || to_money(v).is_some_and(|d| !d.is_sign_negative()),
            "processing_fee_fixed_amount must be a non-negative amount with at most 2 decimal places",
        )
        .check_present(
            payload,
            "processing_fee_type",
            |v| nullable(v) || is_one_of(Some(v), ProcessingFeeType::NAMES),
            format!("processing_fee_type must be one of: {}", ProcessingFeeType::NAMES.join(", ")),
        )
        .check_present(
            payload,
            "processing_fee_percentage",
            |v| nullable(v) || to_percentage(v).is_some(),
            "processing_fee_percentage must be a number between 0 and 100 with at most 2 decimal places",
        );
}

fn required<T>(value: Option<T>, field: &str, message: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::single(field, message))
}

/// Validate a creation payload and build the row to insert.
pub fn parse_plan_creation(payload: &Payload) -> Result<NewPlan, ValidationError> {
    validate_plan_creation(payload)?;

    // Capacity columns are integers, so fractional limits are refused here
    let mut checklist = Checklist::new();
    checklist
        .check(
            "max_elections",
            payload.get("max_elections").and_then(to_i32).is_some(),
            "max_elections must be a whole number",
        )
        .check(
            "max_voters_per_election",
            payload.get("max_voters_per_election").and_then(to_i32).is_some(),
            "max_voters_per_election must be a whole number",
        );
    checklist.finish()?;

    Ok(NewPlan {
        name: required(text(payload.get("name")), "name", NAME_MESSAGE)?,
        description: text(payload.get("description")),
        price: required(payload.get("price").and_then(to_money), "price", PRICE_MESSAGE)?,
        duration: required(
            payload.get("duration").and_then(Value::as_str).and_then(|s| s.parse().ok()),
            "duration",
            &duration_message(),
        )?,
        plan_type: required(
            payload.get("type").and_then(Value::as_str).and_then(|s| s.parse().ok()),
            "type",
            &type_message(),
        )?,
        max_elections: required(
            payload.get("max_elections").and_then(to_i32),
            "max_elections",
            "max_elections must be a whole number",
        )?,
        max_voters_per_election: required(
            payload.get("max_voters_per_election").and_then(to_i32),
            "max_voters_per_election",
            "max_voters_per_election must be a whole number",
        )?,
        processing_fee_mandatory: payload
            .get("processing_fee_mandatory")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        processing_fee_fixed_amount: payload.get("processing_fee_fixed_amount").and_then(to_money),
        processing_fee_type: payload
            .get("processing_fee_type")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        processing_fee_percentage: payload.get("processing_fee_percentage").and_then(to_percentage),
    })
}

/// Validate a general-channel payload and collect the known column changes.
/// Fields without a column are left out.
pub fn parse_plan_update(payload: &Payload) -> Result<GeneralPlanChanges, ValidationError> {
    validate_plan_update(payload)?;

    Ok(GeneralPlanChanges {
        name: text(payload.get("name")),
        description: payload.get("description").map(|v| v.as_str().map(str::to_string)),
        price: payload.get("price").and_then(to_money),
        duration: payload
            .get("duration")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
        plan_type: payload.get("type").and_then(Value::as_str).and_then(|s| s.parse().ok()),
        is_active: payload.get("is_active").and_then(Value::as_bool),
    })
}
