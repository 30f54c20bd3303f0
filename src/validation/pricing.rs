use serde_json::Value;

use super::{
    is_positive_number, is_storable_if_positive, is_text, money_message, text, to_money, Checklist, Payload,
    ValidationError,
};
use crate::database::models::NewRegionalPrice;

pub fn validate_regional_price(payload: &Payload, path_region_id: &str) -> Result<(), ValidationError> {
    let mut checklist = Checklist::new();

    checklist
        .check("region_id", !path_region_id.trim().is_empty(), "Region ID is required")
        .check("currency", is_text(payload.get("currency")), "Currency is required and must be a string")
        .check(
            "price",
            is_positive_number(payload.get("price")),
            "Price is required and must be a positive number",
        )
        .check_present(payload, "price", is_storable_if_positive, money_message("Price"))
        .check_present(
            payload,
            "country_code",
            |v| v.is_null() || v.is_string(),
            "country_code must be a string",
        );

    checklist.finish()
}

pub fn parse_regional_price(
    payload: &Payload,
    plan_id: i64,
    path_region_id: &str,
) -> Result<NewRegionalPrice, ValidationError> {
    validate_regional_price(payload, path_region_id)?;

    let price = payload
        .get("price")
        .and_then(to_money)
        .ok_or_else(|| ValidationError::single("price", "Price is required and must be a positive number"))?;

    Ok(NewRegionalPrice {
        plan_id,
        region_id: path_region_id.trim().to_string(),
        country_code: payload.get("country_code").and_then(Value::as_str).map(str::to_string),
        currency: text(payload.get("currency")).unwrap_or_default(),
        price,
    })
}
