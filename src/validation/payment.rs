use rust_decimal::Decimal;
use serde_json::Value;

use super::{
    is_one_of, is_positive_number, is_text, is_truthy, money_message, text, to_money, Checklist, Payload,
    ValidationError,
};
use crate::plans::PaymentMethod;

/// A payment request that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentSubmission {
    pub amount: Decimal,
    pub currency: String,
    pub country_code: String,
    pub plan_id: i64,
    pub payment_method: Option<PaymentMethod>,
}

pub fn validate_payment_submission(payload: &Payload) -> Result<(), ValidationError> {
    let mut checklist = Checklist::new();

    checklist
        .check(
            "amount",
            is_positive_number(payload.get("amount")),
            "Amount is required and must be a positive number",
        )
        .check("currency", is_text(payload.get("currency")), "Currency is required and must be a string")
        .check(
            "country_code",
            is_text(payload.get("country_code")),
            "Country code is required and must be a string",
        )
        .check("planId", is_truthy(payload.get("planId")), "Plan ID is required")
        .check_present(
            payload,
            "payment_method",
            |v| is_one_of(Some(v), PaymentMethod::NAMES),
            format!("Payment method must be one of: {}", PaymentMethod::NAMES.join(", ")),
        );

    checklist.finish()
}

/// Plan ids arrive either as JSON integers or as integer strings
fn plan_id_from(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub fn parse_payment_submission(payload: &Payload) -> Result<PaymentSubmission, ValidationError> {
    validate_payment_submission(payload)?;

    let plan_id = plan_id_from(payload.get("planId"))
        .filter(|id| *id > 0)
        .ok_or_else(|| ValidationError::single("planId", "Plan ID must be a positive integer"))?;
    let amount = payload
        .get("amount")
        .and_then(to_money)
        .ok_or_else(|| ValidationError::single("amount", money_message("Amount")))?;

    Ok(PaymentSubmission {
        amount,
        currency: text(payload.get("currency")).unwrap_or_default(),
        country_code: text(payload.get("country_code")).unwrap_or_default(),
        plan_id,
        payment_method: payload
            .get("payment_method")
            .and_then(Value::as_str)
            .and_then(|s| s.parse().ok()),
    })
}
