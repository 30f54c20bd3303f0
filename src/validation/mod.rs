//! Payload validation for plan, payment and gateway requests.
//!
//! Inbound bodies stay an open [`Payload`] map until they pass a checklist.
//! Every predicate in a checklist is evaluated, so a rejected payload reports
//! all of its problems at once.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

pub mod gateway;
pub mod payment;
pub mod plan;
pub mod pricing;

pub use gateway::{parse_gateway_config, validate_gateway_config};
pub use payment::{parse_payment_submission, validate_payment_submission, PaymentSubmission};
pub use plan::{parse_plan_creation, parse_plan_update, validate_plan_creation, validate_plan_update};
pub use pricing::{parse_regional_price, validate_regional_price};

/// Untyped request body: field name to loosely-typed value
pub type Payload = Map<String, Value>;

/// A single failed predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

/// Every violation found in one payload, in checklist order
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Validation failed: {}", .violations.iter().map(|v| v.message.as_str()).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub violations: Vec<Violation>,
}

impl ValidationError {
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            violations: vec![Violation {
                field: field.into(),
                message: message.into(),
            }],
        }
    }

    pub fn messages(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.message.as_str()).collect()
    }

    pub fn fields(&self) -> Vec<&str> {
        self.violations.iter().map(|v| v.field.as_str()).collect()
    }
}

/// Accumulates violations; finishing with none means the payload is accepted.
#[derive(Debug, Default)]
pub struct Checklist {
    violations: Vec<Violation>,
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, field: &str, ok: bool, message: impl Into<String>) -> &mut Self {
        if !ok {
            self.violations.push(Violation {
                field: field.to_string(),
                message: message.into(),
            });
        }
        self
    }

    /// Checks `ok` only when `field` is present in the payload
    pub fn check_present(
        &mut self,
        payload: &Payload,
        field: &str,
        ok: impl FnOnce(&Value) -> bool,
        message: impl Into<String>,
    ) -> &mut Self {
        match payload.get(field) {
            Some(value) => self.check(field, ok(value), message),
            None => self,
        }
    }

    pub fn extend(&mut self, other: ValidationError) -> &mut Self {
        self.violations.extend(other.violations);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                violations: self.violations,
            })
        }
    }
}

pub(crate) fn is_text(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(_)))
}

pub(crate) fn is_non_empty_text(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

pub(crate) fn is_number(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Number(_)))
}

pub(crate) fn is_positive_number(value: Option<&Value>) -> bool {
    matches!(value.and_then(Value::as_f64), Some(n) if n > 0.0)
}

pub(crate) fn is_bool(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(_)))
}

pub(crate) fn is_one_of(value: Option<&Value>, allowed: &[&str]) -> bool {
    matches!(value, Some(Value::String(s)) if allowed.contains(&s.as_str()))
}

/// JSON truthiness: null, false, 0 and "" are falsy, everything else is truthy
pub(crate) fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// Exact decimal conversion of a JSON number
pub(crate) fn to_decimal(value: &Value) -> Option<Decimal> {
    let Value::Number(n) = value else {
        return None;
    };
    let text = n.to_string();
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Money columns are NUMERIC(12,2): two decimals, magnitude below 10^10
const MONEY_SCALE: u32 = 2;
const MONEY_LIMIT: i64 = 10_000_000_000;

/// Exact decimal that a money column stores without rounding or overflow
pub(crate) fn to_money(value: &Value) -> Option<Decimal> {
    to_decimal(value).filter(|d| d.normalize().scale() <= MONEY_SCALE && d.abs() < Decimal::from(MONEY_LIMIT))
}

/// Percentage between 0 and 100 with at most two decimals
pub(crate) fn to_percentage(value: &Value) -> Option<Decimal> {
    to_decimal(value).filter(|d| {
        d.normalize().scale() <= MONEY_SCALE && *d >= Decimal::ZERO && *d <= Decimal::ONE_HUNDRED
    })
}

/// Positive numbers must also fit a money column; anything else is reported elsewhere
pub(crate) fn is_storable_if_positive(value: &Value) -> bool {
    !is_positive_number(Some(value)) || to_money(value).is_some()
}

pub(crate) fn money_message(label: &str) -> String {
    format!("{label} must have at most {MONEY_SCALE} decimal places and be less than {MONEY_LIMIT}")
}

/// Integral JSON number that fits a Postgres INTEGER
pub(crate) fn to_i32(value: &Value) -> Option<i32> {
    value.as_i64().and_then(|n| i32::try_from(n).ok())
}

pub(crate) fn text(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_string)
}
