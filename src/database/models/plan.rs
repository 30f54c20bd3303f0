use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::plans::{PlanDuration, PlanType, ProcessingFeeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Plan {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub plan_type: String,
    pub max_elections: i32,
    pub max_voters_per_election: i32,
    pub processing_fee_mandatory: bool,
    pub processing_fee_fixed_amount: Option<Decimal>,
    pub processing_fee_type: Option<String>,
    pub processing_fee_percentage: Option<Decimal>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Plan {
    pub fn duration(&self) -> Option<PlanDuration> {
        self.duration.parse().ok()
    }

    pub fn fee_type(&self) -> Option<ProcessingFeeType> {
        self.processing_fee_type.as_deref().and_then(|t| t.parse().ok())
    }
}

/// Validated plan ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewPlan {
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub duration: PlanDuration,
    pub plan_type: PlanType,
    pub max_elections: i32,
    pub max_voters_per_election: i32,
    pub processing_fee_mandatory: bool,
    pub processing_fee_fixed_amount: Option<Decimal>,
    pub processing_fee_type: Option<ProcessingFeeType>,
    pub processing_fee_percentage: Option<Decimal>,
}

/// Editable-channel changes. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditablePlanChanges {
    pub max_elections: Option<i32>,
    pub max_voters_per_election: Option<i32>,
    pub processing_fee_mandatory: Option<bool>,
    pub processing_fee_fixed_amount: Option<Decimal>,
    pub processing_fee_type: Option<ProcessingFeeType>,
    pub processing_fee_percentage: Option<Decimal>,
}

/// General-channel changes. `None` leaves the stored column untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralPlanChanges {
    pub name: Option<String>,
    /// `Some(None)` clears the description
    pub description: Option<Option<String>>,
    pub price: Option<Decimal>,
    pub duration: Option<PlanDuration>,
    pub plan_type: Option<PlanType>,
    pub is_active: Option<bool>,
}

impl GeneralPlanChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
