//! Field authorization for plan updates.
//!
//! A plan can be changed through two endpoints. The editable-fields endpoint
//! accepts only the members of [`EditableFieldSet`]; the general endpoint
//! accepts anything except those members. Each endpoint checks its own side of
//! the split, so every field belongs to exactly one channel no matter which
//! door a request comes through.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use super::fields::{EditableFieldSet, PlanUpdateChannel, GENERAL_FIELDS};
use crate::database::models::EditablePlanChanges;
use crate::validation::plan::check_fee_values;
use crate::validation::{to_i32, to_money, to_percentage, Checklist, Payload, ValidationError};

/// Route clients are redirected to when they send editable fields to the general endpoint
pub const EDITABLE_FIELDS_ENDPOINT: &str = "PATCH /api/admin/plans/:id/editable-fields";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GateError {
    #[error(
        "Invalid fields: {}. Only the following fields can be updated: {}",
        .invalid.join(", "),
        .allowed.join(", ")
    )]
    InvalidField { invalid: Vec<String>, allowed: Vec<String> },

    #[error("Fields {} can only be updated via {endpoint}", .fields.join(", "))]
    WrongChannel { fields: Vec<String>, endpoint: String },

    #[error(
        "Unsupported fields: {}. Supported fields are: {}",
        .fields.join(", "),
        .supported.join(", ")
    )]
    UnsupportedField { fields: Vec<String>, supported: Vec<String> },
}

/// What the general endpoint does with field names it has no column for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeneralFieldPolicy {
    /// Accept and forward them; persistence writes only the columns it knows
    PassThrough,
    /// Reject the whole request
    Reject,
}

impl FromStr for GeneralFieldPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "passthrough" | "pass_through" | "pass-through" => Ok(Self::PassThrough),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown general field policy '{}'", other)),
        }
    }
}

impl fmt::Display for GeneralFieldPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PassThrough => f.write_str("passthrough"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Editable fields that passed the gate, with their raw values.
///
/// Only fields present in the request are held; anything absent stays
/// unspecified all the way down to persistence.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedFieldSet {
    /// Accepted names in allow-list order
    fields: Vec<&'static str>,
    values: Payload,
}

impl AcceptedFieldSet {
    pub fn fields(&self) -> Vec<&str> {
        self.fields.clone()
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Type-check the accepted values and turn them into column changes
    pub fn into_changes(self) -> Result<EditablePlanChanges, ValidationError> {
        let values = &self.values;
        let mut checklist = Checklist::new();

        checklist
            .check_present(
                values,
                "max_elections",
                |v| to_i32(v).is_some(),
                "max_elections must be an integer",
            )
            .check_present(
                values,
                "max_voters_per_election",
                |v| to_i32(v).is_some(),
                "max_voters_per_election must be an integer",
            );
        check_fee_values(&mut checklist, values, false);
        checklist.finish()?;

        Ok(EditablePlanChanges {
            max_elections: values.get("max_elections").and_then(to_i32),
            max_voters_per_election: values.get("max_voters_per_election").and_then(to_i32),
            processing_fee_mandatory: values.get("processing_fee_mandatory").and_then(Value::as_bool),
            processing_fee_fixed_amount: values.get("processing_fee_fixed_amount").and_then(to_money),
            processing_fee_type: values
                .get("processing_fee_type")
                .and_then(Value::as_str)
                .and_then(|s| s.parse().ok()),
            processing_fee_percentage: values.get("processing_fee_percentage").and_then(to_percentage),
        })
    }
}

/// Decides which channel may touch which plan fields.
///
/// Built once at startup and shared read-only by every handler.
#[derive(Debug, Clone)]
pub struct FieldGate {
    editable: EditableFieldSet,
    general_policy: GeneralFieldPolicy,
}

impl FieldGate {
    pub fn new(general_policy: GeneralFieldPolicy) -> Self {
        Self {
            editable: EditableFieldSet::new(),
            general_policy,
        }
    }

    pub fn editable_fields(&self) -> &EditableFieldSet {
        &self.editable
    }

    pub fn general_policy(&self) -> GeneralFieldPolicy {
        self.general_policy
    }

    /// Which channel the field names of `payload` belong to
    pub fn channel_of(&self, payload: &Payload) -> PlanUpdateChannel {
        PlanUpdateChannel::classify(payload.keys().map(String::as_str), &self.editable)
    }

    /// Gate for the editable-fields endpoint: every name must be editable.
    pub fn route_editable_update(&self, payload: &Payload) -> Result<AcceptedFieldSet, GateError> {
        let invalid: Vec<String> = payload
            .keys()
            .filter(|field| !self.editable.contains(field))
            .cloned()
            .collect();

        if !invalid.is_empty() {
            return Err(GateError::InvalidField {
                invalid,
                allowed: self.editable.iter().map(str::to_string).collect(),
            });
        }

        let fields: Vec<&'static str> = self
            .editable
            .iter()
            .filter(|field| payload.contains_key(*field))
            .collect();

        Ok(AcceptedFieldSet {
            fields,
            values: payload.clone(),
        })
    }

    /// Gate for the general endpoint: no name may be editable.
    pub fn route_general_update(&self, payload: &Payload) -> Result<(), GateError> {
        if self.channel_of(payload) == PlanUpdateChannel::Editable {
            let overlap: Vec<String> = payload
                .keys()
                .filter(|field| self.editable.contains(field))
                .cloned()
                .collect();

            return Err(GateError::WrongChannel {
                fields: overlap,
                endpoint: EDITABLE_FIELDS_ENDPOINT.to_string(),
            });
        }

        if self.general_policy == GeneralFieldPolicy::Reject {
            let unsupported: Vec<String> = payload
                .keys()
                .filter(|field| !GENERAL_FIELDS.contains(&field.as_str()))
                .cloned()
                .collect();

            if !unsupported.is_empty() {
                return Err(GateError::UnsupportedField {
                    fields: unsupported,
                    supported: GENERAL_FIELDS.iter().map(|f| f.to_string()).collect(),
                });
            }
        }

        Ok(())
    }
}

impl Default for FieldGate {
    fn default() -> Self {
        Self::new(GeneralFieldPolicy::PassThrough)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plans::fields::EDITABLE_FIELDS;
    use crate::plans::ProcessingFeeType;
    use rust_decimal::Decimal;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => map,
            _ => panic!("test payload must be an object"),
        }
    }

    fn payload_of(fields: &[&str]) -> Payload {
        fields.iter().map(|f| (f.to_string(), json!(1))).collect()
    }

    /// Every subset of the editable set, by bitmask
    fn editable_subsets() -> Vec<Vec<&'static str>> {
        (0u32..(1 << EDITABLE_FIELDS.len()))
            .map(|mask| {
                EDITABLE_FIELDS
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| mask & (1 << i) != 0)
                    .map(|(_, f)| *f)
                    .collect()
            })
            .collect()
    }

    #[test]
    fn accepts_exactly_the_submitted_editable_subset() {
        let gate = FieldGate::default();
        for subset in editable_subsets().into_iter().filter(|s| !s.is_empty()) {
            let accepted = gate.route_editable_update(&payload_of(&subset)).unwrap();
            let got: BTreeSet<&str> = accepted.fields().into_iter().collect();
            let want: BTreeSet<&str> = subset.iter().copied().collect();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn accepted_set_follows_allow_list_order() {
        let gate = FieldGate::default();
        let accepted = gate
            .route_editable_update(&payload_of(&["processing_fee_type", "max_elections"]))
            .unwrap();
        assert_eq!(accepted.fields(), vec!["max_elections", "processing_fee_type"]);
    }

    #[test]
    fn rejects_unknown_fields_on_editable_channel() {
        let gate = FieldGate::default();
        let err = gate
            .route_editable_update(&payload_of(&["max_elections", "foo"]))
            .unwrap_err();

        match &err {
            GateError::InvalidField { invalid, allowed } => {
                assert_eq!(invalid, &vec!["foo".to_string()]);
                assert_eq!(allowed.len(), 6);
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = err.to_string();
        assert!(message.contains("Invalid fields: foo"));
        assert!(message.contains("max_elections, max_voters_per_election, processing_fee_mandatory"));
    }

    #[test]
    fn invalid_list_is_the_set_difference() {
        let gate = FieldGate::default();
        let request = ["name", "max_voters_per_election", "price", "processing_fee_percentage"];
        let Err(GateError::InvalidField { invalid, .. }) = gate.route_editable_update(&payload_of(&request)) else {
            panic!("expected InvalidField");
        };
        let got: BTreeSet<String> = invalid.into_iter().collect();
        let want: BTreeSet<String> = ["name", "price"].iter().map(|s| s.to_string()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn general_channel_accepts_disjoint_fields() {
        let gate = FieldGate::default();
        assert!(gate
            .route_general_update(&payload_of(&["name", "price", "duration", "type"]))
            .is_ok());
        assert!(gate.route_general_update(&Payload::new()).is_ok());
    }

    #[test]
    fn general_channel_rejects_editable_fields() {
        let gate = FieldGate::default();
        let err = gate
            .route_general_update(&payload_of(&["name", "processing_fee_fixed_amount"]))
            .unwrap_err();
        assert_eq!(
            err,
            GateError::WrongChannel {
                fields: vec!["processing_fee_fixed_amount".to_string()],
                endpoint: EDITABLE_FIELDS_ENDPOINT.to_string(),
            }
        );
        assert!(err.to_string().contains("editable-fields"));
    }

    #[test]
    fn overlap_is_the_intersection_for_every_editable_subset() {
        let gate = FieldGate::default();
        for subset in editable_subsets().into_iter().filter(|s| !s.is_empty()) {
            let mut request = subset.clone();
            request.push("name");
            let Err(GateError::WrongChannel { fields, .. }) = gate.route_general_update(&payload_of(&request)) else {
                panic!("expected WrongChannel for {:?}", request);
            };
            let got: BTreeSet<&str> = fields.iter().map(String::as_str).collect();
            let want: BTreeSet<&str> = subset.iter().copied().collect();
            assert_eq!(got, want);
        }
    }

    #[test]
    fn classifies_payloads_by_editable_names() {
        let gate = FieldGate::default();
        assert_eq!(gate.channel_of(&payload_of(&["name", "price"])), PlanUpdateChannel::General);
        assert_eq!(gate.channel_of(&Payload::new()), PlanUpdateChannel::General);
        assert_eq!(
            gate.channel_of(&payload_of(&["name", "processing_fee_type"])),
            PlanUpdateChannel::Editable
        );
    }

    #[test]
    fn passthrough_policy_allows_unknown_general_fields() {
        let gate = FieldGate::new(GeneralFieldPolicy::PassThrough);
        assert!(gate.route_general_update(&payload_of(&["name", "color"])).is_ok());
    }

    #[test]
    fn reject_policy_refuses_unknown_general_fields() {
        let gate = FieldGate::new(GeneralFieldPolicy::Reject);
        let err = gate
            .route_general_update(&payload_of(&["name", "color"]))
            .unwrap_err();
        assert!(matches!(err, GateError::UnsupportedField { ref fields, .. } if fields == &vec!["color".to_string()]));
    }

    #[test]
    fn wrong_channel_wins_over_unsupported_fields() {
        let gate = FieldGate::new(GeneralFieldPolicy::Reject);
        let err = gate
            .route_general_update(&payload_of(&["color", "max_elections"]))
            .unwrap_err();
        assert!(matches!(err, GateError::WrongChannel { .. }));
    }

    #[test]
    fn policy_parses_from_config_strings() {
        assert_eq!("reject".parse(), Ok(GeneralFieldPolicy::Reject));
        assert_eq!("PassThrough".parse(), Ok(GeneralFieldPolicy::PassThrough));
        assert!("drop".parse::<GeneralFieldPolicy>().is_err());
    }

    #[test]
    fn converts_accepted_values_into_changes() {
        let gate = FieldGate::default();
        let accepted = gate
            .route_editable_update(&payload(json!({
                "max_elections": 10,
                "processing_fee_type": "percentage",
                "processing_fee_percentage": 2.5
            })))
            .unwrap();

        let changes = accepted.into_changes().unwrap();
        assert_eq!(changes.max_elections, Some(10));
        assert_eq!(changes.max_voters_per_election, None);
        assert_eq!(changes.processing_fee_mandatory, None);
        assert_eq!(changes.processing_fee_type, Some(ProcessingFeeType::Percentage));
        assert_eq!(changes.processing_fee_percentage, Some(Decimal::new(25, 1)));
    }

    #[test]
    fn reports_every_badly_typed_value() {
        let gate = FieldGate::default();
        let accepted = gate
            .route_editable_update(&payload(json!({
                "max_elections": 2.5,
                "processing_fee_mandatory": "yes",
                "processing_fee_type": "flat",
                "processing_fee_percentage": 150
            })))
            .unwrap();

        let err = accepted.into_changes().unwrap_err();
        assert_eq!(
            err.fields(),
            vec![
                "max_elections",
                "processing_fee_mandatory",
                "processing_fee_type",
                "processing_fee_percentage"
            ]
        );
    }

    #[test]
    fn unrepresentable_fee_values_are_refused_not_dropped() {
        let gate = FieldGate::default();
        for body in [
            json!({ "processing_fee_percentage": 1e-30 }),
            json!({ "processing_fee_percentage": 2.555 }),
            json!({ "processing_fee_fixed_amount": 1e15 }),
            json!({ "processing_fee_fixed_amount": 0.001 }),
        ] {
            let accepted = gate.route_editable_update(&payload(body.clone())).unwrap();
            let field = accepted.fields()[0].to_string();
            let err = accepted.into_changes().unwrap_err();
            assert_eq!(err.fields(), vec![field.as_str()], "{body}");
        }
    }

    #[test]
    fn every_accepted_value_reaches_the_changes() {
        let gate = FieldGate::default();
        let accepted = gate
            .route_editable_update(&payload(json!({
                "max_voters_per_election": 250,
                "processing_fee_mandatory": false,
                "processing_fee_fixed_amount": 0.3,
                "processing_fee_percentage": 2.55
            })))
            .unwrap();

        let changes = accepted.into_changes().unwrap();
        assert_eq!(changes.max_voters_per_election, Some(250));
        assert_eq!(changes.processing_fee_mandatory, Some(false));
        assert_eq!(changes.processing_fee_fixed_amount, Some(Decimal::new(3, 1)));
        assert_eq!(changes.processing_fee_percentage, Some(Decimal::new(255, 2)));
    }
}
