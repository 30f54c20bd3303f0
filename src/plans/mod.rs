//! Subscription plan domain: plan enums, the editable field allow-list and
//! the gate that keeps the two update channels apart.

pub mod fields;
pub mod gate;
pub mod types;

pub use fields::{EditableFieldSet, PlanUpdateChannel, EDITABLE_FIELDS, GENERAL_FIELDS};
pub use gate::{AcceptedFieldSet, FieldGate, GateError, GeneralFieldPolicy, EDITABLE_FIELDS_ENDPOINT};
pub use types::{PaymentMethod, PlanDuration, PlanType, ProcessingFeeType, UnknownVariant};
