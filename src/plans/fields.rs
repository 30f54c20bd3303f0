use serde::Serialize;

/// Operational knobs that may only change through the editable-fields endpoint
pub const EDITABLE_FIELDS: [&str; 6] = [
    "max_elections",
    "max_voters_per_election",
    "processing_fee_mandatory",
    "processing_fee_fixed_amount",
    "processing_fee_type",
    "processing_fee_percentage",
];

/// Plan columns the general update endpoint knows how to write
pub const GENERAL_FIELDS: [&str; 6] = ["name", "description", "price", "duration", "type", "is_active"];

/// Ordered, immutable allow-list of editable plan fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditableFieldSet {
    fields: Vec<&'static str>,
}

impl EditableFieldSet {
    pub fn new() -> Self {
        Self {
            fields: EDITABLE_FIELDS.to_vec(),
        }
    }

    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|f| *f == field)
    }

    pub fn names(&self) -> &[&'static str] {
        &self.fields
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().copied()
    }
}

impl Default for EditableFieldSet {
    fn default() -> Self {
        Self::new()
    }
}

/// The two mutually exclusive update entry points for a plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanUpdateChannel {
    Editable,
    General,
}

impl PlanUpdateChannel {
    /// A request belongs to the editable channel as soon as it names any editable field
    pub fn classify<'a>(fields: impl IntoIterator<Item = &'a str>, editable: &EditableFieldSet) -> Self {
        if fields.into_iter().any(|f| editable.contains(f)) {
            Self::Editable
        } else {
            Self::General
        }
    }
}
