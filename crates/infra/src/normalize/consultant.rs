//! Raw consultant records to [`Consultant`]

use capacal_domain::{Consultant, ConsultantFields};
use serde_json::Value;

use super::fields::{number_at, text_at};

/// Maps raw consultant records with configured field names
#[derive(Debug, Clone, Default)]
pub struct ConsultantNormalizer {
    fields: ConsultantFields,
}

impl ConsultantNormalizer {
    pub fn new(fields: ConsultantFields) -> Self {
        Self { fields }
    }

    /// `None` when the record has no usable id. A missing name falls back to
    /// the id; negative hours are treated as absent.
    pub fn normalize(&self, record: &Value) -> Option<Consultant> {
        let id = text_at(record, &self.fields.id)?;
        let name = text_at(record, &self.fields.name).unwrap_or_else(|| id.clone());
        let mut consultant = Consultant::new(id, name);

        if let Some(hours) = number_at(record, &self.fields.hours_per_day).filter(|h| *h >= 0.0) {
            consultant = consultant.with_hours_per_day(hours);
        }
        Some(consultant)
    }
}
