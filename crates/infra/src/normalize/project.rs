//! Raw project records to [`Project`]
//!
//! The remote type field is matched case-insensitively against the
//! configured labels. When nothing matches, a record carrying both a start
//! and an end date is taken to be scooped and anything else a request. The
//! upstream categorization is not reliable enough to do better; revisit if
//! the PSA data gets cleaned up.

use capacal_domain::{Project, ProjectFields, ProjectType, TypeLabels};
use serde_json::Value;

use super::fields::{date_at, is_present, number_at, text_at};

/// Maps raw project records with configured field names and type labels
#[derive(Debug, Clone, Default)]
pub struct ProjectNormalizer {
    fields: ProjectFields,
    labels: TypeLabels,
}

impl ProjectNormalizer {
    pub fn new(fields: ProjectFields, labels: TypeLabels) -> Self {
        Self { fields, labels }
    }

    /// `None` when the record has no usable id.
    pub fn normalize(&self, record: &Value) -> Option<Project> {
        let id = text_at(record, &self.fields.id)?;
        let name = text_at(record, &self.fields.name).unwrap_or_else(|| id.clone());

        let mut project = Project::new(id, name, self.project_type(record));
        project.customer = text_at(record, &self.fields.customer);
        project.budget_hours = number_at(record, &self.fields.budget);
        project.start_date = date_at(record, &self.fields.start_date);
        project.end_date = date_at(record, &self.fields.end_date);
        Some(project)
    }

    fn project_type(&self, record: &Value) -> ProjectType {
        if let Some(label) = text_at(record, &self.fields.type_field) {
            if let Some(project_type) = self.match_label(&label) {
                return project_type;
            }
        }

        if is_present(record, &self.fields.start_date) && is_present(record, &self.fields.end_date)
        {
            ProjectType::Scooped
        } else {
            ProjectType::Request
        }
    }

    fn match_label(&self, raw: &str) -> Option<ProjectType> {
        let raw = raw.trim().to_lowercase();
        [
            (&self.labels.scooped, ProjectType::Scooped),
            (&self.labels.retainer, ProjectType::Retainer),
            (&self.labels.request, ProjectType::Request),
        ]
        .into_iter()
        .find(|(label, _)| label.trim().to_lowercase() == raw)
        .map(|(_, project_type)| project_type)
    }
}
