use super::types::{FieldId, FormFields};
use crate::api::types::{ProjectPreferences, ProjectRequest, StackPreferences};

pub const DESCRIPTION_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 2000;

pub const DESCRIPTION_REQUIRED: &str = "La description est requise.";
pub const DESCRIPTION_TOO_SHORT: &str = "La description doit contenir au moins 10 caractères.";
pub const DESCRIPTION_TOO_LONG: &str = "La description ne peut pas dépasser 2000 caractères.";

/// The rule a field violates, if any. Lengths are counted in characters
/// on the trimmed value.
pub fn validate_field(field: FieldId, value: &str) -> Option<&'static str> {
    match field {
        FieldId::Description => {
            let len = value.trim().chars().count();
            if len == 0 {
                Some(DESCRIPTION_REQUIRED)
            } else if len < DESCRIPTION_MIN_CHARS {
                Some(DESCRIPTION_TOO_SHORT)
            } else if len > DESCRIPTION_MAX_CHARS {
                Some(DESCRIPTION_TOO_LONG)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// All violations in field order; the submit path shows only the first.
pub fn validate_form(fields: &FormFields) -> Vec<&'static str> {
    const ORDER: [FieldId; 7] = [
        FieldId::Description,
        FieldId::ProjectType,
        FieldId::Complexity,
        FieldId::Timeline,
        FieldId::Frontend,
        FieldId::Backend,
        FieldId::Database,
    ];

    ORDER
        .iter()
        .filter_map(|field| validate_field(*field, fields.get(*field)))
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Builds the request body, leaving out every optional key that has no value.
pub fn format_project_data(fields: &FormFields, requirements: &[String]) -> ProjectRequest {
    let stack = StackPreferences {
        frontend: non_empty(&fields.frontend),
        backend: non_empty(&fields.backend),
        database: non_empty(&fields.database),
    };
    let has_stack = stack != StackPreferences::default();

    let preferences = ProjectPreferences {
        complexity: non_empty(&fields.complexity),
        timeline: non_empty(&fields.timeline),
        stack: has_stack.then_some(stack),
    };
    let has_preferences = preferences != ProjectPreferences::default();

    ProjectRequest {
        description: fields.description.trim().to_string(),
        project_type: non_empty(&fields.project_type),
        preferences: has_preferences.then_some(preferences),
        additional_requirements: (!requirements.is_empty()).then(|| requirements.to_vec()),
    }
}
