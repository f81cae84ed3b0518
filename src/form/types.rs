use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldId {
    Description,
    ProjectType,
    Complexity,
    Timeline,
    Frontend,
    Backend,
    Database,
}

/// Raw form values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormFields {
    pub description: String,
    pub project_type: String,
    pub complexity: String,
    pub timeline: String,
    pub frontend: String,
    pub backend: String,
    pub database: String,
}

impl FormFields {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Description => &self.description,
            FieldId::ProjectType => &self.project_type,
            FieldId::Complexity => &self.complexity,
            FieldId::Timeline => &self.timeline,
            FieldId::Frontend => &self.frontend,
            FieldId::Backend => &self.backend,
            FieldId::Database => &self.database,
        }
    }

    pub fn set(&mut self, field: FieldId, value: String) {
        let slot = match field {
            FieldId::Description => &mut self.description,
            FieldId::ProjectType => &mut self.project_type,
            FieldId::Complexity => &mut self.complexity,
            FieldId::Timeline => &mut self.timeline,
            FieldId::Frontend => &mut self.frontend,
            FieldId::Backend => &mut self.backend,
            FieldId::Database => &mut self.database,
        };
        *slot = value;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Validating,
    Submitting { request_id: Uuid },
}

/// How a call to `FormController::submit` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Local validation failed; nothing was sent.
    Invalid(String),
    /// A generation was already in flight.
    Busy,
    Succeeded,
    /// Carries the user-facing message.
    Failed(String),
    /// The form was reset while waiting; the response was dropped.
    Discarded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharCountLevel {
    Normal,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CharCount {
    pub count: usize,
    pub level: CharCountLevel,
}

impl CharCount {
    pub fn of(text: &str) -> Self {
        let count = text.chars().count();
        let level = if count > 1800 {
            CharCountLevel::Danger
        } else if count > 1500 {
            CharCountLevel::Warning
        } else {
            CharCountLevel::Normal
        };
        Self { count, level }
    }
}
