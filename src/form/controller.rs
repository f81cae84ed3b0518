use super::examples::find_example;
use super::requirements::RequirementSet;
use super::types::*;
use super::validation::{format_project_data, validate_field, validate_form};
use crate::api::retry::{retry_request, RetryPolicy};
use crate::api::types::{GenerationResponse, ProjectRequest, ProjectSchema};
use crate::api::{handle_error, DevPlanApi};
use crate::error::ApiError;
use crate::ui::notifications::NotificationCenter;
use crate::ui::results::ResultsView;
use crate::ui::view::Node;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub const DUPLICATE_REQUIREMENT: &str = "Cette exigence a déjà été ajoutée.";
pub const GENERATION_SUCCEEDED: &str = "Schéma généré avec succès !";
pub const GENERATION_FAILED: &str = "Erreur lors de la génération";
pub const EXAMPLE_APPLIED: &str = "Exemple appliqué avec succès !";

struct FormState {
    fields: FormFields,
    requirements: RequirementSet,
    field_errors: HashMap<FieldId, String>,
    submit: SubmitState,
    results: Option<GenerationResponse>,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            fields: FormFields::default(),
            requirements: RequirementSet::new(),
            field_errors: HashMap::new(),
            submit: SubmitState::Idle,
            results: None,
        }
    }
}

/// Owns the project form and drives schema generation.
pub struct FormController {
    api: Arc<dyn DevPlanApi>,
    notifications: Arc<NotificationCenter>,
    retry: Option<RetryPolicy>,
    state: Arc<RwLock<FormState>>,
}

impl FormController {
    pub fn new(api: Arc<dyn DevPlanApi>, notifications: Arc<NotificationCenter>) -> Self {
        Self {
            api,
            notifications,
            retry: None,
            state: Arc::new(RwLock::new(FormState::default())),
        }
    }

    /// Routes generation through the retry helper.
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    // ---- Field editing ----

    /// Stores the value and clears any annotation on that field.
    pub async fn set_field(&self, field: FieldId, value: impl Into<String>) {
        let mut state = self.state.write().await;
        state.fields.set(field, value.into());
        state.field_errors.remove(&field);
    }

    pub async fn set_description(&self, value: impl Into<String>) {
        self.set_field(FieldId::Description, value).await;
    }

    /// Blur validation: replaces the field's annotation with the rule it
    /// currently violates, if any.
    pub async fn validate_field(&self, field: FieldId) -> bool {
        let mut state = self.state.write().await;
        state.field_errors.remove(&field);
        match validate_field(field, state.fields.get(field)) {
            Some(message) => {
                state.field_errors.insert(field, message.to_string());
                false
            }
            None => true,
        }
    }

    pub async fn field_error(&self, field: FieldId) -> Option<String> {
        self.state.read().await.field_errors.get(&field).cloned()
    }

    pub async fn fields(&self) -> FormFields {
        self.state.read().await.fields.clone()
    }

    pub async fn char_count(&self) -> CharCount {
        CharCount::of(&self.state.read().await.fields.description)
    }

    // ---- Requirement tags ----

    /// Adds a trimmed tag. Blank input is ignored; a duplicate raises a
    /// warning notification and leaves the set as it was.
    pub async fn add_requirement(&self, requirement: &str) -> bool {
        let requirement = requirement.trim();
        if requirement.is_empty() {
            return false;
        }

        let added = self.state.write().await.requirements.add(requirement);
        if !added {
            self.notifications.warning(DUPLICATE_REQUIREMENT);
        }
        added
    }

    pub async fn remove_requirement(&self, requirement: &str) -> bool {
        self.state.write().await.requirements.remove(requirement)
    }

    pub async fn requirements(&self) -> Vec<String> {
        self.state.read().await.requirements.to_vec()
    }

    // ---- Submission ----

    pub async fn submit_state(&self) -> SubmitState {
        self.state.read().await.submit
    }

    /// Loading overlay visibility.
    pub async fn is_loading(&self) -> bool {
        matches!(self.submit_state().await, SubmitState::Submitting { .. })
    }

    pub async fn can_submit(&self) -> bool {
        !self.is_loading().await
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let (request_id, request) = {
            let mut state = self.state.write().await;
            if !matches!(state.submit, SubmitState::Idle) {
                tracing::debug!("Submit ignored, generation already in flight");
                return SubmitOutcome::Busy;
            }

            state.submit = SubmitState::Validating;
            let violations = validate_form(&state.fields);
            if let Some(first) = violations.first().copied() {
                state.submit = SubmitState::Idle;
                drop(state);
                self.notifications.error(first);
                return SubmitOutcome::Invalid(first.to_string());
            }

            let request = format_project_data(&state.fields, &state.requirements.to_vec());
            let request_id = Uuid::new_v4();
            state.submit = SubmitState::Submitting { request_id };
            (request_id, request)
        };

        tracing::info!("Generation {} started", request_id);
        let result = self.send(&request).await;

        let mut state = self.state.write().await;
        if state.submit != (SubmitState::Submitting { request_id }) {
            tracing::warn!("Discarding stale generation response {}", request_id);
            return SubmitOutcome::Discarded;
        }
        state.submit = SubmitState::Idle;

        let failure = match result {
            Ok(response) if response.success => {
                state.results = Some(response);
                drop(state);
                tracing::info!("Generation {} succeeded", request_id);
                self.notifications.success(GENERATION_SUCCEEDED);
                return SubmitOutcome::Succeeded;
            }
            Ok(response) => ApiError::Application(
                response.error.unwrap_or_else(|| GENERATION_FAILED.to_string()),
            ),
            Err(e) => e,
        };
        drop(state);

        tracing::error!("Generation {} failed: {}", request_id, failure);
        let message = handle_error(&failure);
        self.notifications.error(message.clone());
        SubmitOutcome::Failed(message)
    }

    async fn send(&self, request: &ProjectRequest) -> Result<GenerationResponse, ApiError> {
        let api = self.api.as_ref();
        match self.retry {
            Some(policy) => retry_request(policy, move || api.generate_schema(request)).await,
            None => api.generate_schema(request).await,
        }
    }

    // ---- Results ----

    pub async fn results(&self) -> Option<GenerationResponse> {
        self.state.read().await.results.clone()
    }

    pub async fn current_schema(&self) -> Option<ProjectSchema> {
        self.state
            .read()
            .await
            .results
            .as_ref()
            .and_then(|r| r.data.clone())
    }

    pub async fn render_results(&self) -> Node {
        let state = self.state.read().await;
        ResultsView::render(state.results.as_ref().and_then(|r| r.data.as_ref()))
    }

    // ---- Misc ----

    /// Clears the form and displayed results. A generation still in flight
    /// is abandoned and its response dropped when it arrives.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        if let SubmitState::Submitting { request_id } = state.submit {
            tracing::info!("Abandoning generation {}", request_id);
        }
        *state = FormState::default();
    }

    /// Fills description and project type from the example catalog.
    pub async fn use_example(&self, id: &str) -> bool {
        let Some(example) = find_example(id) else {
            return false;
        };

        {
            let mut state = self.state.write().await;
            state.fields.description = example.description.to_string();
            state.fields.project_type = example.id.to_string();
            state.field_errors.remove(&FieldId::Description);
            state.field_errors.remove(&FieldId::ProjectType);
        }
        self.notifications.success(EXAMPLE_APPLIED);
        true
    }
}
