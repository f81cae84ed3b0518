use super::types::*;
use crate::api::types::{OpenAIConfigRequest, ValidationResult};
use crate::api::{handle_error, DevPlanApi};
use crate::error::{ApiError, AppError, Result};
use crate::storage::LocalStorage;
use crate::ui::notifications::NotificationCenter;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

struct CredentialState {
    api_key: String,
    model: String,
    status: CredentialStatus,
    /// Last result that came back valid.
    current: Option<ValidationResult>,
    /// The trimmed key and model that produced `current`. `None` when the
    /// server-held configuration was tested instead.
    validated: Option<(String, String)>,
    in_flight: Option<Uuid>,
}

impl Default for CredentialState {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            status: CredentialStatus::Untested,
            current: None,
            validated: None,
            in_flight: None,
        }
    }
}

impl CredentialState {
    fn on_config_change(&mut self) {
        if let Some(id) = self.in_flight.take() {
            tracing::debug!("Credential test {} superseded by an edit", id);
        }
        self.status = CredentialStatus::Untested;
        self.current = None;
        self.validated = None;
    }

    fn pair(&self) -> (String, String) {
        (self.api_key.trim().to_string(), self.model.clone())
    }

    /// Enters `Testing` with a fresh id, or `None` if a test is already running.
    fn begin_test(&mut self) -> Option<Uuid> {
        if self.status == CredentialStatus::Testing {
            return None;
        }

        let id = Uuid::new_v4();
        self.status = CredentialStatus::Testing;
        self.current = None;
        self.validated = None;
        self.in_flight = Some(id);
        Some(id)
    }

    /// The validated pair, if it is still the one in the inputs.
    fn savable_pair(&self) -> Option<(String, String)> {
        if !matches!(self.status, CredentialStatus::Connected(_)) {
            return None;
        }
        self.validated.clone().filter(|validated| *validated == self.pair())
    }
}

/// Owns the OpenAI key/model inputs, their validation against the backend
/// and their persistence in local storage.
pub struct CredentialManager {
    api: Arc<dyn DevPlanApi>,
    notifications: Arc<NotificationCenter>,
    storage: Arc<dyn LocalStorage>,
    state: Arc<RwLock<CredentialState>>,
}

impl CredentialManager {
    pub fn new(
        api: Arc<dyn DevPlanApi>,
        notifications: Arc<NotificationCenter>,
        storage: Arc<dyn LocalStorage>,
    ) -> Self {
        Self {
            api,
            notifications,
            storage,
            state: Arc::new(RwLock::new(CredentialState::default())),
        }
    }

    /// Loads any saved configuration and re-validates it. Without a saved
    /// key the server-held configuration is tested instead.
    pub async fn initialize(&self) -> TestOutcome {
        match self.load_saved_config().await {
            Some(config) if !config.api_key.trim().is_empty() => self.test_configuration().await,
            _ => self.test_current_config().await,
        }
    }

    // ---- Inputs ----

    pub async fn set_api_key(&self, api_key: impl Into<String>) {
        let mut state = self.state.write().await;
        state.api_key = api_key.into();
        state.on_config_change();
    }

    pub async fn set_model(&self, model: impl Into<String>) {
        let mut state = self.state.write().await;
        state.model = model.into();
        state.on_config_change();
    }

    pub async fn api_key(&self) -> String {
        self.state.read().await.api_key.clone()
    }

    pub async fn model(&self) -> String {
        self.state.read().await.model.clone()
    }

    // ---- Projections ----

    pub async fn status(&self) -> CredentialStatus {
        self.state.read().await.status.clone()
    }

    pub async fn status_indicator(&self) -> StatusIndicator {
        self.state.read().await.status.indicator()
    }

    pub async fn is_testing(&self) -> bool {
        self.state.read().await.status == CredentialStatus::Testing
    }

    /// Save is enabled only for the exact key and model that last tested valid.
    pub async fn can_save(&self) -> bool {
        self.state.read().await.savable_pair().is_some()
    }

    pub async fn details(&self) -> Option<ConnectionDetails> {
        let state = self.state.read().await;
        match state.status {
            CredentialStatus::Connected(_) => state.current.as_ref().map(ConnectionDetails::from),
            _ => None,
        }
    }

    pub async fn is_ready_for_generation(&self) -> bool {
        let state = self.state.read().await;
        matches!(state.status, CredentialStatus::Connected(_))
            && state.current.as_ref().is_some_and(|r| r.is_valid)
    }

    // ---- Testing ----

    /// Validates the current inputs with `POST /api/config/openai`.
    pub async fn test_configuration(&self) -> TestOutcome {
        let (test_id, api_key, model) = {
            let mut state = self.state.write().await;
            let (api_key, model) = state.pair();

            if api_key.is_empty() {
                drop(state);
                return self.reject(MISSING_KEY);
            }
            if !api_key.starts_with(API_KEY_PREFIX) {
                drop(state);
                return self.reject(BAD_PREFIX);
            }

            let Some(test_id) = state.begin_test() else {
                return TestOutcome::Busy;
            };
            (test_id, api_key, model)
        };

        tracing::info!("Testing OpenAI configuration ({}) for model {}", test_id, model);
        let request = OpenAIConfigRequest {
            api_key: api_key.clone(),
            model: model.clone(),
        };
        let result = self.api.validate_openai_config(&request).await;

        self.finish_test(test_id, Some((api_key, model)), result, VALIDATION_ERROR, true)
            .await
    }

    /// Checks the configuration the server already holds.
    pub async fn test_current_config(&self) -> TestOutcome {
        let started = self.state.write().await.begin_test();
        let Some(test_id) = started else {
            return TestOutcome::Busy;
        };

        tracing::info!("Testing server-held OpenAI configuration ({})", test_id);
        let result = self.api.test_openai_config().await;

        self.finish_test(test_id, None, result, TEST_ERROR, false).await
    }

    fn reject(&self, message: &'static str) -> TestOutcome {
        tracing::debug!("Credential test rejected locally: {}", message);
        self.notifications.error(message);
        TestOutcome::Rejected(message)
    }

    async fn finish_test(
        &self,
        test_id: Uuid,
        pair: Option<(String, String)>,
        result: std::result::Result<ValidationResult, ApiError>,
        error_label: &str,
        notify_transport_error: bool,
    ) -> TestOutcome {
        let mut state = self.state.write().await;
        if state.in_flight != Some(test_id) {
            tracing::warn!("Discarding stale credential test result {}", test_id);
            return TestOutcome::Discarded;
        }
        state.in_flight = None;

        match result {
            Ok(result) if result.is_valid => {
                tracing::info!("OpenAI configuration valid: {}", result.message);
                state.status = CredentialStatus::Connected(result.message.clone());
                state.validated = pair;
                state.current = Some(result);
                TestOutcome::Connected
            }
            Ok(result) => {
                state.status = CredentialStatus::Failed(result.message.clone());
                drop(state);

                let shown = result
                    .error_details
                    .filter(|d| !d.is_empty())
                    .or_else(|| Some(result.message).filter(|m| !m.is_empty()))
                    .unwrap_or_else(|| error_label.to_string());
                tracing::warn!("OpenAI configuration rejected: {}", shown);
                self.notifications.error(shown.clone());
                TestOutcome::Failed(shown)
            }
            Err(e) => {
                state.status = CredentialStatus::Failed(error_label.to_string());
                drop(state);

                tracing::error!("Credential test failed: {}", e);
                let shown = handle_error(&e);
                if notify_transport_error {
                    self.notifications.error(shown.clone());
                }
                TestOutcome::Failed(shown)
            }
        }
    }

    // ---- Persistence ----

    /// Writes the validated key and model under [`STORAGE_KEY`]. Refused
    /// unless the current inputs are the ones that last tested valid.
    pub async fn save_configuration(&self) -> Result<()> {
        let savable = self.state.read().await.savable_pair();
        let Some((api_key, model)) = savable else {
            self.notifications.error(NOT_TESTED);
            return Err(AppError::Credential(NOT_TESTED.to_string()));
        };

        let config = CredentialConfig {
            api_key,
            model,
            saved_at: Utc::now(),
        };

        match self.write_config(&config) {
            Ok(()) => {
                tracing::info!("Saved OpenAI configuration for model {}", config.model);
                self.notifications.success(SAVED);
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save OpenAI configuration: {}", e);
                self.notifications.error(SAVE_FAILED);
                Err(e)
            }
        }
    }

    fn write_config(&self, config: &CredentialConfig) -> Result<()> {
        let json = serde_json::to_string(config)?;
        self.storage.set_item(STORAGE_KEY, &json)?;
        Ok(())
    }

    /// Pre-populates the inputs from storage. An entry that does not parse is
    /// logged and removed.
    pub async fn load_saved_config(&self) -> Option<CredentialConfig> {
        let raw = match self.storage.get_item(STORAGE_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("Could not read saved OpenAI config: {}", e);
                return None;
            }
        };

        let config: CredentialConfig = match serde_json::from_str(&raw) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Could not load saved OpenAI config, discarding it: {}", e);
                if let Err(e) = self.storage.remove_item(STORAGE_KEY) {
                    tracing::warn!("Could not remove saved OpenAI config: {}", e);
                }
                return None;
            }
        };

        let mut state = self.state.write().await;
        state.api_key = config.api_key.clone();
        state.model = if config.model.is_empty() {
            DEFAULT_MODEL.to_string()
        } else {
            config.model.clone()
        };
        state.on_config_change();
        Some(config)
    }
}
