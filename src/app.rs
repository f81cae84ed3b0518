//! The composing application. Owns one instance of every component and
//! wires the cross-component rules: startup checks, the generation gate,
//! the examples modal and exports.

use crate::api::{ApiClient, DevPlanApi};
use crate::config::AppSettings;
use crate::credentials::CredentialManager;
use crate::error::{AppError, Result};
use crate::form::types::SubmitOutcome;
use crate::form::{examples_view, FormController};
use crate::storage::{LocalStorage, SqliteStorage};
use crate::ui::{ModalStack, Node, NotificationCenter, Severity};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const WELCOME: &str = "Bienvenue sur DevPlan AI Generator ! Décrivez votre projet pour commencer.";
pub const NOT_CONFIGURED: &str = "Veuillez d'abord configurer et tester votre clé API OpenAI";
pub const JSON_EXPORTED: &str = "Schéma exporté en JSON avec succès !";
pub const NOTHING_TO_EXPORT: &str = "Aucun schéma à exporter.";
pub const EXPORT_FILE_NAME: &str = "project-schema.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Markdown,
    Json,
}

impl ExportFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "markdown" | "md" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub struct DevPlanApp {
    settings: AppSettings,
    client: Arc<ApiClient>,
    notifications: Arc<NotificationCenter>,
    modals: Arc<ModalStack>,
    form: FormController,
    credentials: CredentialManager,
}

impl DevPlanApp {
    pub fn new(settings: AppSettings, storage: Arc<dyn LocalStorage>) -> Self {
        let client = Arc::new(ApiClient::new(&settings.api_base_url));
        let api: Arc<dyn DevPlanApi> = client.clone();
        let notifications = Arc::new(NotificationCenter::new(settings.notification_duration));

        let mut form = FormController::new(api.clone(), notifications.clone());
        if settings.retry_generation {
            form = form.with_retry(settings.retry);
        }
        let credentials = CredentialManager::new(api, notifications.clone(), storage);

        Self {
            settings,
            client,
            notifications,
            modals: Arc::new(ModalStack::new()),
            form,
            credentials,
        }
    }

    /// Same as [`DevPlanApp::new`] with durable storage at `settings.storage_path`.
    pub fn open(settings: AppSettings) -> Result<Self> {
        let storage = SqliteStorage::open(&settings.storage_path)?;
        tracing::info!("Using storage at {}", settings.storage_path.display());
        Ok(Self::new(settings, Arc::new(storage)))
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn form(&self) -> &FormController {
        &self.form
    }

    pub fn credentials(&self) -> &CredentialManager {
        &self.credentials
    }

    pub fn notifications(&self) -> &Arc<NotificationCenter> {
        &self.notifications
    }

    pub fn modals(&self) -> &Arc<ModalStack> {
        &self.modals
    }

    /// Runs the health check and credential initialisation side by side, then
    /// greets the user. An unreachable backend is only logged.
    pub async fn start(&self) {
        let (available, credentials) = futures::join!(
            self.client.check_api_availability(),
            self.credentials.initialize()
        );

        if available {
            tracing::info!("API reachable at {}", self.client.base_url());
        } else {
            tracing::warn!("API not reachable at {}", self.client.base_url());
        }
        tracing::debug!("Credential initialisation: {:?}", credentials);

        self.notifications
            .show(WELCOME, Severity::Info, Some(self.settings.welcome_duration));
    }

    /// Submits the form once the OpenAI configuration is known to work.
    pub async fn generate(&self) -> SubmitOutcome {
        if !self.credentials.is_ready_for_generation().await {
            self.notifications.error(NOT_CONFIGURED);
            return SubmitOutcome::Invalid(NOT_CONFIGURED.to_string());
        }
        self.form.submit().await
    }

    pub fn show_examples(&self) {
        self.modals.create(examples_view(), Some("max-w-4xl"));
    }

    pub async fn use_example(&self, id: &str) -> bool {
        let applied = self.form.use_example(id).await;
        if applied {
            self.modals.close(None);
        }
        applied
    }

    /// Writes the latest results to `dir`. Only JSON is implemented; the
    /// other formats report that they are not available yet.
    pub async fn export(&self, format: ExportFormat, dir: &Path) -> Result<Option<PathBuf>> {
        match format {
            ExportFormat::Pdf => {
                self.notifications.info("Export PDF en cours de développement...");
                Ok(None)
            }
            ExportFormat::Markdown => {
                self.notifications.info("Export Markdown en cours de développement...");
                Ok(None)
            }
            ExportFormat::Json => {
                let Some(results) = self.form.results().await else {
                    self.notifications.warning(NOTHING_TO_EXPORT);
                    return Err(AppError::Validation(NOTHING_TO_EXPORT.to_string()));
                };

                let path = dir.join(EXPORT_FILE_NAME);
                let json = serde_json::to_string_pretty(&results)?;
                tokio::fs::write(&path, json).await?;

                tracing::info!("Exported schema to {}", path.display());
                self.notifications.success(JSON_EXPORTED);
                Ok(Some(path))
            }
        }
    }

    /// Results section followed by the notification area and any open modal.
    pub async fn render(&self) -> Vec<Node> {
        let mut nodes = vec![self.form.render_results().await, self.notifications.render()];
        nodes.extend(self.modals.render());
        nodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::controller::EXAMPLE_APPLIED;
    use crate::storage::MemoryStorage;
    use serde_json::json;
    use std::time::Duration;
    use tokio_test::{assert_err, assert_ok};
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_for(base_url: &str) -> DevPlanApp {
        let settings = AppSettings::default().with_base_url(base_url);
        DevPlanApp::new(settings, Arc::new(MemoryStorage::new()))
    }

    async fn mount_backend(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "healthy" })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/config/openai/test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "is_valid": true,
                "message": "Configuration OpenAI validée avec succès"
            })))
            .mount(server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/generate-schema"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "data": { "project_name": "ShopFlow", "description": "Boutique en ligne" }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_start_greets_and_initialises_credentials() {
        let mock_server = MockServer::start().await;
        mount_backend(&mock_server).await;

        let app = app_for(&mock_server.uri());
        app.start().await;

        let last = app.notifications().last().unwrap();
        assert_eq!(last.message, WELCOME);
        assert_eq!(last.severity, Severity::Info);
        assert_eq!(last.duration, Duration::from_millis(8000));
        assert!(app.credentials().is_ready_for_generation().await);
    }

    #[tokio::test]
    async fn test_start_survives_unreachable_backend() {
        let app = app_for("http://127.0.0.1:59995");
        app.start().await;

        assert_eq!(app.notifications().last().unwrap().message, WELCOME);
        assert!(!app.credentials().is_ready_for_generation().await);
    }

    #[tokio::test]
    async fn test_generate_is_gated_on_credentials() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate-schema"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let app = app_for(&mock_server.uri());
        app.form().set_description("Une marketplace de services locaux").await;

        assert_eq!(
            app.generate().await,
            SubmitOutcome::Invalid(NOT_CONFIGURED.to_string())
        );
        assert_eq!(app.notifications().last().unwrap().message, NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_generate_then_export_json() {
        let mock_server = MockServer::start().await;
        mount_backend(&mock_server).await;

        let app = app_for(&mock_server.uri());
        app.start().await;
        app.form().set_description("Une boutique en ligne de produits artisanaux").await;
        assert_eq!(app.generate().await, SubmitOutcome::Succeeded);

        let dir = tempfile::tempdir().unwrap();
        let written = assert_ok!(app.export(ExportFormat::Json, dir.path()).await).unwrap();
        assert_eq!(written, dir.path().join(EXPORT_FILE_NAME));

        let exported: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&written).unwrap()).unwrap();
        assert_eq!(exported["success"], json!(true));
        assert_eq!(exported["data"]["project_name"], json!("ShopFlow"));
        assert_eq!(app.notifications().last().unwrap().message, JSON_EXPORTED);
    }

    #[tokio::test]
    async fn test_export_without_results() {
        let app = app_for("http://127.0.0.1:59995");
        let dir = tempfile::tempdir().unwrap();

        assert_err!(app.export(ExportFormat::Json, dir.path()).await);
        assert!(!dir.path().join(EXPORT_FILE_NAME).exists());

        assert_eq!(assert_ok!(app.export(ExportFormat::Pdf, dir.path()).await), None);
        let last = app.notifications().last().unwrap();
        assert_eq!(last.severity, Severity::Info);
        assert_eq!(last.message, "Export PDF en cours de développement...");
    }

    #[tokio::test]
    async fn test_examples_modal_flow() {
        let app = app_for("http://127.0.0.1:59995");

        app.show_examples();
        assert!(app.modals().is_open());

        assert!(app.use_example("portfolio").await);
        assert!(!app.modals().is_open());
        assert_eq!(app.form().fields().await.project_type, "portfolio");
        assert_eq!(app.notifications().last().unwrap().message, EXAMPLE_APPLIED);
    }

    #[tokio::test]
    async fn test_unknown_example_keeps_modal_open() {
        let app = app_for("http://127.0.0.1:59995");
        app.show_examples();

        assert!(!app.use_example("crm").await);
        assert!(app.modals().is_open());
    }

    #[test]
    fn test_export_format_parse() {
        assert_eq!(ExportFormat::parse("JSON"), Some(ExportFormat::Json));
        assert_eq!(ExportFormat::parse("md"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse("docx"), None);
    }

    #[tokio::test]
    async fn test_render_shows_empty_results_before_generation() {
        let app = app_for("http://127.0.0.1:59995");
        let nodes = app.render().await;
        assert!(nodes[0].text_content().contains(crate::ui::results::EMPTY_RESULTS));
    }
}
