pub mod client;
pub mod messages;
pub mod retry;
pub mod types;

pub use client::ApiClient;
pub use messages::handle_error;
pub use retry::{retry_request, RetryPolicy};
pub use types::*;

use crate::error::ApiError;
use async_trait::async_trait;

/// Remote generation service as seen by the controllers.
#[async_trait]
pub trait DevPlanApi: Send + Sync {
    /// `POST /api/generate-schema`
    async fn generate_schema(&self, request: &ProjectRequest) -> Result<GenerationResponse, ApiError>;

    /// `GET /api/stacks`
    async fn get_available_stacks(&self) -> Result<StackCatalog, ApiError>;

    /// `GET /api/templates`
    async fn get_project_templates(&self) -> Result<Vec<ProjectTemplate>, ApiError>;

    /// `GET /health`, liveness only.
    async fn health_check(&self) -> Result<serde_json::Value, ApiError>;

    /// `POST /api/config/openai`
    async fn validate_openai_config(&self, config: &OpenAIConfigRequest) -> Result<ValidationResult, ApiError>;

    /// `GET /api/config/openai/test`, checks whatever configuration the server holds.
    async fn test_openai_config(&self) -> Result<ValidationResult, ApiError>;
}
