use super::types::*;
use super::DevPlanApi;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(&url);
        if !params.is_empty() {
            request = request.query(params);
        }
        self.request(request, HeaderMap::new()).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.post_with_headers(path, body, HeaderMap::new()).await
    }

    pub async fn post_with_headers<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: HeaderMap,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let body = serde_json::to_vec(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request(self.client.post(&url).body(body), headers).await
    }

    /// Sends a request with JSON defaults and caller headers merged on top,
    /// decoding the body on success and the `detail` field on failure.
    async fn request<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        extra_headers: HeaderMap,
    ) -> Result<T, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.extend(extra_headers);

        let response = match request.headers(headers).send().await {
            Ok(response) => response,
            Err(e) => {
                let err = ApiError::Network(e.to_string());
                tracing::error!("API request failed: {}", err);
                return Err(err);
            }
        };

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<serde_json::Value>().await {
                Ok(body) => detail_message(&body),
                Err(_) => None,
            }
            .unwrap_or_else(|| format!("HTTP error! status: {}", status.as_u16()));

            let err = ApiError::Http {
                status: status.as_u16(),
                message,
            };
            tracing::error!("API request failed ({}): {}", status, err);
            return Err(err);
        }

        match response.json::<T>().await {
            Ok(data) => Ok(data),
            Err(e) => {
                let err = ApiError::Decode(e.to_string());
                tracing::error!("API request failed: {}", err);
                Err(err)
            }
        }
    }

    pub async fn check_api_availability(&self) -> bool {
        self.health_check().await.is_ok()
    }
}

fn detail_message(body: &serde_json::Value) -> Option<String> {
    match body.get("detail")? {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn unwrap_envelope<T>(response: ApiResponse<T>, what: &str) -> Result<T, ApiError> {
    match response {
        ApiResponse { success: true, data: Some(data), .. } => Ok(data),
        ApiResponse { error, message, .. } => Err(ApiError::Application(
            error
                .or(message)
                .unwrap_or_else(|| format!("Failed to load {}", what)),
        )),
    }
}

#[async_trait]
impl DevPlanApi for ApiClient {
    async fn generate_schema(&self, request: &ProjectRequest) -> Result<GenerationResponse, ApiError> {
        tracing::info!("Requesting schema generation ({} chars)", request.description.chars().count());
        self.post("/api/generate-schema", request).await
    }

    async fn get_available_stacks(&self) -> Result<StackCatalog, ApiError> {
        let response: ApiResponse<StackCatalog> = self.get("/api/stacks", &[]).await?;
        unwrap_envelope(response, "stacks")
    }

    async fn get_project_templates(&self) -> Result<Vec<ProjectTemplate>, ApiError> {
        let response: ApiResponse<Vec<ProjectTemplate>> = self.get("/api/templates", &[]).await?;
        unwrap_envelope(response, "templates")
    }

    async fn health_check(&self) -> Result<serde_json::Value, ApiError> {
        self.get("/health", &[]).await
    }

    async fn validate_openai_config(&self, config: &OpenAIConfigRequest) -> Result<ValidationResult, ApiError> {
        tracing::info!("Validating OpenAI configuration for model {}", config.model);
        self.post("/api/config/openai", config).await
    }

    async fn test_openai_config(&self) -> Result<ValidationResult, ApiError> {
        self.get("/api/config/openai/test", &[]).await
    }
}
