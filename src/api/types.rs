use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

pub type GenerationResponse = ApiResponse<ProjectSchema>;

// ---- Outbound request bodies ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectRequest {
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<ProjectPreferences>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_requirements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complexity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<StackPreferences>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StackPreferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frontend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAIConfigRequest {
    pub api_key: String,
    pub model: String,
}

// ---- Generated project plan ----
//
// Every struct defaults missing fields so a partially filled plan still
// renders instead of failing to decode.

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectSchema {
    pub project_name: String,
    pub description: String,
    pub project_type: String,
    pub complexity: String,
    pub estimated_duration: String,
    pub recommended_stack: RecommendedStack,
    pub architecture: Architecture,
    pub file_structure: FileNode,
    pub roadmap: Roadmap,
    pub features: Vec<String>,
    pub technical_requirements: Vec<String>,
    pub deployment_strategy: HashMap<String, serde_json::Value>,
    pub testing_strategy: HashMap<String, serde_json::Value>,
    pub monitoring_strategy: HashMap<String, serde_json::Value>,
    pub documentation: Vec<String>,
    pub potential_challenges: Vec<String>,
    pub success_metrics: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnologyRecommendation {
    pub name: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub learning_curve: String,
    pub community_support: String,
    pub job_market: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendedStack {
    pub frontend: TechnologyRecommendation,
    pub backend: TechnologyRecommendation,
    pub database: TechnologyRecommendation,
    pub deployment: TechnologyRecommendation,
    pub additional_tools: Vec<TechnologyRecommendation>,
    pub justification: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArchitectureComponent {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Architecture {
    pub overview: String,
    pub components: Vec<ArchitectureComponent>,
    pub data_flow: Vec<String>,
    pub security: Vec<String>,
    pub performance: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapPhase {
    pub name: String,
    pub duration: String,
    pub description: String,
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Roadmap {
    pub phases: Vec<RoadmapPhase>,
    pub milestones: Vec<serde_json::Value>,
    pub estimated_duration: String,
    pub team_recommendations: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    #[default]
    File,
    Directory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNode {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<FileNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

// ---- Credential validation ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Relayed from provider response headers, so it may arrive as a string.
    #[serde(default)]
    pub requests_remaining: Option<serde_json::Value>,
}

impl RateLimitInfo {
    pub fn requests_remaining_label(&self) -> Option<String> {
        match self.requests_remaining.as_ref()? {
            serde_json::Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            serde_json::Value::Number(n) if n.as_f64().is_some_and(|v| v > 0.0) => Some(n.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub model_available: Option<bool>,
    #[serde(default)]
    pub rate_limit_info: Option<RateLimitInfo>,
    #[serde(default)]
    pub error_details: Option<String>,
}

// ---- Auxiliary listings ----

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackOption {
    pub name: String,
    pub description: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackCatalog {
    pub frontend: Vec<StackOption>,
    pub backend: Vec<StackOption>,
    pub database: Vec<StackOption>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectTemplate {
    pub id: String,
    pub name: String,
    pub description: String,
    pub features: Vec<String>,
    pub complexity: String,
    pub duration: String,
}
