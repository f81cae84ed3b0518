use crate::api::types::ValidationResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Storage key holding the saved configuration.
pub const STORAGE_KEY: &str = "openai-config";
pub const DEFAULT_MODEL: &str = "gpt-4";
pub const API_KEY_PREFIX: &str = "sk-";

pub const MISSING_KEY: &str = "Veuillez entrer une clé API OpenAI";
pub const BAD_PREFIX: &str = "La clé API doit commencer par \"sk-\"";
pub const NOT_TESTED: &str = "Veuillez d'abord tester la configuration";
pub const SAVED: &str = "Configuration sauvegardée avec succès";
pub const SAVE_FAILED: &str = "Erreur lors de la sauvegarde";
pub const VALIDATION_ERROR: &str = "Erreur de validation";
pub const TEST_ERROR: &str = "Erreur de test";
pub const NOT_AVAILABLE: &str = "Non disponible";

/// What gets written to durable storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub model: String,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialStatus {
    Untested,
    Testing,
    /// Carries the server message.
    Connected(String),
    Failed(String),
}

impl CredentialStatus {
    pub fn indicator(&self) -> StatusIndicator {
        let (label, tone) = match self {
            CredentialStatus::Untested => ("Non testé".to_string(), Tone::Gray),
            CredentialStatus::Testing => ("Test en cours...".to_string(), Tone::Yellow),
            CredentialStatus::Connected(message) => (message.clone(), Tone::Green),
            CredentialStatus::Failed(message) => (message.clone(), Tone::Red),
        };
        StatusIndicator { label, tone }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Gray,
    Yellow,
    Green,
    Red,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gray => "gray",
            Tone::Yellow => "yellow",
            Tone::Green => "green",
            Tone::Red => "red",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusIndicator {
    pub label: String,
    pub tone: Tone,
}

/// The details panel shown after a successful test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionDetails {
    pub organization: String,
    pub model_available: String,
    pub requests_remaining: String,
}

impl From<&ValidationResult> for ConnectionDetails {
    fn from(result: &ValidationResult) -> Self {
        Self {
            organization: result
                .organization
                .clone()
                .filter(|o| !o.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            model_available: if result.model_available.unwrap_or(false) { "Oui" } else { "Non" }.to_string(),
            requests_remaining: result
                .rate_limit_info
                .as_ref()
                .and_then(|info| info.requests_remaining_label())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        }
    }
}

/// How a call to `CredentialManager::test_configuration` ended.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    /// Rejected before any request was made.
    Rejected(&'static str),
    Busy,
    Connected,
    Failed(String),
    /// The inputs changed while waiting; the result was dropped.
    Discarded,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::RateLimitInfo;
    use serde_json::json;

    #[test]
    fn test_details_fallbacks() {
        let details = ConnectionDetails::from(&ValidationResult {
            is_valid: true,
            ..Default::default()
        });
        assert_eq!(details.organization, NOT_AVAILABLE);
        assert_eq!(details.model_available, "Non");
        assert_eq!(details.requests_remaining, NOT_AVAILABLE);
    }

    #[test]
    fn test_details_from_full_result() {
        let details = ConnectionDetails::from(&ValidationResult {
            is_valid: true,
            organization: Some("org-acme".to_string()),
            model_available: Some(true),
            rate_limit_info: Some(RateLimitInfo {
                requests_remaining: Some(json!("4999")),
            }),
            ..Default::default()
        });
        assert_eq!(details.organization, "org-acme");
        assert_eq!(details.model_available, "Oui");
        assert_eq!(details.requests_remaining, "4999");
    }

    #[test]
    fn test_indicator_tones() {
        assert_eq!(CredentialStatus::Untested.indicator().label, "Non testé");
        assert_eq!(CredentialStatus::Testing.indicator().tone, Tone::Yellow);
        let failed = CredentialStatus::Failed("Clé API invalide".to_string()).indicator();
        assert_eq!(failed.label, "Clé API invalide");
        assert_eq!(failed.tone.as_str(), "red");
    }

    #[test]
    fn test_config_tolerates_missing_fields() {
        let config: CredentialConfig = serde_json::from_value(json!({
            "saved_at": "2024-05-01T10:00:00Z"
        }))
        .unwrap();
        assert!(config.api_key.is_empty());
        assert!(config.model.is_empty());
    }
}
