use crate::api::retry::RetryPolicy;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api_base_url: String,
    pub storage_path: PathBuf,
    pub notification_duration: Duration,
    pub welcome_duration: Duration,
    pub retry: RetryPolicy,
    /// Wrap schema generation in the retry helper. Off unless asked for.
    pub retry_generation: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: data_dir.join("devplan").join("devplan.db"),
            notification_duration: Duration::from_millis(5000),
            welcome_duration: Duration::from_millis(8000),
            retry: RetryPolicy::default(),
            retry_generation: false,
        }
    }
}

impl AppSettings {
    /// Defaults overridden by `DEVPLAN_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(url) = lookup("DEVPLAN_API_BASE_URL").filter(|v| !v.trim().is_empty()) {
            settings.api_base_url = url.trim().trim_end_matches('/').to_string();
        }

        if let Some(path) = lookup("DEVPLAN_STORAGE_PATH").filter(|v| !v.trim().is_empty()) {
            settings.storage_path = PathBuf::from(path);
        }

        if let Some(flag) = lookup("DEVPLAN_RETRY_GENERATION") {
            settings.retry_generation = matches!(
                flag.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes"
            );
        }

        settings
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_storage_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.storage_path = path.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = AppSettings::default();
        assert_eq!(settings.api_base_url, "http://localhost:8000");
        assert_eq!(settings.notification_duration, Duration::from_millis(5000));
        assert_eq!(settings.retry.max_retries, 3);
        assert_eq!(settings.retry.base_delay, Duration::from_millis(1000));
        assert!(!settings.retry_generation);
        assert!(settings.storage_path.ends_with("devplan/devplan.db"));
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> = [
            ("DEVPLAN_API_BASE_URL", "https://plans.example.com/"),
            ("DEVPLAN_STORAGE_PATH", "/tmp/devplan-test.db"),
            ("DEVPLAN_RETRY_GENERATION", "True"),
        ]
        .into_iter()
        .collect();

        let settings = AppSettings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.api_base_url, "https://plans.example.com");
        assert_eq!(settings.storage_path, PathBuf::from("/tmp/devplan-test.db"));
        assert!(settings.retry_generation);
    }

    #[test]
    fn test_blank_env_values_are_ignored() {
        let settings = AppSettings::from_lookup(|k| match k {
            "DEVPLAN_API_BASE_URL" => Some("   ".to_string()),
            "DEVPLAN_RETRY_GENERATION" => Some("nope".to_string()),
            _ => None,
        });
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert!(!settings.retry_generation);
    }
}
