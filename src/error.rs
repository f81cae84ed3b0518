use thiserror::Error;

/// Failures surfaced by the transport client.
///
/// Callers are only expected to look at the rendered message; the variants
/// exist so the client can log and build that message consistently.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No HTTP response was obtained at all.
    #[error("Failed to fetch: {0}")]
    Network(String),

    /// Non-success status. `message` is the server `detail` when one could be
    /// parsed, otherwise the generic status message.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// A 200 response carrying `success: false`.
    #[error("{0}")]
    Application(String),

    #[error("Failed to parse response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Credential(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_keeps_fetch_marker() {
        let err = ApiError::Network("connection refused".to_string());
        assert_eq!(err.to_string(), "Failed to fetch: connection refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_http_error_displays_message_only() {
        let err = ApiError::Http {
            status: 422,
            message: "Description trop courte".to_string(),
        };
        assert_eq!(err.to_string(), "Description trop courte");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn test_app_error_is_transparent_over_api_error() {
        let err: AppError = ApiError::Application("Quota dépassé".to_string()).into();
        assert_eq!(err.to_string(), "Quota dépassé");
    }
}
