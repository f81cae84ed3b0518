pub mod manager;
pub mod types;

pub use manager::CredentialManager;
pub use types::{
    ConnectionDetails, CredentialConfig, CredentialStatus, StatusIndicator, TestOutcome, Tone,
    DEFAULT_MODEL, STORAGE_KEY,
};
