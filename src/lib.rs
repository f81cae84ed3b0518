pub mod api;
pub mod app;
pub mod config;
pub mod credentials;
pub mod error;
pub mod form;
pub mod storage;
pub mod ui;

use crate::app::DevPlanApp;
use crate::config::AppSettings;
use crate::form::types::SubmitOutcome;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command line accepted by the `devplan` binary.
#[derive(Debug, Parser)]
#[command(name = "devplan")]
#[command(about = "Generate a project plan with the DevPlan backend", long_about = None)]
pub struct CliArgs {
    /// Backend base URL
    #[arg(short = 'u', long)]
    pub base_url: Option<String>,

    /// Local storage database file
    #[arg(short, long)]
    pub storage: Option<PathBuf>,

    /// Write the results HTML here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Project description, words are joined with spaces
    pub description: Vec<String>,
}

impl CliArgs {
    pub fn description(&self) -> Option<String> {
        let description = self.description.join(" ");
        (!description.trim().is_empty()).then_some(description)
    }

    pub fn apply(&self, mut settings: AppSettings) -> AppSettings {
        if let Some(url) = &self.base_url {
            settings = settings.with_base_url(url.clone());
        }
        if let Some(path) = &self.storage {
            settings = settings.with_storage_path(path.clone());
        }
        settings
    }
}

pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();
    let app = DevPlanApp::open(args.apply(AppSettings::from_env()))?;
    tracing::info!("DevPlan client targeting {}", app.settings().api_base_url);
    app.start().await;

    let status = app.credentials().status_indicator().await;
    tracing::info!("OpenAI configuration: {} ({})", status.label, status.tone.as_str());

    let Some(description) = args.description() else {
        tracing::info!("No project description given, nothing to generate");
        return Ok(());
    };

    app.form().set_description(description).await;
    match app.generate().await {
        SubmitOutcome::Succeeded => {}
        SubmitOutcome::Invalid(message) | SubmitOutcome::Failed(message) => anyhow::bail!(message),
        other => anyhow::bail!("Generation did not complete: {:?}", other),
    }

    let html = app.form().render_results().await.to_html();
    match args.output {
        Some(path) => {
            tokio::fs::write(&path, html).await?;
            tracing::info!("📄 Results written to {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn args(list: &[&str]) -> Result<CliArgs, clap::Error> {
        CliArgs::try_parse_from(std::iter::once("devplan").chain(list.iter().copied()))
    }

    #[test]
    fn test_parse_flags_and_description() {
        let parsed = args(&["--base-url", "http://api:9000", "Une", "appli", "-o", "out.html"]).unwrap();
        assert_eq!(parsed.base_url.as_deref(), Some("http://api:9000"));
        assert_eq!(parsed.output, Some(PathBuf::from("out.html")));
        assert_eq!(parsed.description().as_deref(), Some("Une appli"));
        assert_eq!(parsed.storage, None);
    }

    #[test]
    fn test_parse_without_description() {
        assert_eq!(args(&["--storage", "/tmp/devplan.db"]).unwrap().description(), None);
        assert_eq!(args(&[]).unwrap().description(), None);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        let err = args(&["--verbose", "Une", "appli", "de", "gestion"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_flag_without_value_is_rejected() {
        assert!(args(&["Une", "appli", "de", "gestion", "-o"]).is_err());
        assert!(args(&["--storage"]).is_err());
    }

    #[test]
    fn test_apply_overrides_settings() {
        let settings = args(&["-u", "http://api:9000/", "-s", "data.db"])
            .unwrap()
            .apply(AppSettings::default());
        assert_eq!(settings.api_base_url, "http://api:9000");
        assert_eq!(settings.storage_path, PathBuf::from("data.db"));
    }
}
