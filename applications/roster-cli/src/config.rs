/// CLI configuration
use crate::error::{CliError, Result};
use roster_client::{ClientConfig, MAX_PER_PAGE};
use roster_panel::PanelConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    #[serde(default = "default_client")]
    pub client: ClientSettings,

    #[serde(default)]
    pub panel: PanelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl RosterConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `roster.toml` in the working directory.
    /// An explicit path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "Config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("roster.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. ROSTER_CLIENT__BASE_URL
        settings = settings.add_source(
            config::Environment::with_prefix("ROSTER")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.client.base_url.trim().is_empty() {
            return Err(CliError::Config(
                "Base URL is required (set ROSTER_CLIENT__BASE_URL)".to_string(),
            ));
        }

        if self.panel.page_size == 0 || self.panel.page_size > MAX_PER_PAGE {
            return Err(CliError::Config(format!(
                "panel.page_size must be between 1 and {}",
                MAX_PER_PAGE
            )));
        }

        if self.client.timeout_secs == 0 {
            return Err(CliError::Config(
                "client.timeout_secs must be positive".to_string(),
            ));
        }

        Ok(())
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.client.base_url.clone())
            .with_prefix(self.client.api_prefix.clone())
            .with_timeouts(
                Duration::from_secs(self.client.timeout_secs),
                Duration::from_secs(self.client.connect_timeout_secs),
            )
    }
}

// Default values
fn default_client() -> ClientSettings {
    ClientSettings {
        base_url: default_base_url(),
        api_prefix: default_api_prefix(),
        timeout_secs: default_timeout_secs(),
        connect_timeout_secs: default_connect_timeout_secs(),
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_api_prefix() -> String {
    "/api/users".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            client: default_client(),
            panel: PanelConfig::default(),
        }
    }
}
