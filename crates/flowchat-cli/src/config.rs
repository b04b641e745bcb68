use crate::error::CliError;
use config::{Config as ConfigLoader, ConfigError, Environment, File};
use flowchat_llm::ClientConfig;
use flowchat_types::SessionConfig;
use flowchat_workflow::RenderOptions;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable holding the bearer token
pub const API_KEY_VAR: &str = "FLOWCHAT_API_KEY";

const ENV_PREFIX: &str = "FLOWCHAT";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secret (from ENV only)
    #[serde(default)]
    pub api_key: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Longest pause allowed between two reads of the response stream
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkflowConfig {
    /// Start with node outputs expanded in the panel
    #[serde(default)]
    pub show_outputs: bool,
    /// Clear the panel at the start of every turn
    #[serde(default)]
    pub reset_each_turn: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `json` or `pretty`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3100/v1".to_string()
}

fn default_model() -> String {
    "mcu-dify".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Config {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (ENV defaults to `dev`)
    /// 3. Environment variables `FLOWCHAT_<SECTION>__<KEY>`
    ///
    /// The bearer token is only taken from `FLOWCHAT_API_KEY`.
    pub fn load() -> Result<Self, CliError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: Config = builder.build()?.try_deserialize()?;

        cfg.api_key = std::env::var(API_KEY_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(CliError::MissingApiKey(API_KEY_VAR))?;

        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(&self.api.base_url, &self.api_key)
            .with_connect_timeout(Duration::from_secs(self.api.connect_timeout_secs))
            .with_read_timeout(Duration::from_secs(self.api.timeout_secs))
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::new(&self.api.model).with_workflow_reset(self.workflow.reset_each_turn)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::default().with_outputs(self.workflow.show_outputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [api]
            base_url = "https://dify.example.com/v1"
            model = "support-bot"
            timeout_secs = 30

            [workflow]
            show_outputs = true
            reset_each_turn = true

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.api.base_url, "https://dify.example.com/v1");
        assert_eq!(config.api.model, "support-bot");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert!(config.workflow.show_outputs);
        assert!(config.workflow.reset_each_turn);
        assert_eq!(config.logging.format, "json");
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:3100/v1");
        assert_eq!(config.api.model, "mcu-dify");
        assert_eq!(config.api.timeout_secs, 120);
        assert!(!config.workflow.show_outputs);
        assert!(!config.workflow.reset_each_turn);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("flowchat-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[api]\nmodel = \"from-file\"\n\n[workflow]\nshow_outputs = true\n").unwrap();

        let config = Config::from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.api.model, "from-file");
        assert_eq!(config.api.base_url, "http://localhost:3100/v1");
        assert!(config.render_options().show_outputs);
    }

    #[test]
    fn test_derived_settings() {
        let mut config: Config = toml::from_str(
            r#"
            [api]
            base_url = "http://localhost:3100/v1/"
            model = "mcu-dify"
            timeout_secs = 45

            [workflow]
            reset_each_turn = true
        "#,
        )
        .unwrap();
        config.api_key = "secret".to_string();

        let client = config.client_config();
        assert_eq!(client.completions_url(), "http://localhost:3100/v1/chat/completions");
        assert_eq!(client.api_key, "secret");
        assert_eq!(client.read_timeout, Duration::from_secs(45));
        assert_eq!(client.connect_timeout, Duration::from_secs(10));

        let session = config.session_config();
        assert_eq!(session.model, "mcu-dify");
        assert!(session.reset_workflow_each_turn);
        assert!(!config.render_options().show_outputs);
    }
}
