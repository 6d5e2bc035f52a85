#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::gemini::{DEFAULT_ENDPOINT, DEFAULT_MODEL};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use cli::CliConfig;
use toml_config::{is_unresolved_placeholder, TomlConfig};

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

/// Effective settings for one export run.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    pub input_files: Vec<String>,
    pub output_path: String,
    pub ai_enabled: bool,
    pub ai_endpoint: String,
    pub ai_model: String,
    pub api_key: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub dropped_rows: Vec<usize>,
    pub review: bool,
}

impl ExportConfig {
    pub fn new(input_files: Vec<String>) -> Self {
        Self {
            input_files,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            ai_enabled: true,
            ai_endpoint: DEFAULT_ENDPOINT.to_string(),
            ai_model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_seconds: None,
            dropped_rows: Vec::new(),
            review: false,
        }
    }

    /// Layers file settings over the defaults.
    pub fn apply_file(mut self, file: TomlConfig) -> Self {
        if let Some(enabled) = file.ai.enabled {
            self.ai_enabled = enabled;
        }
        if let Some(endpoint) = file.ai.endpoint {
            self.ai_endpoint = endpoint;
        }
        if let Some(model) = file.ai.model {
            self.ai_model = model;
        }
        if let Some(api_key) = file.ai.api_key {
            if is_unresolved_placeholder(&api_key) {
                tracing::warn!("ai.api_key references an unset environment variable; ignoring it");
            } else {
                self.api_key = Some(api_key);
            }
        }
        if file.ai.timeout_seconds.is_some() {
            self.timeout_seconds = file.ai.timeout_seconds;
        }
        if let Some(path) = file.output.path {
            self.output_path = path;
        }
        self
    }

    /// Layers explicit command-line options over everything else.
    #[cfg(feature = "cli")]
    pub fn apply_cli(mut self, cli: &CliConfig) -> Self {
        self.input_files = cli.files.clone();
        if let Some(path) = &cli.output_path {
            self.output_path = path.clone();
        }
        if let Some(endpoint) = &cli.ai_endpoint {
            self.ai_endpoint = endpoint.clone();
        }
        if let Some(model) = &cli.ai_model {
            self.ai_model = model.clone();
        }
        if let Some(api_key) = &cli.api_key {
            self.api_key = Some(api_key.clone());
        }
        if cli.timeout_seconds.is_some() {
            self.timeout_seconds = cli.timeout_seconds;
        }
        if cli.no_ai {
            self.ai_enabled = false;
        }
        self.dropped_rows = cli.dropped_rows.clone();
        self.review = cli.review;
        self
    }

    /// Defaults, then the `--config` file if given, then the command line.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let mut config = Self::new(cli.files.clone());
        if let Some(path) = &cli.config {
            tracing::debug!("Loading settings from {}", path);
            let file = TomlConfig::from_file(path)?;
            file.validate()?;
            config = config.apply_file(file);
        }
        Ok(config.apply_cli(cli))
    }
}

impl ConfigProvider for ExportConfig {
    fn input_files(&self) -> &[String] {
        &self.input_files
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn ai_endpoint(&self) -> &str {
        &self.ai_endpoint
    }

    fn ai_model(&self) -> &str {
        &self.ai_model
    }

    fn api_key(&self) -> Option<&str> {
        if self.ai_enabled {
            self.api_key.as_deref()
        } else {
            None
        }
    }

    fn request_timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    fn dropped_rows(&self) -> &[usize] {
        &self.dropped_rows
    }

    fn review(&self) -> bool {
        self.review
    }
}

impl Validate for ExportConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_file_extensions("files", &self.input_files, &["json"])?;
        validation::validate_path("output_path", &self.output_path)?;
        if self.ai_enabled {
            validation::validate_url("ai_endpoint", &self.ai_endpoint)?;
            validation::validate_non_empty_string("ai_model", &self.ai_model)?;
        }
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ExportConfig::new(vec!["a.json".to_string()]);

        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.ai_model(), DEFAULT_MODEL);
        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_file_settings_override_defaults() {
        let file = TomlConfig::from_toml_str(
            r#"
[ai]
model = "other-model"
api_key = "abc"
timeout_seconds = 12

[output]
path = "./exports"
"#,
        )
        .unwrap();

        let config = ExportConfig::new(vec!["a.json".to_string()]).apply_file(file);

        assert_eq!(config.ai_model(), "other-model");
        assert_eq!(config.api_key(), Some("abc"));
        assert_eq!(config.request_timeout_seconds(), Some(12));
        assert_eq!(config.output_path(), "./exports");
    }

    #[test]
    fn test_unresolved_api_key_is_ignored() {
        let file = TomlConfig::from_toml_str(
            "[ai]\napi_key = \"${CINEMA_EXPORT_SURELY_UNSET_KEY}\"\n",
        )
        .unwrap();

        let config = ExportConfig::new(vec!["a.json".to_string()]).apply_file(file);

        assert!(config.api_key().is_none());
    }

    #[test]
    fn test_disabled_ai_hides_api_key() {
        let mut config = ExportConfig::new(vec!["a.json".to_string()]);
        config.api_key = Some("abc".to_string());
        config.ai_enabled = false;
        config.ai_endpoint = "not a url".to_string();

        assert!(config.api_key().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_non_json_inputs() {
        let config = ExportConfig::new(vec!["movies.csv".to_string()]);

        assert!(config.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_file() {
        use clap::Parser;

        let cli = CliConfig::try_parse_from([
            "cinema-export",
            "a.json",
            "--ai-model",
            "cli-model",
            "--api-key",
            "from-cli",
            "--drop",
            "0",
        ])
        .unwrap();
        let file = TomlConfig::from_toml_str("[ai]\nmodel = \"file-model\"\n").unwrap();

        let config = ExportConfig::new(Vec::new()).apply_file(file).apply_cli(&cli);

        assert_eq!(config.input_files(), ["a.json".to_string()]);
        assert_eq!(config.ai_model(), "cli-model");
        assert_eq!(config.api_key(), Some("from-cli"));
        assert_eq!(config.dropped_rows(), [0]);
    }
}
