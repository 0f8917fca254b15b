use crate::error::{ClassruleError, Result};
use crate::session::{InvalidPolicy, RunOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use xdg::BaseDirectories;

pub const CONFIG_ENV: &str = "CLASSRULE_CONFIG";

/// Output format for a classification.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Table,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Table => "table",
            OutputFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(ClassruleError::Config(format!(
                "Unsupported output format '{}'. Use 'text', 'table' or 'json'",
                s
            ))),
        }
    }
}

/// Settings read from `classrule.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub on_invalid: InvalidPolicy,
    pub parallel: bool,
    pub threads: usize,
    pub format: OutputFormat,
    pub no_match_marker: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            on_invalid: InvalidPolicy::Abort,
            parallel: false,
            threads: 0,
            format: OutputFormat::Text,
            no_match_marker: "-".to_string(),
        }
    }
}

impl Config {
    /// Load settings from `path_override`, then `$CLASSRULE_CONFIG`, then
    /// `$XDG_CONFIG_HOME/classrule/classrule.toml`. Falls back to defaults
    /// when none of them exists.
    pub fn load(path_override: Option<PathBuf>) -> Result<Self> {
        let path = if let Some(path) = path_override {
            if !path.exists() {
                return Err(ClassruleError::FileNotFound(path));
            }
            Some(path)
        } else if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            Some(PathBuf::from(env_path))
        } else {
            BaseDirectories::with_prefix("classrule")
                .ok()
                .and_then(|xdg| xdg.find_config_file("classrule.toml"))
        };

        match path {
            Some(path) => {
                log::debug!("loading configuration from {}", path.display());
                Self::from_file(&path)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ClassruleError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Config = toml::from_str(toml_str)
            .map_err(|e| ClassruleError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.no_match_marker.trim().is_empty() {
            return Err(ClassruleError::Config(
                "no_match_marker cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            on_invalid: self.on_invalid,
            parallel: self.parallel,
            threads: self.threads,
        }
    }
}
