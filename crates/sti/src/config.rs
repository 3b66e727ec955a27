//! Inheritance configuration
//!
//! Defaults shared by every model that does not declare its own values.
//! Loaded once per process from the environment.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::env;

pub const INHERITANCE_COLUMN_VAR: &str = "ELIF_STI_INHERITANCE_COLUMN";
pub const STRICT_ALIASES_VAR: &str = "ELIF_STI_STRICT_ALIASES";

/// Configuration error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Where a configuration value came from
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Value loaded from environment variable
    EnvVar(String),
    /// Default value used
    Default(String),
    /// Value provided programmatically
    Programmatic,
}

impl ConfigSource {
    pub fn is_env_var(&self) -> bool {
        matches!(self, ConfigSource::EnvVar(_))
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ConfigSource::Default(_))
    }
}

const DEFAULT_INHERITANCE_COLUMN: &str = "type";

/// Process-wide defaults for single-table inheritance
#[derive(Debug, Clone, PartialEq)]
pub struct StiConfig {
    /// Discriminator column for roots that do not declare their own
    pub inheritance_column: String,
    /// Validate a root's alias table when its children boot
    pub strict_aliases: bool,
    sources: HashMap<String, ConfigSource>,
}

impl StiConfig {
    pub fn new() -> Self {
        let mut sources = HashMap::new();
        sources.insert(
            "inheritance_column".to_string(),
            ConfigSource::Default(DEFAULT_INHERITANCE_COLUMN.to_string()),
        );
        sources.insert(
            "strict_aliases".to_string(),
            ConfigSource::Default("false".to_string()),
        );

        Self {
            inheritance_column: DEFAULT_INHERITANCE_COLUMN.to_string(),
            strict_aliases: false,
            sources,
        }
    }

    pub fn with_inheritance_column(mut self, column: impl Into<String>) -> Self {
        self.inheritance_column = column.into();
        self.record("inheritance_column", ConfigSource::Programmatic);
        self
    }

    pub fn with_strict_aliases(mut self, strict: bool) -> Self {
        self.strict_aliases = strict;
        self.record("strict_aliases", ConfigSource::Programmatic);
        self
    }

    fn record(&mut self, field: &str, source: ConfigSource) {
        self.sources.insert(field.to_string(), source);
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key/value source shaped like the environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(column) = lookup(INHERITANCE_COLUMN_VAR) {
            config.inheritance_column = column.trim().to_string();
            config.record(
                "inheritance_column",
                ConfigSource::EnvVar(INHERITANCE_COLUMN_VAR.to_string()),
            );
        }

        if let Some(strict) = lookup(STRICT_ALIASES_VAR) {
            config.strict_aliases = match strict.trim().to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" => false,
                _ => {
                    return Err(ConfigError::invalid_value(
                        "strict_aliases",
                        strict,
                        "true or false",
                    ))
                }
            };
            config.record(
                "strict_aliases",
                ConfigSource::EnvVar(STRICT_ALIASES_VAR.to_string()),
            );
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let column = &self.inheritance_column;
        if column.is_empty() {
            return Err(ConfigError::ValidationFailed {
                message: "inheritance column cannot be empty".to_string(),
            });
        }

        if !column.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            || column.starts_with(|c: char| c.is_ascii_digit())
        {
            return Err(ConfigError::invalid_value(
                "inheritance_column",
                column.clone(),
                "a plain SQL identifier (letters, digits, underscores)",
            ));
        }

        Ok(())
    }

    /// Where each field's value came from
    pub fn config_sources(&self) -> HashMap<String, ConfigSource> {
        self.sources.clone()
    }
}

impl Default for StiConfig {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_CONFIG: Lazy<StiConfig> = Lazy::new(|| match StiConfig::from_env() {
    Ok(config) => config,
    Err(err) => {
        tracing::warn!("Ignoring inheritance configuration from environment: {}", err);
        StiConfig::new()
    }
});

/// Get the process-wide inheritance configuration
pub fn global() -> &'static StiConfig {
    &GLOBAL_CONFIG
}
