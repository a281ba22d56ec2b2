//! Configuration loading and validation.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::format::{parse_unit_selection, FormatError, FormatOptions, Formatter, Style};
use crate::models::UnitKey;
use crate::parse::{ParseMode, ParseOptions, Parser};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error(transparent)]
    UnitSelection(#[from] FormatError),
}

/// Formatter defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    #[serde(default)]
    pub style: Style,

    /// Unit names ("hour", "h", "hours"); empty means all units
    #[serde(default)]
    pub units: Vec<String>,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            style: Style::Short,
            units: Vec::new(),
        }
    }
}

impl FormatConfig {
    /// Resolve unit names to keys, rejecting unknown names.
    pub fn unit_keys(&self) -> Result<Vec<UnitKey>, FormatError> {
        parse_unit_selection(&self.units.join(","))
    }
}

/// Parser defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseConfig {
    #[serde(default)]
    pub mode: ParseMode,
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub parse: ParseConfig,
}

fn default_log_level() -> String {
    "warn".to_string()
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: FormatConfig::default(),
            parse: ParseConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "Unknown log level: {}",
                self.log_level
            )));
        }

        self.format.unit_keys()?;

        Ok(())
    }

    /// Build a formatter over the standard unit table.
    pub fn formatter(&self) -> Result<Formatter<'static>, ConfigError> {
        let options = FormatOptions {
            style: self.format.style,
            units: self.format.unit_keys()?,
        };
        Ok(Formatter::default().with_options(options))
    }

    /// Build a parser over the standard unit table.
    pub fn parser(&self) -> Parser<'static> {
        Parser::default().with_options(ParseOptions {
            mode: self.parse.mode,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.log_level, "warn");
        assert_eq!(config.format.style, Style::Short);
        assert!(config.format.units.is_empty());
        assert_eq!(config.parse.mode, ParseMode::Lenient);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_log_level() {
        let mut config = AppConfig::default();
        config.log_level = "loud".to_string();

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_config_validation_bad_unit() {
        let mut config = AppConfig::default();
        config.format.units = vec!["hour".to_string(), "fortnight".to_string()];

        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnitSelection(FormatError::InvalidUnitSelection { .. }))
        ));
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        // Should be parseable
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.log_level, parsed.log_level);
        assert_eq!(config.parse.mode, parsed.parse.mode);
    }

    #[test]
    fn test_config_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
log_level = "debug"

[format]
style = "long"
units = ["hour", "m"]

[parse]
mode = "strict"
"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.format.style, Style::Long);
        assert_eq!(
            config.format.unit_keys().unwrap(),
            vec![UnitKey::Hour, UnitKey::Minute]
        );

        let formatter = config.formatter().unwrap();
        assert_eq!(formatter.format(Some(93_784)), "26 hours 3.0666666666667 minutes");

        let parser = config.parser();
        assert!(parser.parse("soon").is_err());
    }

    #[test]
    fn test_config_from_file_rejects_bad_unit() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[format]\nunits = [\"lightyear\"]").unwrap();

        assert!(AppConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_or_default(&dir.path().join("durconv.toml")).unwrap();
        assert_eq!(config.log_level, "warn");
    }
}
