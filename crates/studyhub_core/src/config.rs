//! Portal configuration loaded from JSON.
//!
//! # Invariants
//! - Missing keys fall back to defaults; unknown keys are rejected.
//! - A config returned by [`PortalConfig::load`] has passed `validate()`.

use crate::logging::{default_log_level, normalize_level, normalize_log_dir};
use crate::validation::is_web_url;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_PDF_BUCKET: &str = "pdfs";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:54321";

/// Top-level portal settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PortalConfig {
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub log_dir: Option<PathBuf>,
    pub storage: StorageConfig,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            storage: StorageConfig::default(),
        }
    }
}

/// Object storage settings for uploaded study materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StorageConfig {
    /// Bucket receiving uploaded PDFs.
    pub pdf_bucket: String,
    /// Base URL public object links are built from.
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pdf_bucket: DEFAULT_PDF_BUCKET.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

impl PortalConfig {
    /// Reads, parses and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Parses and validates JSON config text.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        normalize_level(&self.log_level).map_err(ConfigError::Invalid)?;
        if let Some(dir) = &self.log_dir {
            normalize_log_dir(&dir.to_string_lossy()).map_err(ConfigError::Invalid)?;
        }

        let bucket = self.storage.pdf_bucket.trim();
        if bucket.is_empty() {
            return Err(ConfigError::Invalid(
                "storage.pdf_bucket cannot be empty".to_string(),
            ));
        }
        if bucket.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "storage.pdf_bucket must not contain `/`, got `{bucket}`"
            )));
        }
        if !is_web_url(self.storage.public_base_url.trim()) {
            return Err(ConfigError::Invalid(format!(
                "storage.public_base_url must be an http(s) URL, got `{}`",
                self.storage.public_base_url
            )));
        }
        Ok(())
    }
}

/// Config loading failure.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config JSON: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PortalConfig, DEFAULT_PDF_BUCKET};

    #[test]
    fn empty_object_uses_defaults() {
        let config = PortalConfig::from_json_str("{}").unwrap();
        assert_eq!(config, PortalConfig::default());
        assert_eq!(config.storage.pdf_bucket, DEFAULT_PDF_BUCKET);
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = PortalConfig::from_json_str(r#"{"bucket":"x"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn rejects_invalid_values() {
        let err = PortalConfig::from_json_str(r#"{"log_level":"loud"}"#).unwrap_err();
        assert!(err.to_string().contains("unsupported log level"));

        let err = PortalConfig::from_json_str(r#"{"log_dir":"logs"}"#).unwrap_err();
        assert!(err.to_string().contains("absolute"));

        let err =
            PortalConfig::from_json_str(r#"{"storage":{"pdf_bucket":"  "}}"#).unwrap_err();
        assert!(err.to_string().contains("pdf_bucket"));

        let err = PortalConfig::from_json_str(r#"{"storage":{"public_base_url":"files"}}"#)
            .unwrap_err();
        assert!(err.to_string().contains("public_base_url"));
    }
}
