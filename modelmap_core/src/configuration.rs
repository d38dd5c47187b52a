//! Run configuration for mapping a directory of models
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::io::mapping_table::TableFormat;
use crate::mapping::canonical::{is_separator, DEFAULT_PREFIX};
use crate::translate::annotation::METANETX;

/// Settings of one mapping run, passed explicitly to the pipeline
///
/// # Examples
/// ```rust
/// use modelmap_core::configuration::MappingConfig;
/// let config = MappingConfig::from_toml_str(r#"
/// input_dir = "models"
/// output_dir = "mappings"
/// format = "tsv"
/// "#).unwrap();
/// assert_eq!(config.namespace, "metanetx");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Directory holding the model files
    pub input_dir: PathBuf,
    /// Directory the mapping tables are written to
    pub output_dir: PathBuf,
    /// Namespace the models are translated into
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Prefix of canonical tokens in the namespace
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub format: TableFormat,
}

fn default_namespace() -> String {
    METANETX.to_string()
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

impl MappingConfig {
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(input_dir: P, output_dir: Q) -> Self {
        MappingConfig {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            namespace: default_namespace(),
            prefix: default_prefix(),
            format: TableFormat::default(),
        }
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        MappingConfig::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Check the configuration before any model is processed
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.input_dir.is_dir() {
            return Err(ConfigError::MissingInputDir(self.input_dir.clone()));
        }
        if self.namespace.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "namespace",
                reason: "must not be empty".to_string(),
            });
        }
        if self.prefix.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: "must not be empty".to_string(),
            });
        }
        if self.prefix.chars().any(is_separator) {
            return Err(ConfigError::InvalidValue {
                field: "prefix",
                reason: format!("{} contains a separator (~ or _)", self.prefix),
            });
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to read configuration file due to {0}")]
    UnableToRead(#[from] std::io::Error),
    #[error("Unable to parse configuration due to {0}")]
    UnableToParse(#[from] toml::de::Error),
    #[error("Input directory {0} does not exist")]
    MissingInputDir(PathBuf),
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}
