//! Masking configuration document
//!
//! The document is a single `columns` list; each entry names a target
//! column and optionally a kind, kind parameters and, for JSON columns, a
//! `paths` list. Files are parsed as JSON when the extension is `json`,
//! otherwise as YAML. All validation happens here, before any record is
//! processed.

use rowmask_core::{Error, Result};
use rowmask_engine::{ColumnRuleSpec, MaskRule};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, error, info};

/// Parsed masking configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskConfig {
    /// One rule per target column
    pub columns: Vec<ColumnRuleSpec>,
}

impl MaskConfig {
    /// Read and parse a configuration file, format chosen by extension.
    ///
    /// # Errors
    /// - `Error::Io` if the file can't be read
    /// - `Error::Config` if the document doesn't parse or lacks `columns`
    /// - `Error::ConfigValidation` if `columns` is empty
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            error!("Failed to read config file {path:?}: {e}");
            Error::Io(e)
        })?;

        let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
            Self::from_json(&contents)?
        } else {
            // Default to YAML
            Self::from_yaml(&contents)?
        };

        info!(
            rules = config.columns.len(),
            "loaded masking configuration from {path:?}"
        );
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        let doc: serde_yaml::Value = serde_yaml::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid YAML: {e}")))?;
        let doc = serde_json::to_value(doc)
            .map_err(|e| Error::Config(format!("YAML conversion error: {e}")))?;
        Self::from_document(doc)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let doc: serde_json::Value = serde_json::from_str(contents)
            .map_err(|e| Error::Config(format!("Invalid JSON: {e}")))?;
        Self::from_document(doc)
    }

    fn from_document(doc: serde_json::Value) -> Result<Self> {
        if doc.get("columns").is_none() {
            return Err(Error::Config(
                "missing required field 'columns'".to_string(),
            ));
        }
        let config: Self = serde_json::from_value(doc)
            .map_err(|e| Error::Config(format!("Invalid configuration: {e}")))?;
        if config.columns.is_empty() {
            return Err(Error::ConfigValidation(
                "'columns' must not be empty".to_string(),
            ));
        }
        debug!("parsed masking configuration");
        Ok(config)
    }

    /// Compile the raw column specs into engine rules.
    pub fn compile(&self) -> Result<Vec<MaskRule>> {
        rowmask_engine::compile(&self.columns)
    }
}
