//! Application configuration
//!
//! Loaded from an optional TOML file; every section falls back to the
//! reference assessment.
//!
//! ```toml
//! output_dir = "reports"
//!
//! [catalog]
//! title = "Ops Maturity"
//! questions = ["Do we have runbooks?", "Are incidents reviewed?"]
//!
//! [gate]
//! email_policy = "presence"
//!
//! [report]
//! filename = "ops-report.pdf"
//! line_spacing = 12.0
//! ```

use maturity_core::{CatalogConfig, CatalogError, Gate, GateConfig, QuestionCatalog};
use maturity_report::ReportLayout;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("cannot read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for this schema
    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// `[catalog]` does not describe a usable catalog
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory reports are saved into
    pub output_dir: PathBuf,
    pub catalog: CatalogConfig,
    pub gate: GateConfig,
    pub report: ReportLayout,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            catalog: CatalogConfig::default(),
            gate: GateConfig::default(),
            report: ReportLayout::default(),
        }
    }
}

impl AppConfig {
    /// Load from `path`, or defaults when no path is given
    ///
    /// # Errors
    /// `ConfigError` if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// `toml::de::Error` on malformed input or unknown value types
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// With output directory
    #[inline]
    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Build the question catalog
    ///
    /// # Errors
    /// `ConfigError::Catalog` if the catalog section is unusable
    pub fn catalog(&self) -> Result<QuestionCatalog, ConfigError> {
        Ok(self.catalog.build()?)
    }

    #[inline]
    #[must_use]
    pub fn gate(&self) -> Gate {
        self.gate.build()
    }
}
