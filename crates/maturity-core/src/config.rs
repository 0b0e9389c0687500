//! Deserializable configuration sections owned by the core
//!
//! Missing keys fall back to the reference assessment.

use crate::catalog::{QuestionCatalog, DEFAULT_TITLE, REFERENCE_QUESTIONS};
use crate::error::CatalogError;
use crate::gate::{EmailPolicy, Gate};
use serde::{Deserialize, Serialize};

/// `[catalog]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Heading above the assessment form
    pub title: String,
    /// Question texts, in order
    pub questions: Vec<String>,
}

impl CatalogConfig {
    /// Build the catalog
    ///
    /// # Errors
    /// `CatalogError` if the list is empty or holds a blank question
    pub fn build(&self) -> Result<QuestionCatalog, CatalogError> {
        QuestionCatalog::new(self.title.clone(), self.questions.iter().cloned())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            questions: REFERENCE_QUESTIONS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// `[gate]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub email_policy: EmailPolicy,
}

impl GateConfig {
    #[inline]
    #[must_use]
    pub fn build(&self) -> Gate {
        Gate::new(self.email_policy)
    }
}
