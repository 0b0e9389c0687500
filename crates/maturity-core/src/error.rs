//! Error types for the assessment core
//!
//! Two families reach the respondent:
//! - [`ValidationError`]: a gate or guard refused a transition; state is untouched
//! - [`RenderError`]: the report could not be produced or delivered
//!
//! [`WizardError`] wraps both for the controller.

use crate::profile::IdentityField;
use crate::wizard::{ActionKind, Phase};
use std::path::PathBuf;

/// Main wizard error type
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// A guard refused the transition
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Report rendering or delivery failed
    #[error("report generation failed: {0}")]
    Render(#[from] RenderError),

    /// Action does not belong to the current phase
    #[error("{action} is not accepted during the {phase} phase")]
    OutOfPhase { action: ActionKind, phase: Phase },

    /// Session already reached its terminal phase
    #[error("assessment already submitted; start a new session to answer again")]
    SessionClosed,
}

impl WizardError {
    /// Check if the respondent can fix this by editing and resubmitting
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::SessionClosed)
    }

    /// Check if error came from a gate or guard
    #[inline]
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if error came from the report pipeline
    #[inline]
    #[must_use]
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }
}

/// Guard failures. Recovered locally by refusing the transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Identity fields are blank
    #[error("required field(s) missing: {}", join_fields(.missing))]
    IncompleteIdentity { missing: Vec<IdentityField> },

    /// Identity field holds a character the report cannot print
    #[error("{field} contains {character:?}, which the report cannot print")]
    UnprintableIdentity {
        field: IdentityField,
        character: char,
    },

    /// Email present but not shaped like an address
    #[error("email address {email:?} is not valid")]
    MalformedEmail { email: String },

    /// Final submit with unanswered questions
    #[error("{} question(s) unanswered: {}", .unanswered.len(), join_numbers(.unanswered))]
    IncompleteAnswers { unanswered: Vec<usize> },

    /// Answer edit addressed a slot outside the catalog
    #[error("question index {index} out of range (catalog has {len})")]
    QuestionOutOfRange { index: usize, len: usize },
}

/// Report pipeline failures
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Backend could not construct a document
    #[error("document backend unavailable: {0}")]
    BackendUnavailable(String),

    /// Content could not be encoded into the document
    #[error("document encoding failed: {0}")]
    Encoding(String),

    /// Finished document could not be handed to the respondent
    #[error("failed to deliver {}: {source}", .path.display())]
    Delivery {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RenderError {
    /// Check if retrying the same submission can succeed
    ///
    /// Encoding failures depend only on the content, so they repeat.
    #[inline]
    #[must_use]
    pub fn is_transient(&self) -> bool {
        !matches!(self, Self::Encoding(_))
    }

    /// Create delivery error
    #[inline]
    pub fn delivery(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Delivery {
            path: path.into(),
            source,
        }
    }
}

/// Catalog construction errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    /// No questions supplied
    #[error("catalog must contain at least one question")]
    Empty,

    /// A question has no text
    #[error("question {} has no text", .index + 1)]
    BlankQuestion { index: usize },
}

fn join_fields(fields: &[IdentityField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

// 1-based, as the respondent sees them
fn join_numbers(indices: &[usize]) -> String {
    indices
        .iter()
        .map(|i| (i + 1).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
