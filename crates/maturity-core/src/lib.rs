//! Maturity Core - gated assessment wizard
//!
//! The part of the assessment that carries real logic:
//! - A fixed, ordered question catalog
//! - An identity gate in front of the assessment form
//! - A pure reducer sequencing `Gate -> Assessment -> Submitted`
//! - A controller that performs the final-submit effects (log, render, deliver)
//!
//! # Example
//!
//! ```rust,ignore
//! use maturity_core::prelude::*;
//!
//! let mut wizard = WizardController::new(QuestionCatalog::reference(), publisher);
//! wizard.dispatch(Action::edit_identity(IdentityField::Name, "Jane"))?;
//! wizard.dispatch(Action::edit_identity(IdentityField::Email, "jane@co.com"))?;
//! wizard.dispatch(Action::SubmitGate)?;
//!
//! for index in 0..wizard.catalog().len() {
//!     wizard.dispatch(Action::EditAnswer { index, answer: Answer::Yes })?;
//! }
//! let phase = wizard.dispatch(Action::SubmitFinal)?;
//! assert_eq!(phase, Phase::Submitted);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod answer;
pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod gate;
pub mod profile;
pub mod sink;
pub mod submission;
pub mod wizard;

// Re-exports for convenience
pub use answer::{Answer, AnswerSet, ParseAnswerError, UNANSWERED_LABEL};
pub use catalog::{Question, QuestionCatalog, REFERENCE_QUESTIONS};
pub use config::{CatalogConfig, GateConfig};
pub use controller::WizardController;
pub use error::{CatalogError, RenderError, ValidationError, WizardError};
pub use gate::{admit, missing_fields, EmailPolicy, Gate};
pub use profile::{IdentityField, RespondentProfile};
pub use sink::{NoopSink, SubmissionSink, TracingSink};
pub use submission::{DeliveryReceipt, ReportPublisher, SubmissionRecord};
pub use wizard::{reduce, Action, ActionKind, Completion, Decision, Draft, Phase, WizardState};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the wizard
    pub use crate::{
        Action, Answer, AnswerSet, Gate, IdentityField, Phase, QuestionCatalog, ReportPublisher,
        RespondentProfile, SubmissionRecord, SubmissionSink, WizardController, WizardError,
        WizardState,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
