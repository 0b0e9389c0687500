//! Submission record and the report publishing seam

use crate::answer::{Answer, AnswerSet};
use crate::catalog::{Question, QuestionCatalog};
use crate::error::{RenderError, ValidationError};
use crate::profile::RespondentProfile;
use crate::wizard::Draft;
use serde::Serialize;
use std::path::PathBuf;

/// Everything the report needs, borrowed for the duration of one submit
///
/// Built by the controller on final submit and dropped right after the
/// report is published.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SubmissionRecord<'a> {
    pub profile: &'a RespondentProfile,
    #[serde(rename = "responses")]
    pub answers: &'a AnswerSet,
    #[serde(skip)]
    pub catalog: &'a QuestionCatalog,
}

impl<'a> SubmissionRecord<'a> {
    #[inline]
    #[must_use]
    pub fn new(catalog: &'a QuestionCatalog, draft: &'a Draft) -> Self {
        Self {
            profile: draft.profile(),
            answers: draft.answers(),
            catalog,
        }
    }

    /// Questions paired with their answers, in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&'a Question, Option<Answer>)> + 'a {
        let answers = self.answers;
        self.catalog
            .iter()
            .map(move |question| (question, answers.get(question.index())))
    }
}

/// Proof that a report reached the respondent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryReceipt {
    /// Fixed report filename
    pub filename: String,
    /// Where the document was placed
    pub location: PathBuf,
    /// Document size
    pub size_bytes: usize,
    /// Hex content hash of the document
    pub fingerprint: String,
}

/// Renders and delivers the report for a finished submission
///
/// Called synchronously from the final-submit transition. An `Err` keeps the
/// wizard in the assessment phase.
pub trait ReportPublisher {
    /// Check at the gate that the identity can appear in the report
    ///
    /// Identity fields cannot be edited after the gate, so anything the
    /// document format cannot represent has to be refused here.
    ///
    /// # Errors
    /// `ValidationError::UnprintableIdentity` for the first offending field
    fn preflight(&self, _profile: &RespondentProfile) -> Result<(), ValidationError> {
        Ok(())
    }

    /// Produce the document and hand it to the respondent
    ///
    /// # Errors
    /// `RenderError` if the document cannot be built or delivered
    fn publish(&self, record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError>;
}

impl<P: ReportPublisher + ?Sized> ReportPublisher for &P {
    fn preflight(&self, profile: &RespondentProfile) -> Result<(), ValidationError> {
        (**self).preflight(profile)
    }

    fn publish(&self, record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError> {
        (**self).publish(record)
    }
}

impl<P: ReportPublisher + ?Sized> ReportPublisher for Box<P> {
    fn preflight(&self, profile: &RespondentProfile) -> Result<(), ValidationError> {
        (**self).preflight(profile)
    }

    fn publish(&self, record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError> {
        (**self).publish(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{reduce, Action, Decision, WizardState};
    use crate::{Gate, IdentityField};

    fn complete_draft(catalog: &QuestionCatalog) -> Draft {
        let gate = Gate::default();
        let mut state = WizardState::new(catalog.len());
        let mut actions = vec![
            Action::edit_identity(IdentityField::Name, "Jane"),
            Action::edit_identity(IdentityField::Email, "jane@co.com"),
            Action::SubmitGate,
        ];
        actions.extend((0..catalog.len()).map(|index| Action::EditAnswer {
            index,
            answer: if index % 2 == 0 { Answer::Yes } else { Answer::No },
        }));
        for action in actions {
            match reduce(&state, action, &gate).unwrap() {
                Decision::Next(next) => state = next,
                Decision::Finalize(_) => unreachable!(),
            }
        }
        state.draft().unwrap().clone()
    }

    #[test]
    fn entries_follow_catalog_order() {
        let catalog = QuestionCatalog::new("t", ["a?", "b?", "c?"]).unwrap();
        let draft = complete_draft(&catalog);
        let record = SubmissionRecord::new(&catalog, &draft);
        let entries: Vec<_> = record
            .entries()
            .map(|(q, a)| (q.text().to_string(), a))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("a?".to_string(), Some(Answer::Yes)),
                ("b?".to_string(), Some(Answer::No)),
                ("c?".to_string(), Some(Answer::Yes)),
            ]
        );
    }

    #[test]
    fn record_serializes_like_the_submitted_form() {
        let catalog = QuestionCatalog::new("t", ["a?", "b?"]).unwrap();
        let draft = complete_draft(&catalog);
        let record = SubmissionRecord::new(&catalog, &draft);
        let json = serde_json::to_value(record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "profile": { "name": "Jane", "email": "jane@co.com" },
                "responses": ["Yes", "No"],
            })
        );
    }
}
