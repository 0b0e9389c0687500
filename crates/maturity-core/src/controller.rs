//! Wizard controller
//!
//! Owns one session: the catalog, the gate, the current [`WizardState`], and
//! the injected report publisher and submission sink. Every respondent
//! action goes through [`WizardController::dispatch`].

use crate::catalog::QuestionCatalog;
use crate::error::WizardError;
use crate::gate::Gate;
use crate::sink::{SubmissionSink, TracingSink};
use crate::submission::{ReportPublisher, SubmissionRecord};
use crate::wizard::{reduce, Action, ActionKind, Completion, Decision, Draft, Phase, WizardState};
use uuid::Uuid;

/// Single-session wizard driver
///
/// # Invariants
/// - `Submitted` is only committed after the publisher returned a receipt
/// - A failed action leaves `state` exactly as it was
#[derive(Debug)]
pub struct WizardController<P, S = TracingSink> {
    session_id: Uuid,
    catalog: QuestionCatalog,
    gate: Gate,
    state: WizardState,
    publisher: P,
    sink: S,
}

impl<P: ReportPublisher> WizardController<P, TracingSink> {
    /// New session at the gate, logging submissions through `tracing`
    pub fn new(catalog: QuestionCatalog, publisher: P) -> Self {
        let state = WizardState::new(catalog.len());
        Self {
            session_id: Uuid::new_v4(),
            catalog,
            gate: Gate::default(),
            state,
            publisher,
            sink: TracingSink,
        }
    }
}

impl<P: ReportPublisher, S: SubmissionSink> WizardController<P, S> {
    /// Swap the submission sink
    #[must_use]
    pub fn with_sink<S2: SubmissionSink>(self, sink: S2) -> WizardController<P, S2> {
        WizardController {
            session_id: self.session_id,
            catalog: self.catalog,
            gate: self.gate,
            state: self.state,
            publisher: self.publisher,
            sink,
        }
    }

    /// With gate policy
    #[inline]
    #[must_use]
    pub fn with_gate(mut self, gate: Gate) -> Self {
        self.gate = gate;
        self
    }

    #[inline]
    #[must_use]
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    #[inline]
    #[must_use]
    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    #[inline]
    #[must_use]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Apply one respondent action
    ///
    /// # Returns
    /// The phase after the action
    ///
    /// # Errors
    /// Whatever [`reduce`] refuses, whatever the publisher's preflight
    /// refuses on gate submit, plus `Render` if the report could not be
    /// published on final submit. The state is unchanged on every error.
    pub fn dispatch(&mut self, action: Action) -> Result<Phase, WizardError> {
        let span = tracing::info_span!("session", id = %self.session_id);
        let _enter = span.enter();

        let kind = action.kind();
        let from = self.state.phase();
        let decision = reduce(&self.state, action, &self.gate).map_err(|e| {
            tracing::debug!(action = %kind, phase = %from, "Action refused: {}", e);
            e
        })?;

        match decision {
            Decision::Next(next) => {
                if let (ActionKind::SubmitGate, Some(draft)) = (kind, next.draft()) {
                    self.publisher.preflight(draft.profile()).map_err(|e| {
                        tracing::debug!("Identity refused by report preflight: {}", e);
                        WizardError::from(e)
                    })?;
                }
                self.state = next;
            }
            Decision::Finalize(draft) => {
                let completion = self.finalize(&draft)?;
                self.state = WizardState::Submitted(completion);
            }
        }

        let to = self.state.phase();
        if from != to {
            tracing::info!("Phase {} -> {}", from, to);
        }
        Ok(to)
    }

    /// Discard this session and start a new one at the gate
    pub fn restart(&mut self) {
        self.session_id = Uuid::new_v4();
        self.state = WizardState::new(self.catalog.len());
        tracing::info!(id = %self.session_id, "Started new session");
    }

    fn finalize(&self, draft: &Draft) -> Result<Completion, WizardError> {
        let record = SubmissionRecord::new(&self.catalog, draft);
        self.sink.on_submit(&record);

        let receipt = self.publisher.publish(&record).map_err(|e| {
            tracing::error!("Report publishing failed: {}", e);
            e
        })?;
        tracing::info!(
            location = %receipt.location.display(),
            fingerprint = %receipt.fingerprint,
            "Report delivered"
        );

        Ok(Completion::new(draft.profile().name.trim(), receipt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answer::Answer;
    use crate::error::{RenderError, ValidationError};
    use crate::profile::IdentityField;
    use crate::sink::NoopSink;
    use crate::submission::DeliveryReceipt;
    use std::cell::Cell;

    #[derive(Debug, Default)]
    struct CountingPublisher {
        calls: Cell<usize>,
        fail: bool,
    }

    impl ReportPublisher for CountingPublisher {
        // Stands in for a document format without non-ASCII support
        fn preflight(&self, profile: &crate::RespondentProfile) -> Result<(), ValidationError> {
            match profile.name.chars().find(|c| !c.is_ascii()) {
                Some(character) => Err(ValidationError::UnprintableIdentity {
                    field: IdentityField::Name,
                    character,
                }),
                None => Ok(()),
            }
        }

        fn publish(&self, record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                return Err(RenderError::BackendUnavailable("no backend".into()));
            }
            Ok(DeliveryReceipt {
                filename: "report.pdf".into(),
                location: "report.pdf".into(),
                size_bytes: record.catalog.len(),
                fingerprint: "abc".into(),
            })
        }
    }

    fn controller(fail: bool) -> WizardController<CountingPublisher, NoopSink> {
        let catalog = QuestionCatalog::new("t", ["a?", "b?"]).unwrap();
        WizardController::new(
            catalog,
            CountingPublisher {
                fail,
                ..Default::default()
            },
        )
        .with_sink(NoopSink)
    }

    fn to_assessment(wizard: &mut WizardController<CountingPublisher, NoopSink>) {
        wizard
            .dispatch(Action::edit_identity(IdentityField::Name, " Jane "))
            .unwrap();
        wizard
            .dispatch(Action::edit_identity(IdentityField::Email, "jane@co.com"))
            .unwrap();
        assert_eq!(wizard.dispatch(Action::SubmitGate).unwrap(), Phase::Assessment);
    }

    fn answer_all(wizard: &mut WizardController<CountingPublisher, NoopSink>) {
        for index in 0..wizard.catalog().len() {
            wizard
                .dispatch(Action::EditAnswer {
                    index,
                    answer: Answer::Yes,
                })
                .unwrap();
        }
    }

    #[test]
    fn full_flow_publishes_once_and_closes() {
        let mut wizard = controller(false);
        to_assessment(&mut wizard);
        answer_all(&mut wizard);

        assert_eq!(wizard.dispatch(Action::SubmitFinal).unwrap(), Phase::Submitted);
        assert_eq!(wizard.publisher().calls.get(), 1);

        let completion = wizard.state().completion().unwrap();
        assert_eq!(completion.greeting(), "Thank you, Jane!");
        assert!(wizard.state().draft().is_none());
    }

    #[test]
    fn incomplete_final_submit_never_publishes() {
        let mut wizard = controller(false);
        to_assessment(&mut wizard);
        let err = wizard.dispatch(Action::SubmitFinal).unwrap_err();
        assert!(matches!(
            err,
            WizardError::Validation(ValidationError::IncompleteAnswers { .. })
        ));
        assert_eq!(wizard.publisher().calls.get(), 0);
        assert_eq!(wizard.phase(), Phase::Assessment);
    }

    #[test]
    fn publish_failure_keeps_answers() {
        let mut wizard = controller(true);
        to_assessment(&mut wizard);
        answer_all(&mut wizard);
        let before = wizard.state().clone();

        let err = wizard.dispatch(Action::SubmitFinal).unwrap_err();
        assert!(err.is_render());
        assert_eq!(wizard.state(), &before);
        assert_eq!(wizard.phase(), Phase::Assessment);
    }

    #[test]
    fn preflight_refusal_keeps_respondent_at_gate() {
        let mut wizard = controller(false);
        wizard
            .dispatch(Action::edit_identity(IdentityField::Name, "Zo\u{eb}"))
            .unwrap();
        wizard
            .dispatch(Action::edit_identity(IdentityField::Email, "zoe@co.com"))
            .unwrap();

        let err = wizard.dispatch(Action::SubmitGate).unwrap_err();
        assert_eq!(
            err.to_string(),
            "name contains '\u{eb}', which the report cannot print"
        );
        assert_eq!(wizard.phase(), Phase::Gate);

        // The field stays editable, so the respondent can fix it
        wizard
            .dispatch(Action::edit_identity(IdentityField::Name, "Zoe"))
            .unwrap();
        assert_eq!(wizard.dispatch(Action::SubmitGate).unwrap(), Phase::Assessment);
    }

    #[test]
    fn restart_begins_empty_session() {
        let mut wizard = controller(false);
        to_assessment(&mut wizard);
        let old_id = wizard.session_id();

        wizard.restart();
        assert_ne!(wizard.session_id(), old_id);
        assert_eq!(wizard.phase(), Phase::Gate);
        assert_eq!(
            wizard.state().draft().unwrap().profile(),
            &crate::RespondentProfile::default()
        );
    }
}
