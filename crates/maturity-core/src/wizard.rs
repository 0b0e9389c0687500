//! Wizard state machine
//!
//! Three phases, one reducer. [`reduce`] is pure: it never renders, logs
//! submissions or delivers anything. For the final submit it only *decides*
//! ([`Decision::Finalize`]); the controller carries out the effects and
//! commits `Submitted` once they succeed.
//!
//! ```text
//! Gate --SubmitGate [gate ok]--> Assessment --SubmitFinal [all answered]--> Submitted
//!  ^ EditIdentity                 ^ EditAnswer(i)
//! ```

use crate::answer::{Answer, AnswerSet};
use crate::error::{ValidationError, WizardError};
use crate::gate::Gate;
use crate::profile::{IdentityField, RespondentProfile};
use crate::submission::DeliveryReceipt;
use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Body text of the completion screen
pub const COMPLETION_DETAIL: &str = "Your assessment has been submitted and downloaded.";

/// Wizard phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Gate,
    Assessment,
    Submitted,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gate => f.write_str("gate"),
            Self::Assessment => f.write_str("assessment"),
            Self::Submitted => f.write_str("submitted"),
        }
    }
}

/// Respondent actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Type into a gate field
    EditIdentity { field: IdentityField, value: String },
    /// Pick an answer for question `index`
    EditAnswer { index: usize, answer: Answer },
    /// Submit the gate form
    SubmitGate,
    /// Submit the assessment form
    SubmitFinal,
}

impl Action {
    /// Shorthand for [`Action::EditIdentity`]
    #[inline]
    pub fn edit_identity(field: IdentityField, value: impl Into<String>) -> Self {
        Self::EditIdentity {
            field,
            value: value.into(),
        }
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::EditIdentity { .. } => ActionKind::EditIdentity,
            Self::EditAnswer { .. } => ActionKind::EditAnswer,
            Self::SubmitGate => ActionKind::SubmitGate,
            Self::SubmitFinal => ActionKind::SubmitFinal,
        }
    }
}

/// Payload-free tag of an [`Action`], for errors and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ActionKind {
    EditIdentity,
    EditAnswer,
    SubmitGate,
    SubmitFinal,
}

impl Display for ActionKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::EditIdentity => "identity edit",
            Self::EditAnswer => "answer edit",
            Self::SubmitGate => "gate submit",
            Self::SubmitFinal => "final submit",
        };
        f.write_str(s)
    }
}

/// In-progress responses: identity plus one slot per question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
    profile: RespondentProfile,
    answers: AnswerSet,
}

impl Draft {
    /// Empty draft with `question_count` unanswered slots
    #[must_use]
    pub fn new(question_count: usize) -> Self {
        Self {
            profile: RespondentProfile::default(),
            answers: AnswerSet::new(question_count),
        }
    }

    #[inline]
    #[must_use]
    pub fn profile(&self) -> &RespondentProfile {
        &self.profile
    }

    #[inline]
    #[must_use]
    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }
}

/// What remains of a session after delivery
///
/// The profile and answers are dropped; only the greeting and the receipt
/// survive for the completion screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    respondent: String,
    receipt: DeliveryReceipt,
}

impl Completion {
    #[inline]
    pub fn new(respondent: impl Into<String>, receipt: DeliveryReceipt) -> Self {
        Self {
            respondent: respondent.into(),
            receipt,
        }
    }

    #[inline]
    #[must_use]
    pub fn respondent(&self) -> &str {
        &self.respondent
    }

    #[inline]
    #[must_use]
    pub fn receipt(&self) -> &DeliveryReceipt {
        &self.receipt
    }

    /// "Thank you, {name}!"
    #[must_use]
    pub fn greeting(&self) -> String {
        format!("Thank you, {}!", self.respondent)
    }
}

/// Wizard state; each phase carries only the data valid in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardState {
    Gate(Draft),
    Assessment(Draft),
    Submitted(Completion),
}

impl WizardState {
    /// Fresh session at the gate
    #[must_use]
    pub fn new(question_count: usize) -> Self {
        Self::Gate(Draft::new(question_count))
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            Self::Gate(_) => Phase::Gate,
            Self::Assessment(_) => Phase::Assessment,
            Self::Submitted(_) => Phase::Submitted,
        }
    }

    /// Responses in progress; `None` once submitted
    #[must_use]
    pub fn draft(&self) -> Option<&Draft> {
        match self {
            Self::Gate(draft) | Self::Assessment(draft) => Some(draft),
            Self::Submitted(_) => None,
        }
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        match self {
            Self::Submitted(completion) => Some(completion),
            _ => None,
        }
    }
}

/// Outcome of [`reduce`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Adopt this state
    Next(WizardState),
    /// Finalizing is allowed; run the submit effects on this draft
    Finalize(Draft),
}

/// Pure transition function
///
/// # Errors
/// - `SessionClosed` for any action after submission
/// - `OutOfPhase` for an action the current phase does not accept
/// - `Validation` when a gate or guard refuses the transition
pub fn reduce(state: &WizardState, action: Action, gate: &Gate) -> Result<Decision, WizardError> {
    match (state, action) {
        (WizardState::Submitted(_), _) => Err(WizardError::SessionClosed),

        (WizardState::Gate(draft), Action::EditIdentity { field, value }) => {
            let mut next = draft.clone();
            next.profile.set(field, value);
            Ok(Decision::Next(WizardState::Gate(next)))
        }
        (WizardState::Gate(draft), Action::SubmitGate) => {
            gate.check(&draft.profile)?;
            Ok(Decision::Next(WizardState::Assessment(draft.clone())))
        }

        (WizardState::Assessment(draft), Action::EditAnswer { index, answer }) => {
            let mut next = draft.clone();
            next.answers.set(index, answer)?;
            Ok(Decision::Next(WizardState::Assessment(next)))
        }
        (WizardState::Assessment(draft), Action::SubmitFinal) => {
            let unanswered = draft.answers.unanswered();
            if !unanswered.is_empty() {
                return Err(ValidationError::IncompleteAnswers { unanswered }.into());
            }
            Ok(Decision::Finalize(draft.clone()))
        }

        (state, action) => Err(WizardError::OutOfPhase {
            action: action.kind(),
            phase: state.phase(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::EmailPolicy;

    fn next(state: &WizardState, action: Action) -> WizardState {
        match reduce(state, action, &Gate::default()).unwrap() {
            Decision::Next(state) => state,
            Decision::Finalize(_) => panic!("unexpected finalize"),
        }
    }

    fn admitted(question_count: usize) -> WizardState {
        let state = WizardState::new(question_count);
        let state = next(&state, Action::edit_identity(IdentityField::Name, "Jane"));
        let state = next(&state, Action::edit_identity(IdentityField::Email, "jane@co.com"));
        next(&state, Action::SubmitGate)
    }

    #[test]
    fn fresh_session_starts_at_gate_with_aligned_answers() {
        let state = WizardState::new(5);
        assert_eq!(state.phase(), Phase::Gate);
        assert_eq!(state.draft().unwrap().answers().len(), 5);
    }

    #[test]
    fn gate_submit_without_identity_stays_put() {
        let state = WizardState::new(3);
        let err = reduce(&state, Action::SubmitGate, &Gate::default()).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn gate_submit_with_identity_enters_assessment() {
        let state = admitted(3);
        assert_eq!(state.phase(), Phase::Assessment);
        assert_eq!(state.draft().unwrap().profile().name, "Jane");
    }

    #[test]
    fn presence_policy_admits_unshaped_email() {
        let state = WizardState::new(1);
        let state = next(&state, Action::edit_identity(IdentityField::Name, "A"));
        let state = next(&state, Action::edit_identity(IdentityField::Email, "desk 4"));
        let decision = reduce(&state, Action::SubmitGate, &Gate::new(EmailPolicy::Presence));
        assert!(matches!(
            decision,
            Ok(Decision::Next(WizardState::Assessment(_)))
        ));
    }

    #[test]
    fn answer_edit_rejected_at_gate() {
        let state = WizardState::new(3);
        let err = reduce(
            &state,
            Action::EditAnswer {
                index: 0,
                answer: Answer::Yes,
            },
            &Gate::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            WizardError::OutOfPhase {
                action: ActionKind::EditAnswer,
                phase: Phase::Gate
            }
        ));
    }

    #[test]
    fn identity_edit_rejected_during_assessment() {
        let state = admitted(2);
        let err = reduce(
            &state,
            Action::edit_identity(IdentityField::Name, "Mallory"),
            &Gate::default(),
        )
        .unwrap_err();
        assert!(matches!(err, WizardError::OutOfPhase { .. }));
    }

    #[test]
    fn final_submit_lists_unanswered() {
        let state = admitted(3);
        let state = next(
            &state,
            Action::EditAnswer {
                index: 1,
                answer: Answer::No,
            },
        );
        let err = reduce(&state, Action::SubmitFinal, &Gate::default()).unwrap_err();
        assert!(matches!(
            err,
            WizardError::Validation(ValidationError::IncompleteAnswers { ref unanswered })
                if unanswered == &vec![0, 2]
        ));
    }

    #[test]
    fn final_submit_when_complete_decides_finalize() {
        let mut state = admitted(2);
        for index in 0..2 {
            state = next(
                &state,
                Action::EditAnswer {
                    index,
                    answer: Answer::Yes,
                },
            );
        }
        let decision = reduce(&state, Action::SubmitFinal, &Gate::default()).unwrap();
        let Decision::Finalize(draft) = decision else {
            panic!("expected finalize");
        };
        assert!(draft.answers().is_complete());
    }

    #[test]
    fn submitted_rejects_everything() {
        let receipt = DeliveryReceipt {
            filename: "r.pdf".into(),
            location: "r.pdf".into(),
            size_bytes: 1,
            fingerprint: "00".into(),
        };
        let state = WizardState::Submitted(Completion::new("Jane", receipt));
        for action in [
            Action::SubmitGate,
            Action::SubmitFinal,
            Action::edit_identity(IdentityField::Name, "x"),
            Action::EditAnswer {
                index: 0,
                answer: Answer::No,
            },
        ] {
            assert!(matches!(
                reduce(&state, action, &Gate::default()),
                Err(WizardError::SessionClosed)
            ));
        }
    }

    #[test]
    fn completion_greeting() {
        let receipt = DeliveryReceipt {
            filename: "r.pdf".into(),
            location: "r.pdf".into(),
            size_bytes: 1,
            fingerprint: "00".into(),
        };
        assert_eq!(Completion::new("Jane", receipt).greeting(), "Thank you, Jane!");
    }
}
