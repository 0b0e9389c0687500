//! Line-oriented wizard console
//!
//! Renders each phase as prompts on a writer and turns input lines into
//! wizard actions. Generic over reader and writer so sessions can be
//! scripted in tests.

use maturity_core::gate::{GATE_HEADING, GATE_PROMPT};
use maturity_core::wizard::COMPLETION_DETAIL;
use maturity_core::{
    Action, Answer, Completion, IdentityField, ReportPublisher, RespondentProfile, SubmissionSink,
    ValidationError, WizardController, WizardError,
};
use std::io::{BufRead, Write};

/// How an interactive session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Report delivered
    Submitted(Completion),
    /// Respondent quit or input ended before submitting
    Abandoned,
}

/// Console errors
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Interactive front end over any reader/writer pair
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Walk the respondent through gate, assessment and submission
    ///
    /// Non-empty fields of `prefill` are used instead of prompting, once.
    ///
    /// # Errors
    /// - `Io` if the terminal fails
    /// - `Wizard` if the report cannot be produced and either the failure
    ///   would repeat or the respondent declines to retry
    pub fn run<P, S>(
        &mut self,
        wizard: &mut WizardController<P, S>,
        prefill: &RespondentProfile,
    ) -> Result<Outcome, ConsoleError>
    where
        P: ReportPublisher,
        S: SubmissionSink,
    {
        if !self.gate(wizard, prefill)? || !self.assessment(wizard)? {
            return Ok(Outcome::Abandoned);
        }

        let completion = loop {
            let submitted = wizard
                .dispatch(Action::SubmitFinal)
                .map(|_| wizard.state().completion().cloned());
            match submitted {
                Ok(Some(completion)) => break completion,
                Ok(None) => return Ok(Outcome::Abandoned),
                Err(WizardError::Validation(ValidationError::IncompleteAnswers { unanswered })) => {
                    writeln!(self.output, "  ! Please answer every question.")?;
                    for index in unanswered {
                        if !self.ask_question(wizard, index)? {
                            return Ok(Outcome::Abandoned);
                        }
                    }
                }
                Err(WizardError::Render(err)) if !err.is_transient() => {
                    writeln!(self.output, "  ! {err}")?;
                    return Err(WizardError::Render(err).into());
                }
                Err(e @ WizardError::Render(_)) => {
                    writeln!(self.output, "  ! {e}")?;
                    let retry = self.prompt("Try again? [y/n]: ")?;
                    if !matches!(retry.as_deref().map(str::parse::<Answer>), Some(Ok(Answer::Yes))) {
                        return Err(e.into());
                    }
                }
                Err(e) => return Err(e.into()),
            }
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}", completion.greeting())?;
        writeln!(self.output, "{COMPLETION_DETAIL}")?;
        writeln!(
            self.output,
            "Report saved to {}",
            completion.receipt().location.display()
        )?;
        Ok(Outcome::Submitted(completion))
    }

    fn gate<P: ReportPublisher, S: SubmissionSink>(
        &mut self,
        wizard: &mut WizardController<P, S>,
        prefill: &RespondentProfile,
    ) -> Result<bool, ConsoleError> {
        writeln!(self.output, "{GATE_HEADING}")?;
        writeln!(self.output, "{GATE_PROMPT}")?;

        let mut prefill = prefill.clone();
        let mut pending = IdentityField::ALL.to_vec();
        loop {
            for field in pending {
                let preset = prefill.field(field).trim().to_string();
                let value = if preset.is_empty() {
                    match self.prompt(&format!("{}: ", field.label()))? {
                        Some(value) => value,
                        None => return Ok(false),
                    }
                } else {
                    preset
                };
                wizard.dispatch(Action::edit_identity(field, value))?;
            }
            prefill = RespondentProfile::default();

            match wizard.dispatch(Action::SubmitGate) {
                Ok(_) => return Ok(true),
                Err(WizardError::Validation(err)) => {
                    writeln!(self.output, "  ! {err}")?;
                    pending = match err {
                        ValidationError::IncompleteIdentity { missing } => missing,
                        ValidationError::MalformedEmail { .. } => vec![IdentityField::Email],
                        ValidationError::UnprintableIdentity { field, .. } => vec![field],
                        _ => IdentityField::ALL.to_vec(),
                    };
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn assessment<P: ReportPublisher, S: SubmissionSink>(
        &mut self,
        wizard: &mut WizardController<P, S>,
    ) -> Result<bool, ConsoleError> {
        writeln!(self.output)?;
        writeln!(self.output, "{}", wizard.catalog().title())?;
        for index in 0..wizard.catalog().len() {
            if !self.ask_question(wizard, index)? {
                return Ok(false);
            }
        }
        self.review(wizard)
    }

    fn ask_question<P: ReportPublisher, S: SubmissionSink>(
        &mut self,
        wizard: &mut WizardController<P, S>,
        index: usize,
    ) -> Result<bool, ConsoleError> {
        let Some(question) = wizard.catalog().get(index).cloned() else {
            return Ok(true);
        };
        writeln!(self.output)?;
        writeln!(self.output, "{}. {}", question.number(), question.text())?;
        loop {
            let Some(input) = self.prompt("   [y]es / [n]o: ")? else {
                return Ok(false);
            };
            match input.parse::<Answer>() {
                Ok(answer) => {
                    wizard.dispatch(Action::EditAnswer { index, answer })?;
                    return Ok(true);
                }
                Err(e) => writeln!(self.output, "  ! {e}")?,
            }
        }
    }

    // Summary with a chance to change answers before submitting
    fn review<P: ReportPublisher, S: SubmissionSink>(
        &mut self,
        wizard: &mut WizardController<P, S>,
    ) -> Result<bool, ConsoleError> {
        let count = wizard.catalog().len();
        loop {
            writeln!(self.output)?;
            writeln!(self.output, "Your answers:")?;
            if let Some(draft) = wizard.state().draft() {
                for question in wizard.catalog() {
                    writeln!(
                        self.output,
                        "  {:>2}. {}",
                        question.number(),
                        draft.answers().label(question.index())
                    )?;
                }
            }

            let Some(input) = self.prompt(
                "Press Enter to submit & download the report, a question number to change it, or q to quit: ",
            )?
            else {
                return Ok(false);
            };
            match input.to_ascii_lowercase().as_str() {
                "" | "s" | "submit" => return Ok(true),
                "q" | "quit" => return Ok(false),
                other => match other.parse::<usize>() {
                    Ok(number) if (1..=count).contains(&number) => {
                        if !self.ask_question(wizard, number - 1)? {
                            return Ok(false);
                        }
                    }
                    _ => writeln!(
                        self.output,
                        "  ! enter a question number between 1 and {count}"
                    )?,
                },
            }
        }
    }

    /// `None` at end of input
    fn prompt(&mut self, label: &str) -> Result<Option<String>, ConsoleError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}
