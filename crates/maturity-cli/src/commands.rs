//! Subcommand implementations

use crate::config::{AppConfig, ConfigError};
use crate::console::{Console, Outcome};
use anyhow::Context;
use maturity_core::{
    Action, ActionKind, Answer, Completion, IdentityField, QuestionCatalog, ReportPublisher,
    RespondentProfile, SubmissionSink, WizardController, WizardError, WizardState,
};
use maturity_report::{DirectoryDelivery, PdfBackend, ReportPipeline};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};
use std::path::Path;

/// Controller that renders PDFs into the configured output directory
pub type DirectoryWizard = WizardController<ReportPipeline<PdfBackend, DirectoryDelivery>>;

/// Pre-filled submission read by `render`
///
/// ```json
/// {"name": "Jane", "email": "jane@co.com", "answers": ["yes", "no", null]}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionFile {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub answers: Vec<Option<Answer>>,
}

/// Build a controller from configuration
///
/// # Errors
/// `ConfigError::Catalog` if the configured catalog is unusable
pub fn build_wizard(config: &AppConfig) -> Result<DirectoryWizard, ConfigError> {
    let catalog = config.catalog()?;
    let pipeline = ReportPipeline::pdf_to_directory(config.report.clone(), &config.output_dir);
    Ok(WizardController::new(catalog, pipeline).with_gate(config.gate()))
}

/// Interactive session on the given terminal streams
///
/// # Errors
/// Configuration, terminal and unrecovered report failures
pub fn run_interactive<R: BufRead, W: Write>(
    config: &AppConfig,
    prefill: &RespondentProfile,
    input: R,
    output: W,
) -> anyhow::Result<Outcome> {
    let mut wizard = build_wizard(config)?;
    let mut console = Console::new(input, output);
    let outcome = console.run(&mut wizard, prefill)?;
    if outcome == Outcome::Abandoned {
        tracing::info!(session = %wizard.session_id(), phase = %wizard.phase(), "Session abandoned");
    }
    Ok(outcome)
}

/// Drive `submission` through the wizard as if it had been typed in
///
/// Every guard applies: missing identity, malformed email, unanswered
/// questions and extra answers are all refused.
///
/// # Errors
/// `WizardError` from the first refused action or the report pipeline
pub fn replay<P, S>(
    wizard: &mut WizardController<P, S>,
    submission: &SubmissionFile,
) -> Result<Completion, WizardError>
where
    P: ReportPublisher,
    S: SubmissionSink,
{
    wizard.dispatch(Action::edit_identity(IdentityField::Name, &submission.name))?;
    wizard.dispatch(Action::edit_identity(IdentityField::Email, &submission.email))?;
    wizard.dispatch(Action::SubmitGate)?;

    for (index, answer) in submission.answers.iter().enumerate() {
        if let Some(answer) = *answer {
            wizard.dispatch(Action::EditAnswer { index, answer })?;
        }
    }
    wizard.dispatch(Action::SubmitFinal)?;

    match wizard.state() {
        WizardState::Submitted(completion) => Ok(completion.clone()),
        other => Err(WizardError::OutOfPhase {
            action: ActionKind::SubmitFinal,
            phase: other.phase(),
        }),
    }
}

/// Read a submission file
///
/// # Errors
/// If the file cannot be read or is not a valid submission
pub fn load_submission(path: &Path) -> anyhow::Result<SubmissionFile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read submission {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("invalid submission {}", path.display()))
}

/// Render the report for a submission file without prompting
///
/// # Errors
/// Configuration, input and wizard failures
pub fn render_file(config: &AppConfig, path: &Path) -> anyhow::Result<Completion> {
    let submission = load_submission(path)?;
    let mut wizard = build_wizard(config)?;
    let completion = replay(&mut wizard, &submission)
        .with_context(|| format!("submission {} was refused", path.display()))?;
    Ok(completion)
}

/// Print the catalog as numbered text or JSON
///
/// # Errors
/// If writing fails
pub fn write_catalog<W: Write>(
    catalog: &QuestionCatalog,
    json: bool,
    mut out: W,
) -> anyhow::Result<()> {
    if json {
        serde_json::to_writer_pretty(&mut out, catalog)?;
        writeln!(out)?;
        return Ok(());
    }

    writeln!(out, "{}", catalog.title())?;
    writeln!(out)?;
    for question in catalog {
        writeln!(out, "{}. {}", question.number(), question.text())?;
    }
    Ok(())
}
