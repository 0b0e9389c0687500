//! Scripted terminal sessions

use maturity_cli::{Console, ConsoleError, Outcome};
use maturity_core::wizard::COMPLETION_DETAIL;
use maturity_core::{Answer, Phase, QuestionCatalog, RespondentProfile, WizardController};
use maturity_report::{MemoryDelivery, PdfBackend, ReportPipeline};
use maturity_test_utils::{
    jane_profile, memory_pipeline, numbered_catalog, FailingPublisher, RecordingSink,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;

type MemoryWizard = WizardController<ReportPipeline<PdfBackend, MemoryDelivery>, RecordingSink>;

const JANE_KEYS: &str = "y\nn\ny\ny\nn\ny\nn\ny\n";

fn wizard() -> MemoryWizard {
    WizardController::new(QuestionCatalog::reference(), memory_pipeline())
        .with_sink(RecordingSink::new())
}

fn session<P, S>(
    wizard: &mut WizardController<P, S>,
    prefill: &RespondentProfile,
    input: &str,
) -> (Result<Outcome, ConsoleError>, String)
where
    P: maturity_core::ReportPublisher,
    S: maturity_core::SubmissionSink,
{
    let mut console = Console::new(Cursor::new(input.to_string()), Vec::new());
    let result = console.run(wizard, prefill);
    let output = String::from_utf8(console.into_output()).unwrap();
    (result, output)
}

#[test]
fn typed_session_delivers_report() {
    let mut wizard = wizard();
    let input = format!("Jane\njane@co.com\n{JANE_KEYS}\n");
    let (result, output) = session(&mut wizard, &RespondentProfile::default(), &input);

    let Outcome::Submitted(completion) = result.unwrap() else {
        panic!("session was not submitted");
    };
    assert_eq!(completion.greeting(), "Thank you, Jane!");
    assert!(output.contains("Access the Free Assessment"));
    assert!(output.contains("Thank you, Jane!"));
    assert!(output.contains(COMPLETION_DETAIL));
    assert_eq!(wizard.phase(), Phase::Submitted);
    assert_eq!(wizard.publisher().delivery().len(), 1);

    assert_eq!(
        wizard.sink().forms(),
        vec![json!({
            "profile": {"name": "Jane", "email": "jane@co.com"},
            "responses": ["Yes", "No", "Yes", "Yes", "No", "Yes", "No", "Yes"],
        })]
    );
}

#[test]
fn prefilled_identity_skips_gate_prompts() {
    let mut wizard = wizard();
    let (result, output) = session(&mut wizard, &jane_profile(), &format!("{JANE_KEYS}\n"));

    assert!(matches!(result.unwrap(), Outcome::Submitted(_)));
    assert!(!output.contains("Name: "));
}

#[test]
fn blank_name_is_asked_again() {
    let mut wizard = wizard();
    let input = format!("\njane@co.com\nJane\n{JANE_KEYS}\n");
    let (result, output) = session(&mut wizard, &RespondentProfile::default(), &input);

    assert!(matches!(result.unwrap(), Outcome::Submitted(_)));
    assert!(output.contains("required field(s) missing: name"));
    // Email is kept, only the name is asked for again
    assert_eq!(output.matches("Email: ").count(), 1);
    assert_eq!(output.matches("Name: ").count(), 2);
}

#[test]
fn malformed_email_is_asked_again() {
    let mut wizard = wizard();
    let input = format!("Jane\nnot-an-address\njane@co.com\n{JANE_KEYS}\n");
    let (result, output) = session(&mut wizard, &RespondentProfile::default(), &input);

    assert!(matches!(result.unwrap(), Outcome::Submitted(_)));
    assert!(output.contains("\"not-an-address\" is not valid"));
}

#[test]
fn unrecognized_answer_is_asked_again() {
    let mut wizard = WizardController::new(numbered_catalog(2), memory_pipeline())
        .with_sink(RecordingSink::new());
    let (result, _) = session(&mut wizard, &jane_profile(), "maybe\nYES\nn\n\n");

    let Outcome::Submitted(_) = result.unwrap() else {
        panic!("session was not submitted");
    };
    assert_eq!(
        wizard.sink().forms()[0]["responses"],
        json!(["Yes", "No"])
    );
}

#[test]
fn review_can_change_an_answer() {
    let mut wizard = WizardController::new(numbered_catalog(3), memory_pipeline())
        .with_sink(RecordingSink::new());
    let (result, output) = session(&mut wizard, &jane_profile(), "n\nn\nn\n2\ny\n9\n\n");

    assert!(matches!(result.unwrap(), Outcome::Submitted(_)));
    assert!(output.contains("between 1 and 3"));
    assert_eq!(
        wizard.sink().forms()[0]["responses"],
        json!(["No", "Yes", "No"])
    );
}

#[test]
fn quitting_at_review_publishes_nothing() {
    let mut wizard = wizard();
    let (result, _) = session(&mut wizard, &jane_profile(), &format!("{JANE_KEYS}q\n"));

    assert_eq!(result.unwrap(), Outcome::Abandoned);
    assert_eq!(wizard.phase(), Phase::Assessment);
    assert!(wizard.publisher().delivery().is_empty());
    assert!(wizard.sink().forms().is_empty());
}

#[test]
fn end_of_input_abandons_session() {
    let mut wizard = wizard();
    let (result, _) = session(&mut wizard, &jane_profile(), "y\nn\n");

    assert_eq!(result.unwrap(), Outcome::Abandoned);
    let draft = wizard.state().draft().unwrap();
    assert_eq!(draft.answers().get(0), Some(Answer::Yes));
    assert_eq!(draft.answers().get(1), Some(Answer::No));
    assert_eq!(draft.answers().get(2), None);
}

#[test]
fn render_failure_offers_retry_then_gives_up() {
    let mut wizard = WizardController::new(numbered_catalog(1), FailingPublisher::default())
        .with_sink(RecordingSink::new());
    let (result, output) = session(&mut wizard, &jane_profile(), "y\n\ny\nn\n");

    let err = result.unwrap_err();
    assert!(matches!(err, ConsoleError::Wizard(ref e) if e.is_render()));
    assert!(output.contains("document backend unavailable"));
    assert_eq!(wizard.publisher().attempts(), 2);
    assert_eq!(wizard.phase(), Phase::Assessment);
}

#[test]
fn unprintable_name_is_asked_again_at_the_gate() {
    let mut wizard = wizard();
    let input = format!("\u{5F20}\u{4F1F}\njane@co.com\nJane\n{JANE_KEYS}\n");
    let (result, output) = session(&mut wizard, &RespondentProfile::default(), &input);

    assert!(matches!(result.unwrap(), Outcome::Submitted(_)));
    assert!(output.contains("name contains '\u{5F20}', which the report cannot print"));
    assert_eq!(output.matches("Name: ").count(), 2);
    assert_eq!(output.matches("Email: ").count(), 1);
}

#[test]
fn central_european_name_reaches_the_report() {
    let mut wizard = wizard();
    let input = format!("\u{160}tefan \u{17D}\u{E1}k\nstefan@co.sk\n{JANE_KEYS}\n");
    let (result, _) = session(&mut wizard, &RespondentProfile::default(), &input);

    let Outcome::Submitted(completion) = result.unwrap() else {
        panic!("session was not submitted");
    };
    assert_eq!(completion.greeting(), "Thank you, \u{160}tefan \u{17D}\u{E1}k!");
    let artifact = wizard.publisher().delivery().last().unwrap();
    assert!(artifact
        .bytes()
        .windows(br"\212tefan".len())
        .any(|w| w == br"\212tefan"));
}

#[test]
fn encoding_failure_is_not_offered_a_retry() {
    let catalog = QuestionCatalog::new("Checks", ["Ready \u{2713}?"]).unwrap();
    let mut wizard =
        WizardController::new(catalog, memory_pipeline()).with_sink(RecordingSink::new());
    let (result, output) = session(&mut wizard, &jane_profile(), "y\n\n");

    let err = result.unwrap_err();
    assert!(matches!(err, ConsoleError::Wizard(ref e) if e.is_render()));
    assert!(output.contains("document encoding failed"));
    assert!(!output.contains("Try again?"));
    assert!(wizard.publisher().delivery().is_empty());
}
