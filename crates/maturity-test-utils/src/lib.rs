//! Testing utilities for the maturity workspace
//!
//! Shared fixtures, recording sinks and failing publishers.

#![allow(missing_docs)]

use maturity_core::{
    Action, Answer, DeliveryReceipt, IdentityField, QuestionCatalog, RenderError, ReportPublisher,
    RespondentProfile, SubmissionRecord, SubmissionSink,
};
use maturity_report::{MemoryDelivery, PdfBackend, ReportLayout, ReportPipeline, ReportRenderer};
use parking_lot::Mutex;

/// Answers of the reference "Jane" submission
pub const JANE_ANSWERS: [Answer; 8] = [
    Answer::Yes,
    Answer::No,
    Answer::Yes,
    Answer::Yes,
    Answer::No,
    Answer::Yes,
    Answer::No,
    Answer::Yes,
];

pub fn jane_profile() -> RespondentProfile {
    RespondentProfile::new("Jane", "jane@co.com")
}

/// Actions that take a fresh reference session from the gate to `Submitted`
pub fn jane_actions() -> Vec<Action> {
    let mut actions = vec![
        Action::edit_identity(IdentityField::Name, "Jane"),
        Action::edit_identity(IdentityField::Email, "jane@co.com"),
        Action::SubmitGate,
    ];
    actions.extend(
        JANE_ANSWERS
            .into_iter()
            .enumerate()
            .map(|(index, answer)| Action::EditAnswer { index, answer }),
    );
    actions.push(Action::SubmitFinal);
    actions
}

/// Catalog of `n` numbered questions
pub fn numbered_catalog(n: usize) -> QuestionCatalog {
    QuestionCatalog::new("Test Assessment", (1..=n).map(|i| format!("Question {i}?")))
        .expect("n must be at least 1")
}

/// PDF pipeline that keeps delivered artifacts in memory
pub fn memory_pipeline() -> ReportPipeline<PdfBackend, MemoryDelivery> {
    ReportPipeline::new(
        ReportRenderer::new(PdfBackend::a4(), ReportLayout::default()),
        MemoryDelivery::new(),
    )
}

/// Sink that keeps every submitted form as JSON
#[derive(Debug, Default)]
pub struct RecordingSink {
    forms: Mutex<Vec<serde_json::Value>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forms(&self) -> Vec<serde_json::Value> {
        self.forms.lock().clone()
    }
}

impl SubmissionSink for RecordingSink {
    fn on_submit(&self, record: &SubmissionRecord<'_>) {
        let form = serde_json::to_value(record).expect("submission record serializes");
        self.forms.lock().push(form);
    }
}

/// Publisher whose backend is always unavailable
#[derive(Debug, Default)]
pub struct FailingPublisher {
    attempts: Mutex<usize>,
}

impl FailingPublisher {
    pub fn attempts(&self) -> usize {
        *self.attempts.lock()
    }
}

impl ReportPublisher for FailingPublisher {
    fn publish(&self, _record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError> {
        *self.attempts.lock() += 1;
        Err(RenderError::BackendUnavailable(
            "document backend offline".to_string(),
        ))
    }
}
