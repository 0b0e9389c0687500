//! Observers notified with the finalized form
//!
//! Fire-and-forget: a sink has no way to fail the submit.

use crate::submission::SubmissionRecord;

/// Receives the finalized form before the report is rendered
pub trait SubmissionSink {
    fn on_submit(&self, record: &SubmissionRecord<'_>);
}

/// Logs the submitted form as JSON at `info`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl SubmissionSink for TracingSink {
    fn on_submit(&self, record: &SubmissionRecord<'_>) {
        match serde_json::to_string(record) {
            Ok(form) => tracing::info!(
                target: "maturity::submission",
                %form,
                answered = record.answers.answered_count(),
                "Submitted form"
            ),
            Err(e) => tracing::warn!("Could not encode submitted form: {}", e),
        }
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl SubmissionSink for NoopSink {
    fn on_submit(&self, _record: &SubmissionRecord<'_>) {}
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for &S {
    fn on_submit(&self, record: &SubmissionRecord<'_>) {
        (**self).on_submit(record);
    }
}

impl<S: SubmissionSink + ?Sized> SubmissionSink for Box<S> {
    fn on_submit(&self, record: &SubmissionRecord<'_>) {
        (**self).on_submit(record);
    }
}
