//! Report renderer
//!
//! Pure function of the submission record: lay out, write every line to a
//! fresh document, finish. Any backend failure aborts the render.

use crate::artifact::DocumentArtifact;
use crate::backend::{DocumentBackend, DocumentSurface};
use crate::layout::ReportLayout;
use maturity_core::{RenderError, SubmissionRecord};

/// Lays out a submission and writes it through a document backend
#[derive(Debug, Clone)]
pub struct ReportRenderer<B> {
    backend: B,
    layout: ReportLayout,
}

impl<B: DocumentBackend> ReportRenderer<B> {
    #[inline]
    pub fn new(backend: B, layout: ReportLayout) -> Self {
        Self { backend, layout }
    }

    #[inline]
    #[must_use]
    pub fn layout(&self) -> &ReportLayout {
        &self.layout
    }

    #[inline]
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Render the report document
    ///
    /// # Errors
    /// `RenderError` if the backend cannot create, write or finish the
    /// document. Nothing is truncated: the first failing line aborts.
    pub fn render(&self, record: &SubmissionRecord<'_>) -> Result<DocumentArtifact, RenderError> {
        let lines = self.layout.compose(record);

        let overflow = self.layout.overflow_count(&lines);
        if overflow > 0 {
            tracing::warn!(
                overflow,
                questions = record.catalog.len(),
                "Report runs past the page; {} line(s) fall below the bottom edge",
                overflow
            );
        }

        let mut surface = self.backend.create_document()?;
        for line in &lines {
            surface.write_text(&line.content, line.x, line.y, line.font_size)?;
        }
        let bytes = surface.finish()?;

        tracing::debug!(lines = lines.len(), bytes = bytes.len(), "Rendered report");
        Ok(DocumentArtifact::new(self.layout.filename.clone(), bytes, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::PdfBackend;
    use maturity_core::{AnswerSet, QuestionCatalog, RespondentProfile};

    #[derive(Debug)]
    struct BrokenBackend;

    impl DocumentBackend for BrokenBackend {
        type Surface = crate::pdf::PdfPage;

        fn create_document(&self) -> Result<Self::Surface, RenderError> {
            Err(RenderError::BackendUnavailable("renderer offline".into()))
        }
    }

    fn with_record<T>(name: &str, f: impl FnOnce(&SubmissionRecord<'_>) -> T) -> T {
        let catalog = QuestionCatalog::new("t", ["One?", "Two?"]).unwrap();
        let profile = RespondentProfile::new(name, "a@b.co");
        let answers = AnswerSet::for_catalog(&catalog);
        f(&SubmissionRecord {
            profile: &profile,
            answers: &answers,
            catalog: &catalog,
        })
    }

    #[test]
    fn missing_backend_is_an_error() {
        let renderer = ReportRenderer::new(BrokenBackend, ReportLayout::default());
        let err = with_record("A", |r| renderer.render(r)).unwrap_err();
        assert!(matches!(err, RenderError::BackendUnavailable(_)));
    }

    #[test]
    fn encoding_failure_aborts_render() {
        let renderer = ReportRenderer::new(PdfBackend::a4(), ReportLayout::default());
        let err = with_record("名前", |r| renderer.render(r)).unwrap_err();
        assert!(matches!(err, RenderError::Encoding(_)));
    }

    #[test]
    fn artifact_uses_layout_filename() {
        let layout = ReportLayout::default().with_filename("custom.pdf");
        let renderer = ReportRenderer::new(PdfBackend::a4(), layout);
        let artifact = with_record("A", |r| renderer.render(r)).unwrap();
        assert_eq!(artifact.filename(), "custom.pdf");
        assert_eq!(artifact.lines().len(), 7);
        assert!(artifact.verify());
    }
}
