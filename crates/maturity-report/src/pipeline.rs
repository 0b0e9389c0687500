//! Render-then-deliver pipeline plugged into the wizard

use crate::backend::DocumentBackend;
use crate::delivery::{Delivery, DirectoryDelivery};
use crate::layout::ReportLayout;
use crate::pdf::PdfBackend;
use crate::renderer::ReportRenderer;
use maturity_core::{
    DeliveryReceipt, IdentityField, RenderError, ReportPublisher, RespondentProfile,
    SubmissionRecord, ValidationError,
};
use std::path::PathBuf;

/// [`ReportPublisher`] that renders with `B` and delivers with `D`
#[derive(Debug, Clone)]
pub struct ReportPipeline<B, D> {
    renderer: ReportRenderer<B>,
    delivery: D,
}

impl<B: DocumentBackend, D: Delivery> ReportPipeline<B, D> {
    #[inline]
    pub fn new(renderer: ReportRenderer<B>, delivery: D) -> Self {
        Self { renderer, delivery }
    }

    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &ReportRenderer<B> {
        &self.renderer
    }

    #[inline]
    #[must_use]
    pub fn delivery(&self) -> &D {
        &self.delivery
    }
}

impl ReportPipeline<PdfBackend, DirectoryDelivery> {
    /// PDF report saved into `dir`, page size taken from `layout`
    pub fn pdf_to_directory(layout: ReportLayout, dir: impl Into<PathBuf>) -> Self {
        let backend = PdfBackend::new(layout.page_width, layout.page_height);
        Self::new(ReportRenderer::new(backend, layout), DirectoryDelivery::new(dir))
    }
}

impl<B: DocumentBackend, D: Delivery> ReportPublisher for ReportPipeline<B, D> {
    fn preflight(&self, profile: &RespondentProfile) -> Result<(), ValidationError> {
        let backend = self.renderer.backend();
        for field in IdentityField::ALL {
            if let Some(character) = backend.unsupported_char(profile.field(field)) {
                return Err(ValidationError::UnprintableIdentity { field, character });
            }
        }
        Ok(())
    }

    fn publish(&self, record: &SubmissionRecord<'_>) -> Result<DeliveryReceipt, RenderError> {
        let artifact = self.renderer.render(record)?;
        self.delivery.deliver(&artifact)
    }
}
