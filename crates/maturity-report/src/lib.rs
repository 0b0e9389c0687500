//! Maturity Report
//!
//! Turns a finished submission into a paginated document and hands it to the
//! respondent.
//!
//! # Core Concepts
//!
//! - [`ReportLayout`]: fixed positions and font sizes of every line
//! - [`DocumentBackend`]: `create_document` / `write_text` / `finish` capability
//! - [`PdfBackend`]: dependency-free single-page PDF writer
//! - [`DocumentArtifact`]: finished bytes plus the laid-out lines and a [`ContentHash`]
//! - [`Delivery`]: places an artifact where the respondent can retrieve it
//! - [`ReportPipeline`]: render + deliver, plugged into the wizard as a
//!   [`maturity_core::ReportPublisher`]
//!
//! # Example
//!
//! ```rust,ignore
//! use maturity_report::ReportPipeline;
//!
//! let pipeline = ReportPipeline::pdf_to_directory(ReportLayout::default(), "./reports");
//! let mut wizard = WizardController::new(QuestionCatalog::reference(), pipeline);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod artifact;
mod backend;
mod delivery;
mod hash;
mod layout;
mod pdf;
mod pipeline;
mod renderer;

// Re-exports
pub use artifact::DocumentArtifact;
pub use backend::{DocumentBackend, DocumentSurface};
pub use delivery::{Delivery, DirectoryDelivery, MemoryDelivery};
pub use hash::ContentHash;
pub use layout::{ReportLayout, TextLine, REPORT_FILENAME, REPORT_TITLE};
pub use pdf::{PdfBackend, PdfPage};
pub use pipeline::ReportPipeline;
pub use renderer::ReportRenderer;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
