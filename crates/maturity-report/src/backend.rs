//! Document backend capability
//!
//! The renderer only needs three operations from a document format: create a
//! page, write positioned text, and finish into bytes.

use maturity_core::RenderError;

/// Factory for document surfaces
pub trait DocumentBackend {
    type Surface: DocumentSurface;

    /// Start a new, empty document
    ///
    /// # Errors
    /// `RenderError::BackendUnavailable` if the document cannot be constructed
    fn create_document(&self) -> Result<Self::Surface, RenderError>;

    /// First character of `text` the surface would refuse to write
    fn unsupported_char(&self, _text: &str) -> Option<char> {
        None
    }
}

/// A document being written
pub trait DocumentSurface {
    /// Place `content` with its baseline-left at (`x`, `y`) millimetres from
    /// the top-left corner
    ///
    /// # Errors
    /// `RenderError::Encoding` if the content cannot be represented
    fn write_text(&mut self, content: &str, x: f64, y: f64, font_size: f64)
        -> Result<(), RenderError>;

    /// Serialize the finished document
    ///
    /// # Errors
    /// `RenderError` if the document cannot be finalized
    fn finish(self) -> Result<Vec<u8>, RenderError>
    where
        Self: Sized;
}

impl<B: DocumentBackend + ?Sized> DocumentBackend for &B {
    type Surface = B::Surface;

    fn create_document(&self) -> Result<Self::Surface, RenderError> {
        (**self).create_document()
    }

    fn unsupported_char(&self, text: &str) -> Option<char> {
        (**self).unsupported_char(text)
    }
}
