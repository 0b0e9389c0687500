//! Rendered report document

use crate::hash::ContentHash;
use crate::layout::TextLine;

/// A finished document, ready for delivery
///
/// # Invariants
/// - `hash` is always `ContentHash::compute(&bytes)`
/// - Immutable after construction
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentArtifact {
    filename: String,
    bytes: Vec<u8>,
    lines: Vec<TextLine>,
    hash: ContentHash,
}

impl DocumentArtifact {
    /// Wrap rendered bytes, computing the content hash
    #[must_use]
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>, lines: Vec<TextLine>) -> Self {
        let hash = ContentHash::compute(&bytes);
        Self {
            filename: filename.into(),
            bytes,
            lines,
            hash,
        }
    }

    #[inline]
    #[must_use]
    pub fn filename(&self) -> &str {
        &self.filename
    }

    #[inline]
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lines in the order they were written
    #[inline]
    #[must_use]
    pub fn lines(&self) -> &[TextLine] {
        &self.lines
    }

    #[inline]
    #[must_use]
    pub fn hash(&self) -> &ContentHash {
        &self.hash
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Recompute and compare the content hash
    #[must_use]
    pub fn verify(&self) -> bool {
        ContentHash::compute(&self.bytes) == self.hash
    }
}
