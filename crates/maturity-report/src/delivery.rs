//! Handing finished reports to the respondent

use crate::artifact::DocumentArtifact;
use maturity_core::{DeliveryReceipt, RenderError};
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Places an artifact where the respondent can retrieve it
pub trait Delivery {
    /// Deliver under the artifact's filename
    ///
    /// # Errors
    /// `RenderError::Delivery` if the artifact could not be placed
    fn deliver(&self, artifact: &DocumentArtifact) -> Result<DeliveryReceipt, RenderError>;
}

/// Saves reports into a directory, overwriting a previous report
#[derive(Debug, Clone)]
pub struct DirectoryDelivery {
    dir: PathBuf,
}

impl DirectoryDelivery {
    #[inline]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[inline]
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Delivery for DirectoryDelivery {
    fn deliver(&self, artifact: &DocumentArtifact) -> Result<DeliveryReceipt, RenderError> {
        std::fs::create_dir_all(&self.dir).map_err(|e| RenderError::delivery(&self.dir, e))?;

        let path = self.dir.join(artifact.filename());
        std::fs::write(&path, artifact.bytes()).map_err(|e| RenderError::delivery(&path, e))?;
        tracing::debug!(path = %path.display(), bytes = artifact.len(), "Saved report");

        Ok(DeliveryReceipt {
            filename: artifact.filename().to_string(),
            location: path,
            size_bytes: artifact.len(),
            fingerprint: artifact.hash().to_string(),
        })
    }
}

/// Keeps delivered reports in memory, for embedding hosts and tests
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    inner: Mutex<Vec<DocumentArtifact>>,
}

impl MemoryDelivery {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<DocumentArtifact> {
        self.inner.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Delivery for MemoryDelivery {
    fn deliver(&self, artifact: &DocumentArtifact) -> Result<DeliveryReceipt, RenderError> {
        self.inner.lock().push(artifact.clone());
        Ok(DeliveryReceipt {
            filename: artifact.filename().to_string(),
            location: PathBuf::from(artifact.filename()),
            size_bytes: artifact.len(),
            fingerprint: artifact.hash().to_string(),
        })
    }
}

impl<D: Delivery + ?Sized> Delivery for &D {
    fn deliver(&self, artifact: &DocumentArtifact) -> Result<DeliveryReceipt, RenderError> {
        (**self).deliver(artifact)
    }
}
