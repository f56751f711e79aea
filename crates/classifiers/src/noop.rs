use crate::{ClassifierBackend, ClassifierError, Prediction};
use std::path::Path;

/// Backend that never classifies anything. Used when no inference
/// service is configured; the orchestrator degrades to its fallback.
#[derive(Debug, Default)]
pub struct NoopBackend;

#[async_trait::async_trait]
impl ClassifierBackend for NoopBackend {
    async fn predict(&self, _image_path: &Path) -> Result<Vec<Prediction>, ClassifierError> {
        Err(ClassifierError::NotImplemented)
    }
}

/// Backend returning a canned ranked list, for tests and offline runs.
#[derive(Debug, Default, Clone)]
pub struct FixedBackend {
    predictions: Vec<Prediction>,
    legacy: bool,
}

impl FixedBackend {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self {
            predictions,
            legacy: false,
        }
    }

    pub fn legacy(mut self) -> Self {
        self.legacy = true;
        self
    }
}

#[async_trait::async_trait]
impl ClassifierBackend for FixedBackend {
    async fn predict(&self, _image_path: &Path) -> Result<Vec<Prediction>, ClassifierError> {
        Ok(self.predictions.clone())
    }

    fn emits_legacy_labels(&self) -> bool {
        self.legacy
    }
}
