//! Classifier backend abstractions for image tagging.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod noop;
pub mod remote;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("not implemented")]
    NotImplemented,
    #[error("request failed: {0}")]
    RequestFailed(String),
    #[error("unknown backend: {0}")]
    UnknownBackend(String),
    #[error("io error reading image: {0}")]
    Io(#[from] std::io::Error),
}

/// One ranked prediction. Backends return these confidence-descending.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub confidence: f32,
}

/// The closed set of backend variants the orchestrator can select.
///
/// Selector strings outside the set resolve to the primary variant,
/// so an unrecognized `model` parameter never fails a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BackendKind {
    Resnet50,
    InceptionV3,
}

impl BackendKind {
    pub fn from_selector(selector: Option<&str>) -> Self {
        match selector {
            Some("inception_v3") => BackendKind::InceptionV3,
            _ => BackendKind::Resnet50,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Resnet50 => "resnet50",
            BackendKind::InceptionV3 => "inception_v3",
        }
    }
}

#[async_trait::async_trait]
pub trait ClassifierBackend: Send + Sync {
    async fn predict(&self, image_path: &Path) -> Result<Vec<Prediction>, ClassifierError>;

    /// True when the backend emits entries shaped `"<id>: '<label>, ...'"`
    /// that need first-label extraction before use.
    fn emits_legacy_labels(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for dyn ClassifierBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ClassifierBackend")
    }
}

#[derive(Default, Clone)]
pub struct BackendRegistry {
    backends: HashMap<BackendKind, Arc<dyn ClassifierBackend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_backend(mut self, kind: BackendKind, backend: Arc<dyn ClassifierBackend>) -> Self {
        self.backends.insert(kind, backend);
        self
    }

    pub fn backend(
        &self,
        kind: BackendKind,
    ) -> Result<Arc<dyn ClassifierBackend>, ClassifierError> {
        self.backends
            .get(&kind)
            .cloned()
            .ok_or_else(|| ClassifierError::UnknownBackend(kind.as_str().to_string()))
    }
}
