//! Classification orchestration.
//!
//! Classification is best-effort enrichment: an inference outage must not
//! block ingestion. Every stage here is guarded and every failure degrades
//! to the fixed fallback pair instead of propagating.

use crate::category::{category_from_label, CATEGORY_OTHER, FALLBACK_TAG};
use crate::labels;
use classifiers::{BackendKind, BackendRegistry};
use std::path::Path;
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Ranked labels, confidence descending.
    pub tags: Vec<String>,
    /// Keyword-vocabulary category derived from the ranked labels.
    pub category: String,
}

impl Classification {
    /// The degraded result every failure mode resolves to.
    pub fn fallback() -> Self {
        Self {
            tags: vec![FALLBACK_TAG.to_string()],
            category: CATEGORY_OTHER.to_string(),
        }
    }
}

/// Classify an image through the selected backend. Infallible by type:
/// missing file, backend lookup failure, inference failure and empty
/// results all degrade to [`Classification::fallback`].
pub async fn classify(
    image_path: &Path,
    selector: Option<&str>,
    registry: &BackendRegistry,
) -> Classification {
    let meta = match std::fs::metadata(image_path) {
        Ok(meta) => meta,
        Err(e) => {
            error!(path = %image_path.display(), error = %e, "image file not found");
            return Classification::fallback();
        }
    };
    if meta.len() == 0 {
        error!(path = %image_path.display(), "image file is empty");
        return Classification::fallback();
    }

    let kind = BackendKind::from_selector(selector);
    info!(path = %image_path.display(), backend = kind.as_str(), "classifying image");

    let backend = match registry.backend(kind) {
        Ok(backend) => backend,
        Err(e) => {
            error!(error = ?e, backend = kind.as_str(), "classifier backend unavailable");
            return Classification::fallback();
        }
    };

    let results = match backend.predict(image_path).await {
        Ok(results) => results,
        Err(e) => {
            error!(error = ?e, backend = kind.as_str(), "inference failed");
            return Classification::fallback();
        }
    };
    if results.is_empty() {
        warn!(path = %image_path.display(), "classifier returned no results");
        return Classification::fallback();
    }

    let raw: Vec<String> = results.into_iter().map(|p| p.label).collect();
    let tags = if backend.emits_legacy_labels() {
        labels::extract_first(&raw)
    } else {
        raw
    };
    // Extraction can drop every entry when the backend misbehaves.
    if tags.is_empty() {
        warn!(path = %image_path.display(), "no usable labels after extraction");
        return Classification::fallback();
    }

    // Highest-ranked tag that hits the keyword table wins; specific
    // top labels ("golden retriever") often miss while a lower-ranked
    // generic one ("dog") resolves.
    let category = tags
        .iter()
        .map(|tag| category_from_label(tag))
        .find(|c| *c != CATEGORY_OTHER)
        .unwrap_or(CATEGORY_OTHER)
        .to_string();
    info!(tags = ?tags, category = %category, "classification complete");

    Classification { tags, category }
}
