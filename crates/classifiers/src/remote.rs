use crate::{ClassifierBackend, ClassifierError, Prediction};
use reqwest::Client;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    /// Model name on the inference service, e.g. "resnet50".
    pub model: String,
    pub top_k: usize,
    /// Whether this model's labels come back as `"<id>: '<label>, ...'"`.
    pub legacy_labels: bool,
}

/// HTTP classifier backend. Posts raw image bytes to
/// `{base_url}/predictions/{model}` and expects a ranked JSON array.
#[derive(Clone)]
pub struct RemoteBackend {
    client: Client,
    cfg: Arc<RemoteConfig>,
}

impl RemoteBackend {
    pub fn new(cfg: RemoteConfig) -> Self {
        Self {
            client: Client::new(),
            cfg: Arc::new(cfg),
        }
    }
}

#[derive(Deserialize)]
struct PredictionData {
    label: String,
    confidence: f32,
}

#[async_trait::async_trait]
impl ClassifierBackend for RemoteBackend {
    async fn predict(&self, image_path: &Path) -> Result<Vec<Prediction>, ClassifierError> {
        let bytes = tokio::fs::read(image_path).await?;
        debug!(
            model = %self.cfg.model,
            size = bytes.len(),
            "sending image to inference service"
        );

        let resp = self
            .client
            .post(format!(
                "{}/predictions/{}",
                self.cfg.base_url, self.cfg.model
            ))
            .query(&[("top_k", self.cfg.top_k)])
            .body(bytes)
            .send()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ClassifierError::RequestFailed(format!(
                "inference service returned {status}"
            )));
        }

        let parsed: Vec<PredictionData> = resp
            .json()
            .await
            .map_err(|e| ClassifierError::RequestFailed(e.to_string()))?;

        Ok(parsed
            .into_iter()
            .map(|p| Prediction {
                label: p.label,
                confidence: p.confidence,
            })
            .collect())
    }

    fn emits_legacy_labels(&self) -> bool {
        self.cfg.legacy_labels
    }
}
