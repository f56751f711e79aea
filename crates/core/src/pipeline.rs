//! Ingestion and read paths.
//!
//! Ingestion classifies the image (best-effort), encodes the label list as
//! a JSON string and persists the row. The read path decodes whatever
//! payload shape persistence returns and renders the canonical view.

use crate::classifier;
use crate::config::AppConfig;
use crate::models::ImageView;
use crate::{category, labels, tags};
use anyhow::Context;
use classifiers::noop::{FixedBackend, NoopBackend};
use classifiers::remote::{RemoteBackend, RemoteConfig};
use classifiers::{BackendKind, BackendRegistry, Prediction};
use std::path::Path;
use std::sync::Arc;
use storage::{NewImage, SqlitePool};
use tracing::{info, warn};

pub fn build_registry(config: &AppConfig) -> BackendRegistry {
    match (config.classifier.provider.as_str(), &config.classifier.base_url) {
        ("remote", Some(base_url)) => BackendRegistry::new()
            .with_backend(
                BackendKind::Resnet50,
                Arc::new(RemoteBackend::new(RemoteConfig {
                    base_url: base_url.clone(),
                    model: BackendKind::Resnet50.as_str().to_string(),
                    top_k: config.classifier.top_k,
                    legacy_labels: config.classifier.resnet_legacy_labels,
                })),
            )
            .with_backend(
                BackendKind::InceptionV3,
                Arc::new(RemoteBackend::new(RemoteConfig {
                    base_url: base_url.clone(),
                    model: BackendKind::InceptionV3.as_str().to_string(),
                    top_k: config.classifier.top_k,
                    legacy_labels: false,
                })),
            ),
        ("fixed", _) => {
            // Canned predictions for offline runs; both variants serve
            // the same list.
            let preds: Vec<Prediction> = config
                .classifier
                .fixed_labels
                .iter()
                .enumerate()
                .map(|(rank, label)| Prediction {
                    label: label.clone(),
                    confidence: 1.0 / (rank as f32 + 1.0),
                })
                .collect();
            let backend: Arc<FixedBackend> = Arc::new(FixedBackend::new(preds));
            BackendRegistry::new()
                .with_backend(BackendKind::Resnet50, backend.clone())
                .with_backend(BackendKind::InceptionV3, backend)
        }
        _ => {
            warn!("no inference service configured, classification will degrade");
            BackendRegistry::new()
                .with_backend(BackendKind::Resnet50, Arc::new(NoopBackend))
                .with_backend(BackendKind::InceptionV3, Arc::new(NoopBackend))
        }
    }
}

/// Classify and persist one image. Classification never fails the ingest;
/// a degraded result is stored like any other.
pub async fn ingest(
    pool: &SqlitePool,
    registry: &BackendRegistry,
    image_path: &Path,
    title: Option<&str>,
    model: Option<&str>,
    is_public: bool,
) -> anyhow::Result<i64> {
    let outcome = classifier::classify(image_path, model, registry).await;
    let tags_json = serde_json::to_string(&outcome.tags).context("encode tags")?;

    let title = title
        .map(str::to_string)
        .or_else(|| {
            image_path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .unwrap_or_default();
    let now = chrono::Utc::now().timestamp();

    let image_url = image_path.to_string_lossy();
    let id = storage::insert_image(
        pool,
        &NewImage {
            title: &title,
            image_url: &image_url,
            tags_json: &tags_json,
            category: &outcome.category,
            is_public,
            created_at: now,
        },
    )
    .await
    .context("insert image")?;

    info!(id, tags = %tags_json, category = %outcome.category, "image ingested");
    Ok(id)
}

/// Load all images with their tag payloads decoded to the canonical list.
pub async fn render_images(pool: &SqlitePool) -> anyhow::Result<Vec<ImageView>> {
    let rows = storage::list_images(pool).await.context("select images")?;

    let views = rows
        .into_iter()
        .map(|row| {
            let decoded = row
                .tags
                .as_deref()
                .map(tags::decode_tags_str)
                .unwrap_or_default();
            let clean = labels::normalize_entries(&decoded);

            ImageView {
                id: row.id,
                title: row.title,
                image_url: row.image_url,
                tags: clean,
                category: category::category_from_id(row.category_id).to_string(),
                ai_category: row.category,
                is_public: row.is_public,
                created_at: row.created_at,
            }
        })
        .collect();
    Ok(views)
}
