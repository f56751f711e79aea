use classifiers::noop::FixedBackend;
use classifiers::{BackendKind, BackendRegistry, Prediction};
use photox_core::config::{AppConfig, ClassifierConfig, DatabaseConfig};
use photox_core::pipeline;
use std::fs;
use std::sync::Arc;
use tempfile::tempdir;

fn fixed_registry(items: &[(&str, f32)]) -> BackendRegistry {
    let preds: Vec<Prediction> = items
        .iter()
        .map(|(label, confidence)| Prediction {
            label: label.to_string(),
            confidence: *confidence,
        })
        .collect();
    BackendRegistry::new().with_backend(BackendKind::Resnet50, Arc::new(FixedBackend::new(preds)))
}

#[tokio::test]
async fn ingest_then_list_round_trips_tags() {
    let temp = tempdir().unwrap();
    let image = temp.path().join("dog.jpg");
    fs::write(&image, "fake_image_bytes").unwrap();

    // Shared in-memory DB so multiple connections see the same data.
    let db_url = "sqlite://file:ingest_test?mode=memory&cache=shared";
    let pool = storage::connect(db_url).await.unwrap();
    storage::migrate(&pool).await.unwrap();

    let registry = fixed_registry(&[("golden retriever", 0.9), ("dog", 0.05)]);
    let id = pipeline::ingest(&pool, &registry, &image, Some("my dog"), None, true)
        .await
        .unwrap();

    let views = pipeline::render_images(&pool).await.unwrap();
    assert_eq!(views.len(), 1);
    let view = &views[0];
    assert_eq!(view.id, id);
    assert_eq!(view.title, "my dog");
    assert_eq!(view.tags, vec!["golden retriever", "dog"]);
    assert_eq!(view.ai_category.as_deref(), Some("动物"));
    // No category_id was ever assigned, so the id vocabulary says unknown.
    assert_eq!(view.category, "未知");
    assert!(view.is_public);
}

#[tokio::test]
async fn fixed_provider_classifies_offline() {
    let temp = tempdir().unwrap();
    let image = temp.path().join("cat.jpg");
    fs::write(&image, "fake_image_bytes").unwrap();

    let cfg = AppConfig {
        database: DatabaseConfig {
            path: "sqlite://file:fixed_test?mode=memory&cache=shared".to_string(),
        },
        classifier: ClassifierConfig {
            provider: "fixed".to_string(),
            base_url: None,
            top_k: 5,
            resnet_legacy_labels: true,
            fixed_labels: vec!["tabby cat".to_string(), "dog".to_string()],
        },
    };

    let registry = pipeline::build_registry(&cfg);
    let got = photox_core::classifier::classify(&image, None, &registry).await;
    assert_eq!(got.tags, vec!["tabby cat", "dog"]);
    assert_eq!(got.category, "动物");

    // The alternate variant serves the same canned list.
    let got = photox_core::classifier::classify(&image, Some("inception_v3"), &registry).await;
    assert_eq!(got.tags, vec!["tabby cat", "dog"]);
}

#[tokio::test]
async fn ingest_survives_classifier_outage() {
    let temp = tempdir().unwrap();
    let image = temp.path().join("cat.jpg");
    fs::write(&image, "fake_image_bytes").unwrap();

    let db_url = "sqlite://file:outage_test?mode=memory&cache=shared";
    let pool = storage::connect(db_url).await.unwrap();
    storage::migrate(&pool).await.unwrap();

    // Empty registry: backend lookup fails, classification degrades.
    let registry = BackendRegistry::new();
    pipeline::ingest(&pool, &registry, &image, None, None, false)
        .await
        .unwrap();

    let views = pipeline::render_images(&pool).await.unwrap();
    assert_eq!(views[0].tags, vec!["未分类"]);
    assert_eq!(views[0].ai_category.as_deref(), Some("其他"));
}

#[tokio::test]
async fn historical_rows_are_decoded_on_read() {
    let db_url = "sqlite://file:historical_test?mode=memory&cache=shared";
    let pool = storage::connect(db_url).await.unwrap();
    storage::migrate(&pool).await.unwrap();

    // Double-encoded payload from the old double-serialization bug,
    // with an assigned category id.
    let once = serde_json::to_string(&vec!["zebra", "horse"]).unwrap();
    let twice = serde_json::to_string(&once).unwrap();
    sqlx::query(
        "INSERT INTO images (title, image_url, tags, category_id, is_public, created_at)
         VALUES ('old row', '', ?, 2, 0, 100)",
    )
    .bind(&twice)
    .execute(&pool)
    .await
    .unwrap();

    // Legacy classifier entries stored verbatim, no category id.
    let legacy = serde_json::to_string(&vec!["850: 'teddy, teddy bear'"]).unwrap();
    sqlx::query(
        "INSERT INTO images (title, image_url, tags, is_public, created_at)
         VALUES ('legacy row', '', ?, 0, 200)",
    )
    .bind(&legacy)
    .execute(&pool)
    .await
    .unwrap();

    let views = pipeline::render_images(&pool).await.unwrap();
    assert_eq!(views.len(), 2);

    // Sorted created_at descending: legacy row first.
    assert_eq!(views[0].title, "legacy row");
    assert_eq!(views[0].tags, vec!["teddy"]);
    assert_eq!(views[0].category, "未知");

    assert_eq!(views[1].title, "old row");
    assert_eq!(views[1].tags, vec!["zebra", "horse"]);
    assert_eq!(views[1].category, "动物");
}
