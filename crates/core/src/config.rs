use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub classifier: ClassifierConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// "remote" for an HTTP inference service, "fixed" for canned labels
    /// (offline runs), "noop" for none.
    pub provider: String,
    pub base_url: Option<String>,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// The resnet50 service emits legacy `"<id>: '<label>, ...'"` entries.
    #[serde(default = "default_true")]
    pub resnet_legacy_labels: bool,
    /// Labels served by the "fixed" provider, confidence descending.
    #[serde(default = "default_fixed_labels")]
    pub fixed_labels: Vec<String>,
}

fn default_top_k() -> usize {
    5
}

fn default_true() -> bool {
    true
}

fn default_fixed_labels() -> Vec<String> {
    vec!["sample".to_string()]
}

pub fn load(path: Option<&str>) -> anyhow::Result<AppConfig> {
    let mut settings = config::Config::builder();
    if let Some(p) = path {
        settings = settings.add_source(config::File::with_name(p));
    } else {
        settings = settings.add_source(config::File::with_name("config/default").required(false));
    }
    let cfg = settings.build()?;
    Ok(cfg.try_deserialize()?)
}
