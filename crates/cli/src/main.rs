use anyhow::Result;
use clap::{Parser, Subcommand};
use photox_core::config;
use photox_core::config::AppConfig;
use photox_core::pipeline;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let cfg = config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Classify { path, model, json } => run_classify(cfg, path, model, json).await,
        Commands::Ingest {
            path,
            title,
            model,
            public,
        } => run_ingest(cfg, path, title, model, public).await,
        Commands::List { json } => run_list(cfg, json).await,
    }
}

#[derive(Parser)]
#[command(name = "photox", about = "Photo backend tagging toolbox")]
struct Cli {
    /// Path to a config file (defaults to config/default.*).
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an image and print its tags and category.
    Classify {
        path: PathBuf,
        /// Backend selector; unknown values use resnet50.
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Classify an image and persist the record.
    Ingest {
        path: PathBuf,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        model: Option<String>,
        #[arg(long)]
        public: bool,
    },
    /// List stored images with decoded tags.
    List {
        #[arg(long)]
        json: bool,
    },
}

async fn run_classify(
    cfg: AppConfig,
    path: PathBuf,
    model: Option<String>,
    json: bool,
) -> Result<()> {
    let registry = pipeline::build_registry(&cfg);
    let outcome = photox_core::classifier::classify(&path, model.as_deref(), &registry).await;
    if json {
        println!(
            "{}",
            serde_json::json!({ "tags": outcome.tags, "category": outcome.category })
        );
    } else {
        println!("tags: {}", outcome.tags.join(", "));
        println!("category: {}", outcome.category);
    }
    Ok(())
}

async fn run_ingest(
    cfg: AppConfig,
    path: PathBuf,
    title: Option<String>,
    model: Option<String>,
    public: bool,
) -> Result<()> {
    let pool = storage::connect(&cfg.database.path).await?;
    storage::migrate(&pool).await?;
    let registry = pipeline::build_registry(&cfg);
    let id = pipeline::ingest(
        &pool,
        &registry,
        &path,
        title.as_deref(),
        model.as_deref(),
        public,
    )
    .await?;
    println!("ingested image {id}");
    Ok(())
}

async fn run_list(cfg: AppConfig, json: bool) -> Result<()> {
    let pool = storage::connect(&cfg.database.path).await?;
    storage::migrate(&pool).await?;
    let views = pipeline::render_images(&pool).await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&views)?);
        return Ok(());
    }
    for view in views {
        println!(
            "#{} {} [{}] tags: {}",
            view.id,
            view.title,
            view.category,
            view.tags.join(", ")
        );
    }
    Ok(())
}
