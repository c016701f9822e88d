use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use tokenlens::application::{CandidateResolver, PreviewService};
use tokenlens::domain::entities::shared_preview;
use tokenlens::infrastructure::{
    AppConfig, CliArgs, HttpDocumentClient, HttpImageFetcher, MemoryImageCache,
    MetadataIndexLoader, SecondaryIndexLoader, StorageManager,
};
use tokenlens::presentation::{App, ControlConfig, set_global_clear_hook};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config() -> Result<(AppConfig, Option<String>)> {
    let args = CliArgs::parse();
    let startup_id = args.id.clone();

    let storage = StorageManager::new()?;
    let mut config = storage.load_config(args.config.as_deref())?;
    config.merge_with_args(args);

    Ok((config, startup_id))
}

fn create_app(config: &AppConfig) -> Result<App> {
    let documents: Arc<dyn tokenlens::domain::ports::DocumentPort> =
        Arc::new(HttpDocumentClient::new(config.network.timeout_secs)?);

    let metadata = Arc::new(MetadataIndexLoader::new(
        config.collection.metadata_urls(),
        config.collection.ipfs_gateway.clone(),
        documents.clone(),
    ));
    let secondary = Arc::new(SecondaryIndexLoader::new(
        config.collection.secondary_index_url(),
        documents,
    ));
    let resolver = CandidateResolver::new(metadata, secondary, config.collection.clone());

    let image_client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.network.timeout_secs))
        .build()?;
    let fetcher = Arc::new(HttpImageFetcher::new(
        image_client,
        Arc::new(MemoryImageCache::default()),
    ));

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let service = Arc::new(PreviewService::new(
        resolver,
        fetcher,
        shared_preview(),
        config.preview.default_id.clone(),
        event_tx,
    ));

    let control_config = ControlConfig {
        default_id: config.preview.default_id.clone(),
        max_id: config.preview.max_id,
        ..ControlConfig::default()
    };

    Ok(App::new(service, event_rx, control_config))
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let (config, startup_id) = load_config()?;
    init_logging(&config)?;

    info!(version = tokenlens::VERSION, "Starting tokenlens");

    set_global_clear_hook(|name| {
        info!(control = %name, "Input cleared");
    });

    let app = create_app(&config)?;

    let mut terminal = ratatui::init();

    let result = app.run(&mut terminal, startup_id).await;

    ratatui::restore();

    result
}
