use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use quakefeed::cli::{Cli, Commands};
use quakefeed::config::{self, models::QuakefeedConfig};
use quakefeed::database::{
    establish_connection, prepare_store, CollectionHandle, InMemoryRecordStore, PgRecordStore,
    RecordStore,
};
use quakefeed::datafeed::{spawn_shutdown_listener, Fetcher, FeedMonitor};
use quakefeed::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    let config = match config::load_or_default(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            logging::init_logging(quakefeed::constants::logging::DEFAULT_LOG_LEVEL);
            error!("Failed to load configuration: {}", e);
            return Err(anyhow::anyhow!("Configuration error: {}", e));
        }
    };

    logging::init_logging(&config.logging.level);
    info!(
        "Configuration loaded: feed={}, target={}.{}, interval={}s",
        config.feed.url,
        config.store.database,
        config.store.collection,
        config.feed.poll_interval_secs
    );

    match cli.command() {
        Commands::Run => run_daemon(&config).await,
        Commands::Once { dry_run: true } => run_dry(&config).await,
        Commands::Once { dry_run: false } => run_once(&config).await,
        Commands::Init => init_store(&config).await,
        Commands::Status => print_status(&config).await,
    }
}

async fn connect_store(config: &QuakefeedConfig) -> Result<Arc<PgRecordStore>> {
    let database_url = config::resolve_database_url(config)?;
    let pool = establish_connection(&database_url, &config.store)
        .await
        .context("Store must be running and reachable before quakefeed starts")?;
    Ok(Arc::new(PgRecordStore::new(pool)))
}

fn build_monitor(
    config: &QuakefeedConfig,
    store: Arc<dyn RecordStore>,
    handle: CollectionHandle,
) -> Result<FeedMonitor> {
    let fetcher = Fetcher::new(
        config.feed.url.clone(),
        Duration::from_secs(config.feed.request_timeout_secs),
    )
    .context("Failed to create HTTP client")?;

    Ok(FeedMonitor::new(
        fetcher,
        store,
        handle,
        Duration::from_secs(config.feed.poll_interval_secs),
    ))
}

async fn run_daemon(config: &QuakefeedConfig) -> Result<()> {
    let store = connect_store(config).await?;
    let handle = prepare_store(store.as_ref(), &config.store).await?;
    let monitor = build_monitor(config, store, handle)?;

    let shutdown_rx = spawn_shutdown_listener(tokio::signal::ctrl_c());

    info!("quakefeed starting up...");
    let cycles = monitor.run(shutdown_rx).await;
    info!("quakefeed shut down cleanly after {} cycles", cycles);

    Ok(())
}

async fn run_once(config: &QuakefeedConfig) -> Result<()> {
    let store = connect_store(config).await?;
    let handle = prepare_store(store.as_ref(), &config.store).await?;
    let monitor = build_monitor(config, store, handle)?;

    let report = monitor.poll_once().await?;
    println!(
        "features={} inserted={} duplicates={}",
        report.features, report.outcome.inserted, report.outcome.duplicates
    );
    Ok(())
}

async fn run_dry(config: &QuakefeedConfig) -> Result<()> {
    let store = Arc::new(InMemoryRecordStore::new());
    let handle = prepare_store(store.as_ref(), &config.store).await?;
    let monitor = build_monitor(config, store, handle)?;

    let stdout = std::io::stdout();
    let report = monitor.dry_run(&mut stdout.lock()).await?;
    info!(
        "Dry run mapped {} features, {} unique records",
        report.features, report.outcome.inserted
    );
    Ok(())
}

async fn init_store(config: &QuakefeedConfig) -> Result<()> {
    let store = connect_store(config).await?;
    let handle = prepare_store(store.as_ref(), &config.store).await?;
    println!("{} ready", handle);
    Ok(())
}

async fn print_status(config: &QuakefeedConfig) -> Result<()> {
    let store = connect_store(config).await?;
    let handle = CollectionHandle::new(&config.store.database, &config.store.collection)?;

    let count = store.count(&handle).await?;
    let indexes = store.list_indexes(&handle).await?;

    println!("collection: {}", handle);
    println!("records:    {}", count);
    println!("indexes:    {}", indexes.join(", "));
    Ok(())
}
