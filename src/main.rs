use clap::Parser;
use relevant_api::RestApi;
use relevant_storage::StorageManager;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// A fast, in-memory content relevance engine
#[derive(Parser, Debug)]
#[command(name = "relevant")]
#[command(about = "Ranks related content by shared-taxonomy overlap", long_about = None)]
struct Args {
    /// Path to the data directory
    #[arg(short, long, default_value = "./data")]
    data_dir: PathBuf,

    /// HTTP API port
    #[arg(long, default_value_t = 6380)]
    http_port: u16,

    /// Seconds between background index snapshots
    #[arg(long, default_value_t = 300)]
    save_interval_secs: u64,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting relevant v{}", env!("CARGO_PKG_VERSION"));
    info!("Data directory: {:?}", args.data_dir);
    info!("HTTP API port: {}", args.http_port);

    let storage = Arc::new(StorageManager::with_save_interval(
        &args.data_dir,
        Some(Duration::from_secs(args.save_interval_secs)),
    )?);
    info!("Storage initialized ({} items)", storage.index().count());

    let storage_http = storage.clone();
    let http_port = args.http_port;
    let http_handle = std::thread::spawn(move || {
        info!("Starting HTTP server on port {}", http_port);
        let sys = actix_web::rt::System::new();
        sys.block_on(async {
            if let Err(e) = RestApi::start(storage_http, http_port).await {
                eprintln!("HTTP server error: {}", e);
            }
        })
    });

    info!("relevant started successfully");
    info!("HTTP API: http://localhost:{}/", args.http_port);

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
        _ = tokio::task::spawn_blocking(move || {
            http_handle.join().ok();
        }) => {
            info!("HTTP server stopped");
        }
    }

    info!("Shutting down...");
    storage.save()?;
    info!("Final snapshot written");
    Ok(())
}
