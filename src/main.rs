use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use gallery_time::{
    Config,
    gallery::{Gallery, GalleryError, GalleryIndex, Order, month_name},
    startup_checks,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Global options that apply to all commands
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: PathBuf,

    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Override the library root from the config file
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate missing thumbnails (default if no command specified)
    Sync {
        /// Number of parallel generations
        #[arg(short, long)]
        workers: Option<usize>,
    },

    /// Sync, then print the gallery grouped by year and month
    List {
        /// Most recent first
        #[arg(short, long)]
        descending: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the original file behind a thumbnail name
    Resolve {
        /// Thumbnail filename, e.g. 20230115_120000_video.jpg
        cache_name: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Set up logging first
    let level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = Config::load(&cli.config)?;
    if let Some(root) = cli.root {
        config.library.root = root;
    }

    match cli.command {
        Some(Commands::Resolve { cache_name }) => resolve(config, &cache_name),
        Some(Commands::List { descending, json }) => {
            let order = if descending {
                Order::Descending
            } else {
                Order::Ascending
            };
            let index = run_sync(config).await?;
            print_index(&index, order, json)
        }
        Some(Commands::Sync { workers }) => {
            if workers.is_some() {
                config.reconcile.workers = workers;
            }
            run_sync(config).await.map(|_| ())
        }
        None => run_sync(config).await.map(|_| ()),
    }
}

async fn run_sync(config: Config) -> Result<GalleryIndex, Box<dyn std::error::Error>> {
    info!("Starting {}", config.app.name);
    info!("Library root: {:?}", config.library.root);
    info!("Cache directory: {:?}", config.cache_directory());

    // Perform startup checks
    if let Err(errors) = startup_checks::perform_startup_checks(&config).await {
        for error in &errors {
            tracing::error!("Startup check failed: {}", error);
        }
        if errors.iter().any(|e| e.is_critical()) {
            tracing::error!("Critical startup check failed, exiting");
            return Err("Critical startup check failed".into());
        }
        tracing::warn!("Non-critical startup checks failed, continuing");
    }

    let gallery = Gallery::new(config);

    let cancel = CancellationToken::new();
    let signal_task = tokio::spawn(shutdown_signal(cancel.clone()));

    let outcome = gallery.sync(&cancel).await;
    signal_task.abort();
    let outcome = outcome?;

    if outcome.report.cancelled {
        info!("Stopped early; remaining thumbnails will be generated on the next run");
    }
    println!(
        "{} entries ({} generated, {} failed, {} already cached)",
        outcome.index.len(),
        outcome.report.generated,
        outcome.report.failed,
        outcome.report.already_cached
    );

    Ok(outcome.index)
}

fn print_index(
    index: &GalleryIndex,
    order: Order,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let years = index.years(order);

    if json {
        println!("{}", serde_json::to_string_pretty(&years)?);
        return Ok(());
    }

    for year in &years {
        println!("{}", year.year);
        for bucket in &year.months {
            let month = month_name(bucket.month)
                .map(str::to_string)
                .unwrap_or_else(|| format!("Month {}", bucket.month));
            println!("  {}", month);
            for file in &bucket.files {
                if file.is_video() {
                    println!("    {} (video)", file.cache_name);
                } else {
                    println!("    {}", file.cache_name);
                }
            }
        }
    }

    Ok(())
}

fn resolve(config: Config, cache_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let gallery = Gallery::new(config);
    let index = gallery.cached_index()?;

    match index.original_path(cache_name) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => {
            tracing::error!(
                "No cached entry named {} (expected source {})",
                cache_name,
                index.source_name(cache_name)
            );
            Err(GalleryError::NotFound.into())
        }
    }
}

async fn shutdown_signal(cancel: CancellationToken) {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Shutdown signal received (Ctrl+C), finishing in-flight thumbnails");
        },
        _ = terminate => {
            info!("Shutdown signal received (SIGTERM), finishing in-flight thumbnails");
        },
    }

    cancel.cancel();
}
