use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use genzou::events::StorageEvent;
use genzou::handler::ImageProcessor;
use genzou::metrics::providers::log::LogMetricsSink;
use genzou::processor::{VariantConfig, generate};
use genzou::store::providers::fs::FsObjectStore;
use genzou::Config;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log verbosity; overrides the LOG_LEVEL environment variable.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run one notification batch against a filesystem-backed object store
    Process {
        /// Notification JSON file; mutually exclusive with --bucket/--key
        #[arg(short, long)]
        event: Option<PathBuf>,

        /// Source bucket for a synthesized single-object event
        #[arg(long, requires = "key")]
        bucket: Option<String>,

        /// Source key for a synthesized single-object event
        #[arg(long, requires = "bucket")]
        key: Option<String>,

        /// Directory holding bucket subdirectories
        #[arg(long, default_value = "objects")]
        store_root: PathBuf,
    },

    /// Generate renditions for a local image file
    Generate {
        /// Source image
        file: PathBuf,

        /// Directory renditions are written to
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            event,
            bucket,
            key,
            store_root,
        } => {
            let config = match Config::from_env() {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Configuration error: {}", e);
                    std::process::exit(1);
                }
            };
            let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
            setup_logging(level)?;
            run_process(config, event, bucket, key, store_root).await
        }
        Commands::Generate { file, output } => {
            setup_logging(cli.log_level.as_deref().unwrap_or("info"))?;
            run_generate(file, output).await
        }
    }
}

fn setup_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

async fn run_process(
    config: Config,
    event_file: Option<PathBuf>,
    bucket: Option<String>,
    key: Option<String>,
    store_root: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let event: StorageEvent = match (event_file, bucket, key) {
        (Some(path), _, _) => serde_json::from_str(&std::fs::read_to_string(&path)?)?,
        (None, Some(bucket), Some(key)) => StorageEvent::for_object(bucket, key),
        _ => {
            eprintln!("Error: provide --event <file> or both --bucket and --key");
            std::process::exit(1);
        }
    };

    info!(store_root = %store_root.display(), "using filesystem object store");
    let store = Arc::new(FsObjectStore::new(store_root));
    let metrics = Arc::new(LogMetricsSink::new());
    let processor = ImageProcessor::new(config, store, metrics);

    // No invoking infrastructure here, so no request context is supplied.
    let response = processor.handle(event, None).await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_generate(
    file: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let source_key = file
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or("source file has no usable name")?
        .to_string();
    let raw_bytes = tokio::fs::read(&file).await?;

    let renditions =
        tokio::task::spawn_blocking(move || generate(&raw_bytes, &source_key, &VariantConfig::default()))
            .await??;

    tokio::fs::create_dir_all(&output).await?;
    for rendition in &renditions {
        let path = output.join(&rendition.key);
        tokio::fs::write(&path, &rendition.data).await?;
        info!(
            path = %path.display(),
            format = %rendition.format,
            quality = ?rendition.quality,
            bytes = rendition.data.len(),
            "wrote rendition"
        );
    }

    println!("Wrote {} renditions to {}", renditions.len(), output.display());
    Ok(())
}
