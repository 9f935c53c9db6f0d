//! progsync CLI
//!
//! Local entry point for running the catalog sync. The same library entry
//! point can be wrapped by an HTTP-triggered admin job elsewhere.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use progsync::{
    error::Result,
    extract::ProgramDiscovery,
    models::Config,
    pipeline, storage,
    storage::ProgramStore,
    utils::http,
};
use url::Url;

/// progsync - Catalog Program Requirements Sync
#[derive(Parser, Debug)]
#[command(name = "progsync", version, about = "University catalog program requirements sync")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "progsync.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a full sync pass and print the report as JSON
    Sync {
        /// Delay between per-program fetches in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Fetch the index and print discovered programs without writing
    Discover,

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Sync { delay_ms } => {
            config.validate()?;

            let pool = storage::connect(Path::new(&config.database.path)).await?;
            storage::migrate(&pool).await?;
            let store = ProgramStore::new(pool);

            let report = pipeline::run_sync(&config, &store, delay_ms).await?;

            println!("{}", serde_json::to_string_pretty(&report)?);
            log::info!(
                "{} programs in store",
                store.program_count().await?
            );
            store.pool().close().await;

            if !report.is_clean() {
                log::warn!("{} program(s) failed this pass", report.errors.len());
            }
        }

        Command::Discover => {
            config.validate()?;

            let client = http::create_client(&config.http)?;
            let index_url = Url::parse(&config.catalog.index_url)?;
            let index_html = http::fetch_text(&client, index_url.as_str()).await?;

            let discovery = ProgramDiscovery::new(&config.catalog);
            let variants = discovery.discover(&index_html, &index_url);

            log::info!("Discovered {} programs", variants.len());
            for variant in &variants {
                println!(
                    "{}\t{}\t{}",
                    variant.kind.as_str(),
                    variant.degree.as_deref().unwrap_or("-"),
                    variant.source_url
                );
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK");
        }
    }

    Ok(())
}
