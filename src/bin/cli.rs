//! seatwatch CLI
//!
//! Local execution entry point for the seat monitor.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use seatwatch::{
    error::{AppError, Result},
    models::{Config, Subscription},
    notify::ConsoleSink,
    pipeline,
    services::{BranchFetcher, CourseValidator, SeatMonitor},
    store::{MemoryStore, SubscriptionFile},
};
use tokio::sync::watch;

/// seatwatch - Course Seat Monitor
#[derive(Parser, Debug)]
#[command(
    name = "seatwatch",
    version,
    about = "University course seat-availability monitor"
)]

struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Monitor subscriptions from a seed file until interrupted
    Watch {
        /// Path to the TOML subscription seed file
        #[arg(long, default_value = "data/subscriptions.toml")]
        subscriptions: PathBuf,
    },

    /// Run a single cycle for the given course codes
    Check {
        /// Course codes, e.g. "EHB 313E" or "mat101"
        #[arg(required = true)]
        courses: Vec<String>,
    },

    /// Validate configuration and subscription files
    Validate {
        /// Optional subscription seed file to check
        #[arg(long)]
        subscriptions: Option<PathBuf>,
    },
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

    log::info!("seatwatch starting...");

    let config = Arc::new(Config::load_or_default(&cli.config));

    match cli.command {
        Command::Watch { subscriptions } => {
            config.validate()?;
            let store = Arc::new(MemoryStore::load(&subscriptions)?);
            log::info!(
                "Loaded {} subscriptions from {}",
                store.count(),
                subscriptions.display()
            );

            let sink = Arc::new(ConsoleSink::new());
            let (shutdown_tx, shutdown_rx) = watch::channel(false);
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    let _ = shutdown_tx.send(true);
                }
            });

            pipeline::run_monitor(config, store, sink.clone(), sink, shutdown_rx).await?;
        }

        Command::Check { courses } => {
            config.validate()?;
            let validator = CourseValidator::new(&config.branches)?;
            let store = MemoryStore::new();
            for raw in &courses {
                let course = validator.validate(raw)?;
                log::info!(
                    "Checking {} (branch {})",
                    course.course_code,
                    course.branch_id
                );
                store.add(Subscription {
                    user_id: 0,
                    address: "console".to_string(),
                    course_code: course.course_code,
                    branch_id: course.branch_id,
                });
            }

            let fetcher = BranchFetcher::new(Arc::clone(&config))?;
            let sink = Arc::new(ConsoleSink::new());
            let monitor = SeatMonitor::new(
                config,
                Arc::new(fetcher),
                Arc::new(store),
                sink.clone(),
                sink,
            );

            let outcome = monitor.run_cycle().await?;
            log::info!(
                "Check complete: {} openings, {} of {} branches failed.",
                outcome.openings,
                outcome.branch_failures,
                outcome.branch_total
            );
        }

        Command::Validate { subscriptions } => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK ({} branches)", config.branches.len());

            let validator = CourseValidator::new(&config.branches)?;

            if let Some(path) = subscriptions {
                let content = std::fs::read_to_string(&path)?;
                let file: SubscriptionFile = toml::from_str(&content)?;
                for entry in &file.subscriptions {
                    let course = validator.validate(&entry.course_code)?;
                    if course.branch_id != entry.branch_id {
                        return Err(AppError::validation(format!(
                            "subscription '{}' declares branch {} but the code maps to {}",
                            entry.course_code, entry.branch_id, course.branch_id
                        )));
                    }
                }
                log::info!("✓ Subscriptions OK ({} entries)", file.subscriptions.len());
            }

            log::info!("All validations passed!");
        }
    }

    log::info!("Done!");

    Ok(())
}
