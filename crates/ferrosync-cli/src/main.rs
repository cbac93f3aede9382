//! ferrosync - compare two directory trees and optionally sync them
//!
//! Prints a report of files whose contents differ and of entries present on one
//! side only, then copies, removes or overwrites entries when asked to.

mod display;
mod json_output;
mod progress;

use anyhow::{Context, Result};
use clap::Parser;
use ferrosync_config::{Config, ConfigLoader, LoggingConfig};
use ferrosync_core::{
    CompareOptions, DiffEngine, NoopObserver, ProgressObserver, Report, SyncExecutor,
};
use ferrosync_types::SyncPolicy;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;
use tracing::info;

use crate::display::{display_error, display_success, print_sync_stats};
use crate::json_output::ComparisonJson;
use crate::progress::BarObserver;

/// ferrosync - directory tree comparison and sync tool
#[derive(Parser, Debug)]
#[command(
    name = "ferrosync",
    version = env!("CARGO_PKG_VERSION"),
    about = "Compare two directory trees and optionally sync them",
    long_about = "ferrosync compares two directory trees and reports files whose contents differ\n\
                  and entries that exist on one side only. With sync flags it copies missing\n\
                  entries, removes extra ones and overwrites differing files."
)]
struct Cli {
    /// Left directory
    left_path: PathBuf,

    /// Right directory
    right_path: PathBuf,

    /// Do not draw progress bars
    #[arg(long, alias = "no-pro")]
    hide_progress_bar: bool,

    /// Copy entries missing from the destination
    #[arg(long, alias = "add")]
    add_missing: bool,

    /// Delete entries that exist only in the destination
    #[arg(long, alias = "remove")]
    remove_extra: bool,

    /// Overwrite destination files whose contents differ
    #[arg(long, alias = "overwrite")]
    overwrite_hash: bool,

    /// Sync from right to left instead of left to right
    #[arg(long, alias = "reverse")]
    reverse_sync_direction: bool,

    /// Shorthand for --add-missing --remove-extra --overwrite-hash
    #[arg(long, alias = "mirror")]
    mirror_contents: bool,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Quiet mode - minimal output
    #[arg(short, long)]
    quiet: bool,

    /// Verbose mode - detailed output
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the comparison as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Always hash file contents, even for large binary files
    #[arg(long)]
    exact: bool,
}

impl Cli {
    fn policy(&self) -> SyncPolicy {
        SyncPolicy {
            overwrite: self.overwrite_hash || self.mirror_contents,
            add_missing: self.add_missing || self.mirror_contents,
            remove_extra: self.remove_extra || self.mirror_contents,
            reverse_direction: self.reverse_sync_direction,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            display_error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    init_logging(cli, &config.logging)?;

    info!("ferrosync v{} starting", env!("CARGO_PKG_VERSION"));

    let mut options = CompareOptions::from(&config.compare);
    if cli.exact {
        options.large_binary_shortcut = false;
    }

    let bar;
    let observer: &dyn ProgressObserver =
        if cli.hide_progress_bar || cli.quiet || !config.progress.enabled {
            &NoopObserver
        } else {
            bar = BarObserver::new(Duration::from_millis(config.progress.tick_millis));
            &bar
        };

    let result = DiffEngine::new(options).diff_with_progress(
        &cli.left_path,
        &cli.right_path,
        observer,
    )?;

    if !cli.json {
        println!("{}", Report::new(&result).render()?);
    }

    let policy = effective_policy(cli, &config);
    let mut stats = None;
    if !policy.is_noop() {
        if SyncExecutor::planned_operations(&result, &policy) == 0 {
            if !cli.json {
                println!("Directories already in sync!");
            }
        } else {
            let done = SyncExecutor::new().sync_with_progress(&result, &policy, observer)?;
            if !cli.quiet && !cli.json {
                display_success("Sync completed");
                print_sync_stats(&done);
            }
            stats = Some(done);
        }
    }

    if cli.json {
        let mut doc = ComparisonJson::new(&result)?;
        if let Some(stats) = &stats {
            doc = doc.with_sync(&policy, stats);
        }
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        println!();
    }

    Ok(())
}

/// Steps from flags and config combined; only `--reverse` picks the direction
fn effective_policy(cli: &Cli, config: &Config) -> SyncPolicy {
    cli.policy().merge(config.sync)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
        None => ConfigLoader::load_default().context("Invalid configuration environment")?,
    };
    Ok(config)
}

fn init_logging(cli: &Cli, logging: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        logging.level.as_str()
    };

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .context("Invalid log filter")?;

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }

    Ok(())
}
