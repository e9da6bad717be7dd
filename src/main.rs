//! # Page Digest
//!
//! Fetches a news front page, pulls its title, summary description and the
//! timestamp strings shown on it using per-site selector rules, and saves the
//! result as a small text record.
//!
//! ## Usage
//!
//! ```sh
//! page_digest                     # interactive menu
//! page_digest --source ntv        # one source, then exit
//! page_digest --all -d ./digests  # every source
//! page_digest --list              # show registered sources
//! ```
//!
//! ## Architecture
//!
//! Each run goes through one pipeline:
//! 1. **Fetch**: a single GET with a browser User-Agent ([`fetcher`])
//! 2. **Extract**: title plus the source's description/dates rules ([`collector`], [`scrapers`])
//! 3. **Write**: the record as flat text, overwriting the destination ([`outputs`])
//!
//! The menu and CLI modes ([`shell`]) only pick a source and hand it to the
//! pipeline.

use clap::Parser;
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::io::{BufReader, stdin, stdout};
use tracing::{debug, error, info, warn};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod collector;
mod config;
mod error;
mod fetcher;
mod models;
mod outputs;
mod scrapers;
mod shell;
#[cfg(test)]
mod testutil;
mod utils;

use cli::Cli;
use config::DigestConfig;
use fetcher::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, HttpFetcher};
use scrapers::SourceRegistry;
use shell::{Shell, render_listing};
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    // Logs go to stderr so the menu on stdout stays readable.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // ---- Config & registry ----
    let config = match &args.config {
        Some(path) => DigestConfig::load(Path::new(path))?,
        None => DigestConfig::default(),
    };

    let mut registry = SourceRegistry::with_builtin()?;
    let configured = config.register_sources(&mut registry)?;
    info!(
        builtin = scrapers::BUILTIN.len(),
        configured,
        total = registry.len(),
        "Source registry ready"
    );
    if registry.is_empty() {
        warn!("No sources registered");
    }

    if args.list {
        print!("{}", render_listing(&registry));
        return Ok(());
    }

    // ---- Client & output directory ----
    let user_agent = args
        .user_agent
        .or(config.user_agent)
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    let timeout = args
        .timeout_secs
        .or(config.timeout_secs)
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_TIMEOUT);
    let output_dir = PathBuf::from(
        args.output_dir
            .or(config.output_dir)
            .unwrap_or_else(|| ".".to_string()),
    );

    if let Err(e) = ensure_writable_dir(&output_dir).await {
        error!(
            path = %output_dir.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new(user_agent, timeout)?;
    info!(user_agent = %fetcher.user_agent(), ?timeout, "HTTP client ready");
    let shell = Shell::new(fetcher, registry, output_dir);

    // ---- Dispatch ----
    if let Some(id) = args.source.as_deref() {
        let path = shell
            .run_source(id, args.url.as_deref(), args.output.as_deref().map(Path::new))
            .await?;
        println!("Saved to {}", path.display());
    } else if args.all {
        let written = shell.run_all().await;
        for path in &written {
            println!("Saved to {}", path.display());
        }
        let failed = shell.registry().len() - written.len();
        if failed > 0 {
            return Err(format!("{failed} of {} sources failed", shell.registry().len()).into());
        }
    } else {
        shell.run_menu(BufReader::new(stdin()), &mut stdout()).await?;
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}
