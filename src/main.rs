//! CLI entry point for the bird enricher.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bird_enricher::{
    BatchCoordinator, Endpoints, Enricher, HttpClient, NameCorrections, Providers, RetryPolicy,
};
use clap::Parser;
use tracing::{debug, error, info};

mod cli;

use cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    debug!(?args, "CLI arguments parsed");
    info!("Bird enricher starting");

    let names = load_name_corrections(&args)?;

    let retry_policy = RetryPolicy::new(
        u32::from(args.max_attempts),
        Duration::from_millis(args.retry_delay_ms),
    );
    let http = HttpClient::with_connect_timeout(
        retry_policy,
        Duration::from_secs(args.connect_timeout_secs),
    )?;

    let endpoints = Endpoints {
        listing: args.listing_url.clone(),
        wikipedia: args.wikipedia_api.clone(),
        commons: args.commons_api.clone(),
        image_info: args.image_info_api.clone(),
    };
    let providers = Providers::new(&http, &endpoints, args.media_limit);

    // Without the listing there is nothing to enrich.
    let mut records = match providers.aves.list_birds().await {
        Ok(records) => records,
        Err(e) => {
            error!(url = %endpoints.listing, error = %e, "could not fetch bird listing");
            return Err(e).context("failed to fetch bird listing");
        }
    };

    info!(records = records.len(), "Fetched bird listing");

    if let Some(limit) = args.limit {
        records.truncate(limit);
        debug!(limit, "listing truncated");
    }

    if records.is_empty() {
        info!("No records to enrich");
    }

    let enricher = Enricher::new(providers, names, usize::from(args.media_concurrency));
    let coordinator = BatchCoordinator::new(Arc::new(enricher), usize::from(args.concurrency))?;

    let outcome = coordinator.run(records).await?;

    info!(
        dispatched = outcome.stats.dispatched(),
        succeeded = outcome.stats.succeeded(),
        failed = outcome.stats.failed(),
        "Enrichment complete"
    );

    Ok(())
}

/// Builds the correction table: the built-in entries plus the optional file.
fn load_name_corrections(args: &Args) -> Result<NameCorrections> {
    let builtin = NameCorrections::builtin();
    let Some(path) = &args.name_corrections else {
        return Ok(builtin);
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read name corrections from {}", path.display()))?;
    let extra = NameCorrections::from_json_str(&json)
        .with_context(|| format!("invalid name corrections in {}", path.display()))?;
    debug!(path = %path.display(), entries = extra.len(), "loaded name corrections");

    Ok(builtin.merged_with(extra))
}
