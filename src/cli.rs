//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use bird_enricher::enrich::{DEFAULT_CONCURRENCY, DEFAULT_MEDIA_CONCURRENCY};
use bird_enricher::fetch::constants::{CONNECT_TIMEOUT_SECS, DEFAULT_MAX_ATTEMPTS};
use bird_enricher::providers::{
    DEFAULT_COMMONS_API, DEFAULT_IMAGE_INFO_API, DEFAULT_LISTING_URL, DEFAULT_MEDIA_LIMIT,
    DEFAULT_WIKIPEDIA_API,
};

/// Enrich a bird listing with encyclopedia text and freely licensed media.
///
/// Fetches the full bird listing, then for every bird queries its detail
/// page, an encyclopedia extract and media search results in parallel,
/// keeping only images under a free license.
#[derive(Parser, Debug)]
#[command(name = "bird-enricher")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Maximum records enriched at once (1-100)
    #[arg(short = 'c', long, default_value_t = DEFAULT_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub concurrency: u8,

    /// Maximum per-image license lookups in flight across all records (1-100)
    #[arg(long, default_value_t = DEFAULT_MEDIA_CONCURRENCY as u8, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub media_concurrency: u8,

    /// Attempts per request before giving up, first attempt included (1-10)
    #[arg(short = 'r', long, default_value_t = DEFAULT_MAX_ATTEMPTS as u8, value_parser = clap::value_parser!(u8).range(1..=10))]
    pub max_attempts: u8,

    /// Delay between attempts of the same request in milliseconds (0 to disable, max 60000)
    #[arg(long, default_value_t = 0, value_parser = clap::value_parser!(u64).range(0..=60000))]
    pub retry_delay_ms: u64,

    /// Connection timeout in seconds (1-3600)
    #[arg(long, default_value_t = CONNECT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..=3600))]
    pub connect_timeout_secs: u64,

    /// Media search results requested per bird (1-50)
    #[arg(long, default_value_t = DEFAULT_MEDIA_LIMIT, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub media_limit: u32,

    /// Only enrich the first N records of the listing
    #[arg(long)]
    pub limit: Option<usize>,

    /// JSON file of extra scientific name corrections ({"superseded": "current"})
    #[arg(long, value_name = "PATH")]
    pub name_corrections: Option<PathBuf>,

    /// Bird listing URL
    #[arg(long, default_value = DEFAULT_LISTING_URL)]
    pub listing_url: String,

    /// Encyclopedia API used for text extracts
    #[arg(long, default_value = DEFAULT_WIKIPEDIA_API)]
    pub wikipedia_api: String,

    /// Media repository API used for image search
    #[arg(long, default_value = DEFAULT_COMMONS_API)]
    pub commons_api: String,

    /// API used for per-image license metadata
    #[arg(long, default_value = DEFAULT_IMAGE_INFO_API)]
    pub image_info_api: String,
}
