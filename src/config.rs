// =============================================================================
// config.rs - THE KNOBS
// =============================================================================
//
// Threshold, chunk sizes, the accepted country, and both keyword lists. All
// of it can be overridden from the environment (prefix TRUCK_FILTER_) or a
// .env file, and all of it falls back to a working default when unset or
// unparseable.
//
// Keyword lists come in two flavours:
//   TRUCK_FILTER_INCLUDE_KEYWORDS        replace the curated inclusion list
//   TRUCK_FILTER_EXTRA_INCLUDE_KEYWORDS  append to whatever list is active
// and the same pair for exclusions. Values are comma-separated.
// =============================================================================

use std::env;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::relevance::{DEFAULT_EXCLUDE_KEYWORDS, DEFAULT_INCLUDE_KEYWORDS};

pub const DEFAULT_CONFIDENCE_THRESHOLD: f64 = 0.9;
pub const DEFAULT_RELEVANCE_CHUNK_SIZE: NonZeroUsize = nonzero(10_000);
pub const DEFAULT_COUNTRY_CHUNK_SIZE: NonZeroUsize = nonzero(5_000);
pub const DEFAULT_CLEANING_CHUNK_SIZE: NonZeroUsize = nonzero(10_000);
pub const DEFAULT_TARGET_COUNTRY: &str = "US";

const fn nonzero(n: usize) -> NonZeroUsize {
    match NonZeroUsize::new(n) {
        Some(n) => n,
        None => panic!("chunk size defaults must be non-zero"),
    }
}

/// Every tunable parameter of the filter and cleaning pipelines.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterConfig {
    /// Records with `confidence` below this are dropped first.
    /// Default: 0.9
    pub confidence_threshold: f64,

    /// Records per chunk in the relevance stage. Default: 10,000
    pub relevance_chunk_size: NonZeroUsize,

    /// Records per chunk in the country stage. Default: 5,000
    pub country_chunk_size: NonZeroUsize,

    /// Records per chunk when cleaning names. Default: 10,000
    pub cleaning_chunk_size: NonZeroUsize,

    /// Country code the first address must carry. Exact match. Default: "US"
    pub target_country: String,

    pub include_keywords: Vec<String>,
    pub exclude_keywords: Vec<String>,

    /// Emit logs as JSON lines instead of the human format. Only the binary
    /// looks at this.
    pub log_json: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: DEFAULT_CONFIDENCE_THRESHOLD,
            relevance_chunk_size: DEFAULT_RELEVANCE_CHUNK_SIZE,
            country_chunk_size: DEFAULT_COUNTRY_CHUNK_SIZE,
            cleaning_chunk_size: DEFAULT_CLEANING_CHUNK_SIZE,
            target_country: DEFAULT_TARGET_COUNTRY.to_string(),
            include_keywords: DEFAULT_INCLUDE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            exclude_keywords: DEFAULT_EXCLUDE_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            log_json: false,
        }
    }
}

impl FilterConfig {
    /// Load configuration from the environment, reading `.env` first if one
    /// exists.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. `from_env` passes the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let mut include_keywords = lookup("TRUCK_FILTER_INCLUDE_KEYWORDS")
            .map(|v| split_keywords(&v))
            .unwrap_or(defaults.include_keywords);
        let mut exclude_keywords = lookup("TRUCK_FILTER_EXCLUDE_KEYWORDS")
            .map(|v| split_keywords(&v))
            .unwrap_or(defaults.exclude_keywords);

        if let Some(extra) = lookup("TRUCK_FILTER_EXTRA_INCLUDE_KEYWORDS") {
            include_keywords.extend(split_keywords(&extra));
        }
        if let Some(extra) = lookup("TRUCK_FILTER_EXTRA_EXCLUDE_KEYWORDS") {
            exclude_keywords.extend(split_keywords(&extra));
        }

        Self {
            confidence_threshold: parse_var(&lookup, "TRUCK_FILTER_CONFIDENCE_THRESHOLD")
                .unwrap_or(defaults.confidence_threshold),
            relevance_chunk_size: parse_var(&lookup, "TRUCK_FILTER_RELEVANCE_CHUNK_SIZE")
                .unwrap_or(defaults.relevance_chunk_size),
            country_chunk_size: parse_var(&lookup, "TRUCK_FILTER_COUNTRY_CHUNK_SIZE")
                .unwrap_or(defaults.country_chunk_size),
            cleaning_chunk_size: parse_var(&lookup, "TRUCK_FILTER_CLEANING_CHUNK_SIZE")
                .unwrap_or(defaults.cleaning_chunk_size),
            target_country: lookup("TRUCK_FILTER_TARGET_COUNTRY")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.target_country),
            include_keywords,
            exclude_keywords,
            log_json: parse_var(&lookup, "TRUCK_FILTER_LOG_JSON").unwrap_or(defaults.log_json),
        }
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.trim().parse().ok())
}

/// Split a comma-separated keyword list. Surrounding whitespace is kept off
/// and empty entries (from trailing commas) are skipped; interior spaces are
/// significant, as in "city of".
fn split_keywords(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}
