//! Searcher core: pure matching, feed parsing and report helpers.
mod config;
mod feed;
mod matcher;
mod report;

pub use config::{
    ConfigError, PoolConfig, SearchSettings, DEFAULT_MAX_URLS, DEFAULT_OUTPUT, DEFAULT_PATTERN,
    DEFAULT_URLS_LOCATION, DEFAULT_WORKERS, MAX_WORKERS, MIN_WORKERS,
};
pub use feed::{normalize_url, parse_feed, truncate_urls};
pub use matcher::{matches, ContentMatcher, PatternError};
pub use report::{format_elapsed, format_report};
