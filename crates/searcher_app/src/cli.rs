use std::path::PathBuf;

use engine_logging::LogDestination;
use log::LevelFilter;
use searcher_core::{
    SearchSettings, DEFAULT_MAX_URLS, DEFAULT_OUTPUT, DEFAULT_PATTERN, DEFAULT_URLS_LOCATION,
    DEFAULT_WORKERS,
};

/// Fetch a list of websites concurrently and report which bodies match a regex
#[derive(Debug, clap::Parser)]
#[command(name = "website_searcher", author, version, long_about = None)]
pub struct Cli {
    /// Number of concurrent workers (1-50)
    #[arg(
        short = 'j',
        long = "workers",
        env = "WEBSITE_SEARCHER_WORKERS",
        default_value_t = DEFAULT_WORKERS as u16,
        value_parser = clap::value_parser!(u16).range(1..=50)
    )]
    workers: u16,

    /// Maximum number of URLs taken from the feed
    #[arg(
        short = 'n',
        long = "max-urls",
        env = "WEBSITE_SEARCHER_MAX_URLS",
        default_value_t = DEFAULT_MAX_URLS as u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    max_urls: u64,

    /// Full-match regular expression; use `(?s).*term.*` to search anywhere in a page
    #[arg(
        short = 'p',
        long = "pattern",
        env = "WEBSITE_SEARCHER_PATTERN",
        default_value = DEFAULT_PATTERN
    )]
    pattern: String,

    /// CSV feed of URLs (http(s) location or local file)
    #[arg(long = "urls", env = "WEBSITE_SEARCHER_URLS", default_value = DEFAULT_URLS_LOCATION)]
    urls: String,

    /// Report file listing matching URLs
    #[arg(short = 'o', long, env = "WEBSITE_SEARCHER_OUTPUT", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Also write a JSON summary of the run to this path
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, env = "WEBSITE_SEARCHER_LOG", default_value = "info")]
    log_level: LevelFilter,

    /// Mirror the log to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log only to `--log-file`, not the terminal
    #[arg(short, long, requires = "log_file")]
    quiet: bool,
}

impl Cli {
    pub fn settings(&self) -> SearchSettings {
        SearchSettings {
            max_workers: usize::from(self.workers),
            max_urls: usize::try_from(self.max_urls).unwrap_or(usize::MAX),
            pattern: self.pattern.clone(),
            urls_location: self.urls.clone(),
            output: self.output.clone(),
        }
    }

    pub fn summary_path(&self) -> Option<&PathBuf> {
        self.summary.as_ref()
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn log_destination(&self) -> LogDestination {
        match (&self.log_file, self.quiet) {
            (Some(path), true) => LogDestination::File(path.clone()),
            (Some(path), false) => LogDestination::Both(path.clone()),
            (None, _) => LogDestination::Terminal,
        }
    }
}
