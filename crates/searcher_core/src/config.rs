use std::path::PathBuf;

pub const MIN_WORKERS: usize = 1;
pub const MAX_WORKERS: usize = 50;
pub const DEFAULT_WORKERS: usize = 20;
pub const DEFAULT_MAX_URLS: usize = 9999;
pub const DEFAULT_PATTERN: &str = "(?s).*(facebook|twitter).*";
pub const DEFAULT_URLS_LOCATION: &str = "https://s3.amazonaws.com/fieldlens-public/urls.txt";
pub const DEFAULT_OUTPUT: &str = "results.txt";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("max workers must be between 1 and 50 (inclusive), got {0}")]
    WorkerCount(usize),
    #[error("max urls must be at least 1")]
    ZeroMaxUrls,
}

/// Validated worker pool size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolConfig {
    max_workers: usize,
}

impl PoolConfig {
    pub fn new(max_workers: usize) -> Result<Self, ConfigError> {
        if !(MIN_WORKERS..=MAX_WORKERS).contains(&max_workers) {
            return Err(ConfigError::WorkerCount(max_workers));
        }
        Ok(Self { max_workers })
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_WORKERS,
        }
    }
}

/// Everything a single search run needs from the outside world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub max_workers: usize,
    pub max_urls: usize,
    pub pattern: String,
    pub urls_location: String,
    pub output: PathBuf,
}

impl SearchSettings {
    /// Check the bounds that must hold before any fetch starts.
    pub fn validate(&self) -> Result<PoolConfig, ConfigError> {
        if self.max_urls == 0 {
            return Err(ConfigError::ZeroMaxUrls);
        }
        PoolConfig::new(self.max_workers)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_WORKERS,
            max_urls: DEFAULT_MAX_URLS,
            pattern: DEFAULT_PATTERN.to_string(),
            urls_location: DEFAULT_URLS_LOCATION.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}
