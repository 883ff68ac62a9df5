use std::io;

use engine_logging::{engine_info, engine_warn};
use searcher_core::{parse_feed, truncate_urls};

use crate::fetch::Fetcher;
use crate::{FetchError, FetchOutcome, NoContentReason};

#[derive(Debug, thiserror::Error)]
pub enum FeedError {
    #[error("failed to read url feed {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to fetch url feed: {0}")]
    Fetch(#[from] FetchError),
    #[error("url feed {location} returned no content ({reason})")]
    NoContent {
        location: String,
        reason: NoContentReason,
    },
    #[error("url feed {location} contained no urls")]
    Empty { location: String },
}

/// Load the URL list from an `http(s)://` location or a local CSV file,
/// keeping at most `max_urls` entries.
pub async fn load_feed(
    location: &str,
    fetcher: &dyn Fetcher,
    max_urls: usize,
) -> Result<Vec<String>, FeedError> {
    let contents = if is_remote(location) {
        match fetcher.fetch(location).await? {
            FetchOutcome::Body(body) => body,
            FetchOutcome::NoContent(reason) => {
                return Err(FeedError::NoContent {
                    location: location.to_string(),
                    reason,
                })
            }
        }
    } else {
        tokio::fs::read_to_string(location)
            .await
            .map_err(|source| FeedError::Io {
                location: location.to_string(),
                source,
            })?
    };

    let urls = parse_feed(&contents);
    if urls.is_empty() {
        engine_warn!("Couldn't load the list of URLs or the list was empty.");
        return Err(FeedError::Empty {
            location: location.to_string(),
        });
    }
    let total = urls.len();
    let urls = truncate_urls(urls, max_urls);
    engine_info!(
        "Loaded list of URLs to search ({} of {} urls)",
        urls.len(),
        total
    );
    Ok(urls)
}

fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}
