use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use searcher_core::PoolConfig;
use tokio_util::sync::CancellationToken;

use crate::feed::{load_feed, FeedError};
use crate::fetch::{FetchSettings, Fetcher, ReqwestFetcher};
use crate::orchestrator::{SearchOrchestrator, SearchOutcome};
use crate::{EngineError, SearchError};

/// Blocking front door for callers that do not run their own async runtime.
///
/// Owns a multi-threaded tokio runtime; each call blocks the calling thread
/// until the run finishes. Ctrl-C during a search interrupts it.
///
/// The first search installs tokio's SIGINT handler for the rest of the
/// process. From then on Ctrl-C outside a search no longer terminates the
/// process by default; callers that keep running afterwards need their own
/// handling.
pub struct SearchEngine {
    runtime: tokio::runtime::Runtime,
    fetcher: Arc<dyn Fetcher>,
    orchestrator: SearchOrchestrator,
}

impl SearchEngine {
    pub fn new(pool: PoolConfig, settings: FetchSettings) -> Result<Self, EngineError> {
        let fetcher: Arc<dyn Fetcher> = Arc::new(ReqwestFetcher::new(settings)?);
        Self::with_fetcher(pool, fetcher)
    }

    pub fn with_fetcher(
        pool: PoolConfig,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("searcher-worker")
            .build()?;
        let orchestrator = SearchOrchestrator::with_pool(pool, Arc::clone(&fetcher));
        Ok(Self {
            runtime,
            fetcher,
            orchestrator,
        })
    }

    pub fn load_feed(&self, location: &str, max_urls: usize) -> Result<Vec<String>, FeedError> {
        self.runtime
            .block_on(load_feed(location, self.fetcher.as_ref(), max_urls))
    }

    pub fn search(&self, urls: Vec<String>, pattern: &str) -> Result<SearchOutcome, SearchError> {
        self.search_until_cancelled(urls, pattern, CancellationToken::new())
    }

    /// Like [`SearchEngine::search`], with an external cancellation handle.
    pub fn search_until_cancelled(
        &self,
        urls: Vec<String>,
        pattern: &str,
        cancel: CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        self.runtime.block_on(async {
            let watcher = tokio::spawn(cancel_on_ctrl_c(cancel.clone()));
            let outcome = self
                .orchestrator
                .search_until_cancelled(urls, pattern, &cancel)
                .await;
            watcher.abort();
            outcome
        })
    }
}

async fn cancel_on_ctrl_c(cancel: CancellationToken) {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            engine_info!("Ctrl-C received, interrupting search");
            cancel.cancel();
        }
        Err(err) => engine_warn!("Unable to listen for Ctrl-C: {}", err),
    }
}
