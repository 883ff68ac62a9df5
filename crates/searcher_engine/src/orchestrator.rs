use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_info, engine_warn};
use searcher_core::{ContentMatcher, PoolConfig};
use tokio_util::sync::CancellationToken;

use crate::fetch::Fetcher;
use crate::queue::{ResultsCollection, WorkQueue};
use crate::worker::{Worker, WorkerReport};
use crate::SearchError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Matched URLs in the order workers appended them.
    pub matched: Vec<String>,
    pub searched: usize,
    pub workers: Vec<WorkerReport>,
}

/// Owns pool sizing and the lifetime of the queue, results and workers of a run.
pub struct SearchOrchestrator {
    pool: PoolConfig,
    fetcher: Arc<dyn Fetcher>,
}

impl SearchOrchestrator {
    pub fn new(max_workers: usize, fetcher: Arc<dyn Fetcher>) -> Result<Self, SearchError> {
        Ok(Self::with_pool(PoolConfig::new(max_workers)?, fetcher))
    }

    pub fn with_pool(pool: PoolConfig, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { pool, fetcher }
    }

    pub fn max_workers(&self) -> usize {
        self.pool.max_workers()
    }

    pub async fn search(
        &self,
        urls: Vec<String>,
        pattern: &str,
    ) -> Result<SearchOutcome, SearchError> {
        self.search_until_cancelled(urls, pattern, &CancellationToken::new())
            .await
    }

    /// Run every URL through the worker pool and wait for all workers.
    ///
    /// Cancelling `cancel` while waiting aborts the remaining workers and
    /// fails the run with [`SearchError::Interrupted`].
    pub async fn search_until_cancelled(
        &self,
        urls: Vec<String>,
        pattern: &str,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome, SearchError> {
        if urls.is_empty() {
            return Err(SearchError::NoUrls);
        }
        let matcher = Arc::new(ContentMatcher::new(pattern)?);
        let searched = urls.len();

        let queue = Arc::new(WorkQueue::new());
        queue.push_all(urls);
        let results = Arc::new(ResultsCollection::new());

        let worker_count = self.pool.max_workers();
        engine_debug!("STARTING [{}] workers...", worker_count);
        let handles: Vec<_> = (1..=worker_count)
            .map(|index| {
                let worker = Worker::new(
                    format!("worker_{index}"),
                    Arc::clone(&queue),
                    Arc::clone(&results),
                    Arc::clone(&self.fetcher),
                    Arc::clone(&matcher),
                );
                let name = worker.name().to_string();
                (name, tokio::spawn(worker.run()))
            })
            .collect();
        let abort_handles: Vec<_> = handles
            .iter()
            .map(|(_, handle)| handle.abort_handle())
            .collect();
        engine_debug!("Done starting workers.");

        let mut reports = Vec::with_capacity(worker_count);
        for (name, handle) in handles {
            engine_debug!("Waiting for [{}] to complete", name);
            let joined = tokio::select! {
                joined = handle => joined,
                _ = cancel.cancelled() => {
                    abort_handles.iter().for_each(|handle| handle.abort());
                    engine_warn!("Interrupted waiting for [{}] to complete", name);
                    return Err(SearchError::Interrupted);
                }
            };
            match joined {
                Ok(report) => reports.push(report),
                Err(err) if err.is_cancelled() => return Err(SearchError::Interrupted),
                // The worker's claimed URLs are lost; whatever it appended stays.
                Err(err) => engine_error!("Worker [{}] failed: {}", name, err),
            }
        }

        let matched = results.snapshot();
        engine_info!(
            "Search complete: {} of {} urls matched with {} workers",
            matched.len(),
            searched,
            worker_count
        );
        Ok(SearchOutcome {
            matched,
            searched,
            workers: reports,
        })
    }
}
