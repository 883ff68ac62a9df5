use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use engine_logging::{engine_debug, engine_error, engine_trace};
use futures_util::FutureExt;
use searcher_core::ContentMatcher;

use crate::fetch::Fetcher;
use crate::queue::{ResultsCollection, WorkQueue};
use crate::FetchOutcome;

/// Per-worker tally, returned when the worker observes an empty queue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkerReport {
    pub name: String,
    pub claimed: usize,
    /// URLs this worker added to the results; repeats of a recorded URL are not counted.
    pub matched: usize,
    pub no_content: usize,
    /// Fetch errors plus fetches that panicked.
    pub failed: usize,
}

/// One fetch-and-match loop over the shared queue.
pub struct Worker {
    name: String,
    queue: Arc<WorkQueue>,
    results: Arc<ResultsCollection>,
    fetcher: Arc<dyn Fetcher>,
    matcher: Arc<ContentMatcher>,
}

impl Worker {
    pub fn new(
        name: impl Into<String>,
        queue: Arc<WorkQueue>,
        results: Arc<ResultsCollection>,
        fetcher: Arc<dyn Fetcher>,
        matcher: Arc<ContentMatcher>,
    ) -> Self {
        Self {
            name: name.into(),
            queue,
            results,
            fetcher,
            matcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Claim URLs until the queue is empty. A failing or panicking fetch never
    /// ends the loop.
    pub async fn run(self) -> WorkerReport {
        engine_debug!("BEGIN worker: {}", self.name);
        let mut report = WorkerReport {
            name: self.name.clone(),
            ..WorkerReport::default()
        };

        while let Some(url) = self.queue.try_pop() {
            report.claimed += 1;
            let fetched = AssertUnwindSafe(self.fetcher.fetch(&url))
                .catch_unwind()
                .await;
            let fetched = match fetched {
                Ok(fetched) => fetched,
                Err(panic) => {
                    report.failed += 1;
                    engine_error!(
                        "Fetching url: {} panicked: {}",
                        url,
                        panic_message(panic.as_ref())
                    );
                    continue;
                }
            };
            match fetched {
                Ok(FetchOutcome::Body(body)) => {
                    engine_trace!("content length for url: {} is {}", url, body.len());
                    if self.matcher.is_match(&body) {
                        engine_debug!(
                            "URL {} DID match search term {}",
                            url,
                            self.matcher.pattern()
                        );
                        if self.results.append(url) {
                            report.matched += 1;
                        }
                    } else {
                        engine_trace!("URL {} did NOT match search term", url);
                    }
                }
                Ok(FetchOutcome::NoContent(reason)) => {
                    report.no_content += 1;
                    engine_debug!("url: {} returned no content ({})", url, reason);
                }
                Err(err) => {
                    report.failed += 1;
                    engine_error!("Error reading url: {}, message: {}", url, err);
                }
            }
        }

        engine_debug!(
            "Closing worker {} after {} urls ({} matched)",
            self.name,
            report.claimed,
            report.matched
        );
        report
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
