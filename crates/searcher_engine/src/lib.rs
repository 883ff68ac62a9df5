//! Searcher engine: concurrent fetch-and-match over a list of URLs.
mod engine;
mod feed;
mod fetch;
mod orchestrator;
mod persist;
mod queue;
mod types;
mod worker;

pub use engine::SearchEngine;
pub use feed::{load_feed, FeedError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher, DEFAULT_USER_AGENT};
pub use orchestrator::{SearchOrchestrator, SearchOutcome};
pub use persist::{ensure_output_dir, PersistError, ReportWriter, SearchSummary};
pub use queue::{ResultsCollection, WorkQueue};
pub use tokio_util::sync::CancellationToken;
pub use types::{
    EngineError, FailureKind, FetchError, FetchOutcome, NoContentReason, SearchError,
};
pub use worker::{Worker, WorkerReport};
