use std::time::Instant;

use anyhow::Context;
use engine_logging::engine_info;
use searcher_core::{format_elapsed, format_report};
use searcher_engine::{FetchSettings, ReportWriter, SearchEngine, SearchSummary};

use crate::cli::Cli;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    engine_logging::initialize(&cli.log_destination(), cli.log_level());

    let settings = cli.settings();
    let pool = settings.validate().context("invalid settings")?;
    engine_info!(
        "Running with settings: max workers: {}, max URLs to search: {}, urls location: {}, search term: {}",
        settings.max_workers,
        settings.max_urls,
        settings.urls_location,
        settings.pattern
    );

    let started = Instant::now();
    let engine = SearchEngine::new(pool, FetchSettings::default())
        .context("failed to start search engine")?;
    let urls = engine
        .load_feed(&settings.urls_location, settings.max_urls)
        .context("couldn't load the list of URLs")?;
    let outcome = engine
        .search(urls, &settings.pattern)
        .context("website search failed")?;

    let writer = ReportWriter::new();
    let report = format_report(&settings.pattern, &outcome.matched);
    let written = writer
        .write_text(&settings.output, &report)
        .with_context(|| format!("error writing output to file {:?}", settings.output))?;

    let elapsed = started.elapsed();
    if let Some(path) = cli.summary_path() {
        let summary = SearchSummary {
            pattern: settings.pattern.clone(),
            searched: outcome.searched,
            matched: outcome.matched.clone(),
            elapsed_ms: u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        };
        writer
            .write_summary(path, &summary)
            .with_context(|| format!("error writing summary to file {:?}", path))?;
    }

    engine_info!(
        "Website search is complete. Found {} results from {} urls in {}; report at {:?}",
        outcome.matched.len(),
        outcome.searched,
        format_elapsed(elapsed),
        written
    );
    println!(
        "Website search is complete. Found {} results from {} urls in {}",
        outcome.matched.len(),
        outcome.searched,
        format_elapsed(elapsed)
    );
    Ok(())
}
