use std::time::Duration;

/// Plain-text report: a header naming the pattern, then one matched URL per line.
pub fn format_report(pattern: &str, matched: &[String]) -> String {
    format!(
        "URLs containing the search term '{pattern}'\n{}",
        matched.join("\n")
    )
}

/// Human-readable elapsed time, e.g. `2.045s`, `12.500ms`, `830us`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros > 1_000_000 {
        let millis = micros / 1000;
        format!("{}.{:03}s", millis / 1000, millis % 1000)
    } else if micros > 1000 {
        format!("{}.{:03}ms", micros / 1000, micros % 1000)
    } else {
        format!("{micros}us")
    }
}
