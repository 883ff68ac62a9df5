const URL_COLUMN: usize = 1;

/// Extract URLs from the ranked-domains CSV feed.
///
/// Expected shape:
///
/// ```text
/// "Rank","URL","Linking Root Domains","External Links","mozRank","mozTrust"
/// 1,"facebook.com/",9616487,1688316928,9.54,9.34
/// ```
///
/// The header line is skipped. Rows without a URL column are ignored.
pub fn parse_feed(contents: &str) -> Vec<String> {
    contents
        .lines()
        .skip(1)
        .filter_map(|line| line.split(',').nth(URL_COLUMN))
        .map(|raw| raw.replace('"', ""))
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(|raw| normalize_url(&raw))
        .collect()
}

/// Prefix `http://` when the value carries no scheme.
pub fn normalize_url(raw: &str) -> String {
    if raw.starts_with("http") {
        raw.to_string()
    } else {
        format!("http://{raw}")
    }
}

pub fn truncate_urls(mut urls: Vec<String>, max_urls: usize) -> Vec<String> {
    urls.truncate(max_urls);
    urls
}
