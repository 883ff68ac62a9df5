use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEADER: &str = "\"Rank\",\"URL\",\"Linking Root Domains\",\"External Links\",\"mozRank\",\"mozTrust\"";

fn searcher() -> Command {
    let mut cmd = Command::cargo_bin("website_searcher").unwrap();
    cmd.env_remove("WEBSITE_SEARCHER_WORKERS")
        .env_remove("WEBSITE_SEARCHER_MAX_URLS")
        .env_remove("WEBSITE_SEARCHER_PATTERN")
        .env_remove("WEBSITE_SEARCHER_URLS")
        .env_remove("WEBSITE_SEARCHER_OUTPUT")
        .args(["--log-level", "warn"]);
    cmd
}

#[test]
fn rejects_out_of_range_worker_counts() {
    for workers in ["0", "51"] {
        searcher()
            .args(["--workers", workers])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--workers"));
    }
}

#[test]
fn missing_feed_fails_without_report() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("results.txt");

    searcher()
        .arg("--urls")
        .arg(temp.path().join("absent.csv"))
        .arg("--output")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("couldn't load the list of URLs"));
    assert!(!output.exists());
}

#[test]
fn unreachable_sites_produce_header_only_report() {
    let temp = TempDir::new().unwrap();
    let feed = temp.path().join("urls.csv");
    fs::write(
        &feed,
        format!("{HEADER}\n1,\"http://127.0.0.1:1/a\",1,1,1.0,1.0\n2,\"http://127.0.0.1:1/b\",1,1,1.0,1.0\n"),
    )
    .unwrap();
    let output = temp.path().join("results.txt");

    searcher()
        .args(["--workers", "2", "--pattern", ".*"])
        .arg("--urls")
        .arg(&feed)
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 results from 2 urls"));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "URLs containing the search term '.*'\n"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn end_to_end_search_over_http() {
    let server = MockServer::start().await;
    let pages = [
        ("/social", "<html>\n<a href=\"https://twitter.com/us\">follow</a>\n</html>"),
        ("/plain", "<html>\nnothing here\n</html>"),
    ];
    for (page, body) in pages {
        Mock::given(method("GET"))
            .and(path(page))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(301).insert_header("Location", "/social"))
        .mount(&server)
        .await;
    let feed = format!(
        "{HEADER}\n1,\"{uri}/social\",1,1,1.0,1.0\n2,\"{uri}/plain\",1,1,1.0,1.0\n3,\"{uri}/moved\",1,1,1.0,1.0\n4,\"{uri}/missing\",1,1,1.0,1.0\n",
        uri = server.uri()
    );
    Mock::given(method("GET"))
        .and(path("/urls.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(feed))
        .mount(&server)
        .await;

    let temp = TempDir::new().unwrap();
    let output = temp.path().join("results.txt");
    let summary = temp.path().join("summary.json");

    searcher()
        .args(["--workers", "3"])
        .arg("--urls")
        .arg(format!("{}/urls.txt", server.uri()))
        .arg("--output")
        .arg(&output)
        .arg("--summary")
        .arg(&summary)
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 2 results from 4 urls"));

    let report = fs::read_to_string(&output).unwrap();
    let mut lines: Vec<_> = report.lines().collect();
    assert_eq!(
        lines.remove(0),
        "URLs containing the search term '(?s).*(facebook|twitter).*'"
    );
    lines.sort();
    assert_eq!(
        lines,
        vec![
            format!("{}/moved", server.uri()),
            format!("{}/social", server.uri())
        ]
    );

    let summary = fs::read_to_string(&summary).unwrap();
    assert!(summary.contains("\"searched\": 4"));
}
