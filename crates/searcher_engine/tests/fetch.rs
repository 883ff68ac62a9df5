use std::time::Duration;

use searcher_engine::{
    FailureKind, FetchOutcome, FetchSettings, Fetcher, NoContentReason, ReqwestFetcher,
    DEFAULT_USER_AGENT,
};
use wiremock::matchers::{header, method, path};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

struct UserAgentIs(&'static str);

impl Match for UserAgentIs {
    fn matches(&self, request: &Request) -> bool {
        request
            .headers
            .get("user-agent")
            .and_then(|value| value.to_str().ok())
            == Some(self.0)
    }
}

fn fetcher(settings: FetchSettings) -> ReqwestFetcher {
    ReqwestFetcher::new(settings).expect("client builds")
}

#[tokio::test]
async fn fetcher_returns_body_with_identifying_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/doc"))
        .and(UserAgentIs(DEFAULT_USER_AGENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/doc", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.expect("fetch ok");
    assert_eq!(outcome, FetchOutcome::Body("<html>ok</html>".to_string()));
}

#[tokio::test]
async fn non_redirect_status_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/missing", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::HttpStatus(404))
    );
}

#[tokio::test]
async fn slow_response_times_out_as_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_string("slow"),
        )
        .mount(&server)
        .await;

    let settings = FetchSettings {
        request_timeout: Duration::from_millis(50),
        ..FetchSettings::default()
    };
    let url = format!("{}/slow", server.uri());
    let outcome = fetcher(settings).fetch(&url).await.unwrap();
    assert_eq!(outcome, FetchOutcome::NoContent(NoContentReason::Timeout));
}

#[tokio::test]
async fn follows_one_relative_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/final"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(200).set_body_string("landed"))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/start", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Body("landed".to_string()));
}

#[tokio::test]
async fn second_redirect_hop_is_not_followed() {
    let server = MockServer::start().await;
    for (from, to) in [("/a", "/b"), ("/b", "/a")] {
        Mock::given(method("GET"))
            .and(path(from))
            .respond_with(ResponseTemplate::new(301).insert_header("Location", to))
            .mount(&server)
            .await;
    }

    let url = format!("{}/a", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::RedirectLimitExceeded)
    );
}

#[tokio::test]
async fn redirect_limit_is_configurable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/one"))
        .respond_with(ResponseTemplate::new(303).insert_header("Location", "/two"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/two"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/three"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/three"))
        .respond_with(ResponseTemplate::new(200).set_body_string("third"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        redirect_limit: 2,
        ..FetchSettings::default()
    };
    let url = format!("{}/one", server.uri());
    let outcome = fetcher(settings).fetch(&url).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Body("third".to_string()));
}

#[tokio::test]
async fn redirect_without_location_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nowhere"))
        .respond_with(ResponseTemplate::new(302))
        .mount(&server)
        .await;

    let url = format!("{}/nowhere", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::MissingLocation)
    );
}

#[tokio::test]
async fn refused_connection_is_unreachable() {
    let outcome = fetcher(FetchSettings::default())
        .fetch("http://127.0.0.1:1/")
        .await
        .unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::Unreachable)
    );
}

#[tokio::test]
async fn malformed_url_is_an_error() {
    let err = fetcher(FetchSettings::default())
        .fetch("not a url")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn oversized_body_is_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/large"))
        .respond_with(ResponseTemplate::new(200).set_body_string("01234567890"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        max_bytes: 10,
        ..FetchSettings::default()
    };
    let url = format!("{}/large", server.uri());
    let outcome = fetcher(settings).fetch(&url).await.unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::TooLarge { max_bytes: 10 })
    );
}

#[tokio::test]
async fn invalid_utf8_is_replaced() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bytes"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(vec![b'f', 0xff, b'o'], "text/plain"),
        )
        .mount(&server)
        .await;

    let url = format!("{}/bytes", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(outcome.body(), Some("f\u{FFFD}o"));
}

async fn cookie_gated_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("set-cookie", "sid=abc; Path=/")
                .insert_header("location", "/final"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .and(header("cookie", "sid=abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("with cookie"))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/final"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn cookie_set_on_redirect_is_sent_to_target() {
    let server = cookie_gated_server().await;

    let url = format!("{}/start", server.uri());
    let outcome = fetcher(FetchSettings::default()).fetch(&url).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Body("with cookie".to_string()));
}

#[tokio::test]
async fn cookies_are_dropped_when_not_accepted() {
    let server = cookie_gated_server().await;

    let settings = FetchSettings {
        accept_cookies: false,
        ..FetchSettings::default()
    };
    let url = format!("{}/start", server.uri());
    let outcome = fetcher(settings).fetch(&url).await.unwrap();
    assert_eq!(
        outcome,
        FetchOutcome::NoContent(NoContentReason::HttpStatus(403))
    );
}
