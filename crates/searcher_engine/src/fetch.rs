use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_trace};
use futures_util::StreamExt;
use reqwest::header::LOCATION;
use reqwest::{StatusCode, Url};

use crate::{FailureKind, FetchError, FetchOutcome, NoContentReason};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_13_4) \
AppleWebKit/605.1.15 (KHTML, like Gecko) Version/11.1 Safari/605.1.15";

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    /// Bodies larger than this are reported as `TooLarge` and never matched.
    pub max_bytes: u64,
    pub user_agent: String,
    /// Keep cookies set by a response (including redirect responses) for later
    /// requests made through the same client.
    pub accept_cookies: bool,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(10),
            redirect_limit: 1,
            max_bytes: 10 * 1024 * 1024,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_cookies: true,
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Retrieve the full body of `url`.
    ///
    /// Expected network outcomes (timeouts, unreachable hosts, non-200 statuses)
    /// come back as `Ok(FetchOutcome::NoContent(..))`; `Err` is reserved for
    /// faults the caller has to decide about.
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    settings: FetchSettings,
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: FetchSettings) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .user_agent(settings.user_agent.as_str())
            .cookie_store(settings.accept_cookies)
            // Redirects are followed by hand so the hop count stays bounded.
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|err| FetchError::new(FailureKind::Client, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &FetchSettings {
        &self.settings
    }

    async fn read_body(
        &self,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<FetchOutcome, FetchError> {
        let max_bytes = self.settings.max_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                engine_info!(
                    "URL: {} declared {} bytes, over limit; not searched",
                    url,
                    content_len
                );
                return Ok(FetchOutcome::NoContent(NoContentReason::TooLarge { max_bytes }));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(err) => return classify_error(url.as_str(), err),
            };
            if bytes.len() as u64 + chunk.len() as u64 > max_bytes {
                engine_info!("URL: {} body exceeded {} bytes; not searched", url, max_bytes);
                return Ok(FetchOutcome::NoContent(NoContentReason::TooLarge { max_bytes }));
            }
            bytes.extend_from_slice(&chunk);
        }

        let (text, _, had_errors) = encoding_rs::UTF_8.decode(&bytes);
        if had_errors {
            engine_trace!("URL: {} body had invalid UTF-8, replaced", url);
        }
        Ok(FetchOutcome::Body(text.into_owned()))
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, FetchError> {
        engine_debug!("Reading url: {}", url);
        let mut current = Url::parse(url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, format!("{url}: {err}")))?;
        let mut hops = 0;

        loop {
            let response = match self.client.get(current.clone()).send().await {
                Ok(response) => response,
                Err(err) => return classify_error(current.as_str(), err),
            };

            let status = response.status();
            if status == StatusCode::OK {
                return self.read_body(&current, response).await;
            }
            engine_debug!("URL: {} returned status code {}", current, status.as_u16());

            if !is_followed_redirect(status) {
                return Ok(FetchOutcome::NoContent(NoContentReason::HttpStatus(
                    status.as_u16(),
                )));
            }
            if hops >= self.settings.redirect_limit {
                engine_debug!("URL: {} redirect limit {} reached", url, hops);
                return Ok(FetchOutcome::NoContent(
                    NoContentReason::RedirectLimitExceeded,
                ));
            }
            let Some(location) = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
            else {
                return Ok(FetchOutcome::NoContent(NoContentReason::MissingLocation));
            };
            let next = current.join(location).map_err(|err| {
                FetchError::new(FailureKind::InvalidUrl, format!("{location}: {err}"))
            })?;
            engine_debug!("Redirecting from {} to {}", current, next);
            current = next;
            hops += 1;
        }
    }
}

// 301, 302 and 303 only; 307/308 fall through as no content.
fn is_followed_redirect(status: StatusCode) -> bool {
    matches!(status.as_u16(), 301..=303)
}

fn classify_error(url: &str, err: reqwest::Error) -> Result<FetchOutcome, FetchError> {
    if err.is_timeout() {
        engine_trace!("URL: {} TIMEOUT", url);
        return Ok(FetchOutcome::NoContent(NoContentReason::Timeout));
    }
    if err.is_connect() {
        engine_debug!("URL: {} unreachable: {}", url, err);
        return Ok(FetchOutcome::NoContent(NoContentReason::Unreachable));
    }
    if err.is_builder() {
        return Err(FetchError::new(FailureKind::InvalidUrl, err.to_string()));
    }
    Err(FetchError::new(FailureKind::Network, err.to_string()))
}
