//! HTTP page fetching.
//!
//! The collector depends on the [`Fetch`] trait rather than on `reqwest`
//! directly, so tests can drive the pipeline with canned documents.
//! [`HttpFetcher`] is the real implementation.
//!
//! # Request Shape
//!
//! - Exactly one GET per call, no retries
//! - A fixed browser `User-Agent` (some sources reject unidentified clients)
//! - An overall request timeout set when the client is built
//! - Non-2xx responses still return their body; the status is only logged
//! - The body is returned undecoded along with its `Content-Type`

use crate::error::FetchError;
use crate::models::FetchedPage;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use std::time::Duration;
use tracing::{info, instrument, warn};
use url::Url;

/// Browser identity sent with every request unless overridden.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Overall request timeout unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Trait for downloading a page body.
pub trait Fetch {
    /// Download `url` and return the raw response body and its content type.
    ///
    /// # Errors
    ///
    /// [`FetchError::RequestConstruction`] if the request cannot be built,
    /// [`FetchError::Transport`] if the network call fails.
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// [`Fetch`] implementation backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
}

impl HttpFetcher {
    /// Build a fetcher that identifies itself as `user_agent` and gives up on
    /// a request after `timeout`.
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            user_agent: user_agent.into(),
        })
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "info", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let construction = |reason: String| FetchError::RequestConstruction {
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url).map_err(|e| construction(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(construction(format!(
                    "URL scheme '{scheme}' is not supported (only http/https)"
                )));
            }
        }

        let request = self
            .client
            .get(parsed)
            .header(USER_AGENT, &self.user_agent)
            .build()
            .map_err(|e| construction(e.to_string()))?;

        let transport = |e: reqwest::Error| FetchError::Transport {
            url: url.to_string(),
            source: Box::new(e),
        };

        let response = self.client.execute(request).await.map_err(transport)?;
        let status = response.status();
        if !status.is_success() {
            warn!(%status, "Non-success status; keeping body");
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await.map_err(transport)?;
        info!(
            bytes = body.len(),
            status = status.as_u16(),
            content_type = content_type.as_deref().unwrap_or("-"),
            "Fetched page"
        );
        Ok(FetchedPage::new(body.to_vec(), content_type))
    }
}
