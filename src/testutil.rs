//! Canned [`Fetch`] implementations for unit tests.

use crate::error::FetchError;
use crate::fetcher::Fetch;
use crate::models::FetchedPage;
use std::io;

/// Returns the same UTF-8 page for every URL.
pub struct StaticFetcher(pub &'static str);

impl Fetch for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
        Ok(FetchedPage::new(
            self.0.as_bytes(),
            Some("text/html; charset=utf-8".to_string()),
        ))
    }
}

/// Returns raw bytes with an optional content type.
pub struct BytesFetcher(pub Vec<u8>, pub Option<&'static str>);

impl Fetch for BytesFetcher {
    async fn fetch(&self, _url: &str) -> Result<FetchedPage, FetchError> {
        Ok(FetchedPage::new(self.0.clone(), self.1.map(str::to_string)))
    }
}

/// Fails every request as if the connection were refused.
pub struct RefusingFetcher;

impl Fetch for RefusingFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        Err(FetchError::Transport {
            url: url.to_string(),
            source: Box::new(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            )),
        })
    }
}

/// A page exercising every rule: padded title, meta description and two
/// `div.date` nodes, one of them empty.
pub const DIGEST_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>News</title>
  <meta name="description" content="Daily digest">
</head>
<body>
  <div class="date"> Jan 1 </div>
  <div class="date"></div>
</body>
</html>"#;
