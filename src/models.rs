//! Data models for collected page records.
//!
//! - [`FetchedPage`]: a raw response body and its declared content type
//! - [`ExtractedRecord`]: what one collection run produces from one page
//!
//! A record is built once by the collector, handed by value to the writer,
//! then dropped.

/// Sentinel description used when a page has no matching description node.
pub const DESCRIPTION_NOT_FOUND: &str = "description not found";

/// A downloaded page before decoding.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchedPage {
    /// Raw response body.
    pub body: Vec<u8>,
    /// `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
}

impl FetchedPage {
    pub fn new(body: impl Into<Vec<u8>>, content_type: Option<String>) -> Self {
        Self {
            body: body.into(),
            content_type,
        }
    }

    /// The `charset` parameter of the content type, lowercased and unquoted.
    pub fn charset(&self) -> Option<String> {
        let content_type = self.content_type.as_deref()?.to_lowercase();
        content_type.split(';').find_map(|part| {
            part.trim()
                .strip_prefix("charset=")
                .map(|charset| charset.trim_matches(|c: char| c == '"' || c == '\'').to_string())
        })
    }
}

/// The title, description and timestamp strings pulled from a single page.
///
/// # Invariants
///
/// * `title` has no surrounding whitespace and is empty when the page has no
///   `<title>` element.
/// * `description` is the strategy's fallback sentinel when the page has no
///   matching node.
/// * `dates` keeps document order and holds no empty strings. It may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExtractedRecord {
    /// Trimmed text of the first `<title>` element.
    pub title: String,
    /// Content of the strategy's description node, or its fallback.
    pub description: String,
    /// Trimmed text of every date-bearing node, in document order.
    pub dates: Vec<String>,
}

impl ExtractedRecord {
    pub fn new(title: impl Into<String>, description: impl Into<String>, dates: Vec<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            dates,
        }
    }
}
