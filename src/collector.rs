//! The collection pipeline: fetch a page, parse it, extract a record.
//!
//! [`collect`] runs one page through a [`Fetch`] implementation and an
//! [`ExtractionStrategy`] and returns an [`ExtractedRecord`].
//! [`collect_source`] adds the final step and writes the record to disk.
//!
//! Bodies are decoded with the `charset` the server declares. Without one
//! (or with a label nobody knows) the encoding is guessed from the bytes, so
//! legacy ISO-8859-9 and windows-1254 pages read the same as UTF-8 ones.
//!
//! Each call owns its document and record outright; nothing is shared between
//! calls except the read-only strategy, so a failed run leaves later runs
//! unaffected.

use crate::error::{CollectError, RunError};
use crate::fetcher::Fetch;
use crate::models::{ExtractedRecord, FetchedPage};
use crate::outputs::text::write_record;
use crate::scrapers::{ExtractionStrategy, Source};
use crate::utils::truncate_for_log;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("static title selector"));

/// Fetch `url` and extract a record from it with `strategy`.
///
/// # Errors
///
/// [`CollectError::Fetch`] when the download fails, [`CollectError::Parse`]
/// when the body is binary rather than text. Missing elements are never an
/// error; they fall back to the strategy's defaults.
#[instrument(level = "info", skip(fetcher, strategy))]
pub async fn collect<F>(
    fetcher: &F,
    url: &str,
    strategy: &dyn ExtractionStrategy,
) -> Result<ExtractedRecord, CollectError>
where
    F: Fetch,
{
    let page = fetcher.fetch(url).await?;
    let record = extract_record(url, page, strategy)?;
    info!(
        title = %record.title,
        dates = record.dates.len(),
        "Collected page"
    );
    Ok(record)
}

/// Parse a fetched page and apply the title rule and `strategy` to it.
///
/// The page is consumed; the parsed document lives only for this call.
pub fn extract_record(
    url: &str,
    page: FetchedPage,
    strategy: &dyn ExtractionStrategy,
) -> Result<ExtractedRecord, CollectError> {
    let html = decode_body(url, &page)?;
    debug!(preview = %truncate_for_log(&html, 200), "Parsing document");

    let document = Html::parse_document(&html);
    let title = extract_title(&document);
    let (description, dates) = strategy.extract(&document);

    Ok(ExtractedRecord::new(title, description, dates))
}

/// Decode a fetched body to text.
///
/// A byte order mark wins, then a known `charset` from the content type, then
/// an encoding guessed from the bytes. Malformed sequences become U+FFFD.
pub fn decode_body(url: &str, page: &FetchedPage) -> Result<String, CollectError> {
    let declared = page.charset().and_then(|label| {
        let encoding = Encoding::for_label(label.as_bytes());
        if encoding.is_none() {
            warn!(%label, "Unknown charset; guessing encoding from the body");
        }
        encoding
    });
    let encoding = declared.unwrap_or_else(|| {
        let mut detector = EncodingDetector::new();
        detector.feed(&page.body, true);
        detector.guess(None, true)
    });

    let (text, used, had_errors) = encoding.decode(&page.body);
    if had_errors {
        debug!(encoding = used.name(), "Replaced malformed byte sequences");
    }
    if text.contains('\0') {
        return Err(CollectError::Parse {
            url: url.to_string(),
            reason: format!("body is binary, not {} text", used.name()),
        });
    }
    Ok(text.into_owned())
}

/// Trimmed text of the first `<title>` element, or `""` when there is none.
pub fn extract_title(document: &Html) -> String {
    document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|title| title.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

/// Collect `url` with the source's strategy and write the record to
/// `destination`.
///
/// The destination is only touched once collection has succeeded.
#[instrument(level = "info", skip_all, fields(source = %source.id, %url, destination = %destination.display()))]
pub async fn collect_source<F>(
    fetcher: &F,
    source: &Source,
    url: &str,
    destination: &Path,
) -> Result<ExtractedRecord, RunError>
where
    F: Fetch,
{
    let record = collect(fetcher, url, source.strategy.as_ref()).await?;
    write_record(destination, &record).await?;
    Ok(record)
}
