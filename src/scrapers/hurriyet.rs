//! Hürriyet home page.
//!
//! [Hürriyet](https://www.hurriyet.com.tr/) has no plain meta description, so
//! the Open Graph `og:description` is used. Dates come from `span.timestamp`
//! and semantic `<time>` elements.

use super::{SelectorStrategy, Source};
use crate::error::StrategyError;

pub const ID: &str = "hurriyet";

const URL: &str = "https://www.hurriyet.com.tr/";

pub fn source() -> Result<Source, StrategyError> {
    let strategy =
        SelectorStrategy::new("meta[property='og:description']", ["span.timestamp", "time"])?;
    Ok(Source::new(ID, "Hürriyet", URL, "hurriyet_data.txt", strategy))
}
