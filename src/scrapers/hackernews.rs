//! The Hacker News front page.
//!
//! [The Hacker News](https://thehackernews.com/) carries a standard
//! `<meta name="description">` and stamps every post card with a
//! `span.h-datetime`.

use super::{SelectorStrategy, Source};
use crate::error::StrategyError;

pub const ID: &str = "hackernews";

const URL: &str = "https://thehackernews.com/";

pub fn source() -> Result<Source, StrategyError> {
    let strategy = SelectorStrategy::new("meta[name='description']", ["span.h-datetime"])?;
    Ok(Source::new(
        ID,
        "The Hacker News",
        URL,
        "hacker_news_data.txt",
        strategy,
    ))
}
