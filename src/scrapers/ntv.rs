//! NTV Haber home page.
//!
//! Dates on [NTV](https://www.ntv.com.tr/) show up in two shapes depending on
//! the card layout: `div.date` and `span.time`. Both are collected in page
//! order.

use super::{SelectorStrategy, Source};
use crate::error::StrategyError;

pub const ID: &str = "ntv";

const URL: &str = "https://www.ntv.com.tr/";

pub fn source() -> Result<Source, StrategyError> {
    let strategy = SelectorStrategy::new("meta[name='description']", ["div.date", "span.time"])?;
    Ok(Source::new(ID, "NTV Haber", URL, "ntv_news_data.txt", strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DESCRIPTION_NOT_FOUND;
    use scraper::Html;

    #[test]
    fn test_ntv_mixed_date_shapes() {
        let doc = Html::parse_document(
            r#"<html><body>
                <div class="card"><span class="time">14:05</span></div>
                <div class="date">17.10.2026</div>
                <div class="date"> </div>
            </body></html>"#,
        );
        let (description, dates) = source().unwrap().strategy.extract(&doc);
        assert_eq!(description, DESCRIPTION_NOT_FOUND);
        assert_eq!(dates, vec!["14:05", "17.10.2026"]);
    }
}
