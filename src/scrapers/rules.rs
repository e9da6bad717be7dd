//! Selector-driven extraction rules shared by every source.
//!
//! A [`SelectorStrategy`] is two rules compiled once and evaluated against a
//! parsed page:
//!
//! 1. **Description**: the first node matching a selector, read through one
//!    attribute (`content` by default). Falls back to a sentinel string when
//!    nothing matches or the first match lacks the attribute.
//! 2. **Dates**: every node matching any of several selectors. Each node is
//!    taken once, in document order, with its text trimmed. Nodes whose text
//!    trims to nothing are dropped; repeats are kept.
//!
//! Rules never fail at extraction time. Bad selectors are rejected when the
//! strategy is built.

use super::ExtractionStrategy;
use crate::error::StrategyError;
use crate::models::DESCRIPTION_NOT_FOUND;
use scraper::{Html, Selector};

/// Attribute read from the description node unless overridden.
pub const DEFAULT_DESCRIPTION_ATTRIBUTE: &str = "content";

/// Compile one CSS selector, keeping the source text in the error.
pub fn compile(css: &str) -> Result<Selector, StrategyError> {
    Selector::parse(css).map_err(|e| StrategyError::InvalidSelector {
        selector: css.to_string(),
        reason: e.to_string(),
    })
}

/// An [`ExtractionStrategy`] described entirely by CSS selectors.
#[derive(Debug, Clone)]
pub struct SelectorStrategy {
    description: Selector,
    attribute: String,
    fallback: String,
    dates: Selector,
}

impl SelectorStrategy {
    /// Build a strategy from a description selector and one or more date
    /// selectors. Date selectors are OR-ed: a node matching any of them is
    /// taken once, in document order.
    ///
    /// # Errors
    ///
    /// [`StrategyError::InvalidSelector`] for a selector that does not parse,
    /// [`StrategyError::NoDateSelectors`] when `date_selectors` is empty.
    pub fn new<I, S>(description_selector: &str, date_selectors: I) -> Result<Self, StrategyError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let description = compile(description_selector)?;

        let mut parts = Vec::new();
        for css in date_selectors {
            let css = css.as_ref().trim();
            compile(css)?;
            parts.push(css.to_string());
        }
        if parts.is_empty() {
            return Err(StrategyError::NoDateSelectors);
        }
        let dates = compile(&parts.join(", "))?;

        Ok(Self {
            description,
            attribute: DEFAULT_DESCRIPTION_ATTRIBUTE.to_string(),
            fallback: DESCRIPTION_NOT_FOUND.to_string(),
            dates,
        })
    }

    /// Read the description from `attribute` instead of `content`.
    pub fn with_attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = attribute.into();
        self
    }

    /// Use `fallback` when the description node is missing.
    pub fn with_fallback(mut self, fallback: impl Into<String>) -> Self {
        self.fallback = fallback.into();
        self
    }
}

impl ExtractionStrategy for SelectorStrategy {
    fn describe(&self, document: &Html) -> String {
        document
            .select(&self.description)
            .next()
            .and_then(|node| node.value().attr(&self.attribute))
            .map(str::to_string)
            .unwrap_or_else(|| self.fallback.clone())
    }

    fn dates(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.dates)
            .filter_map(|node| {
                let text = node.text().collect::<String>();
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }
}
