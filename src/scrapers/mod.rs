//! Per-site extraction strategies and the registry that names them.
//!
//! Each supported site gets its own module that builds a [`Source`]: an id,
//! a menu label, the page URL, a default output file and the
//! [`ExtractionStrategy`] holding that site's selector rules.
//!
//! # Supported Sources
//!
//! | Source | Module | Description node | Date nodes |
//! |--------|--------|------------------|------------|
//! | The Hacker News | [`hackernews`] | `meta[name='description']` | `span.h-datetime` |
//! | NTV Haber | [`ntv`] | `meta[name='description']` | `div.date`, `span.time` |
//! | Hürriyet | [`hurriyet`] | `meta[property='og:description']` | `span.timestamp`, `time` |
//!
//! # Adding a Source
//!
//! Write a module exporting `source() -> Result<Source, StrategyError>` and
//! list it in [`BUILTIN`], or declare it in the YAML config (see
//! [`crate::config`]). Existing sources are never edited to add a new one.

pub mod hackernews;
pub mod hurriyet;
pub mod ntv;
pub mod rules;

use crate::error::StrategyError;
use scraper::Html;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info};

pub use rules::SelectorStrategy;

/// Rules for pulling a description and date strings out of one page shape.
///
/// Implementations are stateless and shared across runs, so they must be
/// `Send + Sync`. Neither method fails: a rule that matches nothing yields
/// its default.
pub trait ExtractionStrategy: Send + Sync + fmt::Debug {
    /// The page's summary description, or the strategy's fallback sentinel.
    fn describe(&self, document: &Html) -> String;

    /// Every date-bearing string on the page, in document order.
    fn dates(&self, document: &Html) -> Vec<String>;

    /// Both rules at once.
    fn extract(&self, document: &Html) -> (String, Vec<String>) {
        (self.describe(document), self.dates(document))
    }
}

/// A named site the tool knows how to collect.
#[derive(Debug, Clone)]
pub struct Source {
    /// Registry key, e.g. `"ntv"`.
    pub id: String,
    /// Human-readable name shown in the menu.
    pub label: String,
    /// Page fetched for this source.
    pub url: String,
    /// Default destination file name.
    pub output: String,
    /// Selector rules for the page.
    pub strategy: Arc<dyn ExtractionStrategy>,
}

impl Source {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        url: impl Into<String>,
        output: impl Into<String>,
        strategy: impl ExtractionStrategy + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            url: url.into(),
            output: output.into(),
            strategy: Arc::new(strategy),
        }
    }
}

/// Constructors for the sources compiled into the binary, in menu order.
pub const BUILTIN: &[fn() -> Result<Source, StrategyError>] =
    &[hackernews::source, ntv::source, hurriyet::source];

/// Ordered map from source id to [`Source`].
///
/// Order is registration order and drives menu numbering.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every [`BUILTIN`] source.
    pub fn with_builtin() -> Result<Self, StrategyError> {
        let mut registry = Self::new();
        for build in BUILTIN {
            registry.register(build()?);
        }
        info!(count = registry.len(), "Registered built-in sources");
        Ok(registry)
    }

    /// Add `source`, or replace the entry with the same id in place.
    ///
    /// Returns the replaced entry, if any.
    pub fn register(&mut self, source: Source) -> Option<Source> {
        match self.sources.iter_mut().find(|s| s.id == source.id) {
            Some(slot) => {
                debug!(id = %source.id, "Replacing registered source");
                Some(std::mem::replace(slot, source))
            }
            None => {
                debug!(id = %source.id, "Registering source");
                self.sources.push(source);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Source> {
        self.sources.iter()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
