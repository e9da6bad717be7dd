//! YAML configuration: client settings and extra sources.
//!
//! Every key is optional. Command-line flags win over values set here.
//!
//! ```yaml
//! user_agent: "Mozilla/5.0 (X11; Linux x86_64) ..."
//! timeout_secs: 20
//! output_dir: ./digests
//! sources:
//!   - id: bbc
//!     label: BBC News
//!     url: https://www.bbc.com/news
//!     output: bbc_data.txt            # default: <slugified id>_data.txt
//!     description:
//!       selector: "meta[property='og:description']"
//!       attribute: content            # default: content
//!       fallback: "no summary"        # default: description not found
//!     dates: ["time", "span.date"]
//! ```
//!
//! A source whose `id` matches a built-in replaces it at the same menu
//! position; new ids are appended.

use crate::error::ConfigError;
use crate::scrapers::rules::DEFAULT_DESCRIPTION_ATTRIBUTE;
use crate::scrapers::{SelectorStrategy, Source, SourceRegistry};
use crate::utils::slugify;
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Top-level contents of the config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DigestConfig {
    /// `User-Agent` sent with every request.
    #[serde(default)]
    pub user_agent: Option<String>,
    /// Overall request timeout in seconds; must be at least 1.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Directory default output files are written into.
    #[serde(default)]
    pub output_dir: Option<String>,
    /// Sources added to (or replacing) the built-in ones.
    #[serde(default)]
    pub sources: Vec<SourceSpec>,
}

/// One source declared in the config file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    pub url: String,
    #[serde(default)]
    pub output: Option<String>,
    pub description: DescriptionSpec,
    pub dates: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DescriptionSpec {
    pub selector: String,
    #[serde(default = "default_attribute")]
    pub attribute: String,
    #[serde(default)]
    pub fallback: Option<String>,
}

fn default_attribute() -> String {
    DEFAULT_DESCRIPTION_ATTRIBUTE.to_string()
}

impl SourceSpec {
    /// Compile this spec into a registry [`Source`].
    ///
    /// Without an explicit `output` the file name is derived from the id, and
    /// an id with nothing usable in it is rejected.
    pub fn build(&self) -> Result<Source, ConfigError> {
        let strategy_failed = |source| ConfigError::Strategy {
            id: self.id.clone(),
            source,
        };
        let mut strategy = SelectorStrategy::new(&self.description.selector, &self.dates)
            .map_err(strategy_failed)?
            .with_attribute(&self.description.attribute);
        if let Some(fallback) = &self.description.fallback {
            strategy = strategy.with_fallback(fallback);
        }

        let label = self.label.clone().unwrap_or_else(|| self.id.clone());
        let output = match &self.output {
            Some(output) => output.clone(),
            None => {
                let slug = slugify(&self.id);
                if slug.is_empty() {
                    return Err(ConfigError::EmptyOutputName {
                        id: self.id.clone(),
                    });
                }
                format!("{slug}_data.txt")
            }
        };
        Ok(Source::new(&self.id, label, &self.url, output, strategy))
    }
}

impl DigestConfig {
    /// Read and parse the config file at `path`.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yaml::from_str(&yaml).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if config.timeout_secs == Some(0) {
            return Err(ConfigError::ZeroTimeout {
                path: path.to_path_buf(),
            });
        }
        info!(sources = config.sources.len(), "Loaded configuration");
        Ok(config)
    }

    /// Compile every configured source into `registry`.
    ///
    /// Nothing is registered if any source fails to compile.
    pub fn register_sources(&self, registry: &mut SourceRegistry) -> Result<usize, ConfigError> {
        let built = self
            .sources
            .iter()
            .map(SourceSpec::build)
            .collect::<Result<Vec<_>, _>>()?;

        let count = built.len();
        for source in built {
            let id = source.id.clone();
            if registry.register(source).is_some() {
                warn!(%id, "Config source replaces an existing source");
            }
        }
        Ok(count)
    }
}
