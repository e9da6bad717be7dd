//! Error types for each stage of a collection run.
//!
//! Every stage returns its own error so callers can tell which step failed:
//! - [`FetchError`]: building or sending the HTTP request
//! - [`CollectError`]: fetching or parsing a page
//! - [`WriteError`]: persisting a record
//! - [`StrategyError`]: compiling a source's selector rules
//! - [`ConfigError`]: loading the YAML sources file
//! - [`RunError`]: one menu/CLI run of a source, end to end

use std::path::PathBuf;
use thiserror::Error;

/// Failure to download a page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be built, usually because the URL is malformed.
    #[error("could not build request for {url}: {reason}")]
    RequestConstruction { url: String, reason: String },

    /// The request was built but the network call failed (DNS, refused
    /// connection, TLS, timeout, or reading the body).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Failure to turn a URL into an [`ExtractedRecord`](crate::models::ExtractedRecord).
#[derive(Debug, Error)]
pub enum CollectError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("could not parse document from {url}: {reason}")]
    Parse { url: String, reason: String },
}

/// Failure to persist a record.
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("could not create {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A strategy definition that cannot be compiled.
#[derive(Debug, Error)]
pub enum StrategyError {
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("dates rule needs at least one selector")]
    NoDateSelectors,
}

/// Failure to load the YAML sources file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("timeout_secs in {} must be at least 1", path.display())]
    ZeroTimeout { path: PathBuf },

    #[error("source {id:?} in config: {source}")]
    Strategy {
        id: String,
        #[source]
        source: StrategyError,
    },

    #[error("source {id:?} in config needs an explicit output: its id yields an empty file name")]
    EmptyOutputName { id: String },
}

/// Failure of one source run (collect then write).
#[derive(Debug, Error)]
pub enum RunError {
    #[error("unknown source {0:?}")]
    UnknownSource(String),

    #[error(transparent)]
    Collect(#[from] CollectError),

    #[error(transparent)]
    Write(#[from] WriteError),
}
