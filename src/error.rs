//! Error taxonomy for the download-and-merge pipeline.
//!
//! Every stage has its own error enum so callers (and tests) can tell a
//! failed download apart from a malformed body, a bad join or a failed write.
//! [`Error`] wraps them all for functions that span several stages.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Network failures while retrieving a remote table.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be received.
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-2xx status.
    #[error("request to {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// No response arrived within the configured timeout.
    #[error("request to {url} timed out after {}s", timeout.as_secs_f64())]
    Timeout { url: String, timeout: Duration },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// An API key could not be turned into a header value.
    #[error("API key is not a valid header value")]
    InvalidApiKey,
}

/// Malformed CSV or JSON content.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{origin}: missing header row")]
    MissingHeader { origin: String },

    #[error("{origin}: duplicate column '{column}'")]
    DuplicateColumn { origin: String, column: String },

    #[error("{origin}: malformed CSV: {source}")]
    Csv {
        origin: String,
        #[source]
        source: csv::Error,
    },

    #[error("{origin}: invalid JSON: {source}")]
    Json {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    /// The JSON document is valid but not an array of objects.
    #[error("{origin}: expected a JSON array of objects, {reason}")]
    JsonShape { origin: String, reason: String },
}

/// Failures joining two tables.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error("join column '{column}' not found in {side} table")]
    MissingKey { column: String, side: &'static str },

    /// Suffixing overlapping columns produced a name that already exists.
    #[error("merged table would contain column '{column}' twice")]
    DuplicateColumn { column: String },
}

/// Filesystem failures while persisting or re-reading tables.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("failed to create directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Missing or invalid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{setting} is not configured (set {env_var} or '{yaml_key}' in the config file)")]
    Missing {
        setting: &'static str,
        env_var: &'static str,
        yaml_key: &'static str,
    },

    #[error("invalid URL for {setting} '{value}': {source}")]
    InvalidUrl {
        setting: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid value for {setting} '{value}'")]
    InvalidValue { setting: &'static str, value: String },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures computing dataset summaries.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("column '{column}' not found in dataset")]
    MissingColumn { column: String },
}

/// Any error raised by this crate.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Merge(#[from] MergeError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

pub type Result<T> = std::result::Result<T, Error>;
