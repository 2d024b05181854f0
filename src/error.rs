//! Error types for ingestion, export and configuration.
//!
//! Analysis itself never fails; validation problems are reported inside
//! [crate::analysis::ComboAnalysis].

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("unable to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse json '{path}': {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("expected top-level JSON array or {{ \"{field}\": [...] }} in '{path}'")]
    UnexpectedShape { path: PathBuf, field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{path}': {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value '{value}' for {name}")]
    InvalidEnv { name: &'static str, value: String },
}

pub type Result<T> = std::result::Result<T, DataError>;
