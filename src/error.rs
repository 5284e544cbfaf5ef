use std::path::PathBuf;

use thiserror::Error;

/// Why a trigger element could not be turned into a descriptor (or part of one).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TriggerError {
    #[error("trigger has no target URL (href)")]
    MissingUrl,
    #[error("modifier class {0:?} does not start with \"modal-class-\"")]
    InvalidModifierClass(String),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid URL {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("relative URL {0:?} cannot be fetched without a base_url")]
    RelativeWithoutBase(String),
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// A content-container selector that the HTML parser rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid content selector {selector:?}: {reason}")]
pub struct SelectorError {
    pub selector: String,
    pub reason: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown command: {0:?}")]
    Unknown(String),
    #[error("unknown close reason {0:?} (expected dismiss, backdrop or escape)")]
    UnknownReason(String),
    #[error("click needs a JSON object of attributes")]
    MissingPayload,
    #[error("click attributes must be a JSON object of strings: {0}")]
    InvalidPayload(#[from] serde_json::Error),
}
