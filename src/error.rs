//! Error types for feature extraction.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Result type alias for the extraction pipeline.
pub type Result<T> = std::result::Result<T, FeatureError>;

/// Errors that abort a run.
///
/// Malformed word records, empty sentences and a degenerate concept
/// normalization are recovered where they occur and never show up here.
#[derive(Debug, Error)]
pub enum FeatureError {
    /// A document kept no sentence at all, so it has no title.
    #[error("document has no retained sentences: {id}")]
    EmptyDocument { id: String },

    /// idf was requested for a stem that occurs in no document of the topic.
    #[error("stem does not occur in the corpus: {stem:?}")]
    ZeroDocumentFrequency { stem: String },

    /// Corpus or summary directory does not exist.
    #[error("directory not found: {}", .0.display())]
    MissingDirectory(PathBuf),

    /// Reading a file or listing a directory failed.
    #[error("io error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The annotation markup could not be tokenized.
    #[error("malformed markup in {}: {source}", .path.display())]
    Xml {
        path: PathBuf,
        #[source]
        source: quick_xml::Error,
    },

    /// CBOR encoding of a feature matrix failed.
    #[error("cbor error: {0}")]
    Cbor(#[from] serde_cbor::Error),

    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FeatureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FeatureError::Io { path: path.into(), source }
    }
}
