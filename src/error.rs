use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the classifier.
///
/// A rule failing to match is never an error; only caller mistakes and
/// reference-data or configuration failures end up here.
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("line index {index} out of range ({len} lines)")]
    LineOutOfRange { index: usize, len: usize },

    #[error("merge out of sequence: expected line {expected}, got {got}")]
    OutOfSequence { expected: usize, got: usize },

    #[error("failed to read gazetteer {path:?}: {source}")]
    Gazetteer {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ClassifierError>;
