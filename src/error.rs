//! Error types for word parsing, dictionary loading and session storage.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A string that cannot be turned into a [`crate::word::Word`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WordError {
    #[error("word must be exactly 5 letters, got {0}")]
    InvalidLength(usize),

    #[error("word may only contain the letters A-Z, found {0:?}")]
    InvalidCharacter(char),
}

/// The dictionary could not be produced.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read word list from '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("word list contains no valid 5-letter words")]
    NoValidWords,
}

/// A persistence adapter call failed.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
