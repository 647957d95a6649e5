//! Run error types.

use std::{io, path::PathBuf};

use santa_core::AssignmentError;
use santa_crypto::{KeyStoreError, SealError};
use thiserror::Error;

/// Errors that abort a run.
///
/// Every variant is fatal. When one is returned, no output document has been
/// written by this run.
#[derive(Error, Debug)]
pub enum RunError {
    /// Invalid configuration, rejected before any file is touched.
    #[error("configuration error: {0}")]
    Config(String),

    /// The key-store document could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The output document could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The key-store document is malformed or holds an undecodable key.
    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),

    /// No valid assignment could be drawn.
    #[error(transparent)]
    Assignment(#[from] AssignmentError),

    /// An assignment could not be sealed.
    #[error(transparent)]
    Seal(#[from] SealError),
}

impl RunError {
    /// Pipeline stage that failed, for diagnostics.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Read { .. } | Self::KeyStore(_) => "load",
            Self::Assignment(_) => "generate",
            Self::Seal(_) => "encrypt",
            Self::Write { .. } => "write",
        }
    }
}
