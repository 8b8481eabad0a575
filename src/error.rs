use std::io;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// All the ways catalog loading, formatting, or evaluation can fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A calpgm-encoded integer field could not be decoded.
    #[error("cannot decode calpgm integer field {field:?}")]
    Decode { field: String },

    /// A line does not match the expected fixed-width layout.
    /// Aborts the whole load: no partial catalogs are ever returned.
    #[error("line {line}: {reason}")]
    Format { line: usize, reason: String },

    /// Invalid caller-supplied parameter (e.g. a non-positive temperature).
    #[error("invalid input: {0}")]
    Input(String),

    /// Partition-function evaluation or interpolation could not proceed.
    #[error("partition function: {0}")]
    PartitionFunction(String),

    #[error("i/o error")]
    Io(#[from] io::Error),

    /// Remote catalog query failed.
    #[cfg(feature = "fetch")]
    #[error("fetch error")]
    Fetch(#[from] Box<ureq::Error>),
}

impl CatalogError {
    /// Shorthand for a [`CatalogError::Format`] at a given 1-based line.
    pub fn format(line: usize, reason: impl Into<String>) -> Self {
        CatalogError::Format {
            line,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
