//! Error types for the batch crate.
//!
//! Only conditions that halt a whole run are errors here. Failures of a
//! single file are captured as [`crate::FileOutcome`] values so the batch
//! always runs to the end.

use std::io;
use std::path::PathBuf;

use boltslot_core::{AdjustmentError, Thickness};
use thiserror::Error;

/// Errors that stop a batch run before or while it starts.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The input directory is missing or unreadable.
    #[error("Input folder not available at {path}: {source}")]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The input directory holds no files.
    #[error("No files found in the input folder: {path}")]
    NoInputFiles { path: PathBuf },

    /// An output directory could not be created.
    #[error("Cannot create output folder {path}: {source}")]
    OutputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No input file carried a usable thickness header.
    #[error("No files could be grouped by thickness")]
    NoThicknessGroups,

    /// A thickness group has no adjustment assigned.
    #[error("No adjustment given for thickness group {0}")]
    MissingAdjustment(Thickness),

    /// The adjustment value was rejected.
    #[error("Invalid adjustment value: {0}")]
    InvalidAdjustment(#[from] AdjustmentError),
}

/// Result type alias for batch operations.
pub type BatchResult<T> = Result<T, BatchError>;
