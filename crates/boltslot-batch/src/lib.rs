//! # Boltslot Batch
//!
//! Runs the NC1 transformer over a directory of files.
//!
//! - **scan_input_dir**: regular files of the input folder, sorted
//! - **run_direct**: one adjustment for all files, flat output folder
//! - **group_by_thickness** / **run_by_thickness**: files grouped by the
//!   plate thickness header, one adjustment and one `thk_<t>mm` output
//!   folder per group
//!
//! Per-file failures never abort a run; they are collected in the
//! [`BatchSummary`] returned at the end.

pub mod document;
pub mod error;
pub mod runner;
pub mod scan;
pub mod summary;

pub use document::{adjusted_file_name, LineEnding, Nc1Document};
pub use error::{BatchError, BatchResult};
pub use runner::{
    group_by_thickness, process_file, run_by_thickness, run_direct, RunOptions,
    ThicknessGrouping,
};
pub use scan::scan_input_dir;
pub use summary::{
    AppliedAdjustment, BatchSummary, FailureKind, FileOutcome, FileStatus, RunMode, SkippedFile,
};
