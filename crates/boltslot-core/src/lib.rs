//! # Boltslot Core
//!
//! Core logic for adjusting bolt slot parameters in NC1 files.
//!
//! ## Components
//!
//! ### Block Transformer
//! - **transform**: single forward pass over the lines of one file
//! - Tracks whether the current line is inside a `BO` ... `EN` block
//! - Rewrites the fourth field of `v <x> <y> <value>` lines inside blocks
//! - Never fails and never inserts or drops lines
//!
//! ### Adjustment Values
//! - **Adjustment**: signed offset, validated against an **AdjustmentRange**
//! - **ThicknessAdjustments**: per-thickness table parsed from `t=a` lines
//!
//! ### Thickness Header
//! - **detect_thickness**: reads the plate thickness from lines 13-15
//!
//! ## Usage
//!
//! ```rust
//! use boltslot_core::transform;
//!
//! let lines = ["BO", "  v  40.00s  40.00  26.00", "EN"];
//! let out = transform(&lines, 1.5);
//! assert_eq!(out[1], "v 40.00s 40.00 27.50");
//! ```

pub mod adjustment;
pub mod error;
pub mod nc1;
pub mod thickness;

pub use adjustment::{
    Adjustment, AdjustmentRange, ThicknessAdjustments, DEFAULT_MAX_ADJUSTMENT,
    DEFAULT_MIN_ADJUSTMENT,
};
pub use error::{
    AdjustmentError, AdjustmentResult, Error, Result, ThicknessError, ThicknessResult,
};
pub use nc1::{
    adjust_parameter_line, transform, transform_with_report, BlockProcessor, LineOutcome,
    TransformReport, BLOCK_END, BLOCK_START, PARAMETER_TOKEN,
};
pub use thickness::{detect_thickness, Thickness, THICKNESS_LINES};
