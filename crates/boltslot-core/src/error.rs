//! Error types for the core crate.
//!
//! The line transformer itself never fails. Errors here cover the values the
//! surrounding batch run has to validate before it starts: adjustment values,
//! per-thickness adjustment tables and the plate thickness header of a file.

use thiserror::Error;

/// Errors raised while validating or parsing adjustment values.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdjustmentError {
    /// The value lies outside the configured closed range.
    #[error("Adjustment {value} out of range (valid: {min}..={max})")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// The value is NaN or infinite.
    #[error("Adjustment must be a finite number, got {0}")]
    NotFinite(f64),

    /// The text could not be parsed as a number.
    #[error("Invalid number format: '{input}'")]
    InvalidNumber { input: String },

    /// A table line is not of the form `thickness=adjustment`.
    #[error("Invalid format in line: '{line}' (expected thickness=adjustment)")]
    InvalidFormat { line: String },

    /// A table line names a thickness that no input group has.
    #[error("Thickness {thickness} not found (available: {available})")]
    UnknownThickness { thickness: String, available: String },

    /// One or more thickness groups were given no adjustment.
    #[error("Missing adjustment values for thicknesses: {0}")]
    MissingThickness(String),
}

/// Errors raised while reading the plate thickness header of an NC1 file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThicknessError {
    /// The file is too short to carry a thickness header.
    #[error("File has {lines} lines, at least {required} required")]
    TooShort { lines: usize, required: usize },

    /// A thickness line is not numeric.
    #[error("Thickness value on line {line_number} is not a number: '{content}'")]
    Unparsable { line_number: usize, content: String },

    /// The thickness lines disagree.
    #[error("Thickness values don't match: {values:?}")]
    Mismatch { values: Vec<f64> },
}

/// Umbrella error for the core crate.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Adjustment validation error
    #[error(transparent)]
    Adjustment(#[from] AdjustmentError),

    /// Thickness detection error
    #[error(transparent)]
    Thickness(#[from] ThicknessError),
}

/// Result type alias for adjustment operations.
pub type AdjustmentResult<T> = std::result::Result<T, AdjustmentError>;

/// Result type alias for thickness detection.
pub type ThicknessResult<T> = std::result::Result<T, ThicknessError>;

/// Result type using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjustment_error_display() {
        let err = AdjustmentError::OutOfRange {
            value: 150.0,
            min: -100.0,
            max: 100.0,
        };
        assert_eq!(
            err.to_string(),
            "Adjustment 150 out of range (valid: -100..=100)"
        );

        let err = AdjustmentError::InvalidFormat {
            line: "6.00 1.5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid format in line: '6.00 1.5' (expected thickness=adjustment)"
        );

        let err = AdjustmentError::MissingThickness("8.00, 10.00".to_string());
        assert_eq!(
            err.to_string(),
            "Missing adjustment values for thicknesses: 8.00, 10.00"
        );
    }

    #[test]
    fn test_thickness_error_display() {
        let err = ThicknessError::TooShort {
            lines: 4,
            required: 15,
        };
        assert_eq!(err.to_string(), "File has 4 lines, at least 15 required");

        let err = ThicknessError::Mismatch {
            values: vec![6.0, 6.0, 8.0],
        };
        assert_eq!(err.to_string(), "Thickness values don't match: [6.0, 6.0, 8.0]");
    }

    #[test]
    fn test_error_conversion() {
        let err: Error = AdjustmentError::NotFinite(f64::NAN).into();
        assert!(matches!(err, Error::Adjustment(_)));

        let err: Error = ThicknessError::TooShort {
            lines: 0,
            required: 15,
        }
        .into();
        assert!(matches!(err, Error::Thickness(_)));
    }
}
