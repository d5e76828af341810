//! Plate thickness header
//!
//! NC1 headers record the profile thickness on lines 13, 14 and 15. Files
//! whose three values agree can be grouped and adjusted per thickness.

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ThicknessError, ThicknessResult};

/// 1-based line numbers holding the thickness values
pub const THICKNESS_LINES: [usize; 3] = [13, 14, 15];

/// Plate thickness in millimetres.
///
/// Ordered with [`f64::total_cmp`] so it can key a `BTreeMap`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Thickness(f64);

impl Thickness {
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Output/grouping folder name, e.g. `thk_6.00mm`
    pub fn folder_name(&self) -> String {
        format!("thk_{:.2}mm", self.0)
    }

    /// Parse a thickness back out of a folder name produced by [`Self::folder_name`]
    pub fn from_folder_name(name: &str) -> Option<Self> {
        name.strip_prefix("thk_")?
            .strip_suffix("mm")?
            .parse::<f64>()
            .ok()
            .map(Self)
    }
}

impl PartialEq for Thickness {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for Thickness {}

impl PartialOrd for Thickness {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Thickness {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Thickness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Read the thickness header of a file.
///
/// The three header values must parse and be exactly equal.
pub fn detect_thickness<S: AsRef<str>>(lines: &[S]) -> ThicknessResult<Thickness> {
    let required = THICKNESS_LINES[THICKNESS_LINES.len() - 1];
    if lines.len() < required {
        return Err(ThicknessError::TooShort {
            lines: lines.len(),
            required,
        });
    }

    let mut values = Vec::with_capacity(THICKNESS_LINES.len());
    for line_number in THICKNESS_LINES {
        let content = lines[line_number - 1].as_ref().trim();
        let value = content
            .parse::<f64>()
            .map_err(|_| ThicknessError::Unparsable {
                line_number,
                content: content.to_string(),
            })?;
        values.push(value);
    }

    if values.windows(2).all(|pair| pair[0] == pair[1]) {
        Ok(Thickness(values[0]))
    } else {
        Err(ThicknessError::Mismatch { values })
    }
}
