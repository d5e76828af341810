//! Adjustment values
//!
//! An adjustment is obtained once before any file is touched, validated
//! against a closed range, then handed unchanged to every transformer call of
//! the run (or of one thickness group).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{AdjustmentError, AdjustmentResult};
use crate::thickness::Thickness;

/// Default lower bound for adjustments
pub const DEFAULT_MIN_ADJUSTMENT: f64 = -100.0;

/// Default upper bound for adjustments
pub const DEFAULT_MAX_ADJUSTMENT: f64 = 100.0;

/// Signed offset added to parameter values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Adjustment(f64);

impl Adjustment {
    /// Wrap a value without range checks
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    /// Parse and range-check user input
    pub fn parse_in(input: &str, range: &AdjustmentRange) -> AdjustmentResult<Self> {
        range.check(parse_number(input)?)
    }

    /// Tag used in output file names: shortest round-trip form, always with
    /// a decimal point (`1.5`, `2.0`, `-0.25`)
    pub fn file_tag(&self) -> String {
        format!("{:?}", self.0)
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:+.2}", self.0)
    }
}

/// Closed range of accepted adjustments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentRange {
    pub min: f64,
    pub max: f64,
}

impl Default for AdjustmentRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_ADJUSTMENT,
            max: DEFAULT_MAX_ADJUSTMENT,
        }
    }
}

impl AdjustmentRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Validate a raw value
    pub fn check(&self, value: f64) -> AdjustmentResult<Adjustment> {
        if !value.is_finite() {
            return Err(AdjustmentError::NotFinite(value));
        }
        if !self.contains(value) {
            return Err(AdjustmentError::OutOfRange {
                value,
                min: self.min,
                max: self.max,
            });
        }
        Ok(Adjustment(value))
    }
}

fn parse_number(input: &str) -> AdjustmentResult<f64> {
    let trimmed = input.trim();
    trimmed
        .parse::<f64>()
        .map_err(|_| AdjustmentError::InvalidNumber {
            input: trimmed.to_string(),
        })
}

fn join_thicknesses<'a>(values: impl IntoIterator<Item = &'a Thickness>) -> String {
    values
        .into_iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-thickness adjustments, ordered by thickness
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThicknessAdjustments {
    values: BTreeMap<Thickness, Adjustment>,
}

impl ThicknessAdjustments {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, thickness: Thickness, adjustment: Adjustment) {
        self.values.insert(thickness, adjustment);
    }

    pub fn get(&self, thickness: &Thickness) -> Option<Adjustment> {
        self.values.get(thickness).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Thickness, &Adjustment)> {
        self.values.iter()
    }

    /// Parse `thickness=adjustment` entries, one per line.
    ///
    /// Blank lines are ignored and a repeated thickness keeps the last value.
    /// Every entry must name a thickness in `known`, and every thickness in
    /// `known` must receive a value.
    pub fn parse<I, S>(
        entries: I,
        known: &[Thickness],
        range: &AdjustmentRange,
    ) -> AdjustmentResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut parsed = Self::new();

        for entry in entries {
            let line = entry.as_ref().trim();
            if line.is_empty() {
                continue;
            }

            let (thickness, adjustment) =
                line.split_once('=').ok_or_else(|| AdjustmentError::InvalidFormat {
                    line: line.to_string(),
                })?;

            let thickness = Thickness::new(parse_number(thickness)?);
            let adjustment = range.check(parse_number(adjustment)?)?;

            if !known.contains(&thickness) {
                let mut available = known.to_vec();
                available.sort();
                return Err(AdjustmentError::UnknownThickness {
                    thickness: thickness.to_string(),
                    available: join_thicknesses(&available),
                });
            }

            parsed.insert(thickness, adjustment);
        }

        let mut missing: Vec<Thickness> = known
            .iter()
            .filter(|t| !parsed.values.contains_key(*t))
            .copied()
            .collect();
        if !missing.is_empty() {
            missing.sort();
            missing.dedup();
            return Err(AdjustmentError::MissingThickness(join_thicknesses(
                &missing,
            )));
        }

        Ok(parsed)
    }

    /// Editable template with one `thickness=default` line per known thickness
    pub fn template(known: &[Thickness], default: Adjustment) -> String {
        let mut sorted = known.to_vec();
        sorted.sort();
        sorted.dedup();
        sorted
            .iter()
            .map(|t| format!("{}={:?}\n", t, default.value()))
            .collect()
    }
}
