//! NC1 bolt block transformer
//!
//! NC1 files describe steel parts line by line. Bolt operations are grouped
//! into blocks that open with a line reading `BO` and close with a line
//! reading `EN`. Inside a block, parameter lines have the shape
//! `v <x> <y> <value>`; this module shifts `<value>` by a fixed adjustment.
//!
//! The transformer is a two-state automaton over the lines of one file. It
//! performs no I/O, never fails and always emits exactly one output line per
//! input line.

use serde::{Deserialize, Serialize};

/// Line that opens a bolt operation block
pub const BLOCK_START: &str = "BO";

/// Line that closes a bolt operation block
pub const BLOCK_END: &str = "EN";

/// First field of a parameter line (case-sensitive)
pub const PARAMETER_TOKEN: &str = "v";

/// Number of whitespace separated fields on a parameter line
pub const PARAMETER_FIELDS: usize = 4;

/// Decimal places written for an adjusted value
pub const VALUE_PRECISION: usize = 2;

/// Classification of a single line by [`BlockProcessor::process`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// `BO` or `EN` marker, emitted unchanged
    Marker,
    /// Not a parameter line, or outside any block
    Passthrough,
    /// Parameter line inside a block with its value rewritten
    Adjusted(String),
    /// Parameter-shaped line inside a block whose value is not numeric
    NotNumeric,
}

/// Counters gathered during one pass over a file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformReport {
    /// Number of `BO` lines seen
    pub blocks: usize,
    /// Parameter lines rewritten
    pub adjusted: usize,
    /// Parameter lines left alone because the value was not numeric
    pub skipped: usize,
    /// The pass ended inside a block that was never closed
    pub unterminated: bool,
}

/// Streaming form of the transformer.
///
/// Holds the adjustment and the block flag for one file. Create a fresh
/// processor per file; state is never carried between files.
#[derive(Debug, Clone)]
pub struct BlockProcessor {
    adjustment: f64,
    inside_block: bool,
}

impl BlockProcessor {
    /// Create a processor outside any block
    pub fn new(adjustment: f64) -> Self {
        Self {
            adjustment,
            inside_block: false,
        }
    }

    /// Whether the last processed line left the automaton inside a block
    pub fn inside_block(&self) -> bool {
        self.inside_block
    }

    /// Adjustment applied to matched values
    pub fn adjustment(&self) -> f64 {
        self.adjustment
    }

    /// Classify one line and advance the block state
    pub fn process(&mut self, line: &str) -> LineOutcome {
        let trimmed = line.trim();

        if trimmed == BLOCK_START {
            self.inside_block = true;
            return LineOutcome::Marker;
        }

        if !self.inside_block {
            return LineOutcome::Passthrough;
        }

        if trimmed == BLOCK_END {
            self.inside_block = false;
            return LineOutcome::Marker;
        }

        match parse_parameter_line(line) {
            Some((fields, Some(value))) => {
                LineOutcome::Adjusted(format_parameter_line(&fields, value + self.adjustment))
            }
            Some((_, None)) => LineOutcome::NotNumeric,
            None => LineOutcome::Passthrough,
        }
    }
}

/// Split a parameter line into its fields and parsed value.
///
/// Returns `None` when the line is not parameter-shaped, and `Some((fields, None))`
/// when it is but the fourth field is not a finite number.
fn parse_parameter_line(line: &str) -> Option<([&str; PARAMETER_FIELDS], Option<f64>)> {
    let mut parts = line.split_whitespace();
    let fields = [parts.next()?, parts.next()?, parts.next()?, parts.next()?];
    if parts.next().is_some() || fields[0] != PARAMETER_TOKEN {
        return None;
    }

    let value = fields[3].parse::<f64>().ok().filter(|v| v.is_finite());
    Some((fields, value))
}

fn format_parameter_line(fields: &[&str; PARAMETER_FIELDS], value: f64) -> String {
    format!(
        "{} {} {} {:.*}",
        fields[0], fields[1], fields[2], VALUE_PRECISION, value
    )
}

/// Adjust a single parameter line, ignoring block state.
///
/// Returns `None` when the line is not a parameter line or its value is not numeric.
pub fn adjust_parameter_line(line: &str, adjustment: f64) -> Option<String> {
    match parse_parameter_line(line)? {
        (fields, Some(value)) => Some(format_parameter_line(&fields, value + adjustment)),
        (_, None) => None,
    }
}

/// Transform the lines of one file.
///
/// Output has the same length and order as `lines`.
pub fn transform<S: AsRef<str>>(lines: &[S], adjustment: f64) -> Vec<String> {
    transform_with_report(lines, adjustment).0
}

/// Transform the lines of one file and report what was changed.
pub fn transform_with_report<S: AsRef<str>>(
    lines: &[S],
    adjustment: f64,
) -> (Vec<String>, TransformReport) {
    let mut processor = BlockProcessor::new(adjustment);
    let mut report = TransformReport::default();
    let mut output = Vec::with_capacity(lines.len());

    for line in lines {
        let line = line.as_ref();
        match processor.process(line) {
            LineOutcome::Adjusted(adjusted) => {
                report.adjusted += 1;
                output.push(adjusted);
            }
            LineOutcome::Marker => {
                if processor.inside_block() {
                    report.blocks += 1;
                }
                output.push(line.to_string());
            }
            LineOutcome::NotNumeric => {
                report.skipped += 1;
                output.push(line.to_string());
            }
            LineOutcome::Passthrough => output.push(line.to_string()),
        }
    }

    report.unterminated = processor.inside_block();
    (output, report)
}
