//! Batch runners
//!
//! Each file is processed in isolation: a failure becomes a
//! [`FileOutcome`] and the loop moves on to the next file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use boltslot_core::{
    detect_thickness, transform_with_report, Adjustment, Thickness, ThicknessAdjustments,
};

use crate::document::{adjusted_file_name, Nc1Document};
use crate::error::{BatchError, BatchResult};
use crate::summary::{
    AppliedAdjustment, BatchSummary, FailureKind, FileOutcome, FileStatus, RunMode, SkippedFile,
};

/// Options shared by both run modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOptions {
    /// Replace existing output files
    pub overwrite: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

fn failed(
    input: &Path,
    output: Option<PathBuf>,
    adjustment: Adjustment,
    kind: FailureKind,
    message: String,
) -> FileOutcome {
    tracing::error!("Error processing {}: {}", input.display(), message);
    FileOutcome {
        input: input.to_path_buf(),
        output,
        adjustment,
        status: FileStatus::Failed { kind, message },
    }
}

/// Adjust one file into `output_dir`
pub fn process_file(
    input: &Path,
    output_dir: &Path,
    adjustment: Adjustment,
    options: RunOptions,
) -> FileOutcome {
    let document = match Nc1Document::read(input) {
        Ok(document) => document,
        Err(e) => return failed(input, None, adjustment, FailureKind::Read, e.to_string()),
    };

    let (lines, report) = transform_with_report(document.lines(), adjustment.value());
    if report.unterminated {
        tracing::warn!(
            "{}: bolt block opened but never closed, treated as running to end of file",
            input.display()
        );
    }
    if report.skipped > 0 {
        tracing::debug!(
            "{}: {} parameter lines with non-numeric values left unchanged",
            input.display(),
            report.skipped
        );
    }

    let output = output_dir.join(adjusted_file_name(input, adjustment));
    if !options.overwrite && output.exists() {
        return failed(
            input,
            Some(output.clone()),
            adjustment,
            FailureKind::OutputExists,
            format!("{} already exists", output.display()),
        );
    }

    if let Err(e) = document.with_lines(lines).write(&output) {
        return failed(
            input,
            Some(output),
            adjustment,
            FailureKind::Write,
            e.to_string(),
        );
    }

    tracing::info!(
        "Processed: {} -> {} ({} lines adjusted)",
        input.display(),
        output.display(),
        report.adjusted
    );

    FileOutcome {
        input: input.to_path_buf(),
        output: Some(output),
        adjustment,
        status: FileStatus::Processed { report },
    }
}

fn ensure_dir(dir: &Path) -> BatchResult<()> {
    fs::create_dir_all(dir).map_err(|source| BatchError::OutputUnavailable {
        path: dir.to_path_buf(),
        source,
    })
}

/// Adjust every file with the same value, writing into `output_dir`
pub fn run_direct(
    files: &[PathBuf],
    output_dir: &Path,
    adjustment: Adjustment,
    options: RunOptions,
) -> BatchResult<BatchSummary> {
    ensure_dir(output_dir)?;

    let mut summary = BatchSummary::start(RunMode::Direct, output_dir.to_path_buf());
    summary.adjustments.push(AppliedAdjustment {
        thickness: None,
        adjustment,
        files: files.len(),
    });

    for file in files {
        summary
            .files
            .push(process_file(file, output_dir, adjustment, options));
    }

    let summary = summary.finish();
    tracing::info!("Total files processed: {}", summary.processed());
    Ok(summary)
}

/// Input files grouped by the thickness in their header
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThicknessGrouping {
    pub groups: BTreeMap<Thickness, Vec<PathBuf>>,
    pub skipped: Vec<SkippedFile>,
}

impl ThicknessGrouping {
    /// Thicknesses found, ascending
    pub fn thicknesses(&self) -> Vec<Thickness> {
        self.groups.keys().copied().collect()
    }

    /// Number of grouped files
    pub fn file_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

/// Read the thickness header of each file and group them.
///
/// Files that cannot be read or carry no consistent thickness are recorded
/// as skipped.
pub fn group_by_thickness(files: &[PathBuf]) -> ThicknessGrouping {
    let mut grouping = ThicknessGrouping::default();

    for file in files {
        let result = Nc1Document::read(file)
            .map_err(|e| e.to_string())
            .and_then(|doc| detect_thickness(doc.lines()).map_err(|e| e.to_string()));

        match result {
            Ok(thickness) => {
                tracing::debug!("{} has thickness {}", file.display(), thickness);
                grouping.groups.entry(thickness).or_default().push(file.clone());
            }
            Err(reason) => {
                tracing::warn!("Skipping {}: {}", file.display(), reason);
                grouping.skipped.push(SkippedFile {
                    path: file.clone(),
                    reason,
                });
            }
        }
    }

    for (thickness, files) in &grouping.groups {
        tracing::info!("{}: {} files", thickness.folder_name(), files.len());
    }
    grouping
}

/// Adjust each thickness group with its own value.
///
/// Output for a group goes to `output_dir/thk_<t>mm/`. Every group must have
/// an adjustment; this is checked before any file is written.
pub fn run_by_thickness(
    grouping: &ThicknessGrouping,
    adjustments: &ThicknessAdjustments,
    output_dir: &Path,
    options: RunOptions,
) -> BatchResult<BatchSummary> {
    if grouping.groups.is_empty() {
        return Err(BatchError::NoThicknessGroups);
    }

    let mut plan = Vec::with_capacity(grouping.groups.len());
    for (thickness, files) in &grouping.groups {
        let adjustment = adjustments
            .get(thickness)
            .ok_or(BatchError::MissingAdjustment(*thickness))?;
        plan.push((*thickness, adjustment, files));
    }

    ensure_dir(output_dir)?;

    let mut summary = BatchSummary::start(RunMode::ByThickness, output_dir.to_path_buf());
    summary.skipped = grouping.skipped.clone();

    for (thickness, adjustment, files) in plan {
        tracing::info!(
            "Processing thickness folder {} with adjustment {}",
            thickness.folder_name(),
            adjustment
        );

        let group_dir = output_dir.join(thickness.folder_name());
        ensure_dir(&group_dir)?;

        summary.adjustments.push(AppliedAdjustment {
            thickness: Some(thickness),
            adjustment,
            files: files.len(),
        });

        for file in files {
            summary
                .files
                .push(process_file(file, &group_dir, adjustment, options));
        }
    }

    let summary = summary.finish();
    tracing::info!(
        "Total files processed across all thickness folders: {}",
        summary.processed()
    );
    Ok(summary)
}
