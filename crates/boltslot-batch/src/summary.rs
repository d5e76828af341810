//! Run results and summary reporting

use std::fmt;
use std::path::PathBuf;

use boltslot_core::{Adjustment, Thickness, TransformReport};
use chrono::{DateTime, Local};
use serde::Serialize;

/// How the input files were assigned adjustments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    /// One adjustment for every file
    Direct,
    /// One adjustment per thickness group
    ByThickness,
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct => write!(f, "direct"),
            Self::ByThickness => write!(f, "by thickness"),
        }
    }
}

/// Why a single file failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The input could not be read (missing, permissions, not UTF-8)
    Read,
    /// The adjusted copy could not be written
    Write,
    /// The output file exists and overwriting is disabled
    OutputExists,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read => write!(f, "read failure"),
            Self::Write => write!(f, "write failure"),
            Self::OutputExists => write!(f, "output exists"),
        }
    }
}

/// Result of processing one file
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    Processed { report: TransformReport },
    Failed { kind: FailureKind, message: String },
}

/// One input file and what happened to it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub adjustment: Adjustment,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FileStatus::Processed { .. })
    }

    pub fn report(&self) -> Option<&TransformReport> {
        match &self.status {
            FileStatus::Processed { report } => Some(report),
            FileStatus::Failed { .. } => None,
        }
    }
}

/// Input file left out of a thickness run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

/// Adjustment used for the run or for one thickness group
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AppliedAdjustment {
    pub thickness: Option<Thickness>,
    pub adjustment: Adjustment,
    pub files: usize,
}

/// Summary of a whole batch run
#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub mode: RunMode,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    pub output_dir: PathBuf,
    pub adjustments: Vec<AppliedAdjustment>,
    pub files: Vec<FileOutcome>,
    pub skipped: Vec<SkippedFile>,
}

impl BatchSummary {
    pub(crate) fn start(mode: RunMode, output_dir: PathBuf) -> Self {
        let now = Local::now();
        Self {
            mode,
            started_at: now,
            finished_at: now,
            output_dir,
            adjustments: Vec::new(),
            files: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn finish(mut self) -> Self {
        self.finished_at = Local::now();
        self
    }

    /// Files written successfully
    pub fn processed(&self) -> usize {
        self.files.iter().filter(|f| f.is_success()).count()
    }

    /// Files that failed to read or write
    pub fn failed(&self) -> usize {
        self.files.len() - self.processed()
    }

    /// Parameter lines adjusted across all files
    pub fn adjusted_lines(&self) -> usize {
        self.files
            .iter()
            .filter_map(FileOutcome::report)
            .map(|r| r.adjusted)
            .sum()
    }

    /// Every attempted file was written
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Machine readable run report
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Processing completed ({})", self.mode)?;
        writeln!(f)?;
        writeln!(f, "Total files processed: {}", self.processed())?;
        if self.failed() > 0 {
            writeln!(f, "Files failed: {}", self.failed())?;
        }
        if !self.skipped.is_empty() {
            writeln!(f, "Files skipped: {}", self.skipped.len())?;
        }
        writeln!(f, "Parameter lines adjusted: {}", self.adjusted_lines())?;

        match self.mode {
            RunMode::Direct => {
                if let Some(applied) = self.adjustments.first() {
                    writeln!(f, "Adjustment applied: {}", applied.adjustment)?;
                }
            }
            RunMode::ByThickness => {
                writeln!(f, "Thickness folders processed: {}", self.adjustments.len())?;
                writeln!(f)?;
                writeln!(f, "Adjustments applied:")?;
                for applied in &self.adjustments {
                    if let Some(thickness) = applied.thickness {
                        writeln!(
                            f,
                            "  {}: {} ({} file{})",
                            thickness.folder_name(),
                            applied.adjustment,
                            applied.files,
                            if applied.files == 1 { "" } else { "s" }
                        )?;
                    }
                }
            }
        }

        for outcome in self.files.iter().filter(|o| !o.is_success()) {
            if let FileStatus::Failed { kind, message } = &outcome.status {
                writeln!(f, "  {} ({}): {}", outcome.input.display(), kind, message)?;
            }
        }

        writeln!(f)?;
        write!(f, "Files saved to: {}", self.output_dir.display())
    }
}
