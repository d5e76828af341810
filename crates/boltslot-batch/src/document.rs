//! NC1 text documents
//!
//! Splits file content into lines for the transformer while remembering
//! each line's terminator, so lines the transformer passes through are
//! written back byte for byte.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;

use boltslot_core::Adjustment;

/// Terminator that followed a line in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
    /// Last line of a file without a trailing newline
    None,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::None => "",
        }
    }
}

/// Lines of one NC1 file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nc1Document {
    lines: Vec<String>,
    endings: Vec<LineEnding>,
}

impl Nc1Document {
    /// Split text into lines
    pub fn parse(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut endings = Vec::new();

        for raw in text.split_inclusive('\n') {
            let (line, ending) = if let Some(line) = raw.strip_suffix("\r\n") {
                (line, LineEnding::CrLf)
            } else if let Some(line) = raw.strip_suffix('\n') {
                (line, LineEnding::Lf)
            } else {
                (raw, LineEnding::None)
            };
            lines.push(line.to_string());
            endings.push(ending);
        }

        Self { lines, endings }
    }

    /// Read a UTF-8 file
    pub fn read(path: &Path) -> io::Result<Self> {
        Ok(Self::parse(&fs::read_to_string(path)?))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Same document with new line contents and the original terminators.
    ///
    /// `lines` must have one entry per original line.
    pub fn with_lines(&self, lines: Vec<String>) -> Self {
        debug_assert_eq!(lines.len(), self.endings.len());
        Self {
            lines,
            endings: self.endings.clone(),
        }
    }

    /// Reassemble the text
    pub fn render(&self) -> String {
        let capacity = self.lines.iter().map(|l| l.len() + 2).sum();
        let mut text = String::with_capacity(capacity);
        for (line, ending) in self.lines.iter().zip(&self.endings) {
            text.push_str(line);
            text.push_str(ending.as_str());
        }
        text
    }

    /// Write as UTF-8
    pub fn write(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.render())
    }
}

/// Output file name for an adjusted copy: `<stem>_adjust_<tag>mm<.ext>`
pub fn adjusted_file_name(input: &Path, adjustment: Adjustment) -> OsString {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let mut name = format!("{}_adjust_{}mm", stem, adjustment.file_tag());
    if let Some(ext) = input.extension() {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    OsString::from(name)
}
