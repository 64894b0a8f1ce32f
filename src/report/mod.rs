mod generator;
mod json;
mod terminal;

pub use generator::ReportGenerator;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;

use crate::analysis::FileAnalysis;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Terminal result of one detection run.
///
/// Field names and shapes are the JSON contract consumed by report viewers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnusedCodeReport {
    /// Files nobody imports that are not entry points
    pub unused_files: Vec<String>,
    pub files_with_unused_exports: Vec<FileAnalysis>,
    /// Every discovered file, including ones that failed to parse
    pub total_files: usize,
    pub total_unused_files: usize,
    pub total_unused_exports: usize,
}

impl UnusedCodeReport {
    /// Share of discovered files that could be removed, 0-100
    pub fn waste_percentage(&self) -> f64 {
        if self.total_files == 0 {
            return 0.0;
        }
        self.total_unused_files as f64 / self.total_files as f64 * 100.0
    }

    pub fn has_findings(&self) -> bool {
        self.total_unused_files > 0 || self.total_unused_exports > 0
    }
}

/// Output format for reports
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Terminal,
    Json,
}

/// Writes a finished report in the requested format
pub struct Reporter {
    format: ReportFormat,
    output_path: Option<PathBuf>,
}

impl Reporter {
    pub fn new(format: ReportFormat, output_path: Option<PathBuf>) -> Self {
        Self {
            format,
            output_path,
        }
    }

    pub fn report(&self, report: &UnusedCodeReport) -> Result<()> {
        match self.format {
            ReportFormat::Terminal => TerminalReporter::new().report(report),
            ReportFormat::Json => JsonReporter::new(self.output_path.clone()).report(report),
        }
    }
}
