//! Error taxonomy for the unused-code detector
//!
//! Only [`DetectError::FileSystem`], [`DetectError::NotADirectory`],
//! [`DetectError::GrammarInit`] and [`DetectError::Config`] abort a run.
//! Read and parse failures are reported per file and the file is skipped.

use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum DetectError {
    #[error("Cannot read project directory {}: {source}", path.display())]
    #[diagnostic(code(detect_unused::filesystem))]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Project root is not a directory: {}", path.display())]
    #[diagnostic(code(detect_unused::filesystem))]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {path}: {source}")]
    #[diagnostic(code(detect_unused::read))]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {reason}")]
    #[diagnostic(code(detect_unused::parse))]
    Parse { path: String, reason: String },

    #[error("Failed to load {language} grammar")]
    #[diagnostic(code(detect_unused::grammar))]
    GrammarInit { language: &'static str },

    #[error("Invalid config file {}: {reason}", path.display())]
    #[diagnostic(
        code(detect_unused::config),
        help("config files are YAML (.yml/.yaml) or TOML (.toml)")
    )]
    Config { path: PathBuf, reason: String },

    #[error("Failed to write report to {}: {source}", path.display())]
    #[diagnostic(code(detect_unused::output))]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DetectError {
    /// Per-file failures that skip the file instead of aborting the run
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DetectError::Read { .. } | DetectError::Parse { .. })
    }
}

pub type Result<T, E = DetectError> = std::result::Result<T, E>;
