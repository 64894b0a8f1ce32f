//! detect-unused - Unused file and export detection for TypeScript/JavaScript projects
//!
//! Finds source files that nothing imports and exports that nothing uses,
//! tuned for Next.js-style layouts where routing and build tooling load
//! files outside the static import graph.
//!
//! # Architecture
//!
//! The analysis pipeline consists of:
//! 1. **File Discovery** - Find all .ts, .tsx, .js and .jsx files
//! 2. **Parsing** - Parse source files using tree-sitter
//! 3. **Import Resolution** - Map relative and aliased specifiers onto discovered files
//! 4. **Graph Building** - Link files into an import graph
//! 5. **Entry Point Detection** - Keep framework-loaded files out of the report
//! 6. **Reporting** - Terminal or JSON output
//!
//! ```no_run
//! use std::path::Path;
//!
//! let report = detect_unused::detect_unused(Path::new("."), true)?;
//! println!("{} unused files", report.total_unused_files);
//! # Ok::<(), detect_unused::DetectError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod detector;
pub mod discovery;
pub mod error;
pub mod graph;
pub mod observer;
pub mod parser;
pub mod report;

pub use analysis::{EntryKind, EntryPointClassifier, FileAnalysis, ImportResolver};
pub use config::{Config, PathAlias};
pub use detector::{detect_unused, UnusedCodeDetector};
pub use discovery::FileFinder;
pub use error::{DetectError, Result};
pub use graph::{ImportGraph, ProjectGraph};
pub use observer::{AnalysisEvent, AnalysisObserver, ProgressObserver, SilentObserver, TracingObserver};
pub use report::{ReportFormat, Reporter, UnusedCodeReport};
