//! Per-file analysis: import resolution, export collection and the
//! entry-point table

mod entry_points;
mod file_analysis;
mod resolver;

pub use entry_points::{EntryKind, EntryPointClassifier};
pub use file_analysis::{FileAnalysis, FileAnalyzer};
pub use resolver::ImportResolver;
