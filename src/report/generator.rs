use super::UnusedCodeReport;
use crate::analysis::{EntryPointClassifier, FileAnalysis};
use crate::graph::ImportGraph;
use std::collections::BTreeMap;
use tracing::debug;

/// Turns a linked project into an [`UnusedCodeReport`]
pub struct ReportGenerator<'a> {
    classifier: &'a EntryPointClassifier,
}

impl<'a> ReportGenerator<'a> {
    pub fn new(classifier: &'a EntryPointClassifier) -> Self {
        Self { classifier }
    }

    /// `discovered` is every file found on disk, in report order; files
    /// without an analysis (parse failures) only count toward the total.
    pub fn generate(
        &self,
        discovered: &[String],
        analyses: &mut BTreeMap<String, FileAnalysis>,
        graph: &ImportGraph,
    ) -> UnusedCodeReport {
        Self::mark_unused_exports(analyses, graph);

        let unused_files: Vec<String> = discovered
            .iter()
            .filter(|path| {
                analyses
                    .get(path.as_str())
                    .is_some_and(|analysis| !analysis.is_imported)
                    && !self.classifier.is_entry_point(path)
            })
            .cloned()
            .collect();

        let files_with_unused_exports: Vec<FileAnalysis> = analyses
            .values()
            .filter(|analysis| !analysis.unused_exports.is_empty())
            .cloned()
            .collect();

        let total_unused_exports = files_with_unused_exports
            .iter()
            .map(|analysis| analysis.unused_exports.len())
            .sum();

        debug!(
            "{} unused files, {} files with unused exports",
            unused_files.len(),
            files_with_unused_exports.len()
        );

        UnusedCodeReport {
            total_files: discovered.len(),
            total_unused_files: unused_files.len(),
            unused_files,
            files_with_unused_exports,
            total_unused_exports,
        }
    }

    /// Usage is file-granular: once any other file imports a file, every one
    /// of its exports counts as used.
    fn mark_unused_exports(analyses: &mut BTreeMap<String, FileAnalysis>, graph: &ImportGraph) {
        for (path, analysis) in analyses.iter_mut() {
            let used = graph.is_imported(path);
            analysis.unused_exports = analysis
                .exports
                .iter()
                .filter(|_| !used)
                .cloned()
                .collect();
        }
    }
}
