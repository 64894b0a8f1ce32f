//! End-to-end pipeline: discover, analyse, link, report

use crate::analysis::{EntryPointClassifier, ImportResolver};
use crate::config::Config;
use crate::discovery::{FileFinder, FileStats};
use crate::error::Result;
use crate::graph::{GraphBuilder, ParallelGraphBuilder, ProjectGraph};
use crate::observer::{AnalysisEvent, AnalysisObserver, SilentObserver, TracingObserver};
use crate::report::{ReportGenerator, UnusedCodeReport};
use std::path::Path;
use tracing::debug;

/// Runs one unused-code scan over a project tree
pub struct UnusedCodeDetector {
    config: Config,
    observer: Box<dyn AnalysisObserver>,
}

impl UnusedCodeDetector {
    /// Detector that logs progress through `tracing`
    pub fn new(config: Config) -> Self {
        Self {
            config,
            observer: Box::new(TracingObserver),
        }
    }

    pub fn silent(config: Config) -> Self {
        Self::new(config).with_observer(SilentObserver)
    }

    pub fn with_observer(mut self, observer: impl AnalysisObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn analyze(&self, root: &Path) -> Result<UnusedCodeReport> {
        let observer = self.observer.as_ref();
        observer.on_event(&AnalysisEvent::ScanStarted { root });

        let files = FileFinder::new(&self.config).find_files(root)?;
        observer.on_event(&AnalysisEvent::FilesDiscovered { count: files.len() });
        debug!("{:?}", FileStats::from_files(&files));

        let discovered: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
        let resolver = ImportResolver::new(discovered.iter().cloned(), self.config.aliases.clone());

        observer.on_event(&AnalysisEvent::AnalysisStarted {
            total: files.len(),
            parallel: self.config.parallel,
        });
        let ProjectGraph {
            mut analyses,
            graph,
            skipped,
        } = if self.config.parallel {
            ParallelGraphBuilder::new(&resolver, observer).build_from_files(&files)?
        } else {
            let mut builder = GraphBuilder::new(&resolver, observer)?;
            for file in &files {
                builder.process_file(file)?;
            }
            builder.build()
        };
        debug!(
            "Import graph: {} files, {} edges, {} skipped",
            graph.file_count(),
            graph.edge_count(),
            skipped.len()
        );

        observer.on_event(&AnalysisEvent::FindingUnused);
        let classifier = EntryPointClassifier::new(&self.config);
        let report = ReportGenerator::new(&classifier).generate(&discovered, &mut analyses, &graph);

        observer.on_event(&AnalysisEvent::Finished { report: &report });
        Ok(report)
    }
}

/// Scan `root` with the configuration found there (or defaults).
///
/// `silent` suppresses all progress output so the caller can emit
/// machine-readable results.
pub fn detect_unused(root: &Path, silent: bool) -> Result<UnusedCodeReport> {
    let config = Config::from_default_locations(root)?;
    let detector = if silent {
        UnusedCodeDetector::silent(config)
    } else {
        UnusedCodeDetector::new(config)
    };
    detector.analyze(root)
}
