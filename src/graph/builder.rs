use super::ProjectGraph;
use crate::analysis::{FileAnalysis, FileAnalyzer, ImportResolver};
use crate::discovery::SourceFile;
use crate::error::Result;
use crate::observer::{AnalysisEvent, AnalysisObserver};
use std::collections::BTreeMap;

/// Sequential builder: analyse files one at a time, then link
pub struct GraphBuilder<'a> {
    analyzer: FileAnalyzer<'a>,
    observer: &'a dyn AnalysisObserver,
    analyses: BTreeMap<String, FileAnalysis>,
    skipped: Vec<String>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(resolver: &'a ImportResolver, observer: &'a dyn AnalysisObserver) -> Result<Self> {
        Ok(Self {
            analyzer: FileAnalyzer::new(resolver)?,
            observer,
            analyses: BTreeMap::new(),
            skipped: Vec::new(),
        })
    }

    /// Analyse one file. Read and parse failures skip the file; anything
    /// else is returned.
    pub fn process_file(&mut self, file: &SourceFile) -> Result<()> {
        match self.analyzer.analyze(file) {
            Ok(analysis) => {
                self.observer
                    .on_event(&AnalysisEvent::FileAnalyzed { path: &file.path });
                self.analyses.insert(file.path.clone(), analysis);
            }
            Err(error) if error.is_recoverable() => {
                self.observer.on_event(&AnalysisEvent::FileSkipped {
                    path: &file.path,
                    error: &error,
                });
                self.skipped.push(file.path.clone());
            }
            Err(error) => return Err(error),
        }
        Ok(())
    }

    pub fn build(self) -> ProjectGraph {
        self.observer.on_event(&AnalysisEvent::GraphBuilding {
            files: self.analyses.len(),
        });
        ProjectGraph::link(self.analyses, self.skipped)
    }
}
