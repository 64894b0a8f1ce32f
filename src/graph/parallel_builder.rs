// Parallel graph builder using rayon

use super::ProjectGraph;
use crate::analysis::{FileAnalysis, FileAnalyzer, ImportResolver};
use crate::discovery::SourceFile;
use crate::error::{DetectError, Result};
use crate::observer::{AnalysisEvent, AnalysisObserver};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::debug;

/// Parallel graph builder for faster processing
pub struct ParallelGraphBuilder<'a> {
    resolver: &'a ImportResolver,
    observer: &'a dyn AnalysisObserver,
}

impl<'a> ParallelGraphBuilder<'a> {
    pub fn new(resolver: &'a ImportResolver, observer: &'a dyn AnalysisObserver) -> Self {
        Self { resolver, observer }
    }

    /// Analyse all files on the rayon pool, then link on the calling thread
    pub fn build_from_files(&self, files: &[SourceFile]) -> Result<ProjectGraph> {
        // Surface grammar problems once instead of per worker
        FileAnalyzer::new(self.resolver)?;

        let results: Vec<(&SourceFile, Result<FileAnalysis>)> = files
            .par_iter()
            .map_init(
                || FileAnalyzer::new(self.resolver).ok(),
                |analyzer, file| {
                    let result = match analyzer.as_mut() {
                        Some(analyzer) => analyzer.analyze(file),
                        None => Err(DetectError::GrammarInit {
                            language: "TypeScript/JavaScript",
                        }),
                    };
                    match &result {
                        Ok(_) => self
                            .observer
                            .on_event(&AnalysisEvent::FileAnalyzed { path: &file.path }),
                        Err(error) if error.is_recoverable() => {
                            self.observer.on_event(&AnalysisEvent::FileSkipped {
                                path: &file.path,
                                error,
                            })
                        }
                        Err(_) => {}
                    }
                    (file, result)
                },
            )
            .collect();

        let mut analyses = BTreeMap::new();
        let mut skipped = Vec::new();
        for (file, result) in results {
            match result {
                Ok(analysis) => {
                    analyses.insert(file.path.clone(), analysis);
                }
                Err(error) if error.is_recoverable() => {
                    debug!("Parse error (continuing): {}", error);
                    skipped.push(file.path.clone());
                }
                Err(error) => return Err(error),
            }
        }

        self.observer.on_event(&AnalysisEvent::GraphBuilding {
            files: analyses.len(),
        });
        Ok(ProjectGraph::link(analyses, skipped))
    }
}
