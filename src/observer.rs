//! Progress events emitted by the detection pipeline
//!
//! The pipeline never decides whether to print anything; it reports events to
//! an [`AnalysisObserver`] and the caller picks the sink.

use crate::error::DetectError;
use crate::report::UnusedCodeReport;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub enum AnalysisEvent<'a> {
    ScanStarted { root: &'a Path },
    FilesDiscovered { count: usize },
    AnalysisStarted { total: usize, parallel: bool },
    FileAnalyzed { path: &'a str },
    FileSkipped { path: &'a str, error: &'a DetectError },
    GraphBuilding { files: usize },
    FindingUnused,
    Finished { report: &'a UnusedCodeReport },
}

/// Receives pipeline events; shared across rayon workers
pub trait AnalysisObserver: Send + Sync {
    fn on_event(&self, event: &AnalysisEvent<'_>);
}

/// Discards every event (machine-readable runs)
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentObserver;

impl AnalysisObserver for SilentObserver {
    fn on_event(&self, _event: &AnalysisEvent<'_>) {}
}

/// Forwards events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl AnalysisObserver for TracingObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        match event {
            AnalysisEvent::ScanStarted { root } => {
                info!("Scanning for source files in {}...", root.display())
            }
            AnalysisEvent::FilesDiscovered { count } => info!("Found {} source files", count),
            AnalysisEvent::AnalysisStarted { parallel, .. } => {
                if *parallel {
                    info!("Analyzing imports and exports (parallel)...");
                } else {
                    info!("Analyzing imports and exports...");
                }
            }
            AnalysisEvent::FileAnalyzed { path } => debug!("Analyzed {}", path),
            AnalysisEvent::FileSkipped { path, error } => {
                warn!("Could not analyze {}: {}", path, error)
            }
            AnalysisEvent::GraphBuilding { files } => {
                info!("Building import graph over {} files...", files)
            }
            AnalysisEvent::FindingUnused => info!("Finding unused files and exports..."),
            AnalysisEvent::Finished { report } => info!(
                "Found {} unused files and {} unused exports",
                report.total_unused_files, report.total_unused_exports
            ),
        }
    }
}

/// Progress bar over per-file analysis, everything else via tracing
pub struct ProgressObserver {
    bar: ProgressBar,
    log: TracingObserver,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            log: TracingObserver,
        }
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisObserver for ProgressObserver {
    fn on_event(&self, event: &AnalysisEvent<'_>) {
        match event {
            AnalysisEvent::AnalysisStarted { total, .. } => {
                self.log.on_event(event);
                self.bar.set_length(*total as u64);
                if let Ok(style) = ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                {
                    self.bar.set_style(style.progress_chars("#>-"));
                }
                self.bar.set_draw_target(ProgressDrawTarget::stderr());
            }
            AnalysisEvent::FileAnalyzed { .. } => self.bar.inc(1),
            AnalysisEvent::FileSkipped { .. } => {
                self.bar.suspend(|| self.log.on_event(event));
                self.bar.inc(1);
            }
            AnalysisEvent::GraphBuilding { .. } => {
                self.bar.finish_and_clear();
                self.log.on_event(event);
            }
            _ => self.log.on_event(event),
        }
    }
}
