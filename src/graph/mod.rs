mod builder;
mod parallel_builder;

pub use builder::GraphBuilder;
pub use parallel_builder::ParallelGraphBuilder;

use crate::analysis::FileAnalysis;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// File-level import graph: an edge `a -> b` means `a` imports or
/// re-exports `b`. Parallel edges are collapsed.
#[derive(Debug, Default)]
pub struct ImportGraph {
    inner: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
}

impl ImportGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from per-file analyses, one node per analysed or imported file
    pub fn from_analyses(analyses: &BTreeMap<String, FileAnalysis>) -> Self {
        let mut graph = Self::new();
        for (path, analysis) in analyses {
            graph.add_file(path);
            for target in &analysis.imports {
                graph.add_import(path, target);
            }
        }
        graph
    }

    pub fn add_file(&mut self, path: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(path) {
            return idx;
        }
        let idx = self.inner.add_node(path.to_string());
        self.node_map.insert(path.to_string(), idx);
        idx
    }

    pub fn add_import(&mut self, from: &str, to: &str) {
        let from = self.add_file(from);
        let to = self.add_file(to);
        if self.inner.find_edge(from, to).is_none() {
            self.inner.add_edge(from, to, ());
        }
    }

    /// Files imported by `path`, deduplicated and sorted
    pub fn imports_of(&self, path: &str) -> BTreeSet<&str> {
        self.neighbors(path, Direction::Outgoing)
    }

    /// Files importing `path`, deduplicated and sorted
    pub fn importers_of(&self, path: &str) -> BTreeSet<&str> {
        self.neighbors(path, Direction::Incoming)
    }

    pub fn does_import(&self, from: &str, to: &str) -> bool {
        match (self.node_map.get(from), self.node_map.get(to)) {
            (Some(&a), Some(&b)) => self.inner.contains_edge(a, b),
            _ => false,
        }
    }

    /// True if some file other than `path` imports it
    pub fn is_imported(&self, path: &str) -> bool {
        self.importers_of(path).iter().any(|importer| *importer != path)
    }

    pub fn file_count(&self) -> usize {
        self.inner.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.inner.edge_count()
    }

    fn neighbors(&self, path: &str, direction: Direction) -> BTreeSet<&str> {
        match self.node_map.get(path) {
            Some(&idx) => self
                .inner
                .neighbors_directed(idx, direction)
                .map(|n| self.inner[n].as_str())
                .collect(),
            None => BTreeSet::new(),
        }
    }
}

/// Output of the graph builders: every successfully analysed file, the
/// import graph over them, and the files that had to be skipped
#[derive(Debug)]
pub struct ProjectGraph {
    pub analyses: BTreeMap<String, FileAnalysis>,
    pub graph: ImportGraph,
    pub skipped: Vec<String>,
}

impl ProjectGraph {
    /// Materialize the graph and flag every file some other file imports
    pub fn link(mut analyses: BTreeMap<String, FileAnalysis>, skipped: Vec<String>) -> Self {
        let graph = ImportGraph::from_analyses(&analyses);

        let targets: Vec<String> = analyses
            .values()
            .flat_map(|analysis| analysis.imports.iter().cloned())
            .collect();
        for target in targets {
            // a target that failed to parse has no entry
            if let Some(analysis) = analyses.get_mut(&target) {
                analysis.is_imported = true;
            }
        }

        Self {
            analyses,
            graph,
            skipped,
        }
    }
}
