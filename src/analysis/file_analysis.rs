use super::ImportResolver;
use crate::discovery::SourceFile;
use crate::error::Result;
use crate::parser::ScriptParser;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Import/export inventory for one source file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub file_path: String,

    /// Resolved project files, in statement order; duplicates allowed
    pub imports: Vec<String>,

    /// Explicitly exported names, in declaration order
    pub exports: Vec<String>,

    /// Set once some other file imports this one
    pub is_imported: bool,

    /// Filled in by the report generator
    pub unused_exports: Vec<String>,
}

impl FileAnalysis {
    pub fn new(file_path: impl Into<String>, imports: Vec<String>, exports: Vec<String>) -> Self {
        Self {
            file_path: file_path.into(),
            imports,
            exports,
            is_imported: false,
            unused_exports: Vec::new(),
        }
    }
}

/// Per-file analyzer: parse, then resolve every specifier
pub struct FileAnalyzer<'a> {
    parser: ScriptParser,
    resolver: &'a ImportResolver,
}

impl<'a> FileAnalyzer<'a> {
    pub fn new(resolver: &'a ImportResolver) -> Result<Self> {
        Ok(Self {
            parser: ScriptParser::new()?,
            resolver,
        })
    }

    pub fn analyze(&mut self, file: &SourceFile) -> Result<FileAnalysis> {
        debug!("Analyzing {}", file.path);
        let contents = file.read_contents()?;
        self.analyze_source(file, &contents)
    }

    pub fn analyze_source(&mut self, file: &SourceFile, contents: &str) -> Result<FileAnalysis> {
        let parsed = self.parser.parse(&file.path, file.kind, contents)?;

        let imports = parsed
            .module_refs
            .iter()
            .filter_map(|module_ref| {
                let resolved = self.resolver.resolve(&module_ref.specifier, &file.path);
                if resolved.is_none() {
                    trace!(
                        "{}:{}: '{}' is external or unresolved",
                        file.path,
                        module_ref.line,
                        module_ref.specifier
                    );
                }
                resolved
            })
            .collect();

        Ok(FileAnalysis::new(file.path.clone(), imports, parsed.exports))
    }
}
