use crate::config::Config;
use crate::error::{DetectError, Result};
use ignore::WalkBuilder;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, trace, warn};

/// Directory names that are never descended into
pub const EXCLUDED_DIRS: [&str; 6] = ["node_modules", ".git", ".next", "dist", "build", "coverage"];

/// Recognized source extensions, in resolver probe order
pub const EXTENSIONS: [&str; 4] = [".ts", ".tsx", ".js", ".jsx"];

/// Syntax flavour of a source file, picked from its extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    TypeScript,
    Tsx,
    JavaScript,
    Jsx,
}

impl SourceKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "ts" => Some(SourceKind::TypeScript),
            "tsx" => Some(SourceKind::Tsx),
            "js" => Some(SourceKind::JavaScript),
            "jsx" => Some(SourceKind::Jsx),
            _ => None,
        }
    }
}

/// A discovered source file
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Root-relative path with `/` separators; the file's identity
    pub path: String,

    /// Location on disk
    pub absolute: PathBuf,

    pub kind: SourceKind,
}

impl SourceFile {
    pub fn new(path: impl Into<String>, absolute: PathBuf, kind: SourceKind) -> Self {
        Self {
            path: path.into(),
            absolute,
            kind,
        }
    }

    pub fn read_contents(&self) -> Result<String> {
        std::fs::read_to_string(&self.absolute).map_err(|source| DetectError::Read {
            path: self.path.clone(),
            source,
        })
    }
}

/// File finder for discovering source files in a project
pub struct FileFinder<'a> {
    config: &'a Config,
}

impl<'a> FileFinder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Find all source files under `root`, sorted by relative path
    pub fn find_files(&self, root: &Path) -> Result<Vec<SourceFile>> {
        debug!("Scanning for files in: {}", root.display());
        check_root(root)?;

        let excluded: Vec<String> = EXCLUDED_DIRS
            .iter()
            .map(|d| d.to_string())
            .chain(self.config.exclude_dirs.iter().cloned())
            .collect();

        let walker = WalkBuilder::new(root)
            .standard_filters(self.config.respect_gitignore)
            .require_git(false)
            .follow_links(false)
            .filter_entry(move |entry| {
                let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
                let name = entry.file_name().to_str().unwrap_or("");
                !(entry.depth() > 0 && is_dir && excluded.iter().any(|d| d == name))
            })
            .build();

        let mut files = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if !entry.file_type().map(|t| t.is_file()).unwrap_or(false) {
                continue;
            }

            let path = entry.path();
            let Some(kind) = SourceKind::from_path(path) else {
                continue;
            };
            let Ok(relative) = path.strip_prefix(root) else {
                continue;
            };

            let key = normalize_relative(relative);
            trace!("Found {:?}: {}", kind, key);
            files.push(SourceFile::new(key, path.to_path_buf(), kind));
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        debug!("Found {} files", files.len());
        Ok(files)
    }
}

fn check_root(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|source| DetectError::FileSystem {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(DetectError::NotADirectory {
            path: root.to_path_buf(),
        });
    }
    std::fs::read_dir(root).map_err(|source| DetectError::FileSystem {
        path: root.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Join path components with `/` regardless of host separator
fn normalize_relative(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Statistics about discovered files
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FileStats {
    pub typescript_files: usize,
    pub tsx_files: usize,
    pub javascript_files: usize,
    pub jsx_files: usize,
}

impl FileStats {
    pub fn from_files(files: &[SourceFile]) -> Self {
        let mut stats = Self::default();
        for file in files {
            match file.kind {
                SourceKind::TypeScript => stats.typescript_files += 1,
                SourceKind::Tsx => stats.tsx_files += 1,
                SourceKind::JavaScript => stats.javascript_files += 1,
                SourceKind::Jsx => stats.jsx_files += 1,
            }
        }
        stats
    }

    pub fn total(&self) -> usize {
        self.typescript_files + self.tsx_files + self.javascript_files + self.jsx_files
    }
}
