use crate::error::{DetectError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Configuration for an unused-code scan
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory names skipped in addition to the built-in denylist
    pub exclude_dirs: Vec<String>,

    /// Import alias prefixes, tried in order
    pub aliases: Vec<PathAlias>,

    /// Glob patterns for files that are never reported as unused
    pub retain: Vec<String>,

    /// Also honour .gitignore / .ignore files during discovery
    pub respect_gitignore: bool,

    /// Parse files on the rayon thread pool
    pub parallel: bool,
}

/// Maps an aliased specifier prefix (`@/`) onto a project directory (`src/`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathAlias {
    pub prefix: String,
    pub target: String,
}

impl PathAlias {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }

    /// Rewrite `specifier` if it starts with this alias
    pub fn apply(&self, specifier: &str) -> Option<String> {
        specifier
            .strip_prefix(&self.prefix)
            .map(|rest| format!("{}{}", self.target, rest))
    }
}

impl FromStr for PathAlias {
    type Err = String;

    /// Parses `prefix=target`, e.g. `@/=src/` or `~/=app/`
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let (prefix, target) = s
            .split_once('=')
            .ok_or_else(|| format!("expected PREFIX=TARGET, got '{}'", s))?;
        if prefix.is_empty() {
            return Err("alias prefix must not be empty".to_string());
        }
        Ok(Self::new(prefix, target))
    }
}

impl fmt::Display for PathAlias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.prefix, self.target)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            exclude_dirs: vec![],
            aliases: vec![PathAlias::new("@/", "src/")],
            retain: vec![],
            respect_gitignore: false,
            parallel: false,
        }
    }
}

impl Config {
    /// Load configuration from a file (YAML or TOML)
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| DetectError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        let invalid = |reason: String| DetectError::Config {
            path: path.to_path_buf(),
            reason,
        };

        match extension {
            "yml" | "yaml" => serde_yaml::from_str(&contents).map_err(|e| invalid(e.to_string())),
            "toml" => toml::from_str(&contents).map_err(|e| invalid(e.to_string())),
            _ => {
                // Try YAML first, then TOML
                if let Ok(config) = serde_yaml::from_str(&contents) {
                    Ok(config)
                } else {
                    toml::from_str(&contents).map_err(|e| invalid(e.to_string()))
                }
            }
        }
    }

    /// Try to load configuration from default locations
    pub fn from_default_locations(project_root: &Path) -> Result<Self> {
        let default_names = [
            ".detect-unused.yml",
            ".detect-unused.yaml",
            ".detect-unused.toml",
            "detect-unused.toml",
        ];

        for name in &default_names {
            let path = project_root.join(name);
            if path.is_file() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Check if a root-relative path matches one of the retain patterns
    pub fn should_retain(&self, path: &str) -> bool {
        self.retain.iter().any(|pattern| glob_match(pattern, path))
    }
}

/// Glob matching over `/`-separated paths.
///
/// `*` and `?` stay within one segment, `**` spans any number of segments.
/// A pattern without `/` is matched against the file name only.
pub fn glob_match(pattern: &str, path: &str) -> bool {
    if !pattern.contains('/') {
        let file_name = path.rsplit('/').next().unwrap_or(path);
        return segment_match(pattern.as_bytes(), file_name.as_bytes());
    }

    let pattern: Vec<&str> = pattern.split('/').collect();
    let path: Vec<&str> = path.split('/').collect();
    segments_match(&pattern, &path)
}

fn segments_match(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| segments_match(rest, &path[skip..])),
        Some((segment, rest)) => match path.split_first() {
            Some((first, path_rest)) => {
                segment_match(segment.as_bytes(), first.as_bytes()) && segments_match(rest, path_rest)
            }
            None => false,
        },
    }
}

fn segment_match(pattern: &[u8], text: &[u8]) -> bool {
    match pattern.split_first() {
        None => text.is_empty(),
        Some((b'*', rest)) => {
            segment_match(rest, text) || (!text.is_empty() && segment_match(pattern, &text[1..]))
        }
        Some((b'?', rest)) => !text.is_empty() && segment_match(rest, &text[1..]),
        Some((c, rest)) => text.first() == Some(c) && segment_match(rest, &text[1..]),
    }
}
