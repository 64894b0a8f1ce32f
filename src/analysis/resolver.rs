use crate::config::PathAlias;
use crate::discovery::EXTENSIONS;
use std::collections::HashSet;

/// Maps module specifiers onto discovered project files.
///
/// Relative (`./`, `../`) and aliased (`@/`) specifiers are joined and then
/// probed against the known file set: verbatim, with each extension, then as
/// a directory index. Anything else is an external dependency and resolves
/// to `None`.
#[derive(Debug, Clone)]
pub struct ImportResolver {
    known_files: HashSet<String>,
    aliases: Vec<PathAlias>,
}

impl ImportResolver {
    pub fn new<I, S>(known_files: I, aliases: Vec<PathAlias>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known_files: known_files.into_iter().map(Into::into).collect(),
            aliases,
        }
    }

    pub fn is_known(&self, path: &str) -> bool {
        self.known_files.contains(path)
    }

    /// Resolve `specifier` as written in `from_file`.
    ///
    /// Never returns `from_file` itself.
    pub fn resolve(&self, specifier: &str, from_file: &str) -> Option<String> {
        let base = if specifier.starts_with("./") || specifier.starts_with("../") {
            join_normalized(parent_dir(from_file), specifier)
        } else {
            let rewritten = self.aliases.iter().find_map(|alias| alias.apply(specifier))?;
            join_normalized("", &rewritten)
        };

        self.probe(&base).filter(|resolved| resolved != from_file)
    }

    fn probe(&self, base: &str) -> Option<String> {
        if self.is_known(base) {
            return Some(base.to_string());
        }

        let with_extension = EXTENSIONS.iter().map(|ext| format!("{}{}", base, ext));
        let as_index = EXTENSIONS.iter().map(|ext| format!("{}/index{}", base, ext));

        with_extension
            .chain(as_index)
            .find(|candidate| self.is_known(candidate))
    }
}

fn parent_dir(path: &str) -> &str {
    path.rsplit_once('/').map(|(dir, _)| dir).unwrap_or("")
}

/// Lexically join `relative` onto `dir`, folding `.` and `..` segments.
///
/// A `..` with nothing left to pop is kept, so paths escaping the project
/// root never match a discovered file.
fn join_normalized(dir: &str, relative: &str) -> String {
    let mut segments: Vec<&str> = dir.split('/').filter(|s| !s.is_empty()).collect();

    for segment in relative.split('/') {
        match segment {
            "" | "." => {}
            ".." => match segments.last() {
                Some(&last) if last != ".." => {
                    segments.pop();
                }
                _ => segments.push(".."),
            },
            other => segments.push(other),
        }
    }

    segments.join("/")
}
