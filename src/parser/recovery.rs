//! Module syntax newer than the bundled grammars.
//!
//! When a tree has errors, the offending rows are checked for
//! `export type * from '..'` and import attribute clauses
//! (`assert { .. }` / `with { .. }`). Matches are overwritten with spaces of
//! the same byte length so the statement parses as its older equivalent and
//! every position in the retried tree still points at the original text.

use std::ops::Range;

/// Blank the unsupported syntax found on `rows` (inclusive row ranges).
/// Returns `None` when nothing there matched, i.e. the error is genuine.
pub(crate) fn blank_unsupported_syntax(source: &str, rows: &[(usize, usize)]) -> Option<String> {
    let mut edits: Vec<Range<usize>> = Vec::new();
    let mut line_start = 0;
    for (row, line) in source.split_inclusive('\n').enumerate() {
        if rows.iter().any(|&(first, last)| (first..=last).contains(&row)) {
            if let Some(range) = type_star_export(line) {
                edits.push(line_start + range.start..line_start + range.end);
            }
            edits.extend(import_attributes(source, line_start, line));
        }
        line_start += line.len();
    }

    if edits.is_empty() {
        return None;
    }

    let mut bytes = source.as_bytes().to_vec();
    for range in edits {
        for byte in &mut bytes[range] {
            if *byte != b'\n' && *byte != b'\r' {
                *byte = b' ';
            }
        }
    }
    String::from_utf8(bytes).ok()
}

/// The `type` keyword of `export type * ..`, relative to the line
fn type_star_export(line: &str) -> Option<Range<usize>> {
    let rest = line.trim_start();
    let after_export = rest.strip_prefix("export")?;
    let keyword = after_export.trim_start();
    if keyword.len() == after_export.len() {
        return None;
    }
    if !keyword.strip_prefix("type")?.trim_start().starts_with('*') {
        return None;
    }
    let start = line.len() - keyword.len();
    Some(start..start + "type".len())
}

/// `assert { .. }` / `with { .. }` directly after a string literal, as
/// absolute byte ranges (the clause may continue past this line)
fn import_attributes(source: &str, line_start: usize, line: &str) -> Vec<Range<usize>> {
    let mut found = Vec::new();
    for (i, byte) in line.bytes().enumerate() {
        if byte != b'\'' && byte != b'"' {
            continue;
        }
        let after_quote = &line[i + 1..];
        let rest = after_quote.trim_start_matches(|c: char| c == ' ' || c == '\t');
        let Some(keyword) = ["assert", "with"].into_iter().find(|k| rest.starts_with(*k)) else {
            continue;
        };

        let keyword_start = line_start + i + 1 + (after_quote.len() - rest.len());
        let body = source[keyword_start + keyword.len()..].trim_start();
        if !body.starts_with('{') {
            continue;
        }
        if let Some(close) = matching_brace(source, source.len() - body.len()) {
            found.push(keyword_start..close + 1);
        }
    }
    found
}

fn matching_brace(source: &str, open: usize) -> Option<usize> {
    let bytes = source.as_bytes();
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;
    let mut i = open;
    while i < bytes.len() {
        let byte = bytes[i];
        match quote {
            Some(q) => {
                if byte == b'\\' {
                    i += 1;
                } else if byte == q {
                    quote = None;
                }
            }
            None => match byte {
                b'\'' | b'"' => quote = Some(byte),
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            },
        }
        i += 1;
    }
    None
}
