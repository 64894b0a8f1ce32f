use std::str::Chars;
use tree_sitter::{Node, TreeCursor};

/// How a module specifier appeared in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// `import ... from '...'` or `import '...'`
    Import,
    /// `export ... from '...'`
    ReExport,
}

/// A module specifier found in a file, before path resolution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReference {
    pub specifier: String,
    pub kind: ReferenceKind,
    /// 1-indexed line of the statement
    pub line: usize,
}

/// Result of parsing a source file
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParseResult {
    /// Import and re-export specifiers in discovery order
    pub module_refs: Vec<ModuleReference>,

    /// Explicitly exported names in discovery order
    pub exports: Vec<String>,
}

impl ParseResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_module_ref(&mut self, specifier: String, kind: ReferenceKind, line: usize) {
        self.module_refs.push(ModuleReference {
            specifier,
            kind,
            line,
        });
    }

    pub fn push_export(&mut self, name: impl Into<String>) {
        self.exports.push(name.into());
    }

    /// Specifiers only, in discovery order
    pub fn specifiers(&self) -> impl Iterator<Item = &str> {
        self.module_refs.iter().map(|r| r.specifier.as_str())
    }
}

/// Extract text from a node
pub fn node_text<'a>(node: Node<'a>, source: &'a str) -> &'a str {
    &source[node.start_byte()..node.end_byte()]
}

/// Value of a string literal node with quotes removed and escapes decoded.
/// Any other node (e.g. an identifier) comes back verbatim.
pub fn string_value(node: Node, source: &str) -> String {
    let text = node_text(node, source);
    if node.kind() != "string" || text.len() < 2 {
        return text.to_string();
    }
    unescape(&text[1..text.len() - 1])
}

/// Decode the escape sequences of a string literal body
pub fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            None => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some('b') => out.push('\u{8}'),
            Some('f') => out.push('\u{c}'),
            Some('v') => out.push('\u{b}'),
            Some('0') => out.push('\0'),
            Some('x') => match hex_digits(&mut chars, 2) {
                Some(code) => push_code_point(&mut out, code),
                None => out.push('x'),
            },
            Some('u') => match unicode_escape(&mut chars) {
                Some(code) => push_code_unit(&mut out, &mut chars, code),
                None => out.push('u'),
            },
            // line continuations
            Some('\r') => {
                if chars.clone().next() == Some('\n') {
                    chars.next();
                }
            }
            Some('\n' | '\u{2028}' | '\u{2029}') => {}
            Some(other) => out.push(other),
        }
    }
    out
}

fn hex_digits(chars: &mut Chars<'_>, count: usize) -> Option<u32> {
    let mut lookahead = chars.clone();
    let mut value = 0;
    for _ in 0..count {
        value = value * 16 + lookahead.next()?.to_digit(16)?;
    }
    *chars = lookahead;
    Some(value)
}

/// `XXXX` or `{X..}` following `\u`
fn unicode_escape(chars: &mut Chars<'_>) -> Option<u32> {
    let mut lookahead = chars.clone();
    if lookahead.next() != Some('{') {
        return hex_digits(chars, 4);
    }
    let mut value: u32 = 0;
    let mut digits = 0;
    loop {
        match lookahead.next()? {
            '}' if digits > 0 => break,
            c => {
                value = value.checked_mul(16)?.checked_add(c.to_digit(16)?)?;
                digits += 1;
            }
        }
    }
    *chars = lookahead;
    Some(value)
}

/// A high surrogate followed by `\uXXXX` low surrogate forms one character
fn push_code_unit(out: &mut String, chars: &mut Chars<'_>, code: u32) {
    if (0xD800..0xDC00).contains(&code) {
        let mut lookahead = chars.clone();
        if lookahead.next() == Some('\\') && lookahead.next() == Some('u') {
            let low = hex_digits(&mut lookahead, 4).filter(|low| (0xDC00..0xE000).contains(low));
            if let Some(low) = low {
                *chars = lookahead;
                push_code_point(out, 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00));
                return;
            }
        }
    }
    push_code_point(out, code);
}

fn push_code_point(out: &mut String, code: u32) {
    out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
}

/// Pre-order iterator over a node and all of its descendants
pub fn descendants<'a>(node: Node<'a>) -> impl Iterator<Item = Node<'a>> {
    DescendantIterator::new(node)
}

struct DescendantIterator<'a> {
    cursor: TreeCursor<'a>,
    done: bool,
}

impl<'a> DescendantIterator<'a> {
    fn new(node: Node<'a>) -> Self {
        Self {
            cursor: node.walk(),
            done: false,
        }
    }
}

impl<'a> Iterator for DescendantIterator<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let node = self.cursor.node();

        if self.cursor.goto_first_child() {
            return Some(node);
        }

        loop {
            if self.cursor.goto_next_sibling() {
                return Some(node);
            }

            if !self.cursor.goto_parent() {
                self.done = true;
                return Some(node);
            }
        }
    }
}
