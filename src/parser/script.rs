use super::common::{descendants, node_text, string_value, ParseResult, ReferenceKind};
use super::recovery::blank_unsupported_syntax;
use crate::discovery::SourceKind;
use crate::error::{DetectError, Result};
use tracing::trace;
use tree_sitter::{Node, Parser as TsParser, Tree};

/// Statement kinds that matter for import/export extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleItem {
    Import,
    Export,
    Other,
}

impl ModuleItem {
    pub fn classify(node: Node) -> Self {
        match node.kind() {
            "import_statement" => ModuleItem::Import,
            "export_statement" => ModuleItem::Export,
            _ => ModuleItem::Other,
        }
    }
}

/// Declaration forms that contribute names when preceded by `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportedDeclaration {
    Function,
    Class,
    Interface,
    TypeAlias,
    Variables,
    /// `declare ...`, wraps another declaration
    Ambient,
    /// enums, namespaces and anything else that is not tracked
    Untracked,
}

impl ExportedDeclaration {
    pub fn classify(node: Node) -> Self {
        match node.kind() {
            "function_declaration" | "generator_function_declaration" | "function_signature" => {
                ExportedDeclaration::Function
            }
            "class_declaration" | "abstract_class_declaration" => ExportedDeclaration::Class,
            "interface_declaration" => ExportedDeclaration::Interface,
            "type_alias_declaration" => ExportedDeclaration::TypeAlias,
            "lexical_declaration" | "variable_declaration" => ExportedDeclaration::Variables,
            "ambient_declaration" => ExportedDeclaration::Ambient,
            _ => ExportedDeclaration::Untracked,
        }
    }
}

/// TypeScript / JavaScript parser using tree-sitter
pub struct ScriptParser {
    typescript: TsParser,
    tsx: TsParser,
    javascript: TsParser,
}

impl ScriptParser {
    pub fn new() -> Result<Self> {
        let mut typescript = TsParser::new();
        typescript
            .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
            .map_err(|_| DetectError::GrammarInit {
                language: "TypeScript",
            })?;

        let mut tsx = TsParser::new();
        tsx.set_language(&tree_sitter_typescript::LANGUAGE_TSX.into())
            .map_err(|_| DetectError::GrammarInit { language: "TSX" })?;

        let mut javascript = TsParser::new();
        javascript
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .map_err(|_| DetectError::GrammarInit {
                language: "JavaScript",
            })?;

        Ok(Self {
            typescript,
            tsx,
            javascript,
        })
    }

    /// Parse one file and collect its module specifiers and exported names.
    ///
    /// Fails if tree-sitter cannot build a tree or the tree contains
    /// syntax errors that are not just module syntax newer than the grammar.
    pub fn parse(&mut self, path: &str, kind: SourceKind, contents: &str) -> Result<ParseResult> {
        let mut tree = self.parse_tree(path, kind, contents)?;

        let mut recovered = None;
        if tree.root_node().has_error() {
            let rows = error_rows(tree.root_node());
            if let Some(blanked) = blank_unsupported_syntax(contents, &rows) {
                trace!("{}: retrying with newer module syntax blanked", path);
                tree = self.parse_tree(path, kind, &blanked)?;
                recovered = Some(blanked);
            }
        }
        let source = recovered.as_deref().unwrap_or(contents);

        let root = tree.root_node();
        if root.has_error() {
            let reason = match descendants(root).find(|n| n.is_error() || n.is_missing()) {
                Some(bad) => format!(
                    "syntax error at line {}, column {}",
                    bad.start_position().row + 1,
                    bad.start_position().column + 1
                ),
                None => "syntax error".to_string(),
            };
            return Err(DetectError::Parse {
                path: path.to_string(),
                reason,
            });
        }

        let mut result = ParseResult::new();
        for node in descendants(root) {
            match ModuleItem::classify(node) {
                ModuleItem::Import => collect_import(node, source, &mut result),
                ModuleItem::Export => collect_export(node, source, &mut result),
                ModuleItem::Other => {}
            }
        }

        trace!(
            "{}: {} module refs, {} exports",
            path,
            result.module_refs.len(),
            result.exports.len()
        );
        Ok(result)
    }

    fn parse_tree(&mut self, path: &str, kind: SourceKind, text: &str) -> Result<Tree> {
        let parser = match kind {
            SourceKind::TypeScript => &mut self.typescript,
            SourceKind::Tsx => &mut self.tsx,
            SourceKind::JavaScript | SourceKind::Jsx => &mut self.javascript,
        };
        parser.parse(text, None).ok_or_else(|| DetectError::Parse {
            path: path.to_string(),
            reason: "parser produced no syntax tree".to_string(),
        })
    }
}

/// Inclusive row span of every error or missing node
fn error_rows(root: Node) -> Vec<(usize, usize)> {
    descendants(root)
        .filter(|n| n.is_error() || n.is_missing())
        .map(|n| (n.start_position().row, n.end_position().row))
        .collect()
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

fn collect_import(node: Node, source: &str, result: &mut ParseResult) {
    // `import x = require('...')` keeps its string inside import_require_clause
    if let Some(spec) = node.child_by_field_name("source") {
        result.push_module_ref(
            string_value(spec, source),
            ReferenceKind::Import,
            line_of(node),
        );
    }
}

fn collect_export(node: Node, source: &str, result: &mut ParseResult) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() == "export_clause" {
            collect_export_clause(child, source, result);
        }
    }

    if let Some(spec) = node.child_by_field_name("source") {
        result.push_module_ref(
            string_value(spec, source),
            ReferenceKind::ReExport,
            line_of(node),
        );
    }

    if let Some(declaration) = node.child_by_field_name("declaration") {
        collect_declaration(declaration, source, result);
    }
}

/// `{ a, b as c }`: the exported name is the alias when there is one
fn collect_export_clause(clause: Node, source: &str, result: &mut ParseResult) {
    let mut cursor = clause.walk();
    for specifier in clause.named_children(&mut cursor) {
        if specifier.kind() != "export_specifier" {
            continue;
        }
        let exported = specifier
            .child_by_field_name("alias")
            .or_else(|| specifier.child_by_field_name("name"));
        if let Some(name) = exported {
            result.push_export(string_value(name, source));
        }
    }
}

fn collect_declaration(declaration: Node, source: &str, result: &mut ParseResult) {
    match ExportedDeclaration::classify(declaration) {
        ExportedDeclaration::Function
        | ExportedDeclaration::Class
        | ExportedDeclaration::Interface
        | ExportedDeclaration::TypeAlias => {
            if let Some(name) = declaration.child_by_field_name("name") {
                result.push_export(node_text(name, source));
            }
        }
        ExportedDeclaration::Variables => {
            let mut cursor = declaration.walk();
            for declarator in declaration.named_children(&mut cursor) {
                if declarator.kind() != "variable_declarator" {
                    continue;
                }
                // destructuring patterns are skipped
                if let Some(name) = declarator.child_by_field_name("name") {
                    if name.kind() == "identifier" {
                        result.push_export(node_text(name, source));
                    }
                }
            }
        }
        ExportedDeclaration::Ambient => {
            let mut cursor = declaration.walk();
            let inner = declaration
                .named_children(&mut cursor)
                .find(|child| ExportedDeclaration::classify(*child) != ExportedDeclaration::Untracked);
            if let Some(inner) = inner {
                collect_declaration(inner, source, result);
            }
        }
        ExportedDeclaration::Untracked => {}
    }
}
