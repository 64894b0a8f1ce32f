//! Parser and per-file analysis tests on realistic Next.js sources

use detect_unused::analysis::{FileAnalyzer, ImportResolver};
use detect_unused::discovery::{SourceFile, SourceKind};
use detect_unused::parser::{ReferenceKind, ScriptParser};
use detect_unused::{DetectError, PathAlias};
use std::path::PathBuf;

fn parse(kind: SourceKind, source: &str) -> detect_unused::parser::ParseResult {
    let mut parser = ScriptParser::new().expect("grammars load");
    parser.parse("fixture", kind, source).expect("valid source")
}

fn in_memory(path: &str) -> SourceFile {
    let kind = SourceKind::from_path(std::path::Path::new(path)).expect("known extension");
    SourceFile::new(path, PathBuf::from(path), kind)
}

// ============================================================================
// Export collection
// ============================================================================

#[test]
fn test_server_component_module() {
    let result = parse(
        SourceKind::Tsx,
        r#"
import type { Metadata } from 'next';
import { getUser } from '@/lib/auth';
import { UserCard } from './user-card';

export const metadata: Metadata = { title: 'Profile' };
export const revalidate = 60;

export default async function ProfilePage() {
  const user = await getUser();
  return <UserCard user={user} />;
}

async function helper() {}
"#,
    );

    assert_eq!(result.exports, vec!["metadata", "revalidate", "ProfilePage"]);
    assert_eq!(
        result.specifiers().collect::<Vec<_>>(),
        vec!["next", "@/lib/auth", "./user-card"]
    );
}

#[test]
fn test_barrel_file() {
    let result = parse(
        SourceKind::TypeScript,
        r#"
export * from './button';
export * as icons from './icons';
export { Card, CardHeader as Header } from './card';
export type { CardProps } from './card';
"#,
    );

    assert_eq!(result.exports, vec!["Card", "Header", "CardProps"]);
    assert_eq!(
        result.specifiers().collect::<Vec<_>>(),
        vec!["./button", "./icons", "./card", "./card"]
    );
    assert!(result.module_refs.iter().all(|r| r.kind == ReferenceKind::ReExport));
}

#[test]
fn test_generators_overloads_and_abstract_classes() {
    let result = parse(
        SourceKind::TypeScript,
        r#"
export function* ids() { yield 1; }
export function pick(a: string): string;
export function pick(a: number): number;
export function pick(a: any) { return a; }
export abstract class Repository {}
"#,
    );

    assert_eq!(result.exports, vec!["ids", "pick", "pick", "pick", "Repository"]);
}

#[test]
fn test_commonjs_is_not_tracked() {
    let result = parse(
        SourceKind::JavaScript,
        "const path = require('path');\nmodule.exports = { path };\nconst lazy = import('./lazy');\n",
    );
    assert!(result.exports.is_empty());
    assert!(result.module_refs.is_empty());
}

#[test]
fn test_typescript_5_type_star_barrel() {
    let result = parse(
        SourceKind::TypeScript,
        "export type * from './user';\nexport type * as api from './api';\nexport { session } from './session';\n",
    );

    assert_eq!(result.exports, vec!["session"]);
    assert_eq!(
        result.specifiers().collect::<Vec<_>>(),
        vec!["./user", "./api", "./session"]
    );
    assert!(result.module_refs.iter().all(|r| r.kind == ReferenceKind::ReExport));
}

#[test]
fn test_import_assertions_and_attributes() {
    let result = parse(
        SourceKind::JavaScript,
        r#"
import messages from './messages.json' assert { type: 'json' };
import schema from "./schema.json" with {
  type: "json",
};
export const locale = messages.locale;
"#,
    );

    assert_eq!(
        result.specifiers().collect::<Vec<_>>(),
        vec!["./messages.json", "./schema.json"]
    );
    assert_eq!(result.exports, vec!["locale"]);
}

// ============================================================================
// Per-file analysis
// ============================================================================

#[test]
fn test_analyzer_resolves_and_drops() {
    let resolver = ImportResolver::new(
        ["src/app/page.tsx", "src/lib/db.ts", "src/components/nav/index.tsx"],
        vec![PathAlias::new("@/", "src/")],
    );
    let mut analyzer = FileAnalyzer::new(&resolver).unwrap();

    let analysis = analyzer
        .analyze_source(
            &in_memory("src/app/page.tsx"),
            "import { db } from '@/lib/db';\nimport { Nav } from '../components/nav';\nimport { clsx } from 'clsx';\nimport { gone } from './gone';\n",
        )
        .unwrap();

    assert_eq!(analysis.file_path, "src/app/page.tsx");
    assert_eq!(analysis.imports, vec!["src/lib/db.ts", "src/components/nav/index.tsx"]);
    assert!(analysis.exports.is_empty());
    assert!(!analysis.is_imported);
    assert!(analysis.unused_exports.is_empty());
}

#[test]
fn test_analyzer_keeps_duplicate_imports() {
    let resolver = ImportResolver::new(["src/a.ts", "src/b.ts"], vec![]);
    let mut analyzer = FileAnalyzer::new(&resolver).unwrap();

    let analysis = analyzer
        .analyze_source(
            &in_memory("src/a.ts"),
            "import { x } from './b';\nimport type { Y } from './b';\nexport { x } from './b';\n",
        )
        .unwrap();

    assert_eq!(analysis.imports, vec!["src/b.ts", "src/b.ts", "src/b.ts"]);
    assert_eq!(analysis.exports, vec!["x"]);
}

#[test]
fn test_analyzer_reports_parse_errors() {
    let resolver = ImportResolver::new(["src/bad.tsx"], vec![]);
    let mut analyzer = FileAnalyzer::new(&resolver).unwrap();

    let err = analyzer
        .analyze_source(&in_memory("src/bad.tsx"), "export const View = () => <div>;\n")
        .unwrap_err();
    assert!(matches!(err, DetectError::Parse { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_missing_file_is_a_read_error() {
    let resolver = ImportResolver::new(["src/gone.ts"], vec![]);
    let mut analyzer = FileAnalyzer::new(&resolver).unwrap();

    let err = analyzer
        .analyze(&SourceFile::new(
            "src/gone.ts",
            PathBuf::from("/definitely/not/here/gone.ts"),
            SourceKind::TypeScript,
        ))
        .unwrap_err();
    assert!(matches!(err, DetectError::Read { .. }));
}

#[test]
fn test_analyzer_decodes_escaped_specifiers() {
    let resolver = ImportResolver::new(["src/app/page.tsx", "src/café.ts"], vec![]);
    let mut analyzer = FileAnalyzer::new(&resolver).unwrap();

    let analysis = analyzer
        .analyze_source(&in_memory("src/app/page.tsx"), "import { menu } from '../caf\\u00e9';\n")
        .unwrap();
    assert_eq!(analysis.imports, vec!["src/café.ts"]);
}
