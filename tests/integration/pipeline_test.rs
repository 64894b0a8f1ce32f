//! End-to-end pipeline tests
//!
//! Each test builds a small project in a temp directory and runs the full
//! discover/analyse/link/report pipeline over it.

use detect_unused::{detect_unused, Config, UnusedCodeDetector, UnusedCodeReport};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn project(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    for (relative, contents) in files {
        let path = dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
    dir
}

fn scan(root: &Path) -> UnusedCodeReport {
    detect_unused(root, true).expect("scan should succeed")
}

fn flagged(report: &UnusedCodeReport) -> Vec<(String, Vec<String>)> {
    report
        .files_with_unused_exports
        .iter()
        .map(|f| (f.file_path.clone(), f.unused_exports.clone()))
        .collect()
}

// ============================================================================
// Scenario
// ============================================================================

#[test]
fn test_next_app_scenario() {
    let dir = project(&[
        (
            "src/app/page.tsx",
            "import { helper } from '@/lib/util';\n\nconst view = <div>{helper()}</div>;\n",
        ),
        (
            "src/lib/util.ts",
            "export function helper() { return 1; }\nexport const unused = 2;\n",
        ),
        ("src/orphan.ts", "const local = 1;\n"),
    ]);

    let report = scan(dir.path());

    assert_eq!(report.unused_files, vec!["src/orphan.ts"]);
    assert!(report.files_with_unused_exports.is_empty());
    assert_eq!(report.total_files, 3);
    assert_eq!(report.total_unused_files, 1);
    assert_eq!(report.total_unused_exports, 0);
}

// ============================================================================
// Discovery
// ============================================================================

#[test]
fn test_discovery_skips_denylisted_trees() {
    let dir = project(&[
        ("src/a.ts", "export {};\n"),
        ("src/deep/nested/b.tsx", "export {};\n"),
        ("lib/c.js", "export {};\n"),
        ("lib/d.jsx", "export {};\n"),
        ("node_modules/ignored.ts", "export {};\n"),
        ("packages/x/node_modules/dep/index.js", "export {};\n"),
        (".next/server/page.js", "export {};\n"),
        ("dist/bundle.js", "export {};\n"),
        ("build/out.js", "export {};\n"),
        ("coverage/lcov-report/prettify.js", "export {};\n"),
        ("src/styles.css", "body {}\n"),
        ("README.md", "# readme\n"),
    ]);

    let report = scan(dir.path());

    assert_eq!(report.total_files, 4);
    let mut all = report.unused_files.clone();
    all.sort();
    assert_eq!(all, vec!["lib/c.js", "lib/d.jsx", "src/a.ts", "src/deep/nested/b.tsx"]);
}

#[test]
fn test_empty_project() {
    let dir = project(&[("README.md", "nothing here\n")]);
    let report = scan(dir.path());

    assert_eq!(report.total_files, 0);
    assert!(report.unused_files.is_empty());
    assert_eq!(report.waste_percentage(), 0.0);
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_relative_and_index_resolution() {
    let dir = project(&[
        ("src/app/page.tsx", "import { a } from '../a';\nimport { b } from '../b';\n"),
        ("src/a.ts", "export const a = 1;\n"),
        ("src/b/index.ts", "export const b = 1;\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
    assert!(report.files_with_unused_exports.is_empty());
}

#[test]
fn test_alias_resolution_with_index_variant() {
    let dir = project(&[
        ("src/app/layout.tsx", "import { helper } from '@/utils/helper';\n"),
        ("src/utils/helper/index.tsx", "export function helper() {}\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
}

#[test]
fn test_external_packages_are_dropped() {
    let dir = project(&[
        (
            "src/app/page.tsx",
            "import React from 'react';\nimport { z } from 'zod';\nimport '@/missing';\n",
        ),
        ("src/lonely.ts", "export const lonely = 1;\n"),
    ]);

    let report = scan(dir.path());
    assert_eq!(report.unused_files, vec!["src/lonely.ts"]);
}

#[test]
fn test_custom_alias_from_config() {
    let dir = project(&[
        (".detect-unused.toml", "[[aliases]]\nprefix = \"~/\"\ntarget = \"app/\"\n"),
        ("src/app/page.tsx", "import { db } from '~/db';\n"),
        ("app/db.ts", "export const db = {};\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
}

#[test]
fn test_self_import_does_not_count() {
    let dir = project(&[("src/self.ts", "import { me } from './self';\nexport const me = 1;\n")]);

    let report = scan(dir.path());
    assert_eq!(report.unused_files, vec!["src/self.ts"]);
    assert_eq!(flagged(&report), vec![("src/self.ts".to_string(), vec!["me".to_string()])]);
}

// ============================================================================
// Usage and entry points
// ============================================================================

#[test]
fn test_imported_flag_propagates_one_way() {
    let dir = project(&[
        ("src/a.ts", "import { b } from './b';\nexport const a = b;\n"),
        ("src/b.ts", "export const b = 1;\n"),
    ]);

    let report = scan(dir.path());
    assert_eq!(report.unused_files, vec!["src/a.ts"]);
    assert_eq!(flagged(&report), vec![("src/a.ts".to_string(), vec!["a".to_string()])]);
}

#[test]
fn test_usage_is_file_granular() {
    let dir = project(&[
        ("src/app/page.tsx", "import { x } from '@/lib/a';\n"),
        ("src/lib/a.ts", "export const x = 1;\nexport const y = 2;\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.files_with_unused_exports.is_empty());
    assert_eq!(report.total_unused_exports, 0);
}

#[test]
fn test_entry_points_are_never_unused() {
    let dir = project(&[
        ("src/app/page.tsx", "export default function Page() {}\n"),
        ("src/app/utils/orphan.ts", "export const orphan = 1;\n"),
        ("src/app/api/users/route.ts", "export async function GET() {}\n"),
        ("src/app/dashboard/loading.tsx", "export default function Loading() {}\n"),
        ("src/context/ThemeContext.tsx", "export const ThemeContext = null;\n"),
        ("next-env.d.ts", "declare const x: number;\n"),
        ("next.config.js", "module.exports = {};\n"),
        ("src/ai/flows/summarize.ts", "export async function summarize() {}\n"),
    ]);

    let report = scan(dir.path());
    assert_eq!(report.unused_files, vec!["src/app/utils/orphan.ts"]);
    // entry points still surface their exports
    assert!(flagged(&report)
        .iter()
        .any(|(path, names)| path == "src/app/api/users/route.ts" && names == &["GET".to_string()]));
}

#[test]
fn test_reexport_marks_target_used() {
    let dir = project(&[
        ("src/app/page.tsx", "import { Button } from '@/components';\n"),
        (
            "src/components/index.ts",
            "export * from './Button';\nexport { Card as default } from './Card';\n",
        ),
        ("src/components/Button.tsx", "export function Button() {}\n"),
        ("src/components/Card.tsx", "export class Card {}\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
}

#[test]
fn test_type_star_barrel_keeps_target_used() {
    let dir = project(&[
        ("src/app/page.tsx", "import type { User } from '@/types';\n"),
        ("src/types/index.ts", "export type * from './user';\n"),
        ("src/types/user.ts", "export interface User { id: string }\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
    assert!(report.files_with_unused_exports.is_empty());
}

#[test]
fn test_import_assertion_file_is_analyzed() {
    let dir = project(&[
        ("src/app/page.tsx", "import { load } from '@/lib/load';\n"),
        (
            "src/lib/load.js",
            "import { rows } from './rows.js' assert { type: 'json' };\nexport const load = () => rows;\n",
        ),
        ("src/lib/rows.js", "export const rows = [];\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
    assert_eq!(report.total_files, 3);
}

#[test]
fn test_escaped_specifier_resolves() {
    let dir = project(&[
        ("src/app/page.tsx", "import { menu } from '@/caf\\u00e9';\n"),
        ("src/café.ts", "export const menu = [];\n"),
    ]);

    let report = scan(dir.path());
    assert!(report.unused_files.is_empty());
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_parse_failure_is_isolated() {
    let dir = project(&[
        ("src/app/page.tsx", "import { ok } from '@/ok';\nimport '@/broken';\n"),
        ("src/ok.ts", "export const ok = 1;\n"),
        ("src/broken.ts", "export function (((\n"),
        ("src/orphan.ts", "export const orphan = 1;\n"),
    ]);

    let report = scan(dir.path());

    assert_eq!(report.total_files, 4);
    assert_eq!(report.unused_files, vec!["src/orphan.ts"]);
    assert!(report
        .files_with_unused_exports
        .iter()
        .all(|f| f.file_path != "src/broken.ts"));
}

#[test]
fn test_missing_root_fails() {
    let dir = tempfile::tempdir().unwrap();
    assert!(detect_unused(&dir.path().join("does-not-exist"), true).is_err());
}

#[test]
fn test_root_must_be_directory() {
    let dir = project(&[("file.ts", "export {};\n")]);
    assert!(detect_unused(&dir.path().join("file.ts"), true).is_err());
}

// ============================================================================
// Determinism
// ============================================================================

#[test]
fn test_repeated_runs_are_identical() {
    let dir = project(&[
        ("src/app/page.tsx", "import { a } from '@/a';\n"),
        ("src/a.ts", "export const a = 1;\n"),
        ("src/z.ts", "export const z = 1;\nexport function zz() {}\n"),
        ("src/m/index.js", "export class M {}\n"),
        ("src/b.tsx", "export interface Props {}\nexport type Id = string;\n"),
    ]);

    let first = serde_json::to_string(&scan(dir.path())).unwrap();
    let second = serde_json::to_string(&scan(dir.path())).unwrap();
    assert_eq!(first, second);

    let parallel = UnusedCodeDetector::silent(Config {
        parallel: true,
        ..Config::default()
    })
    .analyze(dir.path())
    .unwrap();
    assert_eq!(serde_json::to_string(&parallel).unwrap(), first);
}
