use std::path::{Path, PathBuf};

use clap::Parser;
use serde_json::Value;
use tempfile::TempDir;

use modgraph::args::Cli;
use modgraph::run::run;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn project() -> (TempDir, PathBuf) {
    let temp = TempDir::new().unwrap();
    let root = dunce::canonicalize(temp.path()).unwrap();
    write_file(&root.join("package.json"), r#"{ "name": "fixture" }"#);
    write_file(
        &root.join("src/main.ts"),
        "import { greet } from './greet';\nimport _ from 'lodash';\nimport React from 'react';\n",
    );
    write_file(&root.join("src/greet.ts"), "import type { Name } from './types';\n");
    write_file(&root.join("src/types.ts"), "export type Name = string;\n");
    (temp, root)
}

fn run_to_string(argv: &[&str]) -> (i32, String) {
    let cli = Cli::try_parse_from(argv).unwrap();
    let mut out = Vec::new();
    let code = run(&cli, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

#[test]
fn graph_command_prints_filtered_tree() {
    let (_temp, root) = project();
    let entry = root.join("src/main.ts");

    let (code, stdout) = run_to_string(&[
        "modgraph",
        "graph",
        entry.to_str().unwrap(),
        "--exclude",
        "lodash",
        "--compact",
    ]);
    assert_eq!(code, 0);
    let graph: Value = serde_json::from_str(&stdout).unwrap();
    assert!(graph.get("_").is_none());
    assert_eq!(graph["React"]["id"], "react");
    assert_eq!(
        graph["greet"]["dependencies"]["Name"]["importKind"],
        "type"
    );
    assert_eq!(
        graph["greet"]["dependencies"]["Name"]["dependencies"],
        serde_json::json!({})
    );
}

#[test]
fn graph_command_reads_filter_from_config() {
    let (_temp, root) = project();
    write_file(&root.join("modgraph.config.json"), r#"{ "include": ["react"] }"#);
    let entry = root.join("src/main.ts");

    let (_, stdout) = run_to_string(&["modgraph", "graph", entry.to_str().unwrap()]);
    let graph: Value = serde_json::from_str(&stdout).unwrap();
    assert!(graph.get("_").is_none());
    assert!(graph.get("React").is_some());
    assert!(graph.get("greet").is_some());
}

#[test]
fn imports_command_prints_direct_mapping_only() {
    let (_temp, root) = project();
    let entry = root.join("src/main.ts");

    let (code, stdout) = run_to_string(&["modgraph", "imports", entry.to_str().unwrap()]);
    assert_eq!(code, 0);
    let imports: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(imports["_"]["exportName"], "default");
    assert!(imports["greet"].get("dependencies").is_none());
}

#[test]
fn imports_command_flags_unparsable_file() {
    let (_temp, root) = project();
    let broken = root.join("src/broken.ts");
    write_file(&broken, "import { from 'x';\n");

    let (code, stdout) = run_to_string(&["modgraph", "imports", broken.to_str().unwrap()]);
    assert_eq!(code, 1);
    assert_eq!(stdout.trim(), "{}");
}

#[test]
fn resolve_command_uses_config_aliases() {
    let (_temp, root) = project();
    write_file(&root.join("src/utils/math.ts"), "export const add = 1;\n");
    write_file(
        &root.join("modgraph.config.json"),
        r##"{ "aliases": { "#utils/": "src/utils/" } }"##,
    );
    let importer = root.join("src/main.ts");

    let (code, stdout) = run_to_string(&[
        "modgraph",
        "resolve",
        importer.to_str().unwrap(),
        "#utils/math",
    ]);
    assert_eq!(code, 0);
    assert_eq!(PathBuf::from(stdout.trim()), root.join("src/utils/math.ts"));
}

#[test]
fn resolve_command_exits_one_when_unresolved() {
    let (_temp, root) = project();
    let importer = root.join("src/main.ts");

    let (code, stdout) = run_to_string(&[
        "modgraph",
        "resolve",
        importer.to_str().unwrap(),
        "missing/module",
    ]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
}

#[test]
fn root_command_prints_manifest_directory() {
    let (_temp, root) = project();
    let nested = root.join("src/greet.ts");

    let (code, stdout) = run_to_string(&["modgraph", "root", nested.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(PathBuf::from(stdout.trim()), root);
}
