use std::path::Path;

use tempfile::TempDir;

use modgraph_core::extract::{ExtractDiagnostic, GrammarProfile, ImportExtractor};
use modgraph_core::model::{ImportDescriptor, ImportKind};
use modgraph_core::resolve::paths::path_id;

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

fn extractor() -> ImportExtractor {
    ImportExtractor::new(GrammarProfile::default())
}

#[test]
fn extract_covers_namespace_default_and_named_bindings() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("src/app.tsx");
    write_file(
        &file,
        r#"
import * as utils from './utils';
import React from 'react';
import { format as formatDate, parse } from '../lib/date';
import './styles.css';

export const App = () => <div>{utils.name}</div>;
"#,
    );

    let imports = modgraph_core::extract_imports(&file, None);
    let keys = imports.keys().map(String::as_str).collect::<Vec<_>>();
    assert_eq!(keys, vec!["React", "formatDate", "parse", "utils"]);

    assert_eq!(
        imports["utils"],
        ImportDescriptor {
            id: path_id(&temp.path().join("src/utils")),
            source: "./utils".to_string(),
            import_kind: Some(ImportKind::Value),
            export_name: None,
        }
    );
    assert_eq!(imports["React"].id, "react");
    assert_eq!(imports["React"].export_name.as_deref(), Some("default"));
    assert_eq!(imports["formatDate"].export_name.as_deref(), Some("format"));
    assert_eq!(imports["formatDate"].id, path_id(&temp.path().join("lib/date")));
    assert_eq!(imports["parse"].export_name.as_deref(), Some("parse"));
}

#[test]
fn extract_copies_type_only_marker() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("types.ts");
    write_file(
        &file,
        "import type { User } from './models';\nimport { load } from './api';\n",
    );

    let imports = modgraph_core::extract_imports(&file, None);
    assert_eq!(imports["User"].import_kind, Some(ImportKind::Type));
    assert_eq!(imports["User"].export_name.as_deref(), Some("User"));
    assert_eq!(imports["load"].import_kind, Some(ImportKind::Value));
}

#[test]
fn extract_applies_filter_to_bare_specifiers_only() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("main.ts");
    write_file(
        &file,
        "import _ from 'lodash';\nimport dayjs from 'dayjs';\nimport local from './local';\n",
    );
    let reject_lodash = |spec: &str| spec != "lodash";

    let imports = extractor().extract_imports(&file, Some(&reject_lodash));
    assert!(!imports.contains_key("_"));
    assert_eq!(imports["dayjs"].id, "dayjs");
    assert_eq!(imports["local"].source, "./local");
}

#[test]
fn extract_later_duplicate_binding_wins() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("dup.js");
    write_file(&file, "import x from './one';\nimport x from './two';\n");

    let imports = extractor().extract_imports(&file, None);
    assert_eq!(imports.len(), 1);
    assert_eq!(imports["x"].source, "./two");
}

#[test]
fn extract_probes_extensions_for_extensionless_path() {
    let temp = TempDir::new().unwrap();
    write_file(&temp.path().join("widget.jsx"), "import dep from './dep';\n");

    let imports = extractor().extract_imports(&temp.path().join("widget"), None);
    assert_eq!(imports["dep"].id, path_id(&temp.path().join("dep")));
}

#[test]
fn extract_probes_suffix_after_dotted_name() {
    let temp = TempDir::new().unwrap();
    write_file(
        &temp.path().join("user.service.ts"),
        "import { db } from './db';\n",
    );

    let imports = extractor().extract_imports(&temp.path().join("user.service"), None);
    assert_eq!(imports["db"].source, "./db");
}

#[test]
fn extract_stylesheet_reports_missing_source_instead_of_parsing() {
    let temp = TempDir::new().unwrap();
    let stylesheet = temp.path().join("a.module.css");
    write_file(&stylesheet, ".button { color: red; }\n");

    let extraction = extractor().extract(&stylesheet, None);
    assert!(extraction.imports.is_empty());
    assert_eq!(
        extraction.diagnostics,
        vec![ExtractDiagnostic::NoSourceFile { path: stylesheet }]
    );
}

#[test]
fn extract_directory_uses_entry_containing_index() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("components");
    write_file(&dir.join("README.md"), "# components");
    write_file(&dir.join("Button.tsx"), "import nope from './nope';\n");
    write_file(&dir.join("index.ts"), "import { Button } from './Button';\n");

    let imports = extractor().extract_imports(&dir, None);
    assert_eq!(imports.len(), 1);
    // Relative to the directory itself, not its parent.
    assert_eq!(imports["Button"].id, path_id(&dir.join("Button")));
}

#[test]
fn extract_directory_matches_index_substring() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("store");
    write_file(&dir.join("store.index.js"), "import reducer from './reducer';\n");

    let imports = extractor().extract_imports(&dir, None);
    assert_eq!(imports["reducer"].source, "./reducer");
}

#[test]
fn extract_directory_without_index_reports_missing_source() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("empty");
    write_file(&dir.join("main.ts"), "import a from './a';\n");

    let extraction = extractor().extract(&dir, None);
    assert!(extraction.imports.is_empty());
    assert_eq!(
        extraction.diagnostics,
        vec![ExtractDiagnostic::NoSourceFile { path: dir.clone() }]
    );
}

#[test]
fn extract_syntax_error_degrades_to_empty_with_diagnostic() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("broken.ts");
    write_file(&file, "import { a from './a';\nconst = ;\n");

    let extraction = extractor().extract(&file, None);
    assert!(extraction.imports.is_empty());
    assert_eq!(extraction.diagnostics.len(), 1);
    assert!(matches!(
        &extraction.diagnostics[0],
        ExtractDiagnostic::ParseFailed { path, .. } if path == &file
    ));
}

#[test]
fn extract_missing_file_degrades_to_read_failure() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("ghost.ts");

    let extraction = extractor().extract(&file, None);
    assert!(extraction.imports.is_empty());
    assert!(matches!(
        &extraction.diagnostics[0],
        ExtractDiagnostic::ReadFailed { .. }
    ));
}

#[test]
fn extract_accepts_decorators_and_jsx_in_typescript() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("component.tsx");
    write_file(
        &file,
        r#"
import { Component } from './decorators';
import type { Props } from './props';

@Component({ selector: 'app' })
class Widget {
    render(props: Props) {
        return <span>{props.label}</span>;
    }
}

export default Widget;
"#,
    );

    let extraction = extractor().extract(&file, None);
    assert!(extraction.diagnostics.is_empty(), "{:?}", extraction.diagnostics);
    assert_eq!(extraction.imports.len(), 2);
}
