use std::path::Path;

use oxc_ast::ast::{ImportDeclaration, ImportDeclarationSpecifier, ImportOrExportKind};
use oxc_ast_visit::Visit;

use crate::extract::SpecifierFilter;
use crate::model::{ImportDescriptor, ImportKind, ImportMap, is_relative_specifier};
use crate::resolve::paths::path_id;

pub(crate) struct ImportCollector<'c> {
    base_dir: &'c Path,
    filter: Option<SpecifierFilter<'c>>,
    imports: ImportMap,
}

impl<'c> ImportCollector<'c> {
    pub(crate) fn new(base_dir: &'c Path, filter: Option<SpecifierFilter<'c>>) -> Self {
        Self {
            base_dir,
            filter,
            imports: ImportMap::new(),
        }
    }

    pub(crate) fn into_imports(self) -> ImportMap {
        self.imports
    }

    fn source_id(&self, specifier: &str) -> Option<String> {
        if is_relative_specifier(specifier) {
            return Some(path_id(&self.base_dir.join(specifier)));
        }
        self.filter
            .is_none_or(|accept| accept(specifier))
            .then(|| specifier.to_string())
    }
}

fn import_kind(kind: ImportOrExportKind) -> ImportKind {
    match kind {
        ImportOrExportKind::Value => ImportKind::Value,
        ImportOrExportKind::Type => ImportKind::Type,
    }
}

impl<'a> Visit<'a> for ImportCollector<'_> {
    fn visit_import_declaration(&mut self, it: &ImportDeclaration<'a>) {
        let source = it.source.value.as_str();
        let Some(id) = self.source_id(source) else {
            return;
        };
        let Some(specifiers) = &it.specifiers else {
            return;
        };
        for specifier in specifiers.iter() {
            let (local, export_name) = match specifier {
                ImportDeclarationSpecifier::ImportNamespaceSpecifier(ns) => {
                    (ns.local.name.as_str(), None)
                }
                ImportDeclarationSpecifier::ImportDefaultSpecifier(default) => {
                    (default.local.name.as_str(), Some("default".to_string()))
                }
                ImportDeclarationSpecifier::ImportSpecifier(named) => (
                    named.local.name.as_str(),
                    Some(named.imported.name().to_string()),
                ),
            };
            // Redeclared locals overwrite earlier entries.
            self.imports.insert(
                local.to_string(),
                ImportDescriptor {
                    id: id.clone(),
                    source: source.to_string(),
                    import_kind: Some(import_kind(it.import_kind)),
                    export_name,
                },
            );
        }
    }
}
