use std::path::Path;

pub mod error;
pub mod extract;
pub mod fs;
pub mod graph;
pub mod model;
pub mod project;
pub mod resolve;

pub use error::ModgraphError;
pub use extract::{GrammarProfile, ImportExtractor, SpecifierFilter};
pub use graph::{CycleGuard, DependencyGraphBuilder, GraphOptions};
pub use model::{DependencyMap, DependencyNode, ImportDescriptor, ImportKind, ImportMap};
pub use resolve::{AliasMap, PathResolver, ResolverOptions};

/// Direct imports of one file with the default grammar and the OS filesystem.
pub fn extract_imports(file_path: &Path, filter: Option<SpecifierFilter<'_>>) -> ImportMap {
    ImportExtractor::new(GrammarProfile::default()).extract_imports(file_path, filter)
}

/// Dependency graph rooted at `root_file` with default options.
pub fn build_dependency_graph(
    root_file: &Path,
    filter: Option<SpecifierFilter<'_>>,
) -> DependencyMap {
    DependencyGraphBuilder::new(
        ImportExtractor::new(GrammarProfile::default()),
        GraphOptions::default(),
    )
    .build(root_file, filter)
}
