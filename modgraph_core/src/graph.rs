//! Recursive dependency-graph building on top of [`ImportExtractor`].
//!
//! Traversal uses an explicit work stack over an arena of nodes, so graph
//! depth never translates into native call-stack depth. The finished tree is
//! assembled bottom-up from the arena once traversal completes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ModgraphError;
use crate::extract::{ExtractDiagnostic, ImportExtractor, SpecifierFilter};
use crate::fs::{FileSystem, OsFileSystem};
use crate::model::{DependencyMap, DependencyNode, ImportDescriptor};
use crate::resolve::paths::path_id;

pub const DEFAULT_MAX_DEPTH: usize = 256;

/// When a relative target is cut off to keep traversal finite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CycleGuard {
    /// Leaf when any of the target's own imports is already an ancestor.
    #[default]
    LookAhead,
    /// Leaf when the target itself is already an ancestor.
    SelfInAncestors,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraphOptions {
    pub max_depth: usize,
    pub cycle_guard: CycleGuard,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            cycle_guard: CycleGuard::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphBuild {
    pub dependencies: DependencyMap,
    pub diagnostics: Vec<ExtractDiagnostic>,
}

#[derive(Debug)]
struct ArenaNode {
    parent: Option<usize>,
    key: String,
    descriptor: ImportDescriptor,
    depth: usize,
    expanded: bool,
}

#[derive(Debug, Clone, Default)]
pub struct DependencyGraphBuilder<F = OsFileSystem> {
    extractor: ImportExtractor<F>,
    options: GraphOptions,
}

impl<F: FileSystem> DependencyGraphBuilder<F> {
    pub fn new(extractor: ImportExtractor<F>, options: GraphOptions) -> Self {
        Self { extractor, options }
    }

    pub fn options(&self) -> GraphOptions {
        self.options
    }

    /// Builds the graph rooted at `root_file`, or an empty mapping if anything fails.
    pub fn build(&self, root_file: &Path, filter: Option<SpecifierFilter<'_>>) -> DependencyMap {
        match self.try_build(root_file, filter) {
            Ok(build) => build.dependencies,
            Err(err) => {
                tracing::warn!(
                    root = %root_file.display(),
                    error = %err,
                    "dependency graph build failed; returning empty graph"
                );
                DependencyMap::new()
            }
        }
    }

    pub fn try_build(
        &self,
        root_file: &Path,
        filter: Option<SpecifierFilter<'_>>,
    ) -> Result<GraphBuild, ModgraphError> {
        let root_id = path_id(root_file);
        let root = self.extractor.extract(root_file, filter);
        let mut diagnostics = root.diagnostics;
        let mut arena = Vec::<ArenaNode>::new();
        let mut stack = Vec::<usize>::new();
        push_children(&mut arena, &mut stack, None, 1, root.imports);

        while let Some(index) = stack.pop() {
            let node = &arena[index];
            if !node.descriptor.is_relative() {
                continue;
            }
            if node.descriptor.is_data_only() {
                tracing::debug!(id = %node.descriptor.id, "data import kept as leaf");
                continue;
            }
            let ancestors = ancestor_ids(&arena, index, &root_id);
            let target_id = node.descriptor.id.clone();
            if self.options.cycle_guard == CycleGuard::SelfInAncestors
                && ancestors.contains(&target_id.as_str())
            {
                tracing::debug!(id = %target_id, "cycle guard cut target");
                continue;
            }
            if node.depth > self.options.max_depth {
                return Err(ModgraphError::DepthExceeded {
                    limit: self.options.max_depth,
                    path: target_id,
                });
            }

            let child = self.extractor.extract(Path::new(&target_id), filter);
            diagnostics.extend(child.diagnostics);
            if self.options.cycle_guard == CycleGuard::LookAhead
                && child
                    .imports
                    .values()
                    .any(|grandchild| ancestors.contains(&grandchild.id.as_str()))
            {
                tracing::debug!(id = %target_id, "cycle guard cut target");
                continue;
            }

            let depth = arena[index].depth + 1;
            arena[index].expanded = true;
            tracing::debug!(id = %target_id, imports = child.imports.len(), "expanded target");
            push_children(&mut arena, &mut stack, Some(index), depth, child.imports);
        }

        Ok(GraphBuild {
            dependencies: assemble(arena),
            diagnostics,
        })
    }
}

fn push_children(
    arena: &mut Vec<ArenaNode>,
    stack: &mut Vec<usize>,
    parent: Option<usize>,
    depth: usize,
    imports: crate::model::ImportMap,
) {
    for (key, descriptor) in imports {
        stack.push(arena.len());
        arena.push(ArenaNode {
            parent,
            key,
            descriptor,
            depth,
            expanded: false,
        });
    }
}

/// Root id followed by the ids of every expanded node above `index`.
fn ancestor_ids<'n>(arena: &'n [ArenaNode], index: usize, root_id: &'n str) -> Vec<&'n str> {
    let mut ids = std::iter::successors(arena[index].parent, |&i| arena[i].parent)
        .map(|i| arena[i].descriptor.id.as_str())
        .collect::<Vec<_>>();
    ids.push(root_id);
    ids.reverse();
    ids
}

/// Children always sit after their parent in the arena, so a reverse sweep
/// finishes every subtree before its parent is moved out.
fn assemble(arena: Vec<ArenaNode>) -> DependencyMap {
    let mut children = arena
        .iter()
        .map(|_| DependencyMap::new())
        .collect::<Vec<_>>();
    let mut top = DependencyMap::new();
    for (index, node) in arena.into_iter().enumerate().rev() {
        let dependencies = node
            .expanded
            .then(|| std::mem::take(&mut children[index]));
        let built = DependencyNode {
            descriptor: node.descriptor,
            dependencies,
        };
        match node.parent {
            Some(parent) => children[parent].insert(node.key, built),
            None => top.insert(node.key, built),
        };
    }
    top
}
