use std::io::Write;
use std::path::{Path, PathBuf};

use modgraph_core::extract::{GrammarProfile, ImportExtractor, SpecifierFilter};
use modgraph_core::graph::{DependencyGraphBuilder, GraphOptions};
use modgraph_core::project::markers::find_project_root;
use modgraph_core::resolve::{AliasMap, PathResolver, ResolverOptions};
use serde::Serialize;

use crate::args::{
    Cli, Command, FilterArgs, GrammarArgs, GraphArgs, ImportsArgs, OutputArgs, ResolveArgs,
    parse_alias_flags,
};
use crate::config::{ModgraphConfig, load_modgraph_config, load_modgraph_config_from_path};
use crate::error::CliError;
use crate::filter::SpecifierGlobs;

/// Runs one command, writing its result to `out`. Returns the process exit code.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<i32, CliError> {
    let cwd = std::env::current_dir().map_err(|source| CliError::Io {
        path: PathBuf::from("."),
        source,
    })?;
    match &cli.command {
        Command::Graph(args) => {
            let entry = absolutize(&cwd, &args.entry);
            let config = load_config(cli, &project_root_for(cli, &cwd, &entry))?;
            run_graph(&entry, args, &config, out)
        }
        Command::Imports(args) => {
            let file = absolutize(&cwd, &args.file);
            let config = load_config(cli, &project_root_for(cli, &cwd, &file))?;
            run_imports(&file, args, &config, out)
        }
        Command::Resolve(args) => {
            let importer = absolutize(&cwd, &args.importer);
            let root = project_root_for(cli, &cwd, &importer);
            let config = load_config(cli, &root)?;
            run_resolve(&root, &importer, args, &config, out)
        }
        Command::Root(args) => run_root(&absolutize(&cwd, &args.path), out),
    }
}

fn run_graph(
    entry: &Path,
    args: &GraphArgs,
    config: &ModgraphConfig,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let globs = specifier_globs(&args.filter, config)?;
    let accept = |specifier: &str| globs.accepts(specifier);
    let filter = (!globs.is_empty()).then_some(&accept as SpecifierFilter<'_>);

    let options = GraphOptions {
        max_depth: args
            .max_depth
            .or(config.max_depth)
            .unwrap_or(GraphOptions::default().max_depth),
        cycle_guard: args
            .cycle_guard
            .map(Into::into)
            .or(config.cycle_guard)
            .unwrap_or_default(),
    };
    let builder = DependencyGraphBuilder::new(
        ImportExtractor::new(grammar_profile(args.grammar, config)),
        options,
    );
    tracing::info!(entry = %entry.display(), ?options, "building dependency graph");
    let graph = builder.build(entry, filter);
    write_json(out, &graph, args.output)?;
    Ok(0)
}

fn run_imports(
    file: &Path,
    args: &ImportsArgs,
    config: &ModgraphConfig,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let globs = specifier_globs(&args.filter, config)?;
    let accept = |specifier: &str| globs.accepts(specifier);
    let filter = (!globs.is_empty()).then_some(&accept as SpecifierFilter<'_>);

    let extraction = ImportExtractor::new(grammar_profile(args.grammar, config)).extract(file, filter);
    write_json(out, &extraction.imports, args.output)?;
    Ok(if extraction.diagnostics.is_empty() { 0 } else { 1 })
}

fn run_resolve(
    root: &Path,
    importer: &Path,
    args: &ResolveArgs,
    config: &ModgraphConfig,
    out: &mut impl Write,
) -> Result<i32, CliError> {
    let mut aliases = config.aliases.clone().unwrap_or_default();
    parse_alias_flags(&args.aliases)?
        .iter()
        .for_each(|(prefix, target)| aliases.insert(prefix, target));

    let defaults = ResolverOptions::default();
    let resolver = PathResolver::new(ResolverOptions {
        extensions: config.extensions.clone().unwrap_or(defaults.extensions),
        routes_config_names: config
            .routes_config_names
            .clone()
            .unwrap_or(defaults.routes_config_names),
    });
    let aliases: Option<&AliasMap> = (!aliases.is_empty()).then_some(&aliases);
    match resolver.resolve(root, importer, &args.specifier, aliases) {
        Some(resolved) => {
            writeln!(out, "{}", resolved.display())?;
            Ok(0)
        }
        None => {
            tracing::warn!(
                specifier = %args.specifier,
                importer = %importer.display(),
                "specifier did not resolve to an existing file"
            );
            Ok(1)
        }
    }
}

fn run_root(path: &Path, out: &mut impl Write) -> Result<i32, CliError> {
    let project = find_project_root(path)?;
    writeln!(out, "{}", project.root_dir.display())?;
    Ok(0)
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    dunce::canonicalize(&joined).unwrap_or(joined)
}

fn project_root_for(cli: &Cli, cwd: &Path, start: &Path) -> PathBuf {
    if let Some(root) = &cli.root {
        return absolutize(cwd, root);
    }
    match find_project_root(start) {
        Ok(project) => project.root_dir,
        Err(err) => {
            tracing::debug!(error = %err, "falling back to working directory as project root");
            cwd.to_path_buf()
        }
    }
}

fn load_config(cli: &Cli, project_root: &Path) -> Result<ModgraphConfig, CliError> {
    match &cli.config {
        Some(path) => load_modgraph_config_from_path(path),
        None => load_modgraph_config(project_root),
    }
}

fn specifier_globs(args: &FilterArgs, config: &ModgraphConfig) -> Result<SpecifierGlobs, CliError> {
    let pick = |flags: &Vec<String>, configured: &Option<Vec<String>>| {
        if flags.is_empty() {
            configured.clone().unwrap_or_default()
        } else {
            flags.clone()
        }
    };
    SpecifierGlobs::new(
        &pick(&args.include, &config.include),
        &pick(&args.exclude, &config.exclude),
    )
}

fn grammar_profile(args: GrammarArgs, config: &ModgraphConfig) -> GrammarProfile {
    let configured = config.grammar.unwrap_or_default();
    GrammarProfile {
        typescript: configured.typescript && !args.no_typescript,
        jsx: configured.jsx && !args.no_jsx,
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T, output: OutputArgs) -> Result<(), CliError> {
    if output.compact {
        serde_json::to_writer(&mut *out, value)?;
    } else {
        serde_json::to_writer_pretty(&mut *out, value)?;
    }
    writeln!(out)?;
    Ok(())
}
