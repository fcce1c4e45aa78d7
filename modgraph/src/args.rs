use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use modgraph_core::graph::CycleGuard;
use modgraph_core::resolve::AliasMap;

use crate::error::CliError;

#[derive(Debug, Clone, Parser)]
#[command(name = "modgraph", version)]
#[command(about = "Resolve JavaScript/TypeScript imports and print dependency graphs", long_about = None)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Project root. Defaults to the nearest directory holding a package.json.
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Explicit config file instead of discovery under the project root.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Print the recursive dependency graph of an entry file as JSON.
    Graph(GraphArgs),

    /// Print the direct imports of one file (or directory index) as JSON.
    Imports(ImportsArgs),

    /// Resolve one specifier as seen from an importing file.
    Resolve(ResolveArgs),

    /// Print the project root above a path.
    Root(RootArgs),
}

#[derive(Debug, Clone, Args)]
pub struct GraphArgs {
    pub entry: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub grammar: GrammarArgs,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Maximum expansion depth before the build is abandoned.
    #[arg(long)]
    pub max_depth: Option<usize>,

    #[arg(long, value_enum)]
    pub cycle_guard: Option<CycleGuardArg>,
}

#[derive(Debug, Clone, Args)]
pub struct ImportsArgs {
    pub file: PathBuf,

    #[command(flatten)]
    pub filter: FilterArgs,

    #[command(flatten)]
    pub grammar: GrammarArgs,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Clone, Args)]
pub struct ResolveArgs {
    /// File containing the import.
    pub importer: PathBuf,

    /// Specifier exactly as written in the importer.
    pub specifier: String,

    /// Extra alias as PREFIX=TARGET; repeatable, later entries override.
    #[arg(long = "alias")]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct RootArgs {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Keep only bare specifiers matching one of these globs.
    #[arg(long)]
    pub include: Vec<String>,

    /// Drop bare specifiers matching any of these globs.
    #[arg(long)]
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct GrammarArgs {
    #[arg(long)]
    pub no_typescript: bool,

    #[arg(long)]
    pub no_jsx: bool,
}

#[derive(Debug, Clone, Copy, Default, Args)]
pub struct OutputArgs {
    /// Single-line JSON instead of pretty-printed.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CycleGuardArg {
    LookAhead,
    SelfInAncestors,
}

impl From<CycleGuardArg> for CycleGuard {
    fn from(value: CycleGuardArg) -> Self {
        match value {
            CycleGuardArg::LookAhead => CycleGuard::LookAhead,
            CycleGuardArg::SelfInAncestors => CycleGuard::SelfInAncestors,
        }
    }
}

pub fn parse_alias_flags(raw: &[String]) -> Result<AliasMap, CliError> {
    raw.iter()
        .map(|entry| {
            entry
                .split_once('=')
                .filter(|(prefix, _)| !prefix.is_empty())
                .map(|(prefix, target)| (prefix.to_string(), target.to_string()))
                .ok_or_else(|| CliError::InvalidAlias { raw: entry.clone() })
        })
        .collect()
}
