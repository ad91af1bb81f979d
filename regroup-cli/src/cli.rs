//! Command-line interface orchestration for the regroup pipeline.
//!
//! Offers a `run` command that clusters a GraphViz dot dependency dump and
//! prints the grouping tree, and an `apply` command that additionally
//! copies the matching source files into the grouped directory layout
//! (dry run unless `--execute` is passed).

use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use regroup_core::{
    DependencySource, GroupNode, GroupingTree, Linkage, RegroupBuilder, RegroupError, SourceError,
};
use regroup_providers_dot::DotSource;
use thiserror::Error;

use crate::materialize::{
    MaterializeError, MaterializeOptions, MaterializeReport, materialize,
};

const DEFAULT_EXTENSION: &str = "java";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "regroup",
    about = "Cluster source units by their dependency structure."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Compute and print the grouping tree for a dependency dump.
    Run(RunCommand),
    /// Compute the grouping tree and copy source files into its layout.
    Apply(ApplyCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to the dependency dump in GraphViz dot format.
    pub graph: PathBuf,

    /// Linkage rule used when merging clusters.
    #[arg(long, value_enum, default_value_t = LinkageChoice::Single)]
    pub linkage: LinkageChoice,

    /// Override name for the data source (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Options accepted by the `apply` command.
#[derive(Debug, Args, Clone)]
pub struct ApplyCommand {
    /// Clustering options shared with `run`.
    #[command(flatten)]
    pub run: RunCommand,

    /// Directory searched recursively for the units' source files.
    #[arg(long)]
    pub source_root: PathBuf,

    /// Directory the grouped layout is written beneath.
    #[arg(long)]
    pub dest: PathBuf,

    /// File extension appended to each unit's final name segment.
    #[arg(long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Perform the copies instead of the default dry run.
    #[arg(long)]
    pub execute: bool,
}

/// Linkage rules selectable on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LinkageChoice {
    /// Merge on the minimum inter-cluster distance.
    Single,
    /// Merge on the maximum inter-cluster distance.
    Complete,
}

impl From<LinkageChoice> for Linkage {
    fn from(choice: LinkageChoice) -> Self {
        match choice {
            LinkageChoice::Single => Self::Single,
            LinkageChoice::Complete => Self::Complete,
        }
    }
}

impl fmt::Display for LinkageChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Single => "single",
            Self::Complete => "complete",
        };
        f.write_str(text)
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an input source.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Dot ingestion failed.
    #[error(transparent)]
    Source(#[from] SourceError),
    /// Core pipeline failed.
    #[error(transparent)]
    Core(#[from] RegroupError),
    /// Filesystem materialization failed.
    #[error(transparent)]
    Materialize(#[from] MaterializeError),
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the dependency source.
    pub data_source: String,
    /// The computed grouping tree.
    pub tree: GroupingTree,
    /// Materialization outcome, present for `apply`.
    pub report: Option<MaterializeReport>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading, clustering, or materialization fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => run_command(run),
        Command::Apply(apply) => apply_command(apply),
    }
}

fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let (data_source, tree) = cluster_from_dot(&command)?;
    Ok(ExecutionSummary {
        data_source,
        tree,
        report: None,
    })
}

fn apply_command(command: ApplyCommand) -> Result<ExecutionSummary, CliError> {
    let (data_source, tree) = cluster_from_dot(&command.run)?;
    let options = MaterializeOptions {
        source_root: command.source_root,
        dest: command.dest,
        extension: command.extension,
        execute: command.execute,
    };
    let report = materialize(&tree, &options)?;
    Ok(ExecutionSummary {
        data_source,
        tree,
        report: Some(report),
    })
}

fn cluster_from_dot(command: &RunCommand) -> Result<(String, GroupingTree), CliError> {
    let chosen_name = derive_data_source_name(&command.graph, command.name.as_deref());
    let reader = open_graph_reader(&command.graph)?;
    let source = DotSource::try_from_reader(chosen_name, reader)?;
    let regroup = RegroupBuilder::new()
        .with_linkage(command.linkage.into())
        .build();
    let tree = regroup.run(&source)?;
    Ok((source.name().to_owned(), tree))
}

fn open_graph_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "dependency_graph".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// Group nesting mirrors the directory layout `apply` would create: the
/// root group's children print at the left margin.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "units: {}", summary.tree.leaf_names().len())?;
    match summary.tree.root() {
        GroupNode::Group { children, .. } => {
            for child in children {
                render_node(child, 0, &mut writer)?;
            }
        }
        leaf @ GroupNode::Leaf { .. } => render_node(leaf, 0, &mut writer)?,
    }

    if let Some(report) = &summary.report {
        let verb = if report.dry_run { "would place" } else { "placed" };
        writeln!(
            writer,
            "{verb} {} files into {} group directories",
            report.placed, report.directories,
        )?;
        for unit in &report.missing {
            writeln!(writer, "skipped (no source file): {unit}")?;
        }
        for unit in &report.ambiguous {
            writeln!(writer, "skipped (several source files): {unit}")?;
        }
    }
    Ok(())
}

fn render_node<W: Write>(node: &GroupNode, depth: usize, writer: &mut W) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    match node {
        GroupNode::Leaf { name } => writeln!(writer, "{indent}{name}"),
        GroupNode::Group { value, children } => {
            writeln!(writer, "{indent}_{value}/")?;
            for child in children {
                render_node(child, depth + 1, writer)?;
            }
            Ok(())
        }
    }
}
