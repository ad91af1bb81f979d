//! Filesystem materialization of a grouping tree.
//!
//! Turns the computed grouping into a directory layout: every group becomes
//! a directory named `_<value>` after its merge distance, except the root
//! group, whose children land directly in the destination root. Each leaf
//! is resolved to a single file under the source root by file name; a unit
//! with zero or several matching files is skipped with a warning rather
//! than failing the run, so one stray generated file cannot abort a whole
//! reorganisation.
//!
//! Nothing is written unless `execute` is set; a dry run only reports what
//! would be placed.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regroup_core::{GroupNode, GroupingTree};
use thiserror::Error;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Errors surfaced while materializing a grouping tree.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// A filesystem operation failed.
    #[error("filesystem operation on `{path}` failed: {source}")]
    Io {
        /// Path the operation targeted.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Where and how to materialize a grouping tree.
#[derive(Debug, Clone)]
pub struct MaterializeOptions {
    /// Directory searched (recursively) for the units' source files.
    pub source_root: PathBuf,
    /// Directory the grouped layout is written beneath.
    pub dest: PathBuf,
    /// File extension appended to each unit's final name segment.
    pub extension: String,
    /// Perform the copies; without this the run only reports.
    pub execute: bool,
}

/// Outcome of a materialization pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializeReport {
    /// Files placed (or, in a dry run, that would be placed).
    pub placed: usize,
    /// Group directories the layout requires.
    pub directories: usize,
    /// Units with no matching source file, skipped.
    pub missing: Vec<String>,
    /// Units with several matching source files, skipped.
    pub ambiguous: Vec<String>,
    /// Whether this pass only reported.
    pub dry_run: bool,
}

/// Materializes `tree` according to `options`.
///
/// # Errors
/// Returns [`MaterializeError::Io`] when the source root cannot be walked
/// or a copy fails. Unresolvable leaves are not errors; they are recorded
/// on the report and logged as warnings.
pub fn materialize(
    tree: &GroupingTree,
    options: &MaterializeOptions,
) -> Result<MaterializeReport, MaterializeError> {
    let index = index_source_files(&options.source_root)?;
    let mut pass = Pass {
        index,
        options,
        report: MaterializeReport {
            dry_run: !options.execute,
            ..MaterializeReport::default()
        },
    };

    if options.execute {
        create_dir(&options.dest)?;
    }

    // Root special case: no `_<value>` level for the tree root itself.
    match tree.root() {
        GroupNode::Group { children, .. } => {
            for child in children {
                pass.place(child, &options.dest)?;
            }
        }
        leaf @ GroupNode::Leaf { .. } => pass.place(leaf, &options.dest)?,
    }

    info!(
        placed = pass.report.placed,
        directories = pass.report.directories,
        missing = pass.report.missing.len(),
        ambiguous = pass.report.ambiguous.len(),
        dry_run = pass.report.dry_run,
        "materialization pass finished"
    );
    Ok(pass.report)
}

struct Pass<'opts> {
    index: HashMap<String, Vec<PathBuf>>,
    options: &'opts MaterializeOptions,
    report: MaterializeReport,
}

impl Pass<'_> {
    fn place(&mut self, node: &GroupNode, dir: &Path) -> Result<(), MaterializeError> {
        match node {
            GroupNode::Leaf { name } => self.place_leaf(name, dir),
            GroupNode::Group { value, children } => {
                let subdir = dir.join(format!("_{value}"));
                self.report.directories += 1;
                if self.options.execute {
                    create_dir(&subdir)?;
                }
                for child in children {
                    self.place(child, &subdir)?;
                }
                Ok(())
            }
        }
    }

    fn place_leaf(&mut self, name: &str, dir: &Path) -> Result<(), MaterializeError> {
        let file_name = unit_file_name(name, &self.options.extension);
        match self.index.get(&file_name).map(Vec::as_slice) {
            None | Some([]) => {
                warn!(unit = name, file = %file_name, "no source file found, skipping");
                self.report.missing.push(name.to_owned());
                Ok(())
            }
            Some([source]) => {
                if self.options.execute {
                    let target = dir.join(&file_name);
                    fs::copy(source, &target).map_err(|err| MaterializeError::Io {
                        path: target,
                        source: err,
                    })?;
                }
                self.report.placed += 1;
                Ok(())
            }
            Some(matches) => {
                warn!(
                    unit = name,
                    file = %file_name,
                    matches = matches.len(),
                    "several source files match, skipping"
                );
                self.report.ambiguous.push(name.to_owned());
                Ok(())
            }
        }
    }
}

/// Derives the file name a unit resolves to: the final dot-separated
/// segment of the unit name plus the configured extension.
fn unit_file_name(unit: &str, extension: &str) -> String {
    let stem = unit.rsplit('.').next().unwrap_or(unit);
    format!("{stem}.{extension}")
}

fn index_source_files(root: &Path) -> Result<HashMap<String, Vec<PathBuf>>, MaterializeError> {
    let mut index: HashMap<String, Vec<PathBuf>> = HashMap::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|err| {
            let path = err
                .path()
                .map_or_else(|| root.to_path_buf(), Path::to_path_buf);
            MaterializeError::Io {
                path,
                source: err.into(),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let file_name = entry.file_name().to_string_lossy().into_owned();
        index.entry(file_name).or_default().push(entry.into_path());
    }
    Ok(index)
}

fn create_dir(path: &Path) -> Result<(), MaterializeError> {
    fs::create_dir_all(path).map_err(|err| MaterializeError::Io {
        path: path.to_path_buf(),
        source: err,
    })
}
