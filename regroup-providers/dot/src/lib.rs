//! GraphViz dot ingestion for dependency graphs.
//!
//! Dependency scanners conventionally dump their findings as a dot file:
//! one quoted node declaration per line, and one two-space-indented
//! `"src" -> "dst"` line per edge. [`DotSource`] parses that shape into a
//! [`DependencyGraph`], assigning unit ids in file order, whether a unit
//! first appears as a declaration or as an edge endpoint. Headers, braces,
//! and attribute noise are ignored.

use std::io::BufRead;
use std::sync::Arc;

use regroup_core::{DependencyGraph, DependencyGraphBuilder, DependencySource, SourceError};

/// A [`DependencySource`] backed by a GraphViz dot dependency dump.
///
/// # Examples
/// ```
/// use regroup_core::DependencySource;
/// use regroup_providers_dot::DotSource;
///
/// let dot = "digraph {\n\"a\" [shape=box]\n  \"b\" -> \"a\"\n}\n";
/// let source = DotSource::try_from_str("demo", dot)?;
/// let graph = source.dependency_graph()?;
/// assert_eq!(graph.unit_names(), ["a", "b"]);
/// assert!(graph.depends_on(1, 0));
/// # Ok::<(), regroup_core::SourceError>(())
/// ```
#[derive(Debug)]
pub struct DotSource {
    name: String,
    graph: DependencyGraph,
}

impl DotSource {
    /// Parses a dot dump from a buffered reader.
    ///
    /// # Errors
    /// Returns [`SourceError::Unavailable`] when the reader fails,
    /// [`SourceError::Malformed`] when an edge or node line cannot be
    /// interpreted, and [`SourceError::Empty`] when no units are found.
    pub fn try_from_reader(
        name: impl Into<String>,
        reader: impl BufRead,
    ) -> Result<Self, SourceError> {
        let mut builder = DependencyGraphBuilder::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|err| SourceError::Unavailable {
                reason: Arc::from(err.to_string().as_str()),
            })?;
            parse_line(&mut builder, index + 1, &line)?;
        }
        if builder.unit_count() == 0 {
            return Err(SourceError::Empty);
        }
        Ok(Self {
            name: name.into(),
            graph: builder.build(),
        })
    }

    /// Parses a dot dump held in memory.
    ///
    /// # Errors
    /// As [`DotSource::try_from_reader`], minus the read failures.
    pub fn try_from_str(name: impl Into<String>, text: &str) -> Result<Self, SourceError> {
        Self::try_from_reader(name, text.as_bytes())
    }

    /// Returns the number of units the dump declared.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.graph.len()
    }
}

impl DependencySource for DotSource {
    fn name(&self) -> &str {
        &self.name
    }

    fn dependency_graph(&self) -> Result<DependencyGraph, SourceError> {
        Ok(self.graph.clone())
    }
}

fn parse_line(
    builder: &mut DependencyGraphBuilder,
    line_number: usize,
    line: &str,
) -> Result<(), SourceError> {
    if line.starts_with("  \"") {
        return parse_edge(builder, line_number, line);
    }
    if line.starts_with('"') {
        return parse_node(builder, line_number, line);
    }
    // Headers, braces, and attribute lines carry no dependency facts.
    Ok(())
}

fn parse_node(
    builder: &mut DependencyGraphBuilder,
    line_number: usize,
    line: &str,
) -> Result<(), SourceError> {
    let name = line.split('"').nth(1).unwrap_or("");
    if name.is_empty() {
        return Err(malformed(line_number, "node declaration has no name"));
    }
    builder.unit(name);
    Ok(())
}

fn parse_edge(
    builder: &mut DependencyGraphBuilder,
    line_number: usize,
    line: &str,
) -> Result<(), SourceError> {
    let parts: Vec<&str> = line.split('"').collect();
    let (Some(&from), Some(&separator), Some(&to)) =
        (parts.get(1), parts.get(2), parts.get(3))
    else {
        return Err(malformed(line_number, "expected `\"src\" -> \"dst\"`"));
    };
    if from.is_empty() || to.is_empty() || !separator.contains("->") {
        return Err(malformed(line_number, "expected `\"src\" -> \"dst\"`"));
    }
    builder.dependency(from, to);
    Ok(())
}

fn malformed(line: usize, reason: &str) -> SourceError {
    SourceError::Malformed {
        line,
        reason: Arc::from(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn units_take_ids_in_file_order() {
        let dot = "digraph {\n\"b\" [shape=box]\n  \"a\" -> \"c\"\n}\n";
        let source = DotSource::try_from_str("order", dot).expect("dot parses");
        let graph = source.dependency_graph().expect("graph is ready");

        assert_eq!(graph.unit_names(), ["b", "a", "c"]);
    }

    #[test]
    fn repeated_edges_and_declarations_are_idempotent() {
        let dot = "\"a\"\n\"a\"\n  \"a\" -> \"b\"\n  \"a\" -> \"b\"\n";
        let source = DotSource::try_from_str("dup", dot).expect("dot parses");

        assert_eq!(source.unit_count(), 2);
    }

    #[rstest]
    #[case::missing_target("  \"a\" -> \n", 1)]
    #[case::wrong_separator("  \"a\" -- \"b\"\n", 1)]
    #[case::late_line("\"a\"\n  \"\" -> \"b\"\n", 2)]
    fn malformed_edges_report_their_line(#[case] dot: &str, #[case] line: usize) {
        let err = DotSource::try_from_str("bad", dot).expect_err("edge is malformed");
        assert!(
            matches!(err, SourceError::Malformed { line: reported, .. } if reported == line),
            "unexpected error: {err:?}",
        );
    }

    #[test]
    fn inputs_without_units_are_empty() {
        let err = DotSource::try_from_str("empty", "digraph {\n}\n")
            .expect_err("no units means empty");
        assert_eq!(err, SourceError::Empty);
    }
}
