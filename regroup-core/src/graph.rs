//! Dependency graph representation consumed by the clustering pipeline.
//!
//! A [`DependencyGraph`] pairs a unit-name↔id mapping with a square boolean
//! adjacency matrix. Ids are dense and assigned by insertion order; the
//! matrix records `depends_on(i, j)` and is not required to be symmetric.
//! The graph is assembled by an extraction collaborator (see
//! [`crate::DependencySource`]) and is read-only input to the pipeline.

use std::collections::HashMap;

/// Errors returned while assembling a [`DependencyGraph`] from raw parts.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GraphError {
    /// The adjacency matrix row count disagrees with the unit count.
    #[error("adjacency matrix has {rows} rows but {units} units were named")]
    DimensionMismatch {
        /// Number of named units.
        units: usize,
        /// Number of adjacency rows supplied.
        rows: usize,
    },
    /// An adjacency row has the wrong number of columns.
    #[error("adjacency row {row} has {got} columns, expected {expected}")]
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Expected column count (the unit count).
        expected: usize,
        /// Observed column count.
        got: usize,
    },
    /// Two units share the same name.
    #[error("duplicate unit name `{name}`")]
    DuplicateUnit {
        /// The repeated unit name.
        name: String,
    },
}

impl GraphError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GraphErrorCode {
        match self {
            Self::DimensionMismatch { .. } => GraphErrorCode::DimensionMismatch,
            Self::RowLengthMismatch { .. } => GraphErrorCode::RowLengthMismatch,
            Self::DuplicateUnit { .. } => GraphErrorCode::DuplicateUnit,
        }
    }
}

/// Machine-readable error codes for [`GraphError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphErrorCode {
    /// The adjacency matrix row count disagrees with the unit count.
    DimensionMismatch,
    /// An adjacency row has the wrong number of columns.
    RowLengthMismatch,
    /// Two units share the same name.
    DuplicateUnit,
}

impl GraphErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DimensionMismatch => "GRAPH_DIMENSION_MISMATCH",
            Self::RowLengthMismatch => "GRAPH_ROW_LENGTH_MISMATCH",
            Self::DuplicateUnit => "GRAPH_DUPLICATE_UNIT",
        }
    }
}

/// A set of named units and the dependency relation between them.
///
/// # Examples
/// ```
/// use regroup_core::DependencyGraphBuilder;
///
/// let mut builder = DependencyGraphBuilder::new();
/// builder.dependency("app", "util");
/// builder.dependency("app", "model");
/// let graph = builder.build();
/// assert_eq!(graph.len(), 3);
/// assert_eq!(graph.unit_id("app"), Some(0));
/// assert!(graph.depends_on(0, 1));
/// assert!(!graph.depends_on(1, 0));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DependencyGraph {
    names: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<bool>,
}

impl DependencyGraph {
    /// Builds a graph from explicit unit names and adjacency rows.
    ///
    /// Row `i`, column `j` records that unit `i` depends on unit `j`.
    ///
    /// # Errors
    /// Returns [`GraphError::DuplicateUnit`] when two names collide,
    /// [`GraphError::DimensionMismatch`] when the row count disagrees with
    /// the unit count, and [`GraphError::RowLengthMismatch`] when any row
    /// has the wrong number of columns.
    ///
    /// # Examples
    /// ```
    /// use regroup_core::DependencyGraph;
    ///
    /// let graph = DependencyGraph::try_from_rows(
    ///     vec!["a".into(), "b".into()],
    ///     vec![vec![false, true], vec![false, false]],
    /// )
    /// .expect("rows are square");
    /// assert!(graph.depends_on(0, 1));
    /// ```
    pub fn try_from_rows(
        names: Vec<String>,
        rows: Vec<Vec<bool>>,
    ) -> Result<Self, GraphError> {
        let units = names.len();
        let mut index = HashMap::with_capacity(units);
        for (id, name) in names.iter().enumerate() {
            if index.insert(name.clone(), id).is_some() {
                return Err(GraphError::DuplicateUnit { name: name.clone() });
            }
        }
        if rows.len() != units {
            return Err(GraphError::DimensionMismatch {
                units,
                rows: rows.len(),
            });
        }
        let mut cells = Vec::with_capacity(units * units);
        for (row, columns) in rows.iter().enumerate() {
            if columns.len() != units {
                return Err(GraphError::RowLengthMismatch {
                    row,
                    expected: units,
                    got: columns.len(),
                });
            }
            cells.extend_from_slice(columns);
        }
        Ok(Self {
            names,
            index,
            cells,
        })
    }

    /// Returns the number of units in the graph.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns whether the graph contains no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Returns the unit names in id order.
    #[must_use]
    pub fn unit_names(&self) -> &[String] {
        &self.names
    }

    /// Looks up the dense id assigned to `name`.
    #[must_use]
    pub fn unit_id(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Looks up the name assigned to unit `id`.
    #[must_use]
    pub fn unit_name(&self, id: usize) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    /// Returns whether unit `from` depends on unit `to`.
    ///
    /// Out-of-range ids read as "no dependency".
    #[must_use]
    pub fn depends_on(&self, from: usize, to: usize) -> bool {
        if from >= self.len() || to >= self.len() {
            return false;
        }
        self.cells[from * self.len() + to]
    }

    /// Returns unit `id`'s full outgoing-edge row.
    pub(crate) fn row(&self, id: usize) -> &[bool] {
        let len = self.len();
        &self.cells[id * len..(id + 1) * len]
    }
}

/// Incrementally assembles a [`DependencyGraph`].
///
/// Unit ids are assigned in first-encounter order, whether a unit is first
/// seen as a declaration or as an edge endpoint. Repeated declarations and
/// repeated edges are idempotent.
#[derive(Clone, Debug, Default)]
pub struct DependencyGraphBuilder {
    names: Vec<String>,
    index: HashMap<String, usize>,
    edges: Vec<(usize, usize)>,
}

impl DependencyGraphBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` and returns its dense id, reusing the existing id
    /// when the unit was seen before.
    pub fn unit(&mut self, name: &str) -> usize {
        if let Some(&id) = self.index.get(name) {
            return id;
        }
        let id = self.names.len();
        self.names.push(name.to_owned());
        self.index.insert(name.to_owned(), id);
        id
    }

    /// Records that `from` depends on `to`, registering both units.
    pub fn dependency(&mut self, from: &str, to: &str) {
        let from_id = self.unit(from);
        let to_id = self.unit(to);
        self.edges.push((from_id, to_id));
    }

    /// Returns the number of units registered so far.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.names.len()
    }

    /// Finalizes the adjacency matrix and produces the graph.
    #[must_use]
    pub fn build(self) -> DependencyGraph {
        let len = self.names.len();
        let mut cells = vec![false; len * len];
        for (from, to) in self.edges {
            cells[from * len + to] = true;
        }
        DependencyGraph {
            names: self.names,
            index: self.index,
            cells,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[test]
    fn builder_assigns_ids_in_first_encounter_order() {
        let mut builder = DependencyGraphBuilder::new();
        builder.unit("b");
        builder.dependency("a", "c");
        builder.dependency("a", "b");
        let graph = builder.build();

        assert_eq!(graph.unit_names(), ["b", "a", "c"]);
        assert_eq!(graph.unit_id("a"), Some(1));
        assert!(graph.depends_on(1, 2));
        assert!(graph.depends_on(1, 0));
        assert!(!graph.depends_on(0, 1));
    }

    #[test]
    fn duplicate_edges_are_idempotent() {
        let mut builder = DependencyGraphBuilder::new();
        builder.dependency("a", "b");
        builder.dependency("a", "b");
        let graph = builder.build();

        assert_eq!(graph.len(), 2);
        assert!(graph.depends_on(0, 1));
    }

    #[test]
    fn try_from_rows_rejects_row_count_mismatch() {
        let err = DependencyGraph::try_from_rows(
            vec!["a".into(), "b".into()],
            vec![vec![false, false]],
        )
        .expect_err("one row for two units is invalid");
        assert_eq!(err, GraphError::DimensionMismatch { units: 2, rows: 1 });
        assert_eq!(err.code().as_str(), "GRAPH_DIMENSION_MISMATCH");
    }

    #[rstest]
    #[case(vec![vec![false], vec![false, false]], 0, 1)]
    #[case(vec![vec![false, false], vec![false, true, true]], 1, 3)]
    fn try_from_rows_rejects_ragged_rows(
        #[case] rows: Vec<Vec<bool>>,
        #[case] row: usize,
        #[case] got: usize,
    ) {
        let err = DependencyGraph::try_from_rows(vec!["a".into(), "b".into()], rows)
            .expect_err("ragged rows are invalid");
        assert_eq!(
            err,
            GraphError::RowLengthMismatch {
                row,
                expected: 2,
                got,
            }
        );
    }

    #[test]
    fn try_from_rows_rejects_duplicate_names() {
        let err = DependencyGraph::try_from_rows(
            vec!["a".into(), "a".into()],
            vec![vec![false, false], vec![false, false]],
        )
        .expect_err("duplicate names are invalid");
        assert!(matches!(err, GraphError::DuplicateUnit { name } if name == "a"));
    }

    #[test]
    fn out_of_range_lookups_read_as_absent() {
        let graph = DependencyGraphBuilder::new().build();
        assert!(graph.is_empty());
        assert!(!graph.depends_on(0, 0));
        assert_eq!(graph.unit_name(0), None);
    }
}
