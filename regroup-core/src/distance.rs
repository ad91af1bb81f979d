//! Structural distance derivation from the dependency relation.
//!
//! Two units are close when they depend on (mostly) the same things. The
//! distance between units `i` and `j` is the Hamming distance between their
//! full outgoing-edge rows: the number of units `x` on which `i` and `j`
//! disagree about depending. The resulting matrix is symmetric with a zero
//! diagonal and is computed once, up front, in `O(n^3)`.
//!
//! Each row of the matrix is an independent pure computation, so the rows
//! are fanned out across a rayon pool and written exactly once.

use rayon::prelude::*;

use crate::graph::DependencyGraph;

/// Errors returned while building a [`DistanceMatrix`] from raw rows.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DistanceError {
    /// A row has the wrong number of columns.
    #[error("distance row {row} has {got} columns, expected {expected}")]
    RowLengthMismatch {
        /// Index of the offending row.
        row: usize,
        /// Expected column count.
        expected: usize,
        /// Observed column count.
        got: usize,
    },
    /// The matrix is not symmetric.
    #[error("distance matrix is asymmetric at ({left}, {right})")]
    Asymmetric {
        /// Row index of the offending cell.
        left: usize,
        /// Column index of the offending cell.
        right: usize,
    },
    /// A diagonal cell is non-zero.
    #[error("distance matrix has non-zero diagonal at {index}")]
    NonZeroDiagonal {
        /// Index of the offending diagonal cell.
        index: usize,
    },
}

impl DistanceError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> DistanceErrorCode {
        match self {
            Self::RowLengthMismatch { .. } => DistanceErrorCode::RowLengthMismatch,
            Self::Asymmetric { .. } => DistanceErrorCode::Asymmetric,
            Self::NonZeroDiagonal { .. } => DistanceErrorCode::NonZeroDiagonal,
        }
    }
}

/// Machine-readable error codes for [`DistanceError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DistanceErrorCode {
    /// A row has the wrong number of columns.
    RowLengthMismatch,
    /// The matrix is not symmetric.
    Asymmetric,
    /// A diagonal cell is non-zero.
    NonZeroDiagonal,
}

impl DistanceErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RowLengthMismatch => "DISTANCE_ROW_LENGTH_MISMATCH",
            Self::Asymmetric => "DISTANCE_ASYMMETRIC",
            Self::NonZeroDiagonal => "DISTANCE_NON_ZERO_DIAGONAL",
        }
    }
}

/// Symmetric pairwise structural distances between units.
///
/// # Examples
/// ```
/// use regroup_core::{DependencyGraph, DistanceMatrix};
///
/// let graph = DependencyGraph::try_from_rows(
///     vec!["a".into(), "b".into(), "c".into()],
///     vec![
///         vec![true, false, false],
///         vec![true, true, true],
///         vec![false, false, true],
///     ],
/// )
/// .expect("rows are square");
/// let distances = DistanceMatrix::from_graph(&graph);
/// assert_eq!(distances.distance(0, 1), 2);
/// assert_eq!(distances.distance(1, 0), 2);
/// assert_eq!(distances.distance(0, 0), 0);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceMatrix {
    len: usize,
    cells: Vec<u32>,
}

impl DistanceMatrix {
    /// Derives the distance matrix from a dependency graph.
    #[must_use]
    pub fn from_graph(graph: &DependencyGraph) -> Self {
        let len = graph.len();
        let rows: Vec<Vec<u32>> = (0..len)
            .into_par_iter()
            .map(|unit| hamming_row(graph, unit))
            .collect();
        let mut cells = Vec::with_capacity(len * len);
        for row in rows {
            cells.extend(row);
        }
        Self { len, cells }
    }

    /// Builds a matrix from explicit rows, validating that it is square,
    /// symmetric, and zero on the diagonal.
    ///
    /// # Errors
    /// Returns [`DistanceError`] when any invariant is violated.
    pub fn try_from_rows(rows: Vec<Vec<u32>>) -> Result<Self, DistanceError> {
        let len = rows.len();
        for (row, columns) in rows.iter().enumerate() {
            if columns.len() != len {
                return Err(DistanceError::RowLengthMismatch {
                    row,
                    expected: len,
                    got: columns.len(),
                });
            }
        }
        for (left, columns) in rows.iter().enumerate() {
            if columns[left] != 0 {
                return Err(DistanceError::NonZeroDiagonal { index: left });
            }
            for right in (left + 1)..len {
                if columns[right] != rows[right][left] {
                    return Err(DistanceError::Asymmetric { left, right });
                }
            }
        }
        let mut cells = Vec::with_capacity(len * len);
        for row in rows {
            cells.extend(row);
        }
        Ok(Self { len, cells })
    }

    /// Returns the number of units the matrix covers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the matrix covers no units.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the distance between units `left` and `right`.
    ///
    /// # Panics
    /// Panics when either id is outside `[0, len)`.
    #[must_use]
    pub fn distance(&self, left: usize, right: usize) -> u32 {
        assert!(left < self.len && right < self.len, "unit id out of range");
        self.cells[left * self.len + right]
    }
}

fn hamming_row(graph: &DependencyGraph, unit: usize) -> Vec<u32> {
    let row = graph.row(unit);
    (0..graph.len())
        .map(|other| {
            if other == unit {
                return 0;
            }
            let other_row = graph.row(other);
            row.iter()
                .zip(other_row)
                .filter(|(mine, theirs)| mine != theirs)
                .count() as u32
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use proptest::prelude::*;

    fn graph_from_adjacency(rows: &[&[u8]]) -> DependencyGraph {
        let names = (0..rows.len()).map(|id| format!("u{id}")).collect();
        let rows = rows
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect();
        DependencyGraph::try_from_rows(names, rows).expect("test adjacency is square")
    }

    #[test]
    fn derives_hamming_distances_over_outgoing_rows() {
        let graph = graph_from_adjacency(&[&[1, 0, 0], &[1, 1, 1], &[0, 0, 1]]);
        let distances = DistanceMatrix::from_graph(&graph);

        for (left, right, expected) in [(0, 1, 2), (0, 2, 2), (1, 2, 2)] {
            assert_eq!(distances.distance(left, right), expected);
            assert_eq!(distances.distance(right, left), expected);
        }
        for unit in 0..3 {
            assert_eq!(distances.distance(unit, unit), 0);
        }
    }

    #[test]
    fn identical_rows_are_distance_zero() {
        let graph = graph_from_adjacency(&[&[0, 0, 0], &[1, 0, 1], &[0, 0, 0]]);
        let distances = DistanceMatrix::from_graph(&graph);

        assert_eq!(distances.distance(0, 2), 0);
        assert_eq!(distances.distance(0, 1), 2);
        assert_eq!(distances.distance(1, 2), 2);
    }

    #[test]
    fn try_from_rows_rejects_asymmetry() {
        let err = DistanceMatrix::try_from_rows(vec![vec![0, 1], vec![2, 0]])
            .expect_err("asymmetric rows are invalid");
        assert_eq!(err, DistanceError::Asymmetric { left: 0, right: 1 });
    }

    #[test]
    fn try_from_rows_rejects_non_zero_diagonal() {
        let err = DistanceMatrix::try_from_rows(vec![vec![1]])
            .expect_err("non-zero diagonal is invalid");
        assert_eq!(err, DistanceError::NonZeroDiagonal { index: 0 });
    }

    proptest! {
        #[test]
        fn derived_matrix_is_symmetric_with_zero_diagonal(
            cells in proptest::collection::vec(any::<bool>(), 1..=64),
        ) {
            // Truncate to the largest square that fits the generated cells.
            let len = (1..=8).rev().find(|n| n * n <= cells.len()).unwrap_or(1);
            let names: Vec<String> = (0..len).map(|id| format!("u{id}")).collect();
            let rows: Vec<Vec<bool>> = (0..len)
                .map(|row| cells[row * len..(row + 1) * len].to_vec())
                .collect();
            let graph = DependencyGraph::try_from_rows(names, rows)
                .expect("generated rows are square");
            let distances = DistanceMatrix::from_graph(&graph);

            for left in 0..len {
                prop_assert_eq!(distances.distance(left, left), 0);
                for right in 0..len {
                    prop_assert_eq!(
                        distances.distance(left, right),
                        distances.distance(right, left),
                    );
                }
            }
        }
    }
}
