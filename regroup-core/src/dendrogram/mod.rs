//! Agglomerative clustering of the distance matrix into a dendrogram.
//!
//! This module implements the algorithmic core of the pipeline:
//!
//! - The nearest-neighbour-chain engine walks mutual-nearest-neighbour
//!   chains over a mutable pair-distance table, emitting one merge per step
//!   and updating the table with the configured linkage rule
//!   (Lance–Williams style). The amortized chain reuse keeps the whole run
//!   at `O(n^2)`.
//! - The labeller stable-sorts the merges by distance and rewrites the raw
//!   engine ids into the canonical numbering: leaves keep `0..n-1`, merge
//!   nodes take `n..2n-2` in sorted order, and every node id is strictly
//!   greater than both of its children.
//!
//! The engine is inherently sequential: each merge depends on the distance
//! table state left by all prior merges.

mod label;
mod nn_chain;
mod union_find;

use crate::distance::DistanceMatrix;

/// Errors returned by dendrogram construction.
///
/// Apart from [`DendrogramError::EmptyInput`], every variant reports an
/// internal consistency violation: the computation is pure and
/// deterministic, so these indicate a defect rather than bad user input.
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum DendrogramError {
    /// Clustering requires at least one unit.
    #[error("cannot cluster an empty distance matrix")]
    EmptyInput,
    /// A live cluster pair had no entry in the distance table.
    #[error("no distance recorded for live pair ({left}, {right})")]
    MissingDistance {
        /// Smaller id of the offending pair.
        left: usize,
        /// Larger id of the offending pair.
        right: usize,
    },
    /// The labeller was asked about an id outside its allocated range.
    #[error("node id {id} is outside the label range 0..{limit}")]
    LabelOutOfRange {
        /// The offending node id.
        id: usize,
        /// One past the largest valid id.
        limit: usize,
    },
    /// A merge referenced a cluster whose own merge has not been labelled.
    #[error("cluster {id} was referenced before it was labelled")]
    UnlabelledCluster {
        /// The raw cluster id that had no label yet.
        id: usize,
    },
}

impl DendrogramError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> DendrogramErrorCode {
        match self {
            Self::EmptyInput => DendrogramErrorCode::EmptyInput,
            Self::MissingDistance { .. } => DendrogramErrorCode::MissingDistance,
            Self::LabelOutOfRange { .. } => DendrogramErrorCode::LabelOutOfRange,
            Self::UnlabelledCluster { .. } => DendrogramErrorCode::UnlabelledCluster,
        }
    }
}

/// Machine-readable error codes for [`DendrogramError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DendrogramErrorCode {
    /// Clustering requires at least one unit.
    EmptyInput,
    /// A live cluster pair had no entry in the distance table.
    MissingDistance,
    /// An id fell outside the labeller's allocated range.
    LabelOutOfRange,
    /// A merge referenced a cluster that had not been labelled yet.
    UnlabelledCluster,
}

impl DendrogramErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EmptyInput => "DENDROGRAM_EMPTY_INPUT",
            Self::MissingDistance => "DENDROGRAM_MISSING_DISTANCE",
            Self::LabelOutOfRange => "DENDROGRAM_LABEL_OUT_OF_RANGE",
            Self::UnlabelledCluster => "DENDROGRAM_UNLABELLED_CLUSTER",
        }
    }
}

/// Rule combining two inter-cluster distances into the distance from a
/// merged cluster to a third cluster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Linkage {
    /// Single linkage: the merged distance is the minimum of the two.
    #[default]
    Single,
    /// Complete linkage: the merged distance is the maximum of the two.
    Complete,
}

impl Linkage {
    /// Combines the distances from two merged clusters to a third cluster.
    ///
    /// # Examples
    /// ```
    /// use regroup_core::Linkage;
    ///
    /// assert_eq!(Linkage::Single.combine(2, 5), 2);
    /// assert_eq!(Linkage::Complete.combine(2, 5), 5);
    /// ```
    #[must_use]
    pub fn combine(self, left: u32, right: u32) -> u32 {
        match self {
            Self::Single => left.min(right),
            Self::Complete => left.max(right),
        }
    }
}

/// A single merge event: the two cluster ids merged and the distance at
/// which they merged.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeStep {
    left: usize,
    right: usize,
    distance: u32,
}

impl MergeStep {
    /// Creates a merge event.
    #[must_use]
    pub const fn new(left: usize, right: usize, distance: u32) -> Self {
        Self {
            left,
            right,
            distance,
        }
    }

    /// Returns the first merged cluster id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn left(&self) -> usize { self.left }

    /// Returns the second merged cluster id.
    #[must_use]
    #[rustfmt::skip]
    pub const fn right(&self) -> usize { self.right }

    /// Returns the distance at which the clusters merged.
    #[must_use]
    #[rustfmt::skip]
    pub const fn distance(&self) -> u32 { self.distance }
}

/// A canonically labelled hierarchical clustering over `n` units.
///
/// Leaves carry ids `0..n-1`; the `n-1` merge nodes carry `n..2n-2` in
/// stably-sorted distance order, and every merge node's children have
/// strictly smaller ids than the node itself. The root is the
/// highest-numbered node.
///
/// # Examples
/// ```
/// use regroup_core::{Dendrogram, DistanceMatrix, Linkage};
///
/// let distances = DistanceMatrix::try_from_rows(vec![
///     vec![0, 2, 0],
///     vec![2, 0, 2],
///     vec![0, 2, 0],
/// ])
/// .expect("matrix is symmetric");
/// let dendrogram = Dendrogram::from_distances(&distances, Linkage::Single)
///     .expect("matrix is non-empty");
/// let merges = dendrogram.merges();
/// assert_eq!(merges.len(), 2);
/// assert_eq!((merges[0].left(), merges[0].right(), merges[0].distance()), (2, 0, 0));
/// assert_eq!((merges[1].left(), merges[1].right(), merges[1].distance()), (3, 1, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dendrogram {
    merges: Vec<MergeStep>,
    leaf_count: usize,
}

impl Dendrogram {
    /// Runs the NN-chain engine over `distances` and canonically labels the
    /// resulting merge sequence.
    ///
    /// # Errors
    /// Returns [`DendrogramError::EmptyInput`] for an empty matrix; the
    /// remaining variants report internal consistency violations and abort
    /// the run rather than produce a wrong dendrogram.
    pub fn from_distances(
        distances: &DistanceMatrix,
        linkage: Linkage,
    ) -> Result<Self, DendrogramError> {
        let leaf_count = distances.len();
        if leaf_count == 0 {
            return Err(DendrogramError::EmptyInput);
        }
        let raw = nn_chain::cluster(distances, linkage)?;
        let merges = label::relabel(leaf_count, &raw)?;
        Ok(Self { merges, leaf_count })
    }

    /// Returns the number of leaves (units) in the hierarchy.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    /// Returns the canonically labelled merges in ascending label order.
    #[must_use]
    pub fn merges(&self) -> &[MergeStep] {
        &self.merges
    }

    /// Returns the total number of nodes, leaves and merges together.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.leaf_count + self.merges.len()
    }

    /// Returns the id of the root node.
    #[must_use]
    pub fn root_id(&self) -> usize {
        self.node_count() - 1
    }
}
