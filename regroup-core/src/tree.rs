//! Nested grouping tree materialized from a labelled dendrogram.
//!
//! The dendrogram is walked top-down from the root merge. Every merge node
//! becomes a group carrying its merge distance, except that a child merge
//! sharing its parent's distance is collapsed: its children splice directly
//! into the parent's child list. Runs of same-distance binary merges
//! therefore become one flat multi-way group instead of a deep chain,
//! which is what keeps mutually indistinguishable units from nesting
//! meaninglessly.
//!
//! The collapse decision threads the enclosing group's distance down the
//! recursion as an explicit accumulator; nothing is shared or mutated
//! across calls.

use crate::dendrogram::Dendrogram;

/// Errors returned while building a [`GroupingTree`].
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum GroupingError {
    /// The label list disagrees with the dendrogram's leaf count.
    #[error("{labels} unit labels supplied for {leaves} dendrogram leaves")]
    LeafLabelMismatch {
        /// Number of unit labels supplied.
        labels: usize,
        /// Number of leaves in the dendrogram.
        leaves: usize,
    },
    /// A dendrogram node referenced a merge that does not exist.
    #[error("dendrogram node {id} has no backing merge")]
    InvalidNode {
        /// The offending node id.
        id: usize,
    },
}

impl GroupingError {
    /// Returns a stable, machine-readable error code for the variant.
    #[must_use]
    pub const fn code(&self) -> GroupingErrorCode {
        match self {
            Self::LeafLabelMismatch { .. } => GroupingErrorCode::LeafLabelMismatch,
            Self::InvalidNode { .. } => GroupingErrorCode::InvalidNode,
        }
    }
}

/// Machine-readable error codes for [`GroupingError`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GroupingErrorCode {
    /// The label list disagrees with the dendrogram's leaf count.
    LeafLabelMismatch,
    /// A dendrogram node referenced a merge that does not exist.
    InvalidNode,
}

impl GroupingErrorCode {
    /// Returns the symbolic identifier for logging surfaces.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeafLabelMismatch => "GROUPING_LEAF_LABEL_MISMATCH",
            Self::InvalidNode => "GROUPING_INVALID_NODE",
        }
    }
}

/// One node of the grouping tree.
///
/// Equality is structural and order-sensitive: two trees are equal only
/// when every leaf carries the same name at the same position and every
/// group carries the same value over recursively equal children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GroupNode {
    /// A unit, carrying its name.
    Leaf {
        /// Name of the unit this leaf stands for.
        name: String,
    },
    /// A group of units that merged at the same distance.
    Group {
        /// The merge distance shared by this group's members.
        value: u32,
        /// Child groups and leaves, in merge order.
        children: Vec<GroupNode>,
    },
}

impl GroupNode {
    /// Creates a leaf node.
    #[must_use]
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf { name: name.into() }
    }

    /// Creates a group node.
    #[must_use]
    pub fn group(value: u32, children: Vec<Self>) -> Self {
        Self::Group { value, children }
    }

    fn collect_leaf_names<'tree>(&'tree self, out: &mut Vec<&'tree str>) {
        match self {
            Self::Leaf { name } => out.push(name),
            Self::Group { children, .. } => {
                for child in children {
                    child.collect_leaf_names(out);
                }
            }
        }
    }
}

/// A directory-like nested grouping of units.
///
/// # Examples
/// ```
/// use regroup_core::{Dendrogram, DistanceMatrix, GroupNode, GroupingTree, Linkage};
///
/// let distances = DistanceMatrix::try_from_rows(vec![
///     vec![0, 2, 0],
///     vec![2, 0, 2],
///     vec![0, 2, 0],
/// ])
/// .expect("matrix is symmetric");
/// let dendrogram = Dendrogram::from_distances(&distances, Linkage::Single)
///     .expect("matrix is non-empty");
/// let labels = vec!["a".to_owned(), "b".to_owned(), "c".to_owned()];
/// let tree = GroupingTree::from_dendrogram(&dendrogram, &labels)
///     .expect("labels cover the leaves");
/// assert_eq!(
///     *tree.root(),
///     GroupNode::group(2, vec![
///         GroupNode::group(0, vec![GroupNode::leaf("c"), GroupNode::leaf("a")]),
///         GroupNode::leaf("b"),
///     ]),
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GroupingTree {
    root: GroupNode,
}

impl GroupingTree {
    /// Builds the grouping tree for a labelled dendrogram.
    ///
    /// `labels` maps leaf ids to unit names, in id order.
    ///
    /// # Errors
    /// Returns [`GroupingError::LeafLabelMismatch`] when the label list and
    /// the dendrogram disagree about the leaf count, and
    /// [`GroupingError::InvalidNode`] when the dendrogram references a
    /// merge that does not exist.
    pub fn from_dendrogram(
        dendrogram: &Dendrogram,
        labels: &[String],
    ) -> Result<Self, GroupingError> {
        if labels.len() != dendrogram.leaf_count() {
            return Err(GroupingError::LeafLabelMismatch {
                labels: labels.len(),
                leaves: dendrogram.leaf_count(),
            });
        }

        let mut nodes = Vec::with_capacity(1);
        collect(dendrogram, labels, dendrogram.root_id(), None, &mut nodes)?;
        let root = nodes.pop().ok_or(GroupingError::InvalidNode {
            id: dendrogram.root_id(),
        })?;
        Ok(Self { root })
    }

    /// Returns the root node.
    #[must_use]
    pub fn root(&self) -> &GroupNode {
        &self.root
    }

    /// Returns every unit name in the tree, depth-first.
    #[must_use]
    pub fn leaf_names(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.root.collect_leaf_names(&mut out);
        out
    }
}

/// Appends the subtree rooted at `id` to `out`.
///
/// `enclosing` is the group value of the nearest enclosing group on the
/// path from the root; a merge whose distance equals it is flattened into
/// `out` instead of opening a new level.
fn collect(
    dendrogram: &Dendrogram,
    labels: &[String],
    id: usize,
    enclosing: Option<u32>,
    out: &mut Vec<GroupNode>,
) -> Result<(), GroupingError> {
    let leaf_count = labels.len();
    if id < leaf_count {
        out.push(GroupNode::leaf(labels[id].clone()));
        return Ok(());
    }

    let step = dendrogram
        .merges()
        .get(id - leaf_count)
        .copied()
        .ok_or(GroupingError::InvalidNode { id })?;

    if enclosing == Some(step.distance()) {
        collect(dendrogram, labels, step.left(), enclosing, out)?;
        collect(dendrogram, labels, step.right(), enclosing, out)?;
        return Ok(());
    }

    let mut children = Vec::new();
    collect(
        dendrogram,
        labels,
        step.left(),
        Some(step.distance()),
        &mut children,
    )?;
    collect(
        dendrogram,
        labels,
        step.right(),
        Some(step.distance()),
        &mut children,
    )?;
    out.push(GroupNode::group(step.distance(), children));
    Ok(())
}
