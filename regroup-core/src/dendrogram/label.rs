//! Stable sorting and canonical labelling of raw merge sequences.
//!
//! The engine hands out synthetic cluster ids in creation order, and a
//! reseeded chain can emit merges whose distances are not monotone. The
//! labeller stable-sorts the merges by distance (equal distances keep their
//! creation order) and renumbers merge nodes `n..2n-2` in that order, so
//! every node id ends up strictly greater than both of its children's ids.

use super::union_find::LabelForest;
use super::{DendrogramError, MergeStep};

/// Rewrites `raw` into the canonical dendrogram numbering.
pub(super) fn relabel(
    leaf_count: usize,
    raw: &[MergeStep],
) -> Result<Vec<MergeStep>, DendrogramError> {
    let mut order: Vec<usize> = (0..raw.len()).collect();
    order.sort_by_key(|&created| raw[created].distance());

    // Label received by each raw merge, indexed by creation order.
    let mut labels: Vec<Option<usize>> = vec![None; raw.len()];
    let mut forest = LabelForest::new(leaf_count);
    let mut merges = Vec::with_capacity(raw.len());

    for &created in &order {
        let step = raw[created];
        let left = canonical_root(step.left(), leaf_count, &labels, &mut forest)?;
        let right = canonical_root(step.right(), leaf_count, &labels, &mut forest)?;
        let label = forest.union(left, right)?;
        labels[created] = Some(label);
        merges.push(MergeStep::new(left, right, step.distance()));
    }

    Ok(merges)
}

/// Rewrites a raw endpoint to the canonical root of the cluster it denotes.
///
/// Leaves keep their id; a synthetic engine id resolves to the label its
/// creating merge received. Reducible linkage rules guarantee a cluster
/// merges again at a distance no smaller than the one it formed at, so the
/// creating merge is always processed first; a missing label therefore
/// signals an internal inconsistency.
fn canonical_root(
    raw: usize,
    leaf_count: usize,
    labels: &[Option<usize>],
    forest: &mut LabelForest,
) -> Result<usize, DendrogramError> {
    let id = if raw < leaf_count {
        raw
    } else {
        labels
            .get(raw - leaf_count)
            .copied()
            .flatten()
            .ok_or(DendrogramError::UnlabelledCluster { id: raw })?
    };
    forest.find(id)
}
