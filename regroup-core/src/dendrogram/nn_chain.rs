//! Nearest-neighbour-chain merge engine.
//!
//! The engine grows a chain of nearest-neighbour candidates until the last
//! two entries are mutual nearest neighbours, merges them, and resumes from
//! the truncated chain instead of restarting. The resumption is what makes
//! the run `O(n^2)`; it is sound because both supported linkage rules are
//! reducible, so a merge never invalidates the nearest-neighbour links
//! deeper in the chain.
//!
//! Ties are broken towards the smallest cluster id: the live set iterates
//! in ascending order and a candidate only displaces the incumbent when it
//! is strictly closer.

use std::collections::{BTreeSet, HashMap};

use super::{DendrogramError, Linkage, MergeStep};
use crate::distance::DistanceMatrix;

/// Mutable distance table keyed by unordered cluster-id pairs.
///
/// Keys are canonicalized to `(min, max)` everywhere, matching the seeding
/// convention, so a lookup can never miss because of endpoint order.
struct PairDistances {
    table: HashMap<(usize, usize), u32>,
}

impl PairDistances {
    fn seed(matrix: &DistanceMatrix) -> Self {
        let len = matrix.len();
        let mut table = HashMap::with_capacity(len * (len + 1) / 2);
        for left in 0..len {
            for right in left..len {
                table.insert((left, right), matrix.distance(left, right));
            }
        }
        Self { table }
    }

    fn get(&self, a: usize, b: usize) -> Result<u32, DendrogramError> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.table
            .get(&key)
            .copied()
            .ok_or(DendrogramError::MissingDistance {
                left: key.0,
                right: key.1,
            })
    }

    fn insert(&mut self, a: usize, b: usize, distance: u32) {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.table.insert(key, distance);
    }
}

/// Finds `target`'s nearest neighbour among the live clusters.
///
/// `incumbent` carries the candidate already known from the chain, so ties
/// resolve in its favour; without one, the smallest live id becomes the
/// initial candidate and equal distances never displace it.
fn nearest_of(
    live: &BTreeSet<usize>,
    target: usize,
    incumbent: Option<(usize, u32)>,
    distances: &PairDistances,
) -> Result<(usize, u32), DendrogramError> {
    let mut best = incumbent;
    for &candidate in live {
        if candidate == target {
            continue;
        }
        let distance = distances.get(candidate, target)?;
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.ok_or(DendrogramError::MissingDistance {
        left: target,
        right: target,
    })
}

/// Emits the raw merge sequence for `matrix` under the given linkage rule.
///
/// Merged clusters take fresh ids counting up from the leaf count, in
/// creation order. Exactly `n - 1` merges are produced; the live set
/// shrinks by one per merge until a single cluster remains.
pub(super) fn cluster(
    matrix: &DistanceMatrix,
    linkage: Linkage,
) -> Result<Vec<MergeStep>, DendrogramError> {
    let leaf_count = matrix.len();
    let mut distances = PairDistances::seed(matrix);
    let mut live: BTreeSet<usize> = (0..leaf_count).collect();
    let mut chain: Vec<usize> = Vec::with_capacity(leaf_count);
    let mut merges = Vec::with_capacity(leaf_count.saturating_sub(1));
    let mut next_cluster = leaf_count;

    while live.len() > 1 {
        let mut anchor;
        let mut nearest;
        let mut nearest_distance;
        if chain.len() > 3 {
            // Drop the merged pair and re-examine the entry that preceded it.
            let keep = chain.len() - 3;
            anchor = chain[keep - 1];
            nearest = chain[keep];
            chain.truncate(keep);
            nearest_distance = distances.get(anchor, nearest)?;
        } else {
            chain.clear();
            let Some(&seed) = live.first() else {
                // The loop guard keeps the live set non-empty.
                break;
            };
            chain.push(seed);
            let (found, found_distance) = nearest_of(&live, seed, None, &distances)?;
            anchor = seed;
            nearest = found;
            nearest_distance = found_distance;
        }

        // Extend the chain until the last two entries are mutual nearest
        // neighbours. The invariant is that `anchor` is the chain entry
        // directly below the top and `nearest_distance` links the two.
        let merge = loop {
            chain.push(nearest);
            let (next, next_distance) =
                nearest_of(&live, nearest, Some((anchor, nearest_distance)), &distances)?;
            if next == chain[chain.len() - 2] {
                break MergeStep::new(nearest, next, next_distance);
            }
            anchor = nearest;
            nearest = next;
            nearest_distance = next_distance;
        };

        let left = merge.left();
        let right = merge.right();
        merges.push(merge);
        live.remove(&left);
        live.remove(&right);

        let merged = next_cluster;
        next_cluster += 1;
        for &other in &live {
            let to_left = distances.get(other, left)?;
            let to_right = distances.get(other, right)?;
            distances.insert(other, merged, linkage.combine(to_left, to_right));
        }
        live.insert(merged);
    }

    Ok(merges)
}
