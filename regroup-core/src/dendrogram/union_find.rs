//! Union-find arena used while canonically labelling merge sequences.
//!
//! The arena covers the full `2n - 1` node-id space: leaves `0..n-1` plus
//! one label per merge, handed out in processing order starting at `n`.
//! Parents are stored as dense optional indices, so cluster identity never
//! involves references or cycles.

use super::DendrogramError;

#[derive(Clone, Debug)]
pub(super) struct LabelForest {
    parent: Vec<Option<usize>>,
    next_label: usize,
}

impl LabelForest {
    pub(super) fn new(leaf_count: usize) -> Self {
        let slots = leaf_count.saturating_mul(2).saturating_sub(1);
        Self {
            parent: vec![None; slots],
            next_label: leaf_count,
        }
    }

    /// Returns the current root of `id`, compressing the walked path.
    pub(super) fn find(&mut self, id: usize) -> Result<usize, DendrogramError> {
        let limit = self.parent.len();
        if id >= limit {
            return Err(DendrogramError::LabelOutOfRange { id, limit });
        }

        let mut root = id;
        while let Some(next) = self.parent[root] {
            root = next;
        }

        let mut node = id;
        while let Some(next) = self.parent[node] {
            if next == root {
                break;
            }
            self.parent[node] = Some(root);
            node = next;
        }

        Ok(root)
    }

    /// Joins two roots under the next unused label and returns that label.
    pub(super) fn union(&mut self, left: usize, right: usize) -> Result<usize, DendrogramError> {
        let limit = self.parent.len();
        for id in [left, right, self.next_label] {
            if id >= limit {
                return Err(DendrogramError::LabelOutOfRange { id, limit });
            }
        }

        let label = self.next_label;
        self.next_label += 1;
        self.parent[left] = Some(label);
        self.parent[right] = Some(label);
        Ok(label)
    }
}
