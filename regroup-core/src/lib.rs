//! Regroup core library.
//!
//! Clusters a set of named units (typically source files) into a nested
//! grouping driven purely by their dependency structure: units that depend
//! on the same things end up in the same group. The pipeline derives a
//! symmetric Hamming distance matrix from the dependency relation, runs
//! nearest-neighbour-chain agglomerative clustering under a configurable
//! linkage rule, canonically labels the resulting dendrogram, and flattens
//! same-distance merges into a directory-like grouping tree.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod dendrogram;
mod distance;
mod error;
mod graph;
mod regroup;
mod source;
mod tree;

pub use crate::{
    builder::RegroupBuilder,
    dendrogram::{Dendrogram, DendrogramError, DendrogramErrorCode, Linkage, MergeStep},
    distance::{DistanceError, DistanceErrorCode, DistanceMatrix},
    error::{RegroupError, RegroupErrorCode, Result, SourceError, SourceErrorCode},
    graph::{DependencyGraph, DependencyGraphBuilder, GraphError, GraphErrorCode},
    regroup::Regroup,
    source::DependencySource,
    tree::{GroupNode, GroupingError, GroupingErrorCode, GroupingTree},
};
