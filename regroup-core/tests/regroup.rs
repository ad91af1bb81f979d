//! Tests for the `Regroup` orchestration API.

mod common;

use common::{FailingSource, FixedSource};
use proptest::prelude::*;
use regroup_core::{
    DependencyGraph, DependencyGraphBuilder, GroupNode, Linkage, RegroupBuilder, RegroupError,
    RegroupErrorCode, SourceError, SourceErrorCode,
};
use rstest::{fixture, rstest};

#[fixture]
fn three_unit_graph() -> DependencyGraph {
    // b depends on a and c; a and c depend on nothing, so they are
    // structurally identical and merge at distance zero.
    DependencyGraph::try_from_rows(
        vec!["a".into(), "b".into(), "c".into()],
        vec![
            vec![false, false, false],
            vec![true, false, true],
            vec![false, false, false],
        ],
    )
    .expect("rows are square")
}

#[rstest]
fn builder_defaults_to_single_linkage() {
    let builder = RegroupBuilder::new();
    assert_eq!(builder.linkage(), Linkage::Single);

    let regroup = builder.build();
    assert_eq!(regroup.linkage(), Linkage::Single);
}

#[rstest]
fn run_groups_identical_units_together(three_unit_graph: DependencyGraph) {
    let regroup = RegroupBuilder::new().build();
    let tree = regroup
        .run(&FixedSource::new("three", three_unit_graph))
        .expect("run must succeed");

    assert_eq!(
        *tree.root(),
        GroupNode::group(
            2,
            vec![
                GroupNode::group(0, vec![GroupNode::leaf("c"), GroupNode::leaf("a")]),
                GroupNode::leaf("b"),
            ],
        ),
    );
}

#[rstest]
fn every_unit_appears_exactly_once(three_unit_graph: DependencyGraph) {
    let regroup = RegroupBuilder::new().build();
    let tree = regroup
        .run(&FixedSource::new("three", three_unit_graph))
        .expect("run must succeed");

    let mut names = tree.leaf_names();
    names.sort_unstable();
    assert_eq!(names, ["a", "b", "c"]);
}

#[rstest]
fn run_rejects_empty_graphs() {
    let graph = DependencyGraphBuilder::new().build();
    let regroup = RegroupBuilder::new().build();

    let err = regroup
        .run(&FixedSource::new("empty", graph))
        .expect_err("empty graphs are invalid");
    assert!(matches!(err, RegroupError::EmptyGraph { .. }));
    assert_eq!(err.code(), RegroupErrorCode::EmptyGraph);
}

#[rstest]
fn run_wraps_source_failures_with_the_source_name() {
    let regroup = RegroupBuilder::new().build();

    let err = regroup
        .run(&FailingSource::new("broken", SourceError::Empty))
        .expect_err("failing sources must fail the run");
    match &err {
        RegroupError::Source { data_source, error } => {
            assert_eq!(data_source.as_ref(), "broken");
            assert_eq!(*error, SourceError::Empty);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.source_code(), Some(SourceErrorCode::Empty));
}

proptest! {
    #[test]
    fn every_unit_lands_in_the_tree_exactly_once(
        cells in proptest::collection::vec(any::<bool>(), 1..=64),
    ) {
        // Truncate to the largest square that fits the generated cells.
        let len = (1..=8).rev().find(|n| n * n <= cells.len()).unwrap_or(1);
        let names: Vec<String> = (0..len).map(|id| format!("unit{id}")).collect();
        let rows: Vec<Vec<bool>> = (0..len)
            .map(|row| cells[row * len..(row + 1) * len].to_vec())
            .collect();
        let graph = DependencyGraph::try_from_rows(names.clone(), rows)
            .expect("generated rows are square");

        let tree = RegroupBuilder::new()
            .build()
            .cluster_graph("generated", &graph)
            .expect("generated graphs are non-empty");

        let mut leaves: Vec<String> = tree
            .leaf_names()
            .iter()
            .map(|&name| name.to_owned())
            .collect();
        leaves.sort_unstable();
        let mut expected = names;
        expected.sort_unstable();
        prop_assert_eq!(leaves, expected);
    }
}

#[rstest]
fn cluster_graph_accepts_a_single_unit() {
    let mut builder = DependencyGraphBuilder::new();
    builder.unit("only");
    let regroup = RegroupBuilder::new().build();

    let tree = regroup
        .cluster_graph("single", &builder.build())
        .expect("one unit must cluster");
    assert_eq!(*tree.root(), GroupNode::leaf("only"));
}
