//! Stable error-code mapping for the public error enums.

use std::sync::Arc;

use regroup_core::{
    DendrogramError, DistanceError, DistanceErrorCode, GraphError,
    GraphErrorCode, GroupingError, GroupingErrorCode, RegroupError, RegroupErrorCode, SourceError,
    SourceErrorCode,
};
use rstest::rstest;

#[rstest]
#[case(SourceError::Empty, SourceErrorCode::Empty, "SOURCE_EMPTY")]
#[case(
    SourceError::Malformed { line: 3, reason: Arc::from("bad edge") },
    SourceErrorCode::Malformed,
    "SOURCE_MALFORMED",
)]
#[case(
    SourceError::Unavailable { reason: Arc::from("gone") },
    SourceErrorCode::Unavailable,
    "SOURCE_UNAVAILABLE",
)]
fn source_errors_map_to_stable_codes(
    #[case] error: SourceError,
    #[case] expected: SourceErrorCode,
    #[case] text: &str,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), text);
}

#[rstest]
#[case(
    RegroupError::EmptyGraph { data_source: Arc::from("empty") },
    RegroupErrorCode::EmptyGraph,
    None,
)]
#[case(
    RegroupError::Source {
        data_source: Arc::from("dot"),
        error: SourceError::Empty,
    },
    RegroupErrorCode::SourceFailure,
    Some(SourceErrorCode::Empty),
)]
#[case(
    RegroupError::Clustering {
        data_source: Arc::from("dot"),
        error: DendrogramError::MissingDistance { left: 0, right: 3 },
    },
    RegroupErrorCode::ClusteringFailure,
    None,
)]
#[case(
    RegroupError::Grouping {
        data_source: Arc::from("dot"),
        error: GroupingError::InvalidNode { id: 9 },
    },
    RegroupErrorCode::GroupingFailure,
    None,
)]
fn regroup_errors_map_to_stable_codes(
    #[case] error: RegroupError,
    #[case] expected: RegroupErrorCode,
    #[case] source_code: Option<SourceErrorCode>,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
    assert_eq!(error.source_code(), source_code);
}

#[rstest]
#[case(DendrogramError::EmptyInput, "DENDROGRAM_EMPTY_INPUT")]
#[case(
    DendrogramError::MissingDistance { left: 1, right: 2 },
    "DENDROGRAM_MISSING_DISTANCE",
)]
#[case(
    DendrogramError::LabelOutOfRange { id: 9, limit: 5 },
    "DENDROGRAM_LABEL_OUT_OF_RANGE",
)]
#[case(
    DendrogramError::UnlabelledCluster { id: 7 },
    "DENDROGRAM_UNLABELLED_CLUSTER",
)]
fn dendrogram_errors_map_to_stable_codes(#[case] error: DendrogramError, #[case] text: &str) {
    assert_eq!(error.code().as_str(), text);
}

#[rstest]
#[case(
    GraphError::DimensionMismatch { units: 2, rows: 1 },
    GraphErrorCode::DimensionMismatch,
)]
#[case(
    GraphError::RowLengthMismatch { row: 0, expected: 2, got: 3 },
    GraphErrorCode::RowLengthMismatch,
)]
#[case(
    GraphError::DuplicateUnit { name: "a".into() },
    GraphErrorCode::DuplicateUnit,
)]
fn graph_errors_map_to_stable_codes(#[case] error: GraphError, #[case] expected: GraphErrorCode) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
}

#[rstest]
#[case(
    DistanceError::RowLengthMismatch { row: 1, expected: 3, got: 2 },
    DistanceErrorCode::RowLengthMismatch,
)]
#[case(DistanceError::Asymmetric { left: 0, right: 1 }, DistanceErrorCode::Asymmetric)]
#[case(DistanceError::NonZeroDiagonal { index: 2 }, DistanceErrorCode::NonZeroDiagonal)]
fn distance_errors_map_to_stable_codes(
    #[case] error: DistanceError,
    #[case] expected: DistanceErrorCode,
) {
    assert_eq!(error.code(), expected);
}

#[rstest]
#[case(
    GroupingError::LeafLabelMismatch { labels: 1, leaves: 2 },
    GroupingErrorCode::LeafLabelMismatch,
)]
#[case(GroupingError::InvalidNode { id: 4 }, GroupingErrorCode::InvalidNode)]
fn grouping_errors_map_to_stable_codes(
    #[case] error: GroupingError,
    #[case] expected: GroupingErrorCode,
) {
    assert_eq!(error.code(), expected);
    assert_eq!(error.code().as_str(), expected.as_str());
}
