//! Pipeline orchestration for the regroup library.
//!
//! Provides the [`Regroup`] entry point that chains the stages together:
//! dependency graph → distance matrix → dendrogram → grouping tree. Each
//! stage fully consumes its predecessor's immutable output; a single run
//! owns all of its intermediate state.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::{
    Result,
    dendrogram::{Dendrogram, Linkage},
    distance::DistanceMatrix,
    error::RegroupError,
    graph::DependencyGraph,
    source::DependencySource,
    tree::GroupingTree,
};

/// Entry point for running the clustering pipeline.
///
/// # Examples
/// ```
/// use regroup_core::{DependencyGraph, DependencySource, RegroupBuilder, SourceError};
///
/// struct Fixed(DependencyGraph);
///
/// impl DependencySource for Fixed {
///     fn name(&self) -> &str { "fixed" }
///     fn dependency_graph(&self) -> Result<DependencyGraph, SourceError> {
///         Ok(self.0.clone())
///     }
/// }
///
/// let graph = DependencyGraph::try_from_rows(
///     vec!["a".into(), "b".into(), "c".into()],
///     vec![
///         vec![false, false, false],
///         vec![true, false, true],
///         vec![false, false, false],
///     ],
/// )?;
/// let regroup = RegroupBuilder::new().build();
/// let tree = regroup.run(&Fixed(graph))?;
/// let mut names = tree.leaf_names();
/// names.sort_unstable();
/// assert_eq!(names, ["a", "b", "c"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Regroup {
    linkage: Linkage,
}

impl Regroup {
    pub(crate) fn new(linkage: Linkage) -> Self {
        Self { linkage }
    }

    /// Returns the linkage rule this instance clusters with.
    #[must_use]
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Executes the pipeline against the provided [`DependencySource`].
    ///
    /// # Errors
    /// Returns [`RegroupError::Source`] when the source fails to produce
    /// its graph, [`RegroupError::EmptyGraph`] when the graph has no units,
    /// and [`RegroupError::Clustering`]/[`RegroupError::Grouping`] when an
    /// internal consistency check trips.
    pub fn run<S: DependencySource>(&self, source: &S) -> Result<GroupingTree> {
        let graph = source
            .dependency_graph()
            .map_err(|error| RegroupError::Source {
                data_source: Arc::from(source.name()),
                error,
            })?;
        self.cluster_graph(source.name(), &graph)
    }

    /// Executes the pipeline against an already-extracted graph.
    ///
    /// # Errors
    /// As [`Regroup::run`], minus the source failures.
    #[instrument(
        name = "core.cluster",
        err,
        skip(self, graph),
        fields(
            data_source = %name,
            units = graph.len(),
            linkage = ?self.linkage,
        ),
    )]
    pub fn cluster_graph(&self, name: &str, graph: &DependencyGraph) -> Result<GroupingTree> {
        if graph.is_empty() {
            warn!(data_source = name, "dependency graph is empty, returning error");
            return Err(RegroupError::EmptyGraph {
                data_source: Arc::from(name),
            });
        }

        let distances = DistanceMatrix::from_graph(graph);
        let dendrogram = Dendrogram::from_distances(&distances, self.linkage).map_err(|error| {
            RegroupError::Clustering {
                data_source: Arc::from(name),
                error,
            }
        })?;
        GroupingTree::from_dendrogram(&dendrogram, graph.unit_names()).map_err(|error| {
            RegroupError::Grouping {
                data_source: Arc::from(name),
                error,
            }
        })
    }
}
