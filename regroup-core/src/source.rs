//! Dependency source abstractions for the regroup pipeline.

use crate::{error::SourceError, graph::DependencyGraph};

/// Abstraction over a collaborator that extracts a dependency relation.
///
/// Implementations own whatever scanning or parsing produces the relation;
/// the pipeline only sees the finished [`DependencyGraph`].
///
/// # Examples
/// ```
/// use regroup_core::{DependencyGraph, DependencyGraphBuilder, DependencySource, SourceError};
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
/// let mut builder = DependencyGraphBuilder::new();
/// builder.dependency("app", "util");
/// let source = Fixed(builder.build());
/// assert_eq!(source.name(), "fixed");
/// assert_eq!(source.dependency_graph()?.len(), 2);
/// # Ok::<(), SourceError>(())
/// ```
pub trait DependencySource {
    /// Returns a human-readable name used in diagnostics.
    fn name(&self) -> &str;

    /// Produces the dependency graph for this source.
    ///
    /// # Errors
    /// Returns [`SourceError`] when the underlying data cannot be turned
    /// into a graph.
    fn dependency_graph(&self) -> Result<DependencyGraph, SourceError>;
}
