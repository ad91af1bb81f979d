//! Shared fixtures for regroup-core integration tests.

use regroup_core::{DependencyGraph, DependencySource, SourceError};

/// A source that hands out a prebuilt graph.
pub struct FixedSource {
    name: &'static str,
    graph: DependencyGraph,
}

impl FixedSource {
    pub fn new(name: &'static str, graph: DependencyGraph) -> Self {
        Self { name, graph }
    }
}

impl DependencySource for FixedSource {
    fn name(&self) -> &str {
        self.name
    }

    fn dependency_graph(&self) -> Result<DependencyGraph, SourceError> {
        Ok(self.graph.clone())
    }
}

/// A source that always fails with the given error.
pub struct FailingSource {
    name: &'static str,
    error: SourceError,
}

impl FailingSource {
    pub fn new(name: &'static str, error: SourceError) -> Self {
        Self { name, error }
    }
}

impl DependencySource for FailingSource {
    fn name(&self) -> &str {
        self.name
    }

    fn dependency_graph(&self) -> Result<DependencyGraph, SourceError> {
        Err(self.error.clone())
    }
}
