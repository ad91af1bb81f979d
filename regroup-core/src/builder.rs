//! Builder utilities for configuring the regroup pipeline.

use crate::{dendrogram::Linkage, regroup::Regroup};

/// Configures and constructs [`Regroup`] instances.
///
/// # Examples
/// ```
/// use regroup_core::{Linkage, RegroupBuilder};
///
/// let regroup = RegroupBuilder::new()
///     .with_linkage(Linkage::Complete)
///     .build();
/// assert_eq!(regroup.linkage(), Linkage::Complete);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RegroupBuilder {
    linkage: Linkage,
}

impl RegroupBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use regroup_core::{Linkage, RegroupBuilder};
    ///
    /// let builder = RegroupBuilder::new();
    /// assert_eq!(builder.linkage(), Linkage::Single);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the linkage rule used when merging clusters.
    #[must_use]
    pub fn with_linkage(mut self, linkage: Linkage) -> Self {
        self.linkage = linkage;
        self
    }

    /// Returns the currently configured linkage rule.
    #[must_use]
    pub fn linkage(&self) -> Linkage {
        self.linkage
    }

    /// Constructs a [`Regroup`] instance from the configuration.
    #[must_use]
    pub fn build(self) -> Regroup {
        Regroup::new(self.linkage)
    }
}
