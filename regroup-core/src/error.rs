//! Error types for the regroup core library.
//!
//! Defines the error enums exposed by the public API and a convenient result
//! alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{dendrogram::DendrogramError, tree::GroupingError};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced while a [`crate::DependencySource`] assembles its
/// dependency graph.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SourceError {
    /// The source yielded no units at all.
    #[error("dependency source contains no units")]
    Empty,
    /// The source data could not be interpreted as a dependency graph.
    #[error("malformed input at line {line}: {reason}")]
    Malformed {
        /// One-based line number of the offending input.
        line: usize,
        /// Human-readable description of the problem.
        reason: Arc<str>,
    },
    /// The underlying medium failed while the source was being read.
    #[error("dependency source unavailable: {reason}")]
    Unavailable {
        /// Description of the read failure.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`SourceError`] variants.
    enum SourceErrorCode for SourceError {
        /// The source yielded no units at all.
        Empty => Empty => "SOURCE_EMPTY",
        /// The source data could not be interpreted as a dependency graph.
        Malformed => Malformed { .. } => "SOURCE_MALFORMED",
        /// The underlying medium failed while the source was being read.
        Unavailable => Unavailable { .. } => "SOURCE_UNAVAILABLE",
    }
}

/// Error type produced when running the [`crate::Regroup`] pipeline.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum RegroupError {
    /// The supplied dependency graph contained no units.
    #[error("dependency graph `{data_source}` contains no units")]
    EmptyGraph {
        /// Identifier for the empty source.
        data_source: Arc<str>,
    },
    /// A [`crate::DependencySource`] failed to produce its graph.
    #[error("dependency source `{data_source}` failed: {error}")]
    Source {
        /// Identifier for the source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying source error bubbled up by the pipeline.
        error: SourceError,
    },
    /// The clustering engine detected an internal inconsistency.
    #[error("clustering `{data_source}` failed: {error}")]
    Clustering {
        /// Identifier for the source being clustered.
        data_source: Arc<str>,
        #[source]
        /// Underlying dendrogram error.
        error: DendrogramError,
    },
    /// The grouping-tree builder rejected the labelled dendrogram.
    #[error("grouping `{data_source}` failed: {error}")]
    Grouping {
        /// Identifier for the source being grouped.
        data_source: Arc<str>,
        #[source]
        /// Underlying grouping error.
        error: GroupingError,
    },
}

define_error_codes! {
    /// Stable codes describing [`RegroupError`] variants.
    enum RegroupErrorCode for RegroupError {
        /// The supplied dependency graph contained no units.
        EmptyGraph => EmptyGraph { .. } => "REGROUP_EMPTY_GRAPH",
        /// A [`crate::DependencySource`] failed to produce its graph.
        SourceFailure => Source { .. } => "REGROUP_SOURCE_FAILURE",
        /// The clustering engine detected an internal inconsistency.
        ClusteringFailure => Clustering { .. } => "REGROUP_CLUSTERING_FAILURE",
        /// The grouping-tree builder rejected the labelled dendrogram.
        GroupingFailure => Grouping { .. } => "REGROUP_GROUPING_FAILURE",
    }
}

impl RegroupError {
    /// Retrieve the inner [`SourceErrorCode`] when the error originated in a
    /// [`crate::DependencySource`].
    pub const fn source_code(&self) -> Option<SourceErrorCode> {
        match self {
            Self::Source { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, RegroupError>;
