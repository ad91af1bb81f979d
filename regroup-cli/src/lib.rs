//! Command-line interface for the regroup clustering pipeline.

pub mod cli;
pub mod logging;
pub mod materialize;
