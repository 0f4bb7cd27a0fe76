//! Transform implementations for the downloaded tables
//!
//! This module provides the join that combines the personality and assets
//! tables into the merged dataset.

mod merge;

pub use merge::{JoinType, MergeOptions, Merger, merge};
