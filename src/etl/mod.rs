//! Core ETL (Extract, Transform, Load) abstractions
//!
//! This module provides the trait definitions the dataset pipeline is built
//! from: extractors produce tables, a transformer joins them and a loader
//! persists the results.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::{Pipeline, PipelineReport, TableReport};
pub use transform::Transformer;
