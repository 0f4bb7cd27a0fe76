//! Behavioural Finance Datasets
//!
//! Downloads the personality survey and assets tables, joins them on `_id`
//! and writes all three as CSV files for analysis

pub mod analysis;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod etl;
pub mod sources;
pub mod storage;
pub mod table;
pub mod transform;

// Re-exports for convenience
pub use client::{Auth, ClientOptions, HttpClient};
pub use config::Config;
pub use error::{Error, Result};
pub use etl::{Extractor, Loader, Pipeline, PipelineReport, Transformer};
pub use sources::{RemoteCsvExtractor, RestTableExtractor};
pub use storage::{DatasetDirectory, ensure_directory, read_table, write_table};
pub use table::{ColumnType, Table, Value};
pub use transform::{JoinType, MergeOptions, Merger, merge};
