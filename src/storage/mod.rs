//! File system storage operations
//!
//! This module handles all file I/O:
//! - CSV table reading/writing
//! - The datasets output directory

mod csv_file;
mod directory;

pub use csv_file::{read_table, write_table};
pub use directory::{DatasetDirectory, ensure_directory};

/// Raw personality survey table
pub const PERSONALITY_FILE: &str = "personality.csv";
/// Raw assets table
pub const ASSETS_FILE: &str = "assets.csv";
/// Outer join of the two raw tables on `_id`
pub const MERGED_FILE: &str = "merged_dataset.csv";
/// Directory the tables are written to unless configured otherwise
pub const DEFAULT_DATASETS_DIR: &str = "datasets";
