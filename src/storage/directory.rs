//! Directory-based dataset storage

use super::write_table;
use crate::error::{PersistenceError, Result};
use crate::etl::Loader;
use crate::table::Table;
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents. Does nothing if it already exists.
///
/// # Errors
/// Returns [`PersistenceError::CreateDirectory`] on permission or filesystem
/// failures, including when `path` exists but is not a directory
pub fn ensure_directory(path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(path).map_err(|source| PersistenceError::CreateDirectory {
        path: path.to_path_buf(),
        source,
    })?;
    log::debug!("Created directory {}", path.display());
    Ok(())
}

/// Write tables as CSV files into a directory
///
/// The directory is created on the first write, so a run that fails before
/// writing leaves the filesystem untouched.
#[derive(Debug, Clone)]
pub struct DatasetDirectory {
    path: PathBuf,
}

impl DatasetDirectory {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of a table file inside the directory
    pub fn file(&self, name: &str) -> PathBuf {
        self.path.join(name)
    }

    /// Write `table` to `<directory>/<name>`, creating the directory if needed
    pub fn write(&self, name: &str, table: &Table) -> Result<PathBuf> {
        ensure_directory(&self.path)?;
        let path = self.file(name);
        write_table(table, &path)?;
        Ok(path)
    }
}

// Implement Loader trait for writing to directories
impl Loader for DatasetDirectory {
    async fn load(&self, name: &str, table: &Table) -> Result<usize> {
        let path = self.write(name, table)?;
        log::info!("Wrote {} rows to {}", table.num_rows(), path.display());
        Ok(table.num_rows())
    }
}
