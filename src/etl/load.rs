//! Loader trait for persisting tables

use crate::error::Result;
use crate::table::Table;

/// Loader trait for loading named tables to a destination
///
/// # Example
/// ```no_run
/// use behavioural_finance_datasets::etl::Loader;
/// use behavioural_finance_datasets::error::Result;
/// use behavioural_finance_datasets::table::Table;
///
/// struct CountingLoader;
///
/// impl Loader for CountingLoader {
///     async fn load(&self, name: &str, table: &Table) -> Result<usize> {
///         println!("{}: {} rows", name, table.num_rows());
///         Ok(table.num_rows())
///     }
/// }
/// ```
pub trait Loader: Send + Sync {
    /// Load a table under the given name (for example `assets.csv`)
    ///
    /// Returns the number of rows written
    ///
    /// # Errors
    /// Returns an error if loading fails (I/O, permissions, etc.)
    fn load(
        &self,
        name: &str,
        table: &Table,
    ) -> impl std::future::Future<Output = Result<usize>> + Send;
}
