//! Extractor trait for table extraction from various sources

use crate::error::Result;
use crate::table::Table;

/// Extractor trait for extracting a table from a source
///
/// Implementors define how to obtain a table from sources like:
/// - CSV files served over HTTP
/// - REST APIs returning JSON records
/// - Fixtures in tests
///
/// # Example
/// ```no_run
/// use behavioural_finance_datasets::etl::Extractor;
/// use behavioural_finance_datasets::error::Result;
/// use behavioural_finance_datasets::table::{Table, Value};
///
/// struct FixedExtractor;
///
/// impl Extractor for FixedExtractor {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn extract(&self) -> Result<Table> {
///         Ok(Table::from_rows(vec!["_id"], vec![vec![Value::from("1")]]))
///     }
/// }
/// ```
pub trait Extractor: Send + Sync {
    /// Short description of the source, used in logs
    fn name(&self) -> &str;

    /// Extract the table from the source
    ///
    /// # Errors
    /// Returns an error if extraction fails (network, status, parsing, etc.)
    fn extract(&self) -> impl std::future::Future<Output = Result<Table>> + Send;
}
