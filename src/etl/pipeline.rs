//! Pipeline orchestration for the download-and-merge run

use super::{Extractor, Loader, Transformer};
use crate::error::Result;
use crate::storage::{ASSETS_FILE, MERGED_FILE, PERSONALITY_FILE};
use crate::table::Table;

/// Shape of one table handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableReport {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

/// Outcome of a successful pipeline run, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineReport {
    pub tables: Vec<TableReport>,
}

impl PipelineReport {
    pub fn get(&self, name: &str) -> Option<&TableReport> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// Pipeline that fetches the personality and assets tables, joins them and
/// persists all three.
///
/// The run is strictly sequential:
/// fetch personality → fetch assets → merge → write personality, assets,
/// merged. A failed fetch or merge stops the run before anything is written.
/// A failed write stops the run but leaves earlier files in place.
///
/// # Type Parameters
/// - `P`: Extractor for the personality table
/// - `A`: Extractor for the assets table
/// - `T`: Transformer joining `(personality, assets)` into one table
/// - `L`: Loader receiving each table by file name
///
/// # Example
/// ```no_run
/// use behavioural_finance_datasets::etl::Pipeline;
/// use behavioural_finance_datasets::storage::DatasetDirectory;
/// use behavioural_finance_datasets::transform::Merger;
/// # use behavioural_finance_datasets::etl::Extractor;
/// # use behavioural_finance_datasets::error::Result;
/// # use behavioural_finance_datasets::table::Table;
/// # struct Fixture;
/// # impl Extractor for Fixture {
/// #     fn name(&self) -> &str { "fixture" }
/// #     async fn extract(&self) -> Result<Table> { Ok(Table::default()) }
/// # }
///
/// # async fn example() -> Result<()> {
/// let pipeline = Pipeline::new(
///     Fixture,
///     Fixture,
///     Merger::default(),
///     DatasetDirectory::new("datasets"),
/// );
///
/// let report = pipeline.run().await?;
/// println!("Wrote {} tables", report.tables.len());
/// # Ok(())
/// # }
/// ```
pub struct Pipeline<P, A, T, L> {
    personality: P,
    assets: A,
    merger: T,
    loader: L,
}

impl<P, A, T, L> Pipeline<P, A, T, L>
where
    P: Extractor,
    A: Extractor,
    T: Transformer<Input = (Table, Table), Output = Table>,
    L: Loader,
{
    /// Create a new pipeline
    pub fn new(personality: P, assets: A, merger: T, loader: L) -> Self {
        Self {
            personality,
            assets,
            merger,
            loader,
        }
    }

    /// Run the complete pipeline
    ///
    /// # Errors
    /// Returns the first error raised by any stage
    pub async fn run(&self) -> Result<PipelineReport> {
        log::info!("Starting dataset pipeline");

        log::debug!("Fetching personality table from {}", self.personality.name());
        let personality = self.personality.extract().await?;
        log::info!(
            "Fetched personality table: {} rows, {} columns",
            personality.num_rows(),
            personality.num_columns()
        );

        log::debug!("Fetching assets table from {}", self.assets.name());
        let assets = self.assets.extract().await?;
        log::info!(
            "Fetched assets table: {} rows, {} columns",
            assets.num_rows(),
            assets.num_columns()
        );

        let inputs = (personality, assets);
        let merged = self.merger.transform(&inputs)?;
        log::info!(
            "Merged table: {} rows, {} columns",
            merged.num_rows(),
            merged.num_columns()
        );
        let (personality, assets) = inputs;

        let mut report = PipelineReport::default();
        for (name, table) in [
            (PERSONALITY_FILE, &personality),
            (ASSETS_FILE, &assets),
            (MERGED_FILE, &merged),
        ] {
            let rows = self.loader.load(name, table).await?;
            report.tables.push(TableReport {
                name: name.to_string(),
                rows,
                columns: table.num_columns(),
            });
        }

        log::info!("Pipeline complete, wrote {} tables", report.tables.len());
        Ok(report)
    }
}
