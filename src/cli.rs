//! CLI helper functions

use crate::{
    analysis::{ColumnStats, DatasetSummary, summarize},
    client::{ClientOptions, HttpClient},
    config::{Config, ConfigFile, Overrides},
    etl::{Pipeline, PipelineReport},
    sources::{RemoteCsvExtractor, RestTableExtractor},
    storage::{DatasetDirectory, read_table},
    table::InferenceOptions,
    transform::{MergeOptions, Merger},
};
use eyre::{Context, Result};
use owo_colors::OwoColorize;
use std::path::Path;

/// Config file picked up from the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "bfds.yml";

/// Read the YAML config file
///
/// An explicitly named config file must exist. Without one,
/// [`DEFAULT_CONFIG_FILE`] is read if present.
pub fn read_config_file(config_file: Option<&Path>) -> Result<ConfigFile> {
    let file = match config_file {
        Some(path) => {
            log::debug!("Reading config file {}", path.display());
            ConfigFile::read(path)?
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            log::debug!("Reading config file {}", DEFAULT_CONFIG_FILE);
            ConfigFile::read(DEFAULT_CONFIG_FILE)?
        }
        None => ConfigFile::default(),
    };
    Ok(file)
}

/// Load configuration from an optional YAML file, the environment and
/// command line overrides
pub fn load_config(config_file: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let file = read_config_file(config_file)?;
    let config = Config::from_env(file, overrides).context("Invalid configuration")?;
    log::debug!("{:?}", config);
    Ok(config)
}

/// Download both datasets, merge them and write the three CSV files
///
/// Pipeline: RemoteCsvExtractor + RestTableExtractor → Merger → DatasetDirectory
pub async fn download_datasets(config: &Config, merge: MergeOptions) -> Result<PipelineReport> {
    let client = HttpClient::try_new(&ClientOptions {
        timeout: config.timeout,
        ..Default::default()
    })?;

    log::info!(
        "Downloading personality dataset from {}",
        config.personality_url.as_str().bright_black()
    );
    log::info!(
        "Downloading assets dataset from {}",
        config.assets_url.as_str().bright_black()
    );

    let personality = RemoteCsvExtractor::new(client.clone(), config.personality_url.clone())
        .with_options(config.inference.clone());
    let assets = RestTableExtractor::new(client, config.assets_url.clone(), config.api_key())
        .with_options(config.inference.clone());
    let directory = DatasetDirectory::new(&config.output_dir);

    let pipeline = Pipeline::new(personality, assets, Merger::new(merge), directory);
    let report = pipeline
        .run()
        .await
        .context("Dataset download failed")?;

    for table in &report.tables {
        log::info!(
            "✓ {} ({} rows, {} columns)",
            config.output_dir.join(&table.name).display(),
            table.rows.cyan(),
            table.columns.cyan()
        );
    }

    Ok(report)
}

/// Read a merged dataset and compute its summary
pub fn summarize_dataset(
    path: impl AsRef<Path>,
    options: &InferenceOptions,
) -> Result<DatasetSummary> {
    let path = path.as_ref();
    log::info!("Reading {}", path.display().bright_black());
    let table = read_table(path, options)
        .with_context(|| format!("Failed to load dataset {}", path.display()))?;
    let summary = summarize(&table, options)
        .with_context(|| format!("Failed to summarise {}", path.display()))?;
    Ok(summary)
}

/// Print a dataset summary to stdout
pub fn print_summary(summary: &DatasetSummary) {
    println!(
        "{} ({} rows, {} columns)",
        "Dataset shape:".green(),
        summary.rows,
        summary.columns.len()
    );
    println!("{} {}", "Dataset columns:".green(), summary.columns.join(", "));

    println!("\n{}", "First rows:".green());
    println!("  {}", summary.head.columns().join("\t"));
    for row in summary.head.rows() {
        let cells: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("  {}", cells.join("\t"));
    }

    println!("\n{}", "Column summary:".green());
    for column in &summary.column_summaries {
        let stats = match &column.stats {
            ColumnStats::Numeric {
                mean,
                std,
                min,
                max,
            } => format!(
                "mean={:.4} std={} min={} max={}",
                mean,
                std.map(|s| format!("{:.4}", s))
                    .unwrap_or_else(|| "-".to_string()),
                min,
                max
            ),
            ColumnStats::Categorical { unique, top } => match top {
                Some((value, freq)) => format!("unique={} top={} freq={}", unique, value, freq),
                None => format!("unique={}", unique),
            },
        };
        println!(
            "  {:<24} {:<8} non-null={:<6} null={:<6} {}",
            column.name, column.column_type, column.non_null, column.nulls, stats
        );
    }

    println!("\n{}", "Value counts:".green());
    for (column, counts) in &summary.value_counts {
        println!("  {}", column.cyan());
        for (value, count) in counts {
            println!("    {:<24} {}", value, count);
        }
    }

    println!(
        "\n{} {}",
        "Number of duplicate rows:".green(),
        summary.duplicate_rows
    );

    match &summary.top_holder {
        Some(top) => println!(
            "\n{}",
            format!(
                "Highest total asset value in {}: {}, for person ID: {}, with risk tolerance: {}",
                top.currency, top.total, top.id, top.risk_tolerance
            )
            .red()
        ),
        None => println!("\n{}", "No assets held in GBP".red()),
    }

    println!(
        "\n{} {:?}",
        "Numerical columns:".blue(),
        summary.numeric_columns
    );
    println!(
        "{} {:?}",
        "Categorical columns:".blue(),
        summary.categorical_columns
    );

    println!("\n{}", "Frequency of asset allocations by date:".blue());
    for (date, count) in &summary.records_per_date.counts {
        println!("  {}  {}", date, count);
    }
    if summary.records_per_date.unparsed > 0 {
        println!(
            "  {} unparseable timestamps",
            summary.records_per_date.unparsed
        );
    }

    let corr = &summary.correlation;
    println!("\n{}", "Correlation of numerical columns:".blue());
    println!("  {:<16} {}", "", corr.columns.join("  "));
    for (label, row) in corr.columns.iter().zip(&corr.values) {
        let cells: Vec<String> = row
            .iter()
            .map(|r| match r {
                Some(r) => format!("{:.3}", r),
                None => "-".to_string(),
            })
            .collect();
        println!("  {:<16} {}", label, cells.join("  "));
    }

    let tab = &summary.allocation_by_currency;
    println!(
        "\n{}",
        "Proportions of asset_allocation vs asset_currency:".magenta()
    );
    println!("  {:<16} {}", "", tab.column_labels.join("  "));
    for (label, row) in tab.row_labels.iter().zip(tab.proportions()) {
        let cells: Vec<String> = row.iter().map(|p| format!("{:.3}", p)).collect();
        println!("  {:<16} {}", label, cells.join("  "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        API_KEY_ALIAS_VAR, API_KEY_VAR, ASSETS_URL_VAR, DATASETS_DIR_VAR, PERSONALITY_URL_VAR,
        TIMEOUT_VAR,
    };
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn clear_env() {
        unsafe {
            std::env::remove_var(PERSONALITY_URL_VAR);
            std::env::remove_var(ASSETS_URL_VAR);
            std::env::remove_var(API_KEY_VAR);
            std::env::remove_var(API_KEY_ALIAS_VAR);
            std::env::remove_var(DATASETS_DIR_VAR);
            std::env::remove_var(TIMEOUT_VAR);
        }
    }

    #[test]
    #[serial_test::serial]
    fn test_load_config_without_api_key() {
        clear_env();
        unsafe {
            std::env::set_var(PERSONALITY_URL_VAR, "https://example.com/personality.csv");
            std::env::set_var(ASSETS_URL_VAR, "https://example.com/rest/v1/assets");
        }

        let result = load_config(None, Overrides::default());
        assert!(result.is_err());
        assert!(format!("{:?}", result.unwrap_err()).contains(API_KEY_VAR));

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_load_config_from_env() {
        clear_env();
        unsafe {
            std::env::set_var(PERSONALITY_URL_VAR, "https://example.com/personality.csv");
            std::env::set_var(ASSETS_URL_VAR, "https://example.com/rest/v1/assets");
            std::env::set_var(API_KEY_VAR, "secret");
        }

        let config = load_config(None, Overrides::default()).unwrap();
        assert_eq!(config.api_key(), "secret");

        clear_env();
    }

    #[test]
    #[serial_test::serial]
    fn test_load_config_file_and_env_key() {
        clear_env();
        unsafe {
            std::env::set_var(API_KEY_VAR, "secret");
        }

        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "personality_url: https://example.com/p.csv\nassets_url: https://example.com/rest/v1/assets\noutput_dir: out"
        )
        .unwrap();

        let config = load_config(Some(file.path()), Overrides::default()).unwrap();
        assert_eq!(config.output_dir, Path::new("out"));
        assert_eq!(config.personality_url.path(), "/p.csv");

        clear_env();
    }

    #[test]
    fn test_summarize_dataset_reports_preview_and_counts() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "_id,openness,asset_allocation_id,asset_value,asset_currency,asset_allocation,risk_tolerance,created\n\
             1,0.4,10,120.0,GBP,Stocks,0.6,2025-05-21T10:00:00+00:00\n\
             2,0.9,11,80.0,GBP,Bonds,0.3,2025-05-22T10:00:00+00:00\n\
             3,0.1,12,5.0,USD,Bonds,0.8,2025-05-22T11:00:00+00:00\n"
        )
        .unwrap();

        let summary = summarize_dataset(file.path(), &InferenceOptions::default()).unwrap();
        assert_eq!(summary.head.num_rows(), 3);
        assert_eq!(summary.value_counts[5].0, "asset_allocation");
        assert_eq!(summary.value_counts[5].1[0], ("Bonds".to_string(), 2));
        assert_eq!(
            summary.correlation.columns,
            ["openness", "asset_value", "risk_tolerance"]
        );

        print_summary(&summary);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Some(Path::new("/nonexistent/bfds.yml")), Overrides::default());
        assert!(result.is_err());
    }
}
