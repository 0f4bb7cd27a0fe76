use behavioural_finance_datasets::{
    cli::{download_datasets, load_config, print_summary, read_config_file, summarize_dataset},
    config::Overrides,
    storage::{DEFAULT_DATASETS_DIR, MERGED_FILE},
    transform::{JoinType, MergeOptions},
};
use clap::{Parser, Subcommand, builder::styling};
use eyre::Result;
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};

// CLI Styling
const STYLES: styling::Styles = styling::Styles::styled()
    .header(styling::AnsiColor::BrightWhite.on_default())
    .usage(styling::AnsiColor::BrightWhite.on_default())
    .literal(styling::AnsiColor::Green.on_default())
    .placeholder(styling::AnsiColor::Cyan.on_default());

/// Behavioural finance datasets: download the personality and assets tables and merge them on `_id`
#[derive(Parser)]
#[command(name = "bfds", version, styles = STYLES)]
struct Cli {
    /// The dotenv file to source credentials from (ignored if absent)
    #[arg(short, long, global = true, default_value = ".env")]
    env: String,

    /// YAML config file with source URLs and output settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More verbose logging
    #[arg(long, global = true)]
    debug: bool,

    /// Command to execute (defaults to download)
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch both datasets, merge them and write CSV files
    Download {
        /// Directory the CSV files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// URL of the personality CSV
        #[arg(long)]
        personality_url: Option<String>,

        /// URL of the assets REST endpoint
        #[arg(long)]
        assets_url: Option<String>,

        /// Request timeout in seconds
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Join type used to merge the tables
        #[arg(long, value_enum, default_value_t = JoinType::Outer)]
        how: JoinType,

        /// Sort the merged table by `_id`
        #[arg(short, long)]
        sort: bool,
    },

    /// Print summary statistics for a merged dataset
    Summary {
        /// Merged dataset to summarise
        #[arg(default_value_t = default_merged_path())]
        path: String,
    },
}

fn default_merged_path() -> String {
    Path::new(DEFAULT_DATASETS_DIR)
        .join(MERGED_FILE)
        .display()
        .to_string()
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    match dotenvy::from_filename(&cli.env) {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    let log_level = match cli.debug {
        true => "debug",
        false => "info",
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", log_level);
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .init();

    let command = cli.command.unwrap_or(Commands::Download {
        output_dir: None,
        personality_url: None,
        assets_url: None,
        timeout: None,
        how: JoinType::default(),
        sort: false,
    });

    match command {
        Commands::Download {
            output_dir,
            personality_url,
            assets_url,
            timeout,
            how,
            sort,
        } => {
            let overrides = Overrides {
                personality_url,
                assets_url,
                output_dir,
                timeout_secs: timeout,
            };
            let config = load_config(cli.config.as_deref(), overrides)?;
            let merge = MergeOptions {
                how,
                sort,
                ..Default::default()
            };

            let report = download_datasets(&config, merge).await?;
            log::info!(
                "Wrote {} files to {}",
                report.tables.len().cyan(),
                config.output_dir.display().bright_black()
            );
        }
        Commands::Summary { path } => {
            let inference = read_config_file(cli.config.as_deref())?.inference();
            let summary = summarize_dataset(&path, &inference)?;
            print_summary(&summary);
        }
    }

    Ok(())
}
