// src/main.rs
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use report_extractor::config::ExtractionConfig;
use report_extractor::extractors::{extract_batch, ExtractionStrategy};
use report_extractor::storage::{self, StorageManager};
use report_extractor::table::ProjectTable;
use report_extractor::utils::{self, AppError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Known "Label :" text followed by a value span; one row per report
    Fixed,
    /// Styled label/value spans paired by position; one column per report
    Positional,
}

/// Command Line Interface for the project report extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// HTML report files, or directories containing them
    #[arg(required_unless_present = "dump_config")]
    inputs: Vec<PathBuf>,

    /// Report layout to extract
    #[arg(short, long, value_enum, default_value = "positional")]
    mode: Mode,

    /// Output directory for the exported table
    #[arg(short, long, default_value = "./output")]
    output_dir: String,

    /// File name of the exported table (defaults depend on the mode)
    #[arg(long)]
    output_file: Option<String>,

    /// JSON file overriding the built-in label lists and aliases
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    dump_config: bool,
}

fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load configuration
    let config = match &args.config {
        Some(path) => ExtractionConfig::from_file(path)?,
        None => ExtractionConfig::default(),
    };

    if args.dump_config {
        println!("{}", config.to_json_pretty()?);
        return Ok(());
    }

    // 4. Build the strategy; alias collisions stop here, before any document is read
    let strategy = match args.mode {
        Mode::Fixed => ExtractionStrategy::fixed_label(&config),
        Mode::Positional => ExtractionStrategy::positional_pair(&config)?,
    };

    // 5. Read the documents
    let documents = storage::read_documents(&args.inputs)?;
    tracing::info!("Loaded {} documents", documents.len());

    if documents.is_empty() {
        return Err(AppError::Processing("No HTML documents found in the given inputs".to_string()));
    }

    // 6. Extract and assemble
    let outcome = extract_batch(&strategy, &documents);

    for (source, e) in &outcome.failures {
        tracing::error!("{}: {}", source, e);
    }

    if outcome.records.is_empty() {
        return Err(AppError::Processing(format!(
            "Failed to extract any records from {} documents",
            outcome.failures.len()
        )));
    }

    let table = ProjectTable::assemble(
        strategy.output_mode(),
        &outcome.field_records(),
        &config.numeric_fields,
    );

    // 7. Export
    let storage = StorageManager::new(&args.output_dir)?;
    let default_name = match args.mode {
        Mode::Fixed => "output_table.csv",
        Mode::Positional => "formatted_project_data.csv",
    };
    let filename = args.output_file.clone().unwrap_or_else(|| default_name.to_string());

    let table_path = storage.save_table(&table, &filename)?;
    tracing::info!("Saved table to: {}", table_path.display());

    match storage.save_table_metadata(&table, &table_path, &outcome) {
        Ok(path) => tracing::info!("Saved table metadata to: {}", path.display()),
        Err(e) => tracing::error!("Failed to save table metadata: {}", e),
    }

    tracing::info!(
        "Processing finished. Success: {}, Failures: {}",
        outcome.records.len(),
        outcome.failures.len()
    );

    Ok(())
}
