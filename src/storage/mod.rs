// src/storage/mod.rs
pub mod input;

use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::BatchOutcome;
use crate::table::ProjectTable;
use crate::utils::error::StorageError;

pub use input::read_documents;

pub struct StorageManager {
    base_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager with the specified base directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self, StorageError> {
        let base_path = base_dir.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(StorageError::IoError)?;
        }

        Ok(Self { base_dir: base_path })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Writes the table as a CSV spreadsheet. Tables with a row index get it
    /// as the leftmost column.
    pub fn save_table(&self, table: &ProjectTable, filename: &str) -> Result<PathBuf, StorageError> {
        let file_path = self.base_dir.join(filename);

        // Index tables have a blank first header cell; rows stay the same width
        let mut writer = csv::WriterBuilder::new().from_path(&file_path)?;
        writer.write_record(table.header_record())?;
        for record in table.data_records() {
            writer.write_record(&record)?;
        }
        writer.flush().map_err(StorageError::IoError)?;

        tracing::info!(
            "Saved table ({} rows x {} columns) to {}",
            table.row_count(),
            table.columns().len(),
            file_path.display()
        );

        Ok(file_path)
    }

    /// Saves a JSON manifest describing the run next to the table:
    /// `<table stem>_meta.json`.
    pub fn save_table_metadata(
        &self,
        table: &ProjectTable,
        table_path: &Path,
        outcome: &BatchOutcome,
    ) -> Result<PathBuf, StorageError> {
        let stem = table_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "table".to_string());
        let file_path = self.base_dir.join(format!("{}_meta.json", stem));

        let failures: Vec<serde_json::Value> = outcome
            .failures
            .iter()
            .map(|(source, error)| {
                serde_json::json!({
                    "source": source,
                    "label": error.label(),
                    "error": error.to_string(),
                })
            })
            .collect();

        let metadata = serde_json::json!({
            "table_file": table_path.file_name().map(|n| n.to_string_lossy().into_owned()),
            "mode": table.mode(),
            "documents": outcome.sources(),
            "failures": failures,
            "row_count": table.row_count(),
            "column_count": table.columns().len(),
            "extraction_timestamp": chrono::Utc::now().to_rfc3339(),
        });

        let metadata_str = serde_json::to_string_pretty(&metadata)
            .map_err(|e| StorageError::SerializationError(e.to_string()))?;

        fs::write(&file_path, metadata_str).map_err(StorageError::IoError)?;

        tracing::info!("Saved metadata to {}", file_path.display());

        Ok(file_path)
    }
}
