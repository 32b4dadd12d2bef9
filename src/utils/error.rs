// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Alias '{alias}' maps to both '{first}' and '{second}'")]
    AmbiguousAlias {
        alias: String,
        first: String,
        second: String,
    },

    #[error("Invalid style selector: {0}")]
    InvalidSelector(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Label not found: '{label}'")]
    LabelNotFound { label: String },

    #[error("No value element follows label '{label}'")]
    ValueNotFound { label: String },
}

impl ExtractError {
    /// The label the failure refers to.
    pub fn label(&self) -> &str {
        match self {
            ExtractError::LabelNotFound { label } | ExtractError::ValueNotFound { label } => label,
        }
    }
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
