// src/extractors/mod.rs
pub mod aliases;
pub mod document;
pub mod fixed;
pub mod positional;
pub mod record;

use serde::Serialize;

use crate::config::ExtractionConfig;
use crate::utils::error::{ConfigError, ExtractError};

// Re-export key extraction types for convenience
pub use aliases::{clean_label, AliasTable};
pub use document::RawDocument;
pub use fixed::FixedLabelExtractor;
pub use positional::PositionalPairExtractor;
pub use record::FieldRecord;

/// Table orientation a strategy's records are assembled into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// One row per document, constant columns.
    RowPerDocument,
    /// One column per document, one row per field.
    ColumnPerDocument,
}

/// The two supported report layouts behind one "extract a record" call.
#[derive(Debug, Clone)]
pub enum ExtractionStrategy {
    FixedLabel(FixedLabelExtractor),
    PositionalPair(PositionalPairExtractor),
}

impl ExtractionStrategy {
    pub fn fixed_label(config: &ExtractionConfig) -> Self {
        Self::FixedLabel(FixedLabelExtractor::new(config))
    }

    /// Fails if the alias table is ambiguous or the style markers are unusable.
    pub fn positional_pair(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        Ok(Self::PositionalPair(PositionalPairExtractor::new(config)?))
    }

    pub fn extract(&self, document: &RawDocument) -> Result<FieldRecord, ExtractError> {
        match self {
            Self::FixedLabel(extractor) => extractor.extract(document),
            Self::PositionalPair(extractor) => Ok(extractor.extract(document)),
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        match self {
            Self::FixedLabel(_) => OutputMode::RowPerDocument,
            Self::PositionalPair(_) => OutputMode::ColumnPerDocument,
        }
    }
}

/// Result of running one strategy over a batch of documents.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Successful records in input order, with their document source.
    pub records: Vec<(String, FieldRecord)>,
    /// Documents that failed, with the reason.
    pub failures: Vec<(String, ExtractError)>,
}

impl BatchOutcome {
    pub fn field_records(&self) -> Vec<FieldRecord> {
        self.records.iter().map(|(_, record)| record.clone()).collect()
    }

    pub fn sources(&self) -> Vec<&str> {
        self.records.iter().map(|(source, _)| source.as_str()).collect()
    }
}

/// Extracts every document in order. A failing document is logged and
/// reported; the rest of the batch still runs.
pub fn extract_batch(strategy: &ExtractionStrategy, documents: &[RawDocument]) -> BatchOutcome {
    let mut outcome = BatchOutcome::default();

    for (index, document) in documents.iter().enumerate() {
        tracing::info!("Extracting document {}/{}: {}", index + 1, documents.len(), document.source());

        match strategy.extract(document) {
            Ok(record) => {
                tracing::info!("Extracted {} fields from {}", record.len(), document.source());
                outcome.records.push((document.source().to_string(), record));
            }
            Err(e) => {
                tracing::error!("Failed to extract {}: {}", document.source(), e);
                outcome.failures.push((document.source().to_string(), e));
            }
        }
    }

    tracing::info!(
        "Batch finished. Success: {}, Failures: {}",
        outcome.records.len(),
        outcome.failures.len()
    );
    outcome
}
