// src/lib.rs
//! Field extraction and table assembly for semi-structured project report pages.

pub mod config;
pub mod extractors;
pub mod storage;
pub mod table;
pub mod utils;

pub use config::ExtractionConfig;
pub use extractors::{extract_batch, BatchOutcome, ExtractionStrategy, FieldRecord, OutputMode, RawDocument};
pub use table::{Cell, ProjectTable};
pub use utils::AppError;
