// src/table/mod.rs
//! Merges per-document records into one table.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::extractors::{FieldRecord, OutputMode};

// Everything that is not a decimal digit or a decimal point
static NON_NUMERIC_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^0-9.]").expect("Failed to compile NON_NUMERIC_RE")
});

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Field not present for this document.
    Empty,
    Text(String),
    Number(f64),
}

impl Cell {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Empty => Ok(()),
            Cell::Text(text) => f.write_str(text),
            Cell::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Keeps the digits and decimal points of `value` and parses the result.
/// `None` when nothing parseable is left.
pub fn coerce_number(value: &str) -> Option<f64> {
    let stripped = NON_NUMERIC_RE.replace_all(value, "");
    stripped.parse::<f64>().ok()
}

/// The merged output of a batch.
///
/// Row-per-document tables have no row index. Column-per-document tables are
/// indexed by canonical field name and have one `Project N` column per record.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectTable {
    mode: OutputMode,
    index: Option<Vec<String>>,
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl ProjectTable {
    /// Builds the table for `mode`. Column-per-document tables also get their
    /// `numeric_fields` rows coerced.
    pub fn assemble(mode: OutputMode, records: &[FieldRecord], numeric_fields: &[String]) -> Self {
        match mode {
            OutputMode::RowPerDocument => Self::row_per_document(records),
            OutputMode::ColumnPerDocument => {
                let mut table = Self::column_per_document(records);
                table.coerce_numeric(numeric_fields);
                table
            }
        }
    }

    /// Stacks records as rows in input order.
    pub fn row_per_document(records: &[FieldRecord]) -> Self {
        let columns = union_of_fields(records);
        let rows = records
            .iter()
            .map(|record| columns.iter().map(|column| cell_for(record, column)).collect())
            .collect();

        Self {
            mode: OutputMode::RowPerDocument,
            index: None,
            columns,
            rows,
        }
    }

    /// One row per field seen in any record, one column per record.
    pub fn column_per_document(records: &[FieldRecord]) -> Self {
        let index = union_of_fields(records);
        let columns = (1..=records.len()).map(|n| format!("Project {}", n)).collect();
        let rows = index
            .iter()
            .map(|field| records.iter().map(|record| cell_for(record, field)).collect())
            .collect();

        Self {
            mode: OutputMode::ColumnPerDocument,
            index: Some(index),
            columns,
            rows,
        }
    }

    /// Re-parses the text cells of the named rows as numbers. Cells that do
    /// not parse keep their text. Does nothing on tables without a row index.
    pub fn coerce_numeric(&mut self, numeric_fields: &[String]) {
        let Some(index) = &self.index else {
            return;
        };

        for (field, row) in index.iter().zip(self.rows.iter_mut()) {
            if !numeric_fields.contains(field) {
                continue;
            }
            for cell in row.iter_mut() {
                let parsed = match &*cell {
                    Cell::Text(text) if !text.is_empty() => coerce_number(text),
                    _ => continue,
                };
                match parsed {
                    Some(n) => *cell = Cell::Number(n),
                    None => tracing::trace!("Leaving '{}' in row '{}' as text", cell, field),
                }
            }
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    pub fn index(&self) -> Option<&[String]> {
        self.index.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Looks up a cell by row label and column name. Row-per-document tables
    /// are addressed by 1-based row number instead (`"1"`, `"2"`, ...).
    pub fn cell(&self, row: &str, column: &str) -> Option<&Cell> {
        let row_pos = match &self.index {
            Some(index) => index.iter().position(|field| field == row)?,
            None => row.parse::<usize>().ok()?.checked_sub(1)?,
        };
        let col_pos = self.columns.iter().position(|c| c == column)?;
        self.rows.get(row_pos)?.get(col_pos)
    }

    /// Header line as written to the spreadsheet; an index column gets a blank heading.
    pub fn header_record(&self) -> Vec<String> {
        let mut header = Vec::with_capacity(self.columns.len() + 1);
        if self.index.is_some() {
            header.push(String::new());
        }
        header.extend(self.columns.iter().cloned());
        header
    }

    /// Data lines as written to the spreadsheet, index label first when present.
    pub fn data_records(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let mut out = Vec::with_capacity(row.len() + 1);
                if let Some(index) = &self.index {
                    out.push(index[i].clone());
                }
                out.extend(row.iter().map(Cell::to_string));
                out
            })
            .collect()
    }
}

fn cell_for(record: &FieldRecord, field: &str) -> Cell {
    match record.get(field) {
        Some(value) => Cell::Text(value.to_string()),
        None => Cell::Empty,
    }
}

/// Field names across all records, in first-seen order.
fn union_of_fields(records: &[FieldRecord]) -> Vec<String> {
    let mut fields: Vec<String> = Vec::new();
    for record in records {
        for name in record.field_names() {
            if !fields.iter().any(|f| f == name) {
                fields.push(name.to_string());
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> FieldRecord {
        let mut record = FieldRecord::new();
        for (field, value) in pairs {
            record.insert(*field, *value);
        }
        record
    }

    fn numeric() -> Vec<String> {
        vec!["Percent".to_string(), "Bridge Cost ($1,000's)".to_string()]
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number("$1,234.50"), Some(1234.5));
        assert_eq!(coerce_number("45 %"), Some(45.0));
        assert_eq!(coerce_number(".5"), Some(0.5));
        assert_eq!(coerce_number("abc"), None);
        assert_eq!(coerce_number(""), None);
        assert_eq!(coerce_number("1.2.3"), None);
    }

    #[test]
    fn test_column_per_document_union_and_gaps() {
        let records = vec![
            record(&[("Project Name", "Route 9"), ("Percent", "50%")]),
            record(&[("Project Name", "I-87"), ("Bridge Cost ($1,000's)", "$2,000")]),
        ];
        let table = ProjectTable::assemble(OutputMode::ColumnPerDocument, &records, &numeric());

        assert_eq!(table.columns(), ["Project 1", "Project 2"]);
        assert_eq!(
            table.index().unwrap(),
            ["Project Name", "Percent", "Bridge Cost ($1,000's)"]
        );
        assert_eq!(table.cell("Project Name", "Project 2").unwrap().as_text(), Some("I-87"));
        assert_eq!(table.cell("Percent", "Project 1").unwrap().as_number(), Some(50.0));
        assert!(table.cell("Percent", "Project 2").unwrap().is_empty());
        assert_eq!(
            table.cell("Bridge Cost ($1,000's)", "Project 2").unwrap().as_number(),
            Some(2000.0)
        );
    }

    #[test]
    fn test_failed_coercion_keeps_text() {
        let records = vec![
            record(&[("Percent", "abc")]),
            record(&[("Percent", "")]),
            record(&[("Percent", "$1,234.50"), ("Project Name", "12 Main St")]),
        ];
        let table = ProjectTable::assemble(OutputMode::ColumnPerDocument, &records, &numeric());

        assert_eq!(table.cell("Percent", "Project 1").unwrap().as_text(), Some("abc"));
        assert_eq!(table.cell("Percent", "Project 2").unwrap().as_text(), Some(""));
        assert_eq!(table.cell("Percent", "Project 3").unwrap().as_number(), Some(1234.5));
        // Not a numeric row
        assert_eq!(table.cell("Project Name", "Project 3").unwrap().as_text(), Some("12 Main St"));
    }

    #[test]
    fn test_row_per_document_is_not_coerced() {
        let records = vec![
            record(&[("Project Name", "A"), ("Percent", "50%")]),
            record(&[("Project Name", "B"), ("Percent", "25%")]),
        ];
        let table = ProjectTable::assemble(OutputMode::RowPerDocument, &records, &numeric());

        assert!(table.index().is_none());
        assert_eq!(table.columns(), ["Project Name", "Percent"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.cell("2", "Percent").unwrap().as_text(), Some("25%"));
        assert!(table.cell("0", "Percent").is_none());
    }

    #[test]
    fn test_export_records() {
        let records = vec![record(&[("Percent", "50")]), record(&[("Owner", "Acme")])];
        let table = ProjectTable::assemble(OutputMode::ColumnPerDocument, &records, &numeric());

        assert_eq!(table.header_record(), vec!["", "Project 1", "Project 2"]);
        assert_eq!(
            table.data_records(),
            vec![vec!["Percent", "50", ""], vec!["Owner", "", "Acme"]]
        );

        let flat = ProjectTable::row_per_document(&records);
        assert_eq!(flat.header_record(), vec!["Percent", "Owner"]);
        assert_eq!(flat.data_records(), vec![vec!["50", ""], vec!["", "Acme"]]);
    }

    #[test]
    fn test_empty_batch() {
        let table = ProjectTable::assemble(OutputMode::ColumnPerDocument, &[], &numeric());
        assert_eq!(table.row_count(), 0);
        assert!(table.columns().is_empty());
    }
}
