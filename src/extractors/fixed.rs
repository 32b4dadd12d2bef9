// src/extractors/fixed.rs
use std::collections::HashSet;

use scraper::{ElementRef, Html};

use crate::config::{DescriptiveLabel, ExtractionConfig};
use crate::extractors::document::RawDocument;
use crate::extractors::record::FieldRecord;
use crate::utils::error::ExtractError;

pub const YES: &str = "Yes";
pub const NO: &str = "No";

/// Reads known labels from the single-project report layout.
///
/// Each descriptive label is a text node matched exactly; its value is the
/// text of the first value element (`span` by default) that follows it in
/// document order. Special factors are "Yes" when their label text appears as
/// a whole text node anywhere in the page.
#[derive(Debug, Clone)]
pub struct FixedLabelExtractor {
    descriptive_labels: Vec<DescriptiveLabel>,
    padding_fields: Vec<String>,
    special_factors: Vec<String>,
    value_tag: String,
}

impl FixedLabelExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        Self {
            descriptive_labels: config.descriptive_labels.clone(),
            padding_fields: config.padding_fields.clone(),
            special_factors: config.special_factors.clone(),
            value_tag: config.value_tag.to_ascii_lowercase(),
        }
    }

    /// Builds the fixed-shape record for one document.
    /// Fails on the first required label that is missing.
    pub fn extract(&self, document: &RawDocument) -> Result<FieldRecord, ExtractError> {
        let html = document.html();
        let mut record = FieldRecord::new();

        for DescriptiveLabel { label, field } in &self.descriptive_labels {
            let value = self.value_after_label(html, label)?;
            tracing::trace!("{}: {} = '{}'", document.source(), field, value);
            record.insert(field.as_str(), value);
        }

        for field in &self.padding_fields {
            record.insert(field.as_str(), "");
        }

        let text_nodes = text_nodes(html);
        for factor in &self.special_factors {
            let flag = if text_nodes.contains(factor.as_str()) { YES } else { NO };
            record.insert(factor.as_str(), flag);
        }

        Ok(record)
    }

    fn value_after_label(&self, html: &Html, label: &str) -> Result<String, ExtractError> {
        // Pre-order traversal is document order; whatever remains after the
        // label's text node is everything that follows it.
        let mut nodes = html.tree.root().descendants();

        nodes
            .by_ref()
            .find(|node| node.value().as_text().is_some_and(|text| &**text == label))
            .ok_or_else(|| ExtractError::LabelNotFound { label: label.to_string() })?;

        nodes
            .filter_map(ElementRef::wrap)
            .find(|element| element.value().name() == self.value_tag)
            .map(|element| element.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ExtractError::ValueNotFound { label: label.to_string() })
    }
}

/// Every text node of the document, as-is.
fn text_nodes(html: &Html) -> HashSet<&str> {
    html.tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect()
}
