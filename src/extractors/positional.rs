// src/extractors/positional.rs
use scraper::{ElementRef, Selector};

use crate::config::ExtractionConfig;
use crate::extractors::aliases::{clean_label, AliasTable};
use crate::extractors::document::RawDocument;
use crate::extractors::record::FieldRecord;
use crate::utils::error::ConfigError;

/// One styled element of the positional layout, reduced to what pairing needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledElement {
    pub is_label: bool,
    pub is_value: bool,
    pub text: String,
}

/// Pairs label-styled elements with value-styled elements in the
/// multi-project report layout.
///
/// Styled elements are gathered in document order and walked last to first.
/// Each label takes the first value found further along that reversed walk,
/// i.e. the nearest value *before* it in the page.
#[derive(Debug, Clone)]
pub struct PositionalPairExtractor {
    selector: Selector,
    label_class: String,
    value_class: String,
    aliases: AliasTable,
}

impl PositionalPairExtractor {
    pub fn new(config: &ExtractionConfig) -> Result<Self, ConfigError> {
        let aliases = AliasTable::new(&config.aliases)?;
        let selector_text = format!(
            "{tag}.{label}, {tag}.{value}",
            tag = config.value_tag,
            label = config.label_class,
            value = config.value_class,
        );
        let selector = Selector::parse(&selector_text)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector_text, e)))?;

        Ok(Self {
            selector,
            label_class: config.label_class.clone(),
            value_class: config.value_class.clone(),
            aliases,
        })
    }

    /// Builds the variable-shape record for one document. Never fails;
    /// labels with no value left to pair, or that clean to nothing, are dropped.
    pub fn extract(&self, document: &RawDocument) -> FieldRecord {
        let mut styled = self.styled_elements(document);
        styled.reverse();
        self.pair(document.source(), &styled)
    }

    /// Label/value-styled elements in document order.
    pub fn styled_elements(&self, document: &RawDocument) -> Vec<StyledElement> {
        document
            .html()
            .select(&self.selector)
            .map(|element| StyledElement {
                is_label: has_class(element, &self.label_class),
                is_value: has_class(element, &self.value_class),
                text: element.text().collect(),
            })
            .collect()
    }

    /// Two-pointer scan over an already reversed sequence.
    pub fn pair(&self, source: &str, reversed: &[StyledElement]) -> FieldRecord {
        let mut record = FieldRecord::new();

        for (i, element) in reversed.iter().enumerate() {
            if !element.is_label {
                continue;
            }

            let field = self.aliases.normalize(&element.text);
            if field.is_empty() {
                tracing::trace!("{}: dropping empty label at position {}", source, i);
                continue;
            }

            match reversed[i + 1..].iter().find(|candidate| candidate.is_value) {
                Some(value) => {
                    let value = clean_label(&value.text);
                    tracing::debug!("Collected {}: {}", field, value);
                    record.insert(field, value);
                }
                None => {
                    tracing::trace!("{}: no value left for label '{}', dropping", source, field);
                }
            }
        }

        record
    }
}

fn has_class(element: ElementRef, class: &str) -> bool {
    element.value().classes().any(|c| c == class)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> PositionalPairExtractor {
        PositionalPairExtractor::new(&ExtractionConfig::default()).expect("reference config")
    }

    fn styled(is_label: bool, text: &str) -> StyledElement {
        StyledElement { is_label, is_value: !is_label, text: text.to_string() }
    }

    // Values render above their labels in this layout.
    const PROJECT: &str = r#"
        <html><body>
        <div><span class="f5">Route 9 Rehabilitation</span></div>
        <div><span class="f6">Project Title:</span></div>
        <div><span class="f5">Town of Colonie</span></div>
        <div><span class="f6">Client :</span></div>
        <div><span class="f5">45 %</span></div>
        <div><span class="f6">% Time</span></div>
        <div><span class="f5">$1,250</span></div>
        <div><span class="f6">Non-Bridge
Cost</span></div>
        <div><span class="f5">2018</span></div>
        <div><span class="f6">Contract Number:</span></div>
        <span class="f3">ignored styling</span>
        </body></html>
    "#;

    #[test]
    fn test_pairs_label_with_preceding_value() {
        let document = RawDocument::parse("project.html", PROJECT);
        let record = extractor().extract(&document);

        assert_eq!(&record["Project Name"], "Route 9 Rehabilitation");
        assert_eq!(&record["Project Owner"], "Town of Colonie");
        assert_eq!(&record["Percent"], "45 %");
        assert_eq!(&record["Non Bridge Cost ($1,000's)"], "$1,250");
        // Unknown labels surface under their cleaned text
        assert_eq!(&record["Contract Number"], "2018");
        assert_eq!(record.len(), 5);
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let document = RawDocument::parse("project.html", PROJECT);
        let extractor = extractor();
        assert_eq!(extractor.extract(&document), extractor.extract(&document));
    }

    #[test]
    fn test_first_label_with_no_value_before_it_is_dropped() {
        let html = r#"<html><body>
            <span class="f6">Owner</span>
            <span class="f5">Acme</span>
            <span class="f6">Role</span>
            </body></html>"#;
        let record = extractor().extract(&RawDocument::parse("d.html", html));

        assert!(!record.contains("Project Owner"));
        assert_eq!(&record["Role In Project"], "Acme");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_repeated_label_keeps_first_in_document_order() {
        let reversed = vec![
            styled(true, "Percent"),
            styled(false, "90"),
            styled(true, "Percent"),
            styled(false, "40"),
        ];
        let record = extractor().pair("d.html", &reversed);
        assert_eq!(&record["Percent"], "40");
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_labels_between_are_skipped_and_values_shared() {
        let reversed = vec![
            styled(true, "Owner"),
            styled(true, "Role"),
            styled(false, "Acme: Inc"),
        ];
        let record = extractor().pair("d.html", &reversed);
        assert_eq!(&record["Project Owner"], "Acme Inc");
        assert_eq!(&record["Role In Project"], "Acme Inc");
    }

    #[test]
    fn test_empty_label_is_dropped() {
        let reversed = vec![styled(true, " : "), styled(false, "orphan")];
        assert!(extractor().pair("d.html", &reversed).is_empty());
    }

    #[test]
    fn test_element_with_both_classes_is_label_and_value() {
        let html = r#"<html><body>
            <span class="f5">Acme</span>
            <span class="f5 f6">Owner</span>
            <span class="f6">Role</span>
            </body></html>"#;
        let document = RawDocument::parse("d.html", html);
        let extractor = extractor();

        let elements = extractor.styled_elements(&document);
        assert_eq!(elements.len(), 3);
        assert!(elements[1].is_label && elements[1].is_value);

        let record = extractor.extract(&document);
        assert_eq!(&record["Role In Project"], "Owner");
        assert_eq!(&record["Project Owner"], "Acme");
    }

    #[test]
    fn test_bad_style_marker_fails_at_construction() {
        let mut config = ExtractionConfig::default();
        config.label_class = String::new();
        assert!(matches!(
            PositionalPairExtractor::new(&config),
            Err(ConfigError::InvalidSelector(_))
        ));
    }
}
