// src/extractors/aliases.rs
use std::collections::HashMap;

use crate::utils::error::ConfigError;

/// Strips surrounding whitespace and every colon, and turns newlines into spaces.
pub fn clean_label(text: &str) -> String {
    text.trim().replace(':', "").replace('\n', " ").trim().to_string()
}

/// Reverse index from alias text to canonical field name.
///
/// Built once from the canonical -> aliases mapping and rejected if any alias
/// would resolve to two different canonical names.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    reverse: HashMap<String, String>,
}

impl AliasTable {
    pub fn new(mapping: &HashMap<String, Vec<String>>) -> Result<Self, ConfigError> {
        let mut reverse: HashMap<String, String> = HashMap::new();

        // Sorted so a collision always reports the same pair
        let mut canonicals: Vec<&String> = mapping.keys().collect();
        canonicals.sort();

        for canonical in canonicals {
            for alias in &mapping[canonical] {
                match reverse.get(alias) {
                    Some(existing) if existing != canonical => {
                        return Err(ConfigError::AmbiguousAlias {
                            alias: alias.clone(),
                            first: existing.clone(),
                            second: canonical.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        reverse.insert(alias.clone(), canonical.clone());
                    }
                }
            }
        }

        tracing::debug!("Built alias table: {} aliases for {} fields", reverse.len(), mapping.len());
        Ok(Self { reverse })
    }

    /// Cleans `raw` and returns its canonical name, or the cleaned text itself
    /// when no alias matches.
    pub fn normalize(&self, raw: &str) -> String {
        let cleaned = clean_label(raw);
        match self.reverse.get(&cleaned) {
            Some(canonical) => canonical.clone(),
            None => cleaned,
        }
    }

    pub fn len(&self) -> usize {
        self.reverse.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reverse.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractionConfig;

    fn reference_table() -> AliasTable {
        AliasTable::new(&ExtractionConfig::default().aliases).unwrap()
    }

    #[test]
    fn test_every_alias_resolves_to_its_canonical() {
        let config = ExtractionConfig::default();
        let table = AliasTable::new(&config.aliases).unwrap();
        for (canonical, aliases) in &config.aliases {
            for alias in aliases {
                assert_eq!(&table.normalize(alias), canonical, "alias {alias}");
            }
        }
    }

    #[test]
    fn test_cleaning_before_lookup() {
        let table = reference_table();
        assert_eq!(table.normalize("  Owner : "), "Project Owner");
        assert_eq!(table.normalize("Bridge\nCost:"), "Bridge Cost ($1,000's)");
        assert_eq!(table.normalize("Bridge Complexity"), "Complexity");
    }

    #[test]
    fn test_miss_returns_cleaned_text() {
        let table = reference_table();
        assert_eq!(table.normalize("Contract Number :"), "Contract Number");
        assert_eq!(table.normalize("Unheard Of"), "Unheard Of");
        assert_eq!(table.normalize(" : "), "");
    }

    #[test]
    fn test_shared_alias_is_rejected() {
        let mut mapping = HashMap::new();
        mapping.insert("Owner".to_string(), vec!["Client".to_string()]);
        mapping.insert("Customer".to_string(), vec!["Client".to_string(), "Buyer".to_string()]);

        match AliasTable::new(&mapping) {
            Err(ConfigError::AmbiguousAlias { alias, first, second }) => {
                assert_eq!(alias, "Client");
                assert_eq!(first, "Customer");
                assert_eq!(second, "Owner");
            }
            other => panic!("expected AmbiguousAlias, got {:?}", other),
        }
    }

    #[test]
    fn test_repeated_alias_under_same_canonical_is_fine() {
        let mut mapping = HashMap::new();
        mapping.insert("Percent".to_string(), vec!["Percent".to_string(), "Percent".to_string()]);
        assert_eq!(AliasTable::new(&mapping).unwrap().len(), 1);
    }
}
