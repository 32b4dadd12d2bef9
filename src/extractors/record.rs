// src/extractors/record.rs
use serde::Serialize;

/// Canonical field name -> value for one document.
///
/// Keeps first-insertion order so fixed-shape records list their columns in
/// schema order and variable-shape records in discovery order. Inserting an
/// existing field replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldRecord {
    fields: Vec<(String, String)>,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(name, _)| *name == field) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

impl std::ops::Index<&str> for FieldRecord {
    type Output = str;

    fn index(&self, field: &str) -> &str {
        match self.get(field) {
            Some(value) => value,
            None => panic!("field '{}' not in record", field),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut record = FieldRecord::new();
        record.insert("A", "1");
        record.insert("B", "2");
        record.insert("A", "3");
        assert_eq!(record.len(), 2);
        assert_eq!(record.iter().collect::<Vec<_>>(), vec![("A", "3"), ("B", "2")]);
        assert_eq!(&record["A"], "3");
        assert!(!record.contains("C"));
    }
}
