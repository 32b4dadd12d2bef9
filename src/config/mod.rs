// src/config/mod.rs
//! Extraction constants: label lists, alias table, numeric fields and the
//! style markers of both report layouts.
//!
//! `ExtractionConfig::default()` is the reference configuration for the
//! NYSDOT consultant inventory reports. A JSON file can override any key;
//! keys it leaves out keep their reference values.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::utils::error::ConfigError;

/// A required label of the fixed layout and the field it is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptiveLabel {
    pub label: String,
    pub field: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Labels read by the fixed-label extractor, in output column order.
    pub descriptive_labels: Vec<DescriptiveLabel>,
    /// Fields the fixed layout never carries; always present and empty.
    pub padding_fields: Vec<String>,
    /// Yes/No factor labels, matched as whole text nodes.
    pub special_factors: Vec<String>,
    /// Canonical field name -> alternate label texts.
    pub aliases: HashMap<String, Vec<String>>,
    /// Rows coerced to numbers in the transposed table.
    pub numeric_fields: Vec<String>,
    /// Element holding a value in the fixed layout; also the element the
    /// positional layout styles with the label/value classes.
    pub value_tag: String,
    /// Class marking label elements in the positional layout.
    pub label_class: String,
    /// Class marking value elements in the positional layout.
    pub value_class: String,
}

const DESCRIPTIVE_LABELS: [(&str, &str); 7] = [
    ("Project Name :", "Project Name"),
    ("Project Owner :", "Project Owner"),
    ("Role In Project :", "Prime or Subconsultant Role"),
    ("Percent :", "% of Work your firm completed"),
    ("Completed :", "Year Completed (Within Last 12 Years)"),
    ("Work class :", "Work Class"),
    ("Complexity :", "Highway Complexity"),
];

const PADDING_FIELDS: [&str; 3] = [
    "Bridge Complexity",
    "Total Highway Cost ($)",
    "Total Bridge Cost ($)",
];

const SPECIAL_FACTORS: [&str; 28] = [
    "L1. High Traffic Volumes (>50,000 AADT)",
    "L2. NYC Metropolitan Area",
    "L3. Large Urban Area",
    "C1. Night Work",
    "C2. Substantial Community Liaison Work Due to Controversial Nature of Project",
    "C3. Extensive Underground and Aerial Utility Relocations, Requiring Ongoing Coordination with Utilities",
    "C4. Extensive Work on and Coordination with Railroads or Urban Commuter Rail",
    "M1. Complicated M Staging, with Extensive Field Changes",
    "M2. Staging With Movable Concrete Barrier",
    "M3. Installation and Removal of Temporary Steel Bridges",
    "H1. > 2,500 Sq. Meters of New Full-Depth PCC Pavement",
    "H2. > 50,000 Metric Tons of ACC Pavement",
    "B1. Rehab or Replacement of Viaducts, Major Interchanges or Trusses",
    "B2. Rehab or Replacement of Movable Bridges",
    "B3. Painting With Class A Containment",
    "A1. 10 or More Traffic Signals",
    "A2. 10 or More Interconnected Traffic Signals",
    "A3. > .62 Miles of Highway or Interchange Lighting",
    "A4. ITS",
    "A5. 50 or More Permanent Signs",
    "A6. > 1.24 Miles of Guiderail",
    "A7. > 1.24 Miles of Fencing",
    "A8. > 1.24 Miles of New Closed Drainage Systems",
    "O1. Building Construction",
    "O2. Rest Areas",
    "O3. Hazardous Waste Remediation/Removal",
    "O4. Underwater Inspection",
    "O5. Marine Work",
];

const ALIASES: [(&str, &[&str]); 11] = [
    ("Project Name", &["Project Name", "Project Title", "Name of Project"]),
    ("Project Owner", &["Project Owner", "Owner", "Client"]),
    ("Role In Project", &["Role In Project", "Role", "Project Role"]),
    ("Individual", &["Individual", "Staff Member", "Team Member"]),
    ("Percent", &["Percent", "Percentage", "% Time"]),
    ("Completed", &["Completed", "Completion Date", "Date Completed"]),
    ("Work Class", &["Work Class", "Work Classification", "Project Class"]),
    ("Non Bridge Complexity", &["Non Bridge Complexity", "Non-Bridge Complexity"]),
    ("Complexity", &["Complexity", "Bridge Complexity"]),
    ("Non Bridge Cost ($1,000's)", &["Non Bridge Cost ($1,000's)", "Non-Bridge Cost"]),
    ("Bridge Cost ($1,000's)", &["Bridge Cost ($1,000's)", "Bridge Cost"]),
];

const NUMERIC_FIELDS: [&str; 3] = [
    "Non Bridge Cost ($1,000's)",
    "Bridge Cost ($1,000's)",
    "Percent",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            descriptive_labels: DESCRIPTIVE_LABELS
                .iter()
                .map(|(label, field)| DescriptiveLabel {
                    label: label.to_string(),
                    field: field.to_string(),
                })
                .collect(),
            padding_fields: owned(&PADDING_FIELDS),
            special_factors: owned(&SPECIAL_FACTORS),
            aliases: ALIASES
                .iter()
                .map(|(canonical, alts)| (canonical.to_string(), owned(alts)))
                .collect(),
            numeric_fields: owned(&NUMERIC_FIELDS),
            value_tag: "span".to_string(),
            label_class: "f6".to_string(),
            value_class: "f5".to_string(),
        }
    }
}

impl ExtractionConfig {
    /// Loads a JSON config file. Missing keys fall back to the reference values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        tracing::info!("Loaded extraction config from {}", path.display());
        Ok(config)
    }

    /// Field names of the fixed-shape record, in column order.
    pub fn fixed_fields(&self) -> Vec<String> {
        self.descriptive_labels
            .iter()
            .map(|d| d.field.clone())
            .chain(self.padding_fields.iter().cloned())
            .chain(self.special_factors.iter().cloned())
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
