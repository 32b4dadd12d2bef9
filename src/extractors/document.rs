// src/extractors/document.rs
use scraper::Html;

/// One parsed report page. Read-only once built.
pub struct RawDocument {
    source: String,
    html: Html,
}

impl RawDocument {
    /// Parses full page markup. `source` names the document in logs and reports.
    pub fn parse(source: impl Into<String>, markup: &str) -> Self {
        Self {
            source: source.into(),
            html: Html::parse_document(markup),
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn html(&self) -> &Html {
        &self.html
    }
}

impl std::fmt::Debug for RawDocument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawDocument").field("source", &self.source).finish_non_exhaustive()
    }
}
