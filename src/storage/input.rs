// src/storage/input.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::extractors::RawDocument;
use crate::utils::error::StorageError;

const HTML_EXTENSIONS: [&str; 2] = ["html", "htm"];

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HTML_EXTENSIONS.iter().any(|h| ext.eq_ignore_ascii_case(h)))
}

/// Expands the inputs into HTML file paths. Files are taken as given;
/// directories contribute their `.html`/`.htm` files sorted by name.
pub fn collect_html_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, StorageError> {
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = fs::read_dir(input)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| path.is_file() && is_html(path))
                .collect();
            found.sort();
            tracing::debug!("Found {} HTML files in {}", found.len(), input.display());
            paths.extend(found);
        } else {
            paths.push(input.clone());
        }
    }

    Ok(paths)
}

/// Reads and parses every input document, in order.
pub fn read_documents(inputs: &[PathBuf]) -> Result<Vec<RawDocument>, StorageError> {
    collect_html_paths(inputs)?
        .into_iter()
        .map(|path| -> Result<RawDocument, StorageError> {
            let markup = fs::read_to_string(&path)?;
            tracing::debug!("Read {} ({} bytes)", path.display(), markup.len());
            Ok(RawDocument::parse(path.display().to_string(), &markup))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_inputs_are_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.html"), "<html></html>").unwrap();
        fs::write(dir.path().join("a.HTM"), "<html></html>").unwrap();
        fs::write(dir.path().join("notes.txt"), "skip me").unwrap();
        let single = dir.path().join("notes.txt");

        let paths = collect_html_paths(&[dir.path().to_path_buf(), single.clone()]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("a.HTM"), dir.path().join("b.html"), single]
        );
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_documents(&[dir.path().join("absent.html")]);
        assert!(matches!(result, Err(StorageError::IoError(_))));
    }
}
