use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Errors raised while loading a label mapping from disk.
#[derive(Debug, thiserror::Error)]
pub enum LabelError {
    #[error("Failed to read label mapping {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to parse label mapping {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Mapping from model class indices to human-readable intent labels.
///
/// Loaded from a JSON file of the form:
///
/// ```json
/// {"id_to_label": {"0": "greeting", "3": "open_settings"}}
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct LabelMapping {
    id_to_label: HashMap<u32, String>,
}

impl LabelMapping {
    pub fn new(id_to_label: HashMap<u32, String>) -> Self {
        Self { id_to_label }
    }

    /// Reads and parses a label mapping file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LabelError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| LabelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_slice(&bytes).map_err(|source| LabelError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Returns the label for a class index, if one is mapped.
    pub fn label(&self, index: usize) -> Option<&str> {
        u32::try_from(index)
            .ok()
            .and_then(|index| self.id_to_label.get(&index))
            .map(String::as_str)
    }

    /// Number of mapped classes.
    pub fn len(&self) -> usize {
        self.id_to_label.len()
    }

    pub fn is_empty(&self) -> bool {
        self.id_to_label.is_empty()
    }

    /// All labels, ordered by class index.
    pub fn labels(&self) -> Vec<&str> {
        let mut entries: Vec<_> = self.id_to_label.iter().collect();
        entries.sort_by_key(|(index, _)| **index);
        entries
            .into_iter()
            .map(|(_, label)| label.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> LabelMapping {
        serde_json::from_str(json).expect("mapping should parse")
    }

    #[test]
    fn parses_integer_string_keys() {
        let mapping = parse(r#"{"id_to_label": {"0": "greeting", "3": "open_settings"}}"#);
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.label(3), Some("open_settings"));
    }

    #[test]
    fn unmapped_indices_have_no_label() {
        let mapping = parse(r#"{"id_to_label": {"0": "greeting"}}"#);
        assert_eq!(mapping.label(7), None);
    }

    #[test]
    fn labels_are_ordered_by_class_index() {
        let mapping = parse(r#"{"id_to_label": {"2": "c", "0": "a", "1": "b"}}"#);
        assert_eq!(mapping.labels(), vec!["a", "b", "c"]);
    }

    #[test]
    fn non_integer_keys_are_rejected() {
        let result: Result<LabelMapping, _> =
            serde_json::from_str(r#"{"id_to_label": {"zero": "greeting"}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = LabelMapping::from_file("/nonexistent/labels.json");
        assert!(matches!(result, Err(LabelError::Io { .. })));
    }
}
