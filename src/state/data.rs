/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the persistence layer and the UI layer.
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A single imported GDD: how it is labeled and where its managed copy lives.
///
/// `file_path` points into the managed asset directory. The on-disk JSON
/// field names are part of the persistence format and must not change.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// Name shown on the card (filename without extension at import time)
    pub display_name: String,
    /// Absolute path to the managed copy of the file
    pub file_path: String,
}

impl DocumentRecord {
    /// Filename component of the backing file, e.g. "design.pdf".
    pub fn basename(&self) -> String {
        Path::new(&self.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension including the leading dot, lowercased, e.g. ".pdf".
    /// Empty string when the file has no extension.
    pub fn extension(&self) -> String {
        Path::new(&self.file_path)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_and_extension() {
        let record = DocumentRecord {
            display_name: "Design".into(),
            file_path: "/data/assets/Design.PDF".into(),
        };
        assert_eq!(record.basename(), "Design.PDF");
        assert_eq!(record.extension(), ".pdf");
    }

    #[test]
    fn test_extension_missing() {
        let record = DocumentRecord {
            display_name: "notes".into(),
            file_path: "/data/assets/notes".into(),
        };
        assert_eq!(record.extension(), "");
    }

    #[test]
    fn test_json_field_names() {
        let record = DocumentRecord {
            display_name: "doc1".into(),
            file_path: "/x/doc1.txt".into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"display_name\""));
        assert!(json.contains("\"file_path\""));

        let restored: DocumentRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, record);
    }
}
