use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::fs;
use std::path::Path;

use super::data::DocumentRecord;
use super::paths::StorePaths;
use crate::error::{OrganizerError, Result};

/// Tab names that are guaranteed to exist even on a fresh store.
pub const DEFAULT_CATEGORIES: [&str; 3] = ["In Progress", "Completed", "Game Jam Drafts"];

/// A named tab and the GDDs filed under it, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub documents: Vec<DocumentRecord>,
}

/// The full persisted mapping of tab name to document list.
///
/// The Store owns every mutation to both the in-memory state and the managed
/// asset directory; the UI is rebuilt from it and never holds authoritative
/// data. Categories keep their creation order, which is why this is a `Vec`
/// and not a map, but it still serializes to the on-disk JSON object shape
/// `{"Tab": [{"display_name": ..., "file_path": ...}]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Store {
    categories: Vec<Category>,
}

/// What happened while reading the store file at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// File existed and parsed cleanly
    Loaded,
    /// No file yet (first run)
    Missing,
    /// File existed but was not a valid store (bad JSON or wrong shape)
    Corrupt(String),
    /// File could not be read at all
    Unreadable(String),
}

/// Result of a rename operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameOutcome {
    /// Blank or identical name, nothing was touched
    Unchanged,
    /// Record updated; `file_moved` is false when the backing file had
    /// vanished and only the metadata could be renamed
    Renamed { file_moved: bool },
}

impl Store {
    pub fn new() -> Self {
        Store::default()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    fn category_mut(&mut self, name: &str) -> Result<&mut Category> {
        self.categories
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| OrganizerError::CategoryNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.category(name).is_some()
    }

    /// Create a new empty category. The name is trimmed first; blank or
    /// already-present names are rejected before any state changes.
    /// Returns the trimmed name actually stored.
    pub fn create_category(&mut self, name: &str) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(OrganizerError::BlankName);
        }
        if self.contains(name) {
            return Err(OrganizerError::DuplicateCategory(name.to_string()));
        }
        self.categories.push(Category {
            name: name.to_string(),
            documents: Vec::new(),
        });
        Ok(name.to_string())
    }

    /// Drop a category and its document list. The backing files stay on disk.
    pub fn remove_category(&mut self, name: &str) -> Result<()> {
        let index = self
            .categories
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| OrganizerError::CategoryNotFound(name.to_string()))?;
        self.categories.remove(index);
        Ok(())
    }

    /// Make sure the three default categories exist, appending any that are
    /// missing. Returns true when something was added.
    pub fn ensure_defaults(&mut self) -> bool {
        let mut added = false;
        for name in DEFAULT_CATEGORIES {
            if !self.contains(name) {
                self.categories.push(Category {
                    name: name.to_string(),
                    documents: Vec::new(),
                });
                added = true;
            }
        }
        added
    }

    /// Copy `source` into the managed asset directory and file it under
    /// `category`. Rejected when the category already holds a document with
    /// the same file basename. On a copy failure no record is appended.
    pub fn import_document(
        &mut self,
        category: &str,
        source: &Path,
        paths: &StorePaths,
    ) -> Result<DocumentRecord> {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(OrganizerError::BlankName)?;

        let target = self.category_mut(category)?;
        if target.documents.iter().any(|d| d.basename() == file_name) {
            return Err(OrganizerError::DuplicateDocument(file_name));
        }

        let destination = paths.assets_dir.join(&file_name);
        fs::copy(source, &destination)?;

        let display_name = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());

        let record = DocumentRecord {
            display_name,
            file_path: destination.to_string_lossy().into_owned(),
        };
        target.documents.push(record.clone());
        Ok(record)
    }

    /// Rename the document at `index` in `category` to `new_name`.
    ///
    /// Blank or unchanged names are a no-op. Otherwise the backing file is
    /// moved to `<assets>/<new_name><old extension>` and the record updated;
    /// when the backing file is already gone only the record changes. An
    /// existing file at the destination is silently replaced, plain
    /// `fs::rename` semantics.
    pub fn rename_document(
        &mut self,
        category: &str,
        index: usize,
        new_name: &str,
        paths: &StorePaths,
    ) -> Result<RenameOutcome> {
        let target = self.category_mut(category)?;
        let record = target
            .documents
            .get_mut(index)
            .ok_or(OrganizerError::DocumentNotFound)?;

        let new_name = new_name.trim();
        if new_name.is_empty() || new_name == record.display_name {
            return Ok(RenameOutcome::Unchanged);
        }

        let old_path = Path::new(&record.file_path).to_path_buf();
        // Keep the original extension in its original case
        let extension = old_path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let new_path = paths.assets_dir.join(format!("{new_name}{extension}"));

        let file_moved = if old_path.exists() {
            move_file(&old_path, &new_path)?;
            true
        } else {
            false
        };

        record.display_name = new_name.to_string();
        record.file_path = new_path.to_string_lossy().into_owned();
        Ok(RenameOutcome::Renamed { file_moved })
    }

    /// Remove the document at `index` from `category`'s list. The physical
    /// file is deliberately left untouched.
    pub fn remove_document(&mut self, category: &str, index: usize) -> Result<DocumentRecord> {
        let target = self.category_mut(category)?;
        if index >= target.documents.len() {
            return Err(OrganizerError::DocumentNotFound);
        }
        Ok(target.documents.remove(index))
    }

    /// Count of documents across all categories.
    pub fn document_count(&self) -> usize {
        self.categories.iter().map(|c| c.documents.len()).sum()
    }

    /// Serialize the whole store to the config file, pretty-printed UTF-8.
    /// Not atomic: a failed write can leave a partial file behind.
    pub fn save(&self, paths: &StorePaths) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(&paths.config_file, json)?;
        Ok(())
    }

    /// Read the store file, degrading to an empty store on every failure.
    ///
    /// Missing file means first run; unparseable content or a divergent
    /// top-level shape is rejected wholesale (the corrupt file is left in
    /// place and will be overwritten by the next save).
    pub fn load(paths: &StorePaths) -> (Self, LoadReport) {
        if !paths.config_file.exists() {
            return (Store::new(), LoadReport::Missing);
        }

        let contents = match fs::read_to_string(&paths.config_file) {
            Ok(contents) => contents,
            Err(e) => return (Store::new(), LoadReport::Unreadable(e.to_string())),
        };

        match serde_json::from_str::<Store>(&contents) {
            Ok(store) => (store, LoadReport::Loaded),
            Err(e) => (Store::new(), LoadReport::Corrupt(e.to_string())),
        }
    }
}

/// Move a file, falling back to copy-and-delete when a plain rename is not
/// possible (the record's path can sit on another filesystem if the store
/// file was hand-edited or migrated).
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(_) => copy_and_delete(from, to),
    }
}

/// The cross-filesystem half of [`move_file`].
fn copy_and_delete(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::copy(from, to)?;
    fs::remove_file(from)
}

// The on-disk format is a plain JSON object, not a wrapped struct, so the
// file stays interchangeable with what earlier versions of the tool wrote.
impl Serialize for Store {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.categories.len()))?;
        for category in &self.categories {
            map.serialize_entry(&category.name, &category.documents)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Store {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct StoreVisitor;

        impl<'de> Visitor<'de> for StoreVisitor {
            type Value = Store;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category name to document list")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Store, A::Error> {
                let mut categories = Vec::new();
                while let Some((name, documents)) =
                    access.next_entry::<String, Vec<DocumentRecord>>()?
                {
                    categories.push(Category { name, documents });
                }
                Ok(Store { categories })
            }
        }

        deserializer.deserialize_map(StoreVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn test_paths(dir: &tempfile::TempDir) -> StorePaths {
        let paths = StorePaths::at(dir.path());
        paths.ensure_dirs().unwrap();
        paths
    }

    fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_create_category() {
        let mut store = Store::new();
        assert_eq!(store.create_category("  Ideas  ").unwrap(), "Ideas");
        assert!(store.contains("Ideas"));
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn test_create_duplicate_category_rejected() {
        let mut store = Store::new();
        store.create_category("Ideas").unwrap();
        let err = store.create_category("Ideas").unwrap_err();
        assert!(matches!(err, OrganizerError::DuplicateCategory(_)));
        // Store unchanged
        assert_eq!(store.categories().len(), 1);
    }

    #[test]
    fn test_create_blank_category_rejected() {
        let mut store = Store::new();
        assert!(matches!(
            store.create_category("   "),
            Err(OrganizerError::BlankName)
        ));
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_ensure_defaults_on_fresh_store() {
        let mut store = Store::new();
        assert!(store.ensure_defaults());
        assert_eq!(store.categories().len(), 3);
        for name in DEFAULT_CATEGORIES {
            assert!(store.category(name).unwrap().documents.is_empty());
        }
        // Second call is a no-op
        assert!(!store.ensure_defaults());
        assert_eq!(store.categories().len(), 3);
    }

    #[test]
    fn test_import_copies_file_and_appends_record() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        let record = store.import_document("Drafts", &source, &paths).unwrap();

        assert_eq!(record.display_name, "design");
        assert_eq!(record.basename(), "design.txt");
        assert!(paths.assets_dir.join("design.txt").exists());
        // Source is untouched
        assert!(source.exists());
        assert_eq!(store.category("Drafts").unwrap().documents.len(), 1);
    }

    #[test]
    fn test_import_duplicate_basename_rejected() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();

        let err = store.import_document("Drafts", &source, &paths).unwrap_err();
        assert!(matches!(err, OrganizerError::DuplicateDocument(_)));
        assert_eq!(store.category("Drafts").unwrap().documents.len(), 1);
    }

    #[test]
    fn test_import_same_basename_into_other_category_allowed() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.create_category("Final").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();
        // Only guarded within a category
        store.import_document("Final", &source, &paths).unwrap();
        assert_eq!(store.category("Final").unwrap().documents.len(), 1);
    }

    #[test]
    fn test_import_missing_source_leaves_store_unchanged() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        let err = store
            .import_document("Drafts", Path::new("/no/such/file.txt"), &paths)
            .unwrap_err();
        assert!(matches!(err, OrganizerError::Io(_)));
        assert!(store.category("Drafts").unwrap().documents.is_empty());
    }

    #[test]
    fn test_rename_moves_file_and_updates_record() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();
        let other = write_source(&dir, "other.txt", "other");
        store.import_document("Drafts", &other, &paths).unwrap();

        let outcome = store
            .rename_document("Drafts", 0, "final design", &paths)
            .unwrap();
        assert_eq!(outcome, RenameOutcome::Renamed { file_moved: true });

        let docs = &store.category("Drafts").unwrap().documents;
        assert_eq!(docs[0].display_name, "final design");
        assert_eq!(docs[0].basename(), "final design.txt");
        assert!(paths.assets_dir.join("final design.txt").exists());
        assert!(!paths.assets_dir.join("design.txt").exists());
        // Sibling record untouched
        assert_eq!(docs[1].display_name, "other");
        assert_eq!(docs[1].basename(), "other.txt");
    }

    #[test]
    fn test_rename_blank_or_same_is_noop() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();
        let before = store.clone();

        assert_eq!(
            store.rename_document("Drafts", 0, "  ", &paths).unwrap(),
            RenameOutcome::Unchanged
        );
        assert_eq!(
            store.rename_document("Drafts", 0, "design", &paths).unwrap(),
            RenameOutcome::Unchanged
        );
        assert_eq!(store, before);
    }

    #[test]
    fn test_rename_with_missing_file_updates_record_only() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();
        fs::remove_file(paths.assets_dir.join("design.txt")).unwrap();

        let outcome = store.rename_document("Drafts", 0, "lost", &paths).unwrap();
        assert_eq!(outcome, RenameOutcome::Renamed { file_moved: false });

        let docs = &store.category("Drafts").unwrap().documents;
        assert_eq!(docs[0].display_name, "lost");
        assert_eq!(docs[0].basename(), "lost.txt");
        assert!(!paths.assets_dir.join("lost.txt").exists());
    }

    #[test]
    fn test_move_file_fallback_copies_then_deletes_source() {
        let dir = tempdir().unwrap();
        let from = dir.path().join("design.txt");
        let to = dir.path().join("renamed.txt");
        fs::write(&from, "contents").unwrap();

        // The path taken when a plain rename is not possible
        copy_and_delete(&from, &to).unwrap();
        assert!(!from.exists());
        assert_eq!(fs::read_to_string(&to).unwrap(), "contents");
    }

    #[test]
    fn test_rename_replaces_existing_destination_file() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");
        fs::write(paths.assets_dir.join("final.txt"), "older file").unwrap();

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();

        // Destination collision is deliberately unchecked
        store.rename_document("Drafts", 0, "final", &paths).unwrap();
        assert_eq!(
            fs::read_to_string(paths.assets_dir.join("final.txt")).unwrap(),
            "contents"
        );
    }

    #[test]
    fn test_remove_document_keeps_file_on_disk() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();

        let removed = store.remove_document("Drafts", 0).unwrap();
        assert_eq!(removed.display_name, "design");
        assert!(store.category("Drafts").unwrap().documents.is_empty());
        assert!(paths.assets_dir.join("design.txt").exists());
    }

    #[test]
    fn test_remove_category_keeps_files() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();

        store.remove_category("Drafts").unwrap();
        assert!(!store.contains("Drafts"));
        assert!(paths.assets_dir.join("design.txt").exists());
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let source = write_source(&dir, "design.txt", "contents");

        let mut store = Store::new();
        store.ensure_defaults();
        store.create_category("Drafts").unwrap();
        store.import_document("Drafts", &source, &paths).unwrap();
        store.save(&paths).unwrap();

        let (restored, report) = Store::load(&paths);
        assert_eq!(report, LoadReport::Loaded);
        assert_eq!(restored, store);
        // Insertion order survives the round trip
        let names: Vec<_> = restored.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            ["In Progress", "Completed", "Game Jam Drafts", "Drafts"]
        );
    }

    #[test]
    fn test_load_missing_file_gives_empty_store() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        let (store, report) = Store::load(&paths);
        assert_eq!(report, LoadReport::Missing);
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_load_sample_file() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        fs::write(
            &paths.config_file,
            r#"{"Drafts": [{"display_name": "doc1", "file_path": "/x/doc1.txt"}]}"#,
        )
        .unwrap();

        let (store, report) = Store::load(&paths);
        assert_eq!(report, LoadReport::Loaded);
        let drafts = store.category("Drafts").unwrap();
        assert_eq!(drafts.documents.len(), 1);
        assert_eq!(drafts.documents[0].display_name, "doc1");
        assert_eq!(drafts.documents[0].file_path, "/x/doc1.txt");
    }

    #[test]
    fn test_load_invalid_json_falls_back_to_empty() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        fs::write(&paths.config_file, "{not json").unwrap();

        let (mut store, report) = Store::load(&paths);
        assert!(matches!(report, LoadReport::Corrupt(_)));
        assert!(store.categories().is_empty());

        // The startup sequence overwrites the corrupt file on its save
        store.ensure_defaults();
        store.save(&paths).unwrap();
        let (restored, report) = Store::load(&paths);
        assert_eq!(report, LoadReport::Loaded);
        assert_eq!(restored.categories().len(), 3);
    }

    #[test]
    fn test_load_wrong_shape_rejected_wholesale() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);
        // Valid JSON, wrong top-level shape
        fs::write(&paths.config_file, r#"["Drafts"]"#).unwrap();

        let (store, report) = Store::load(&paths);
        assert!(matches!(report, LoadReport::Corrupt(_)));
        assert!(store.categories().is_empty());
    }

    #[test]
    fn test_fresh_run_startup_sequence_writes_defaults() {
        let dir = tempdir().unwrap();
        let paths = test_paths(&dir);

        // load -> ensure defaults -> unconditional save, as main does
        let (mut store, report) = Store::load(&paths);
        assert_eq!(report, LoadReport::Missing);
        store.ensure_defaults();
        store.save(&paths).unwrap();

        assert!(paths.config_file.exists());
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.config_file).unwrap()).unwrap();
        let object = json.as_object().unwrap();
        assert_eq!(object.len(), 3);
        for name in DEFAULT_CATEGORIES {
            assert_eq!(object[name], serde_json::json!([]));
        }
    }
}
