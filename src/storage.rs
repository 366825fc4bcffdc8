//! Durable bookmark persistence.

use log::{debug, warn};
use std::cell::RefCell;
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ForkifyError;
use crate::model::Recipe;

/// Key-value persistence of the serialized bookmark list
pub trait BookmarkStore: Send {
    /// `None` when nothing has been saved yet or the data cannot be read
    fn load(&self) -> Option<String>;

    fn save(&self, serialized: &str) -> Result<(), ForkifyError>;

    /// Drop whatever is persisted
    fn clear(&self) -> Result<(), ForkifyError>;
}

/// Bookmarks kept in a JSON file
#[derive(Debug, Clone)]
pub struct FileBookmarkStore {
    path: PathBuf,
}

impl FileBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileBookmarkStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BookmarkStore for FileBookmarkStore {
    fn load(&self) -> Option<String> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Failed to read bookmarks from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn save(&self, serialized: &str) -> Result<(), ForkifyError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serialized)?;
        debug!("Saved {} bytes of bookmarks to {}", serialized.len(), self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), ForkifyError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

/// In-process store for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    data: RefCell<Option<String>>,
}

impl MemoryBookmarkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(serialized: impl Into<String>) -> Self {
        MemoryBookmarkStore {
            data: RefCell::new(Some(serialized.into())),
        }
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn load(&self) -> Option<String> {
        self.data.borrow().clone()
    }

    fn save(&self, serialized: &str) -> Result<(), ForkifyError> {
        *self.data.borrow_mut() = Some(serialized.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ForkifyError> {
        self.data.borrow_mut().take();
        Ok(())
    }
}

pub fn serialize_bookmarks(bookmarks: &[Recipe]) -> Result<String, ForkifyError> {
    Ok(serde_json::to_string(bookmarks)?)
}

/// Absent or corrupt data yields an empty set
pub fn deserialize_bookmarks(serialized: Option<&str>) -> Vec<Recipe> {
    let Some(serialized) = serialized else {
        return Vec::new();
    };
    match serde_json::from_str::<Vec<Recipe>>(serialized) {
        Ok(mut bookmarks) => {
            // Stored data is not trusted to be unique
            let mut seen = HashSet::new();
            bookmarks.retain(|r| seen.insert(r.id.clone()));
            for bookmark in &mut bookmarks {
                bookmark.bookmarked = true;
            }
            bookmarks
        }
        Err(e) => {
            warn!("Ignoring corrupt bookmark data: {}", e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Ingredient;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            title: format!("Recipe {}", id),
            publisher: "pub".to_string(),
            image: String::new(),
            source_url: String::new(),
            servings: 2,
            cooking_time: 10.0,
            ingredients: vec![Ingredient {
                quantity: Some(1.0),
                unit: "kg".to_string(),
                description: "rice".to_string(),
            }],
            key: None,
            bookmarked: true,
        }
    }

    #[test]
    fn test_corrupt_or_absent_data_is_empty() {
        assert!(deserialize_bookmarks(None).is_empty());
        assert!(deserialize_bookmarks(Some("{not json")).is_empty());
        assert!(deserialize_bookmarks(Some("{\"id\": 1}")).is_empty());
    }

    #[test]
    fn test_round_trip_marks_bookmarked_and_dedups() {
        let serialized = serialize_bookmarks(&[recipe("a"), recipe("b"), recipe("a")]).unwrap();
        let bookmarks = deserialize_bookmarks(Some(&serialized));
        let ids: Vec<&str> = bookmarks.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert!(bookmarks.iter().all(|r| r.bookmarked));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryBookmarkStore::new();
        assert!(store.load().is_none());
        store.save("[]").unwrap();
        assert_eq!(store.load().as_deref(), Some("[]"));
        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store() {
        let dir = std::env::temp_dir().join(format!("forkify-storage-{}", std::process::id()));
        let store = FileBookmarkStore::new(dir.join("nested").join("bookmarks.json"));
        assert!(store.load().is_none());
        store.save("[1]").unwrap();
        assert_eq!(store.load().as_deref(), Some("[1]"));
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
        let _ = fs::remove_dir_all(dir);
    }
}
