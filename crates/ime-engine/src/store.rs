//! Named image storage.
//!
//! [`ImageStore`] maps names to images. Inserting under an existing name
//! replaces the previous image; there is no explicit removal.

use std::collections::HashMap;

use ime_core::Image;
use tracing::debug;

use crate::error::{EngineError, EngineResult};

/// Mapping from image name to image.
#[derive(Debug, Clone, Default)]
pub struct ImageStore {
    images: HashMap<String, Image>,
}

impl ImageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the image stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no image has that name.
    pub fn get(&self, name: &str) -> EngineResult<&Image> {
        self.images
            .get(name)
            .ok_or_else(|| EngineError::not_found(name))
    }

    /// Stores `image` under `name`, returning the image it replaced.
    pub fn insert(&mut self, name: impl Into<String>, image: Image) -> Option<Image> {
        let name = name.into();
        let previous = self.images.insert(name.clone(), image);
        if previous.is_some() {
            debug!(name = %name, "replaced stored image");
        }
        previous
    }

    /// Returns `true` if an image is stored under `name`.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.images.contains_key(name)
    }

    /// Stored names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of stored images.
    #[inline]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if nothing is stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ime_core::Pixel;

    #[test]
    fn test_get_missing() {
        let store = ImageStore::new();
        assert!(store.get("nope").unwrap_err().is_not_found());
        assert!(store.is_empty());
    }

    #[test]
    fn test_insert_replaces() {
        let mut store = ImageStore::new();
        assert!(store.insert("a", Image::new(1, 1, 255)).is_none());
        let old = store
            .insert("a", Image::filled(1, 1, 255, Pixel::grey(9, 255)))
            .unwrap();
        assert_eq!(old, Image::new(1, 1, 255));
        assert_eq!(store.get("a").unwrap().get(0, 0).unwrap().red(), 9);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_names_sorted() {
        let mut store = ImageStore::new();
        for name in ["c", "a", "b"] {
            store.insert(name, Image::new(1, 1, 255));
        }
        assert_eq!(store.names(), vec!["a", "b", "c"]);
        assert!(store.contains("b"));
        assert!(!store.contains("d"));
    }
}
