//! Per-URI text snapshots of open documents.
//!
//! Each edit replaces the stored snapshot with a new immutable
//! [`Document`]; readers clone the `Arc` and never observe a half-applied
//! update.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tower_lsp::lsp_types::Url;

/// One version of an open document.
#[derive(Debug, PartialEq, Eq)]
pub struct Document {
    /// Stable for the lifetime of the open document.
    pub id: u32,
    pub version: i32,
    pub text: Arc<str>,
}

#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: DashMap<Url, Arc<Document>>,
    serial_document_id: AtomicU32,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_document_id(&self) -> u32 {
        self.serial_document_id.fetch_add(1, Ordering::SeqCst)
    }

    /// Starts tracking a document, replacing any previous snapshot for `uri`.
    pub fn open(&self, uri: Url, version: i32, text: String) -> Arc<Document> {
        let document = Arc::new(Document {
            id: self.next_document_id(),
            version,
            text: text.into(),
        });
        self.documents.insert(uri, Arc::clone(&document));
        document
    }

    /// Stores the full new text of a document.
    ///
    /// Returns `None` when `version` is not newer than the stored one. An
    /// unknown `uri` is treated as an open.
    pub fn change(&self, uri: Url, version: i32, text: String) -> Option<Arc<Document>> {
        match self.documents.entry(uri) {
            Entry::Occupied(mut entry) => {
                let current = entry.get();
                if version <= current.version {
                    return None;
                }
                let document = Arc::new(Document {
                    id: current.id,
                    version,
                    text: text.into(),
                });
                entry.insert(Arc::clone(&document));
                Some(document)
            }
            Entry::Vacant(entry) => {
                let document = Arc::new(Document {
                    id: self.next_document_id(),
                    version,
                    text: text.into(),
                });
                entry.insert(Arc::clone(&document));
                Some(document)
            }
        }
    }

    pub fn close(&self, uri: &Url) -> Option<Arc<Document>> {
        self.documents.remove(uri).map(|(_, document)| document)
    }

    pub fn get(&self, uri: &Url) -> Option<Arc<Document>> {
        self.documents.get(uri).map(|entry| Arc::clone(entry.value()))
    }

    /// True when `version` is still the latest known version of `uri`.
    pub fn is_current(&self, uri: &Url, version: i32) -> bool {
        self.documents
            .get(uri)
            .is_some_and(|entry| entry.value().version == version)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri(path: &str) -> Url {
        Url::parse(&format!("file://{}", path)).unwrap()
    }

    #[test]
    fn test_open_and_get() {
        let store = DocumentStore::new();
        let opened = store.open(uri("/a.rct"), 0, "# a".to_string());
        let fetched = store.get(&uri("/a.rct")).expect("document should be stored");
        assert_eq!(opened, fetched);
        assert_eq!(&*fetched.text, "# a");
        assert!(store.get(&uri("/b.rct")).is_none());
    }

    #[test]
    fn test_change_keeps_id_and_replaces_text() {
        let store = DocumentStore::new();
        let opened = store.open(uri("/a.rct"), 1, "old".to_string());
        let changed = store.change(uri("/a.rct"), 2, "new".to_string()).unwrap();
        assert_eq!(changed.id, opened.id);
        assert_eq!(&*changed.text, "new");
        assert_eq!(&*opened.text, "old", "earlier snapshots are untouched");
        assert!(store.is_current(&uri("/a.rct"), 2));
        assert!(!store.is_current(&uri("/a.rct"), 1));
    }

    #[test]
    fn test_outdated_change_is_rejected() {
        let store = DocumentStore::new();
        store.open(uri("/a.rct"), 3, "current".to_string());
        assert!(store.change(uri("/a.rct"), 3, "same version".to_string()).is_none());
        assert!(store.change(uri("/a.rct"), 1, "older".to_string()).is_none());
        assert_eq!(&*store.get(&uri("/a.rct")).unwrap().text, "current");
    }

    #[test]
    fn test_change_on_unknown_uri_opens_it() {
        let store = DocumentStore::new();
        assert!(store.change(uri("/new.rct"), 1, "text".to_string()).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_close_discards_text() {
        let store = DocumentStore::new();
        store.open(uri("/a.rct"), 0, String::new());
        assert!(store.close(&uri("/a.rct")).is_some());
        assert!(store.close(&uri("/a.rct")).is_none());
        assert!(store.is_empty());
        assert!(!store.is_current(&uri("/a.rct"), 0));
    }
}
