//! Backend state management
//!
//! This module defines the RecetteBackend struct, which holds the open
//! documents, the vocabulary, the resolved configuration and the
//! cancellation tokens of in-flight validations.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;
use tower_lsp::Client;
use tower_lsp::lsp_types::Url;

use crate::lang::Vocabulary;
use crate::lsp::config::ServerConfig;
use crate::lsp::document::DocumentStore;
use crate::lsp::publisher::DiagnosticPublisher;

/// The recipe language server backend, managing state and handling LSP requests.
#[derive(Clone)]
pub struct RecetteBackend {
    pub(super) client: Client,
    /// Where validation results go; the client itself outside of tests
    pub(super) publisher: Arc<dyn DiagnosticPublisher>,
    pub(super) documents: Arc<DocumentStore>,
    pub(super) vocabulary: Arc<Vocabulary>,
    pub(super) config: Arc<RwLock<ServerConfig>>,
    /// One token per URI with a validation in flight; sending on it aborts that validation
    pub(super) validation_cancel: Arc<Mutex<HashMap<Url, oneshot::Sender<()>>>>,
    /// Held while checking a document's version and publishing for it
    pub(super) publish_lock: Arc<tokio::sync::Mutex<()>>,
}

// Manual Debug implementation since DiagnosticPublisher doesn't implement Debug
impl std::fmt::Debug for RecetteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecetteBackend")
            .field("documents_count", &self.documents.len())
            .field("config", &*self.config.read())
            .finish()
    }
}
