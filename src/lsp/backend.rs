use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use tokio::sync::oneshot;
use tokio::task::JoinError;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, error, trace};

use crate::lang::{analyze, parse, Recipe, Vocabulary};
use crate::lsp::config::ServerConfig;
use crate::lsp::document::{Document, DocumentStore};
use crate::lsp::publisher::DiagnosticPublisher;

mod handlers;
mod state;
mod utils;

pub use state::RecetteBackend;

impl RecetteBackend {
    /// Creates a backend publishing diagnostics straight to `client`.
    pub fn new(client: Client, config: ServerConfig) -> Self {
        let publisher: Arc<dyn DiagnosticPublisher> = Arc::new(client.clone());
        Self::with_publisher(client, config, publisher)
    }

    /// Creates a backend that sends diagnostics to `publisher` instead of the client.
    pub fn with_publisher(
        client: Client,
        config: ServerConfig,
        publisher: Arc<dyn DiagnosticPublisher>,
    ) -> Self {
        Self {
            client,
            publisher,
            documents: Arc::new(DocumentStore::new()),
            vocabulary: Arc::new(Vocabulary::default()),
            config: Arc::new(RwLock::new(config)),
            validation_cancel: Arc::new(Mutex::new(HashMap::new())),
            publish_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    /// The current snapshot of an open document.
    pub fn document(&self, uri: &Url) -> Option<Arc<Document>> {
        self.documents.get(uri)
    }

    /// Parses the current text of `uri`, if it is open.
    ///
    /// Requests always re-parse; nothing is cached between them.
    fn parse_document(&self, uri: &Url) -> Option<Recipe> {
        let document = self.documents.get(uri)?;
        let (recipe, _) = parse(&document.text, &self.vocabulary);
        Some(recipe)
    }

    /// Validates `document` in the background and publishes the result.
    ///
    /// Any validation still running for the same URI is cancelled first, and
    /// results are dropped if the document moved on to a newer version while
    /// they were computed.
    fn schedule_validation(&self, uri: Url, document: Arc<Document>) {
        let (cancel_tx, cancel_rx) = oneshot::channel();
        if let Some(previous) = self.validation_cancel.lock().insert(uri.clone(), cancel_tx) {
            let _ = previous.send(());
            trace!("Cancelled previous validation for {}", uri);
        }

        let backend = self.clone();
        let delay = self.config.read().validation_delay;
        tokio::spawn(async move {
            let version = document.version;
            let result = tokio::select! {
                result = backend.validate(document, delay) => result,
                _ = cancel_rx => {
                    debug!("Validation cancelled for {} v{}", uri, version);
                    return;
                }
            };
            // Our receiver is gone now; only remove the token if it is still ours.
            {
                let mut cancels = backend.validation_cancel.lock();
                if cancels.get(&uri).is_some_and(|token| token.is_closed()) {
                    cancels.remove(&uri);
                }
            }
            match result {
                Ok(diagnostics) => backend.publish_if_current(uri, version, diagnostics).await,
                Err(e) => error!("Validation failed for {}: {}", uri, e),
            }
        });
    }

    /// Publishes `diagnostics` unless `uri` moved past `version` or was closed.
    ///
    /// The version check and the publication happen under the publish lock,
    /// which `did_close` also holds while clearing diagnostics.
    async fn publish_if_current(&self, uri: Url, version: i32, diagnostics: Vec<Diagnostic>) {
        let _publishing = self.publish_lock.lock().await;
        if self.documents.is_current(&uri, version) {
            debug!("Publishing {} diagnostic(s) for {} v{}", diagnostics.len(), uri, version);
            self.publisher.publish(uri, diagnostics, Some(version)).await;
        } else {
            debug!("Dropping diagnostics for outdated {} v{}", uri, version);
        }
    }

    async fn validate(&self, document: Arc<Document>, delay: Duration) -> Result<Vec<Diagnostic>, JoinError> {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        let vocabulary = Arc::clone(&self.vocabulary);
        let analysis = tokio::task::spawn_blocking(move || analyze(&document.text, &vocabulary)).await?;
        Ok(analysis.diagnostics.iter().map(utils::to_lsp_diagnostic).collect())
    }

    fn cancel_validation(&self, uri: &Url) {
        if let Some(token) = self.validation_cancel.lock().remove(uri) {
            let _ = token.send(());
            trace!("Cancelled validation for {}", uri);
        }
    }

    fn cancel_all_validations(&self) {
        let tokens: Vec<_> = self.validation_cancel.lock().drain().collect();
        for (uri, token) in tokens {
            let _ = token.send(());
            trace!("Cancelled validation for {}", uri);
        }
    }
}
