//! Destination of computed diagnostics.
//!
//! The backend hands diagnostics to a [`DiagnosticPublisher`] rather than
//! talking to the client directly, so tests can record what would have been
//! sent.

use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};

#[async_trait::async_trait]
pub trait DiagnosticPublisher: Send + Sync {
    /// Replaces the diagnostics shown for `uri`.
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>);
}

#[async_trait::async_trait]
impl DiagnosticPublisher for Client {
    async fn publish(&self, uri: Url, diagnostics: Vec<Diagnostic>, version: Option<i32>) {
        self.publish_diagnostics(uri, diagnostics, version).await;
    }
}
