//! LSP protocol handler implementations
//!
//! This module contains the `tower_lsp::LanguageServer` implementation for the
//! recipe backend:
//! - Lifecycle handlers (initialize, initialized, shutdown)
//! - Document lifecycle (did_open, did_change, did_close)
//! - Completion
//! - Rename (prepare_rename, rename)

use std::collections::HashMap;

use tower_lsp::LanguageServer;
use tower_lsp::jsonrpc::Result as LspResult;
use tower_lsp::lsp_types::{
    CompletionList, CompletionOptions, CompletionParams, CompletionResponse,
    DidChangeTextDocumentParams, DidCloseTextDocumentParams, DidOpenTextDocumentParams,
    InitializeParams, InitializeResult, InitializedParams, MessageType, OneOf,
    PrepareRenameResponse, RenameOptions, RenameParams, ServerCapabilities, ServerInfo,
    TextDocumentPositionParams, TextDocumentSyncCapability, TextDocumentSyncKind, WorkspaceEdit,
};
use tracing::{debug, info, warn};

use super::state::RecetteBackend;
use super::utils::{
    from_lsp_position, negotiate_position_encoding, to_lsp_completion_item, to_lsp_range, to_lsp_text_edit,
};
use crate::lsp::features::{completion, rename};

/// Name reported to the client in `serverInfo`.
pub const SERVER_NAME: &str = "recette-language-server";

#[tower_lsp::async_trait]
impl LanguageServer for RecetteBackend {
    /// Handles the LSP initialize request, applying client options and advertising capabilities.
    async fn initialize(&self, params: InitializeParams) -> LspResult<InitializeResult> {
        info!(
            "Received initialize from {}",
            params
                .client_info
                .as_ref()
                .map(|client| client.name.as_str())
                .unwrap_or("unknown client")
        );
        let position_encoding = negotiate_position_encoding(&params.capabilities);
        debug!("Position encoding: {:?}", position_encoding);
        self.config
            .write()
            .apply_initialization_options(params.initialization_options);
        debug!("Effective configuration: {:?}", *self.config.read());

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding,
                text_document_sync: Some(TextDocumentSyncCapability::Kind(TextDocumentSyncKind::FULL)),
                completion_provider: Some(CompletionOptions {
                    resolve_provider: Some(false),
                    ..Default::default()
                }),
                rename_provider: Some(OneOf::Right(RenameOptions {
                    prepare_provider: Some(true),
                    work_done_progress_options: Default::default(),
                })),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    /// Handles the LSP initialized notification.
    async fn initialized(&self, _: InitializedParams) {
        info!("Server initialized");
        self.client
            .log_message(MessageType::INFO, "server initialized!")
            .await;
    }

    /// Handles the LSP shutdown request.
    async fn shutdown(&self) -> LspResult<()> {
        info!("Received shutdown request");
        self.cancel_all_validations();
        Ok(())
    }

    /// Stores the opened text and validates it in the background.
    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        info!("Opening document: URI={}, version={}", uri, version);

        let document = self
            .documents
            .open(uri.clone(), version, params.text_document.text);
        self.schedule_validation(uri, document);
    }

    /// Replaces the stored text and re-validates it in the background.
    ///
    /// Only full-text sync is advertised, so the last change carries the whole document.
    async fn did_change(&self, mut params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        debug!("textDocument/didChange: URI={}, version={}", uri, version);

        let Some(change) = params.content_changes.pop() else {
            warn!("Change without content for URI={}", uri);
            return;
        };
        if change.range.is_some() {
            warn!("Ignoring ranged change for URI={}; only full sync is supported", uri);
            return;
        }
        match self.documents.change(uri.clone(), version, change.text) {
            Some(document) => self.schedule_validation(uri, document),
            None => warn!("Ignoring outdated change for URI={}, version={}", uri, version),
        }
    }

    /// Forgets the document and clears its diagnostics.
    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        self.cancel_validation(&uri);
        let _publishing = self.publish_lock.lock().await;
        match self.documents.close(&uri) {
            Some(document) => info!("Closed document: {}, id: {}", uri, document.id),
            None => warn!("Failed to find document with URI={}", uri),
        }
        self.publisher.publish(uri, Vec::new(), None).await;
    }

    async fn completion(&self, params: CompletionParams) -> LspResult<Option<CompletionResponse>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        debug!("Completion request at {}:{:?}", uri, position);

        let Some(recipe) = self.parse_document(&uri) else {
            debug!("Document not found: {}", uri);
            return Ok(None);
        };
        let items: Vec<_> = completion::completions(&recipe, &self.vocabulary, from_lsp_position(position))
            .into_iter()
            .map(to_lsp_completion_item)
            .collect();

        debug!("Returning {} completion items", items.len());
        Ok(Some(CompletionResponse::List(CompletionList {
            is_incomplete: false,
            items,
        })))
    }

    async fn prepare_rename(&self, params: TextDocumentPositionParams) -> LspResult<Option<PrepareRenameResponse>> {
        let uri = params.text_document.uri;
        let position = params.position;

        let range = self
            .parse_document(&uri)
            .and_then(|recipe| rename::prepare_rename(&recipe, from_lsp_position(position)));
        match range {
            Some(range) => Ok(Some(PrepareRenameResponse::Range(to_lsp_range(range)))),
            None => {
                debug!("No renameable ingredient at {}:{:?}", uri, position);
                Ok(None)
            }
        }
    }

    /// Renames the ingredient under the cursor everywhere in the document.
    async fn rename(&self, params: RenameParams) -> LspResult<Option<WorkspaceEdit>> {
        let uri = params.text_document_position.text_document.uri;
        let position = params.text_document_position.position;
        let new_name = params.new_name;
        debug!("Starting rename for {} at {:?} to '{}'", uri, position, new_name);

        let Some(edits) = self
            .parse_document(&uri)
            .and_then(|recipe| rename::rename(&recipe, from_lsp_position(position), &new_name))
        else {
            debug!("No renameable ingredient at {}:{:?}", uri, position);
            return Ok(None);
        };

        debug!("Prepared {} edits for '{}'", edits.len(), new_name);
        let edits = edits.into_iter().map(to_lsp_text_edit).collect();
        Ok(Some(WorkspaceEdit {
            changes: Some(HashMap::from([(uri, edits)])),
            document_changes: None,
            change_annotations: None,
        }))
    }
}
