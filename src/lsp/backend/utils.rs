//! Conversions between language types and `lsp_types`.

use tower_lsp::lsp_types::{
    ClientCapabilities, CompletionItem as LspCompletionItem, CompletionItemKind,
    Diagnostic as LspDiagnostic, DiagnosticSeverity, Position as LspPosition,
    PositionEncodingKind, Range as LspRange, TextEdit as LspTextEdit,
};

use crate::lang::{Diagnostic, Position, Range, Severity};
use crate::lsp::features::completion::{CompletionItem, CompletionKind};
use crate::lsp::features::rename::TextEdit;

/// Source tag attached to every published diagnostic.
pub(super) const DIAGNOSTIC_SOURCE: &str = "recette";

/// Picks UTF-32 columns, which match our character counting, when the client offers them.
///
/// Otherwise nothing is advertised and the client assumes UTF-16; the two only
/// disagree on characters outside the Basic Multilingual Plane.
pub(super) fn negotiate_position_encoding(capabilities: &ClientCapabilities) -> Option<PositionEncodingKind> {
    capabilities
        .general
        .as_ref()
        .and_then(|general| general.position_encodings.as_ref())
        .filter(|encodings| encodings.contains(&PositionEncodingKind::UTF32))
        .map(|_| PositionEncodingKind::UTF32)
}

pub(super) fn from_lsp_position(position: LspPosition) -> Position {
    Position::new(position.line, position.character)
}

pub(super) fn to_lsp_position(position: Position) -> LspPosition {
    LspPosition::new(position.line, position.character)
}

pub(super) fn to_lsp_range(range: Range) -> LspRange {
    LspRange::new(to_lsp_position(range.start), to_lsp_position(range.end))
}

fn to_lsp_severity(severity: Severity) -> DiagnosticSeverity {
    match severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Information => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    }
}

pub(super) fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> LspDiagnostic {
    LspDiagnostic {
        range: to_lsp_range(diagnostic.range),
        severity: Some(to_lsp_severity(diagnostic.severity)),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: diagnostic.message(),
        ..Default::default()
    }
}

pub(super) fn to_lsp_completion_item(item: CompletionItem) -> LspCompletionItem {
    let kind = match item.kind {
        CompletionKind::Verb => CompletionItemKind::FUNCTION,
        CompletionKind::Adverb => CompletionItemKind::OPERATOR,
        CompletionKind::Tool => CompletionItemKind::CLASS,
        CompletionKind::Ingredient => CompletionItemKind::FIELD,
    };
    LspCompletionItem {
        label: item.label,
        kind: Some(kind),
        ..Default::default()
    }
}

pub(super) fn to_lsp_text_edit(edit: TextEdit) -> LspTextEdit {
    LspTextEdit {
        range: to_lsp_range(edit.range),
        new_text: edit.new_text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::DiagnosticKind;
    use tower_lsp::lsp_types::GeneralClientCapabilities;

    fn offering(encodings: Vec<PositionEncodingKind>) -> ClientCapabilities {
        ClientCapabilities {
            general: Some(GeneralClientCapabilities {
                position_encodings: Some(encodings),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_position_encoding_negotiation() {
        assert_eq!(
            negotiate_position_encoding(&offering(vec![PositionEncodingKind::UTF16, PositionEncodingKind::UTF32])),
            Some(PositionEncodingKind::UTF32)
        );
        assert_eq!(negotiate_position_encoding(&offering(vec![PositionEncodingKind::UTF16])), None);
        assert_eq!(negotiate_position_encoding(&ClientCapabilities::default()), None);
    }

    #[test]
    fn test_diagnostic_conversion() {
        let diagnostic = Diagnostic::error(Range::on_line(3, 7, 11), DiagnosticKind::UnknownIngredient);
        let converted = to_lsp_diagnostic(&diagnostic);
        assert_eq!(converted.range, LspRange::new(LspPosition::new(3, 7), LspPosition::new(3, 11)));
        assert_eq!(converted.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(converted.message, "unknown ingredient");
        assert_eq!(converted.source.as_deref(), Some(DIAGNOSTIC_SOURCE));
    }

    #[test]
    fn test_completion_kinds() {
        let kinds: Vec<_> = [
            CompletionKind::Verb,
            CompletionKind::Adverb,
            CompletionKind::Tool,
            CompletionKind::Ingredient,
        ]
        .into_iter()
        .map(|kind| to_lsp_completion_item(CompletionItem { label: "x".to_string(), kind }).kind)
        .collect();
        assert_eq!(
            kinds,
            vec![
                Some(CompletionItemKind::FUNCTION),
                Some(CompletionItemKind::OPERATOR),
                Some(CompletionItemKind::CLASS),
                Some(CompletionItemKind::FIELD),
            ]
        );
    }
}
