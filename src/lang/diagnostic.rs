//! Findings reported on a recipe.
//!
//! Nothing in the language pipeline fails: malformed input is described by
//! [`Diagnostic`] values. The message shown to the user is the `Display`
//! rendering of the [`DiagnosticKind`].

use thiserror::Error;

use super::position::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Information,
    Hint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum DiagnosticKind {
    // Structural
    #[error("title already defined")]
    TitleAlreadyDefined,
    #[error("must come after title")]
    SectionBeforeTitle,
    #[error("must be in a section")]
    SentenceOutsideSection,

    // Semantic
    #[error("duplicated ingredient")]
    DuplicatedIngredient,
    #[error("unknown ingredient")]
    UnknownIngredient,
    #[error("need ingredient(s)")]
    MissingIngredient,
    #[error("missing tool")]
    MissingTool,
    #[error("unknown tool")]
    UnknownTool,
    #[error("unknown verb or adverb")]
    UnknownVerbOrAdverb,
}

impl DiagnosticKind {
    /// True for problems found while building the tree rather than while validating it.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            DiagnosticKind::TitleAlreadyDefined
                | DiagnosticKind::SectionBeforeTitle
                | DiagnosticKind::SentenceOutsideSection
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: Range,
    pub severity: Severity,
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    pub fn error(range: Range, kind: DiagnosticKind) -> Self {
        Diagnostic {
            range,
            severity: Severity::Error,
            kind,
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

/// Orders diagnostics by where they start, keeping emission order for ties.
pub fn sort_by_position(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|diagnostic| diagnostic.range.start);
}
