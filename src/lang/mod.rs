//! The recipe language: document model, parser, linker, validator and
//! cursor resolution.
//!
//! Everything here is synchronous and free of protocol types; the `lsp`
//! module converts at its boundary.

pub mod ast;
pub mod diagnostic;
pub mod linker;
pub mod locate;
pub mod parser;
pub mod position;
pub mod validator;
pub mod vocabulary;

pub use ast::{Ingredient, Recipe, Section, Sentence, Title, Word, INGREDIENTS_SECTION};
pub use diagnostic::{Diagnostic, DiagnosticKind, Severity};
pub use locate::{locate, Location, Slot};
pub use parser::parse;
pub use position::{Position, Range};
pub use validator::validate;
pub use vocabulary::{Lead, Vocabulary};

/// A parsed recipe together with every diagnostic found on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub recipe: Recipe,
    /// Structural and semantic diagnostics in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Parses, links and validates `text`.
pub fn analyze(text: &str, vocabulary: &Vocabulary) -> Analysis {
    let (recipe, mut diagnostics) = parse(text, vocabulary);
    diagnostics.extend(validate(&recipe, vocabulary));
    diagnostic::sort_by_position(&mut diagnostics);
    Analysis { recipe, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(text: &str) -> Vec<(Range, String)> {
        analyze(text, &Vocabulary::default())
            .diagnostics
            .into_iter()
            .map(|d| (d.range, d.message()))
            .collect()
    }

    #[test]
    fn test_declared_ingredient_is_clean() {
        let text = "# Cake\n## ingrédients\nsucre\n## étapes\nverser avec sucre\n";
        let analysis = analyze(text, &Vocabulary::default());
        assert!(analysis.diagnostics.is_empty(), "{:?}", analysis.diagnostics);
        assert!(analysis.recipe.is_defined("sucre"));
    }

    #[test]
    fn test_undeclared_ingredient() {
        assert_eq!(
            messages("# Cake\n## étapes\nverser avec farine\n"),
            vec![(Range::on_line(2, 12, 18), "unknown ingredient".to_string())]
        );
    }

    #[test]
    fn test_structural_and_semantic_findings_are_merged() {
        assert_eq!(
            messages("## étapes\nmélanger\n"),
            vec![
                (Range::on_line(0, 0, 9), "must come after title".to_string()),
                (Range::on_line(1, 0, 8), "need ingredient(s)".to_string()),
            ]
        );
    }

    #[test]
    fn test_diagnostics_follow_document_order() {
        let text = "hors section\n# t\n# encore\n## s\ninconnu\ndans grenier\n";
        let lines: Vec<_> = analyze(text, &Vocabulary::default())
            .diagnostics
            .iter()
            .map(|d| d.range.start.line)
            .collect();
        assert_eq!(lines, vec![0, 2, 4, 5]);
    }

    #[test]
    fn test_two_titles_give_one_diagnostic_on_the_second() {
        let text = "# a\n## s\ncuire\n# b\n";
        let diagnostics = analyze(text, &Vocabulary::default()).diagnostics;
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].kind, DiagnosticKind::TitleAlreadyDefined);
        assert_eq!(diagnostics[0].range, Range::on_line(3, 0, 3));
    }
}
