//! Ingredient renaming.
//!
//! Only words registered as ingredient occurrences can be renamed; the edit
//! set rewrites every occurrence of the name in the same document.

use crate::lang::{locate, Ingredient, Position, Range, Recipe, Word};

/// A replacement of `range` by `new_text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub range: Range,
    pub new_text: String,
}

/// Resolves the ingredient occurrence under the cursor.
///
/// The word must both carry a registered name and be one of that
/// ingredient's occurrences; range equality identifies the occurrence.
fn occurrence_at(recipe: &Recipe, position: Position) -> Option<(&Word, &Ingredient)> {
    let word = locate(recipe, position).word()?;
    let ingredient = recipe.ingredient(&word.content)?;
    let occurrence = ingredient.occurrence_at(word.range)?;
    Some((occurrence, ingredient))
}

/// Returns the range that a rename at `position` would replace.
pub fn prepare_rename(recipe: &Recipe, position: Position) -> Option<Range> {
    occurrence_at(recipe, position).map(|(word, _)| word.range)
}

/// Builds one edit per occurrence of the ingredient under the cursor.
pub fn rename(recipe: &Recipe, position: Position, new_name: &str) -> Option<Vec<TextEdit>> {
    let (_, ingredient) = occurrence_at(recipe, position)?;
    Some(
        ingredient
            .occurrences
            .iter()
            .map(|occurrence| TextEdit {
                range: occurrence.range,
                new_text: new_name.to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::{parse, Vocabulary};
    use indoc::indoc;

    const TEXT: &str = indoc! {"
        # Cake
        ## ingrédients
        sucre
        ## étapes
        dans saladier
        verser avec sucre
        malaxer sucre
    "};

    fn recipe() -> Recipe {
        parse(TEXT, &Vocabulary::default()).0
    }

    #[test]
    fn test_prepare_on_declaration_and_reference() {
        let recipe = recipe();
        assert_eq!(prepare_rename(&recipe, Position::new(2, 3)), Some(Range::on_line(2, 0, 5)));
        assert_eq!(prepare_rename(&recipe, Position::new(5, 17)), Some(Range::on_line(5, 12, 17)));
    }

    #[test]
    fn test_prepare_rejects_tools_gaps_and_verbs() {
        let recipe = recipe();
        assert_eq!(prepare_rename(&recipe, Position::new(4, 8)), None, "tool");
        assert_eq!(prepare_rename(&recipe, Position::new(5, 3)), None, "verb");
        assert_eq!(prepare_rename(&recipe, Position::new(5, 8)), None, "adverb");
        assert_eq!(prepare_rename(&recipe, Position::new(3, 0)), None, "heading");
    }

    #[test]
    fn test_same_text_outside_occurrences_is_not_renameable() {
        // `malaxer` does not take ingredients, so this `sucre` is not an occurrence.
        let recipe = recipe();
        assert_eq!(prepare_rename(&recipe, Position::new(6, 10)), None);
        assert_eq!(rename(&recipe, Position::new(6, 10), "miel"), None);
    }

    #[test]
    fn test_rename_edits_every_occurrence() {
        let recipe = recipe();
        let edits = rename(&recipe, Position::new(5, 14), "miel").expect("rename should apply");
        assert_eq!(
            edits,
            vec![
                TextEdit { range: Range::on_line(2, 0, 5), new_text: "miel".to_string() },
                TextEdit { range: Range::on_line(5, 12, 17), new_text: "miel".to_string() },
            ]
        );
    }
}
