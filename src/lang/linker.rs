//! Builds the ingredient registry of a parsed recipe.

use super::ast::{Recipe, Word};
use super::vocabulary::Vocabulary;

/// Fills `recipe.ingredients` from declarations and references.
///
/// Declarations are the head words of sentences in the ingredients section.
/// References are the words following an ingredient verb anywhere else,
/// minus adverbs, which only join ingredients (`verser avec sucre`).
/// A declaration may come after the references to the same name.
pub fn link(recipe: &mut Recipe, vocabulary: &Vocabulary) {
    let Recipe { sections, ingredients, .. } = recipe;
    for section in sections.iter() {
        for sentence in &section.sentences {
            let head = sentence.head();
            if section.declares_ingredients() {
                let ingredient = ingredients.entry(head.content.clone()).or_default();
                ingredient.defined = true;
                ingredient.occurrences.push(head.clone());
            } else if vocabulary.takes_ingredients(&head.content) {
                for word in references(sentence.tail(), vocabulary) {
                    ingredients
                        .entry(word.content.clone())
                        .or_default()
                        .occurrences
                        .push(word.clone());
                }
            }
        }
    }
}

/// Words after an ingredient verb that name ingredients.
pub fn references<'a>(tail: &'a [Word], vocabulary: &'a Vocabulary) -> impl Iterator<Item = &'a Word> {
    tail.iter().filter(|word| !vocabulary.is_adverb(&word.content))
}
