//! Grammar checks run on a linked recipe.

use rustc_hash::FxHashSet;

use super::ast::{Recipe, Sentence};
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::linker;
use super::vocabulary::{Lead, Vocabulary};

/// Checks every sentence of `recipe` against the sentence rules of its section.
pub fn validate(recipe: &Recipe, vocabulary: &Vocabulary) -> Vec<Diagnostic> {
    let mut validator = Validator {
        recipe,
        vocabulary,
        seen_ingredients: FxHashSet::default(),
        diagnostics: Vec::new(),
    };
    for (section, sentence) in recipe.sentences() {
        if section.declares_ingredients() {
            validator.declaration(sentence);
        } else {
            validator.instruction(sentence);
        }
    }
    validator.diagnostics
}

struct Validator<'a> {
    recipe: &'a Recipe,
    vocabulary: &'a Vocabulary,
    // Names declared so far in this pass, independent of the registry
    seen_ingredients: FxHashSet<&'a str>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Validator<'a> {
    fn declaration(&mut self, sentence: &'a Sentence) {
        let name = sentence.head();
        if !self.seen_ingredients.insert(name.content.as_str()) {
            self.diagnostics
                .push(Diagnostic::error(name.range, DiagnosticKind::DuplicatedIngredient));
        }
    }

    fn instruction(&mut self, sentence: &'a Sentence) {
        let head = sentence.head();
        match self.vocabulary.lead(&head.content) {
            Lead::IngredientVerb => self.ingredient_verb(sentence),
            Lead::Verb => {}
            Lead::Adverb => self.adverb(sentence),
            Lead::Unknown => self
                .diagnostics
                .push(Diagnostic::error(head.range, DiagnosticKind::UnknownVerbOrAdverb)),
        }
    }

    fn ingredient_verb(&mut self, sentence: &Sentence) {
        // Connectives alone do not name an ingredient
        let references: Vec<_> = linker::references(sentence.tail(), self.vocabulary).collect();
        if references.is_empty() {
            self.diagnostics
                .push(Diagnostic::error(sentence.range, DiagnosticKind::MissingIngredient));
            return;
        }
        for word in references {
            if !self.recipe.is_defined(&word.content) {
                self.diagnostics
                    .push(Diagnostic::error(word.range, DiagnosticKind::UnknownIngredient));
            }
        }
    }

    fn adverb(&mut self, sentence: &Sentence) {
        match sentence.words.get(1) {
            None => self
                .diagnostics
                .push(Diagnostic::error(sentence.range, DiagnosticKind::MissingTool)),
            Some(tool) if !self.vocabulary.is_tool(&tool.content) => self
                .diagnostics
                .push(Diagnostic::error(tool.range, DiagnosticKind::UnknownTool)),
            Some(_) => {}
        }
    }
}
