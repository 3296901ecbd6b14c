//! Structural tree of a parsed recipe.

use std::collections::BTreeMap;

use super::position::Range;

/// Name of the section whose sentences declare ingredients.
pub const INGREDIENTS_SECTION: &str = "ingrédients";

/// A maximal run of non-blank characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub range: Range,
    pub content: String,
}

/// One non-blank, non-heading line split into words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    pub range: Range,
    pub words: Vec<Word>, // Never empty
}

impl Sentence {
    /// The leading word, which decides how the rest of the sentence is read.
    pub fn head(&self) -> &Word {
        // The parser never builds a sentence without words.
        &self.words[0]
    }

    /// Words following the head.
    pub fn tail(&self) -> &[Word] {
        &self.words[1..]
    }
}

/// A `##` heading and the sentences below it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub range: Range,
    pub name: String,
    pub sentences: Vec<Sentence>,
}

impl Section {
    pub fn declares_ingredients(&self) -> bool {
        self.name == INGREDIENTS_SECTION
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Title {
    pub range: Range,
    pub content: String,
}

/// Registry entry for one ingredient name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ingredient {
    /// Set once the name appears at the head of an ingredients-section sentence.
    pub defined: bool,
    /// Every word naming this ingredient, declarations and references alike, in parse order.
    pub occurrences: Vec<Word>,
}

impl Ingredient {
    /// Finds the occurrence sitting exactly at `range`.
    pub fn occurrence_at(&self, range: Range) -> Option<&Word> {
        self.occurrences.iter().find(|word| word.range == range)
    }
}

/// A whole parsed document.
///
/// Built from scratch for every version of the text and never mutated
/// afterwards, except by the linker filling `ingredients` during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Recipe {
    pub title: Option<Title>,
    pub sections: Vec<Section>,
    pub ingredients: BTreeMap<String, Ingredient>,
}

impl Recipe {
    /// All sentences of the document in order, paired with their section.
    pub fn sentences(&self) -> impl Iterator<Item = (&Section, &Sentence)> {
        self.sections
            .iter()
            .flat_map(|section| section.sentences.iter().map(move |sentence| (section, sentence)))
    }

    pub fn ingredient(&self, name: &str) -> Option<&Ingredient> {
        self.ingredients.get(name)
    }

    /// True when `name` was declared in the ingredients section.
    pub fn is_defined(&self, name: &str) -> bool {
        self.ingredients.get(name).is_some_and(|ingredient| ingredient.defined)
    }
}
