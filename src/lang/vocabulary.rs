//! Closed vocabularies of the recipe language.
//!
//! The word lists are fixed; a [`Vocabulary`] value owns them together with
//! hash sets for membership tests, and is handed to the linker, validator and
//! completion provider instead of living in process-wide statics.

use rustc_hash::FxHashSet;

pub const VERBS: &[&str] = &[
    "verser",
    "touiller",
    "malaxer",
    "mélanger",
    "incorporer",
    "étaler",
    "fondre",
    "cuire",
];

pub const ADVERBS: &[&str] = &["avec", "dans"];

pub const TOOLS: &[&str] = &["saladier", "cuillère", "plat", "mixeur", "four"];

/// Verbs whose remaining words name ingredients.
pub const VERBS_WITH_INGREDIENT: &[&str] = &["verser", "mélanger", "incorporer", "fondre"];

/// What the first word of a body sentence turned out to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lead {
    /// A verb taking ingredient names after it.
    IngredientVerb,
    Verb,
    Adverb,
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Vocabulary {
    verbs: Vec<&'static str>,
    adverbs: Vec<&'static str>,
    tools: Vec<&'static str>,
    verb_set: FxHashSet<&'static str>,
    adverb_set: FxHashSet<&'static str>,
    tool_set: FxHashSet<&'static str>,
    ingredient_verb_set: FxHashSet<&'static str>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::new(VERBS, ADVERBS, TOOLS, VERBS_WITH_INGREDIENT)
    }
}

impl Vocabulary {
    /// Builds a vocabulary from explicit word lists.
    ///
    /// Ingredient verbs that are missing from `verbs` are ignored so that
    /// [`Lead::IngredientVerb`] always implies a known verb.
    pub fn new(
        verbs: &[&'static str],
        adverbs: &[&'static str],
        tools: &[&'static str],
        ingredient_verbs: &[&'static str],
    ) -> Self {
        let verb_set: FxHashSet<_> = verbs.iter().copied().collect();
        let ingredient_verb_set = ingredient_verbs
            .iter()
            .copied()
            .filter(|verb| verb_set.contains(verb))
            .collect();
        Vocabulary {
            verbs: verbs.to_vec(),
            adverbs: adverbs.to_vec(),
            tools: tools.to_vec(),
            verb_set,
            adverb_set: adverbs.iter().copied().collect(),
            tool_set: tools.iter().copied().collect(),
            ingredient_verb_set,
        }
    }

    pub fn verbs(&self) -> &[&'static str] {
        &self.verbs
    }

    pub fn adverbs(&self) -> &[&'static str] {
        &self.adverbs
    }

    pub fn tools(&self) -> &[&'static str] {
        &self.tools
    }

    pub fn is_verb(&self, word: &str) -> bool {
        self.verb_set.contains(word)
    }

    pub fn is_adverb(&self, word: &str) -> bool {
        self.adverb_set.contains(word)
    }

    pub fn is_tool(&self, word: &str) -> bool {
        self.tool_set.contains(word)
    }

    pub fn takes_ingredients(&self, word: &str) -> bool {
        self.ingredient_verb_set.contains(word)
    }

    /// Classifies the leading word of a sentence.
    pub fn lead(&self, word: &str) -> Lead {
        if self.takes_ingredients(word) {
            Lead::IngredientVerb
        } else if self.is_verb(word) {
            Lead::Verb
        } else if self.is_adverb(word) {
            Lead::Adverb
        } else {
            Lead::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_classification() {
        let vocabulary = Vocabulary::default();
        assert_eq!(vocabulary.lead("verser"), Lead::IngredientVerb);
        assert_eq!(vocabulary.lead("malaxer"), Lead::Verb);
        assert_eq!(vocabulary.lead("dans"), Lead::Adverb);
        assert_eq!(vocabulary.lead("saladier"), Lead::Unknown);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let vocabulary = Vocabulary::default();
        assert!(vocabulary.is_verb("mélanger"));
        assert!(!vocabulary.is_verb("Mélanger"));
        assert!(!vocabulary.is_verb("melanger"));
    }

    #[test]
    fn test_ingredient_verbs_must_be_verbs() {
        let vocabulary = Vocabulary::new(&["cuire"], &[], &[], &["cuire", "rôtir"]);
        assert!(vocabulary.takes_ingredients("cuire"));
        assert!(!vocabulary.takes_ingredients("rôtir"));
    }
}
