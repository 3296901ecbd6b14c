//! Context-sensitive completion.
//!
//! Suggestions depend on where the cursor sits in its sentence:
//! - at the head of a sentence (or on a line without one): verbs, then adverbs
//! - after an adverb: tools
//! - after an ingredient verb: known ingredient names, sorted
//! - anywhere else: nothing

use crate::lang::{locate, Lead, Position, Recipe, Vocabulary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionKind {
    Verb,
    Adverb,
    Tool,
    Ingredient,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionItem {
    pub label: String,
    pub kind: CompletionKind,
}

impl CompletionItem {
    fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        CompletionItem {
            label: label.into(),
            kind,
        }
    }
}

/// Computes the suggestions for a cursor at `position`.
pub fn completions(recipe: &Recipe, vocabulary: &Vocabulary, position: Position) -> Vec<CompletionItem> {
    let location = locate(recipe, position);
    if location.at_head() {
        return vocabulary
            .verbs()
            .iter()
            .map(|verb| CompletionItem::new(*verb, CompletionKind::Verb))
            .chain(
                vocabulary
                    .adverbs()
                    .iter()
                    .map(|adverb| CompletionItem::new(*adverb, CompletionKind::Adverb)),
            )
            .collect();
    }

    let Some(sentence) = location.sentence else {
        return Vec::new();
    };
    match vocabulary.lead(&sentence.head().content) {
        Lead::Adverb => vocabulary
            .tools()
            .iter()
            .map(|tool| CompletionItem::new(*tool, CompletionKind::Tool))
            .collect(),
        // Registry keys are already in ascending order
        Lead::IngredientVerb => recipe
            .ingredients
            .keys()
            .map(|name| CompletionItem::new(name.as_str(), CompletionKind::Ingredient))
            .collect(),
        Lead::Verb | Lead::Unknown => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parse;
    use indoc::indoc;

    fn complete(text: &str, line: u32, character: u32) -> Vec<CompletionItem> {
        let vocabulary = Vocabulary::default();
        let (recipe, _) = parse(text, &vocabulary);
        completions(&recipe, &vocabulary, Position::new(line, character))
    }

    fn labels(items: &[CompletionItem]) -> Vec<&str> {
        items.iter().map(|item| item.label.as_str()).collect()
    }

    #[test]
    fn test_empty_line_offers_verbs_and_adverbs() {
        let items = complete("# t\n## s\n\n", 2, 0);
        assert_eq!(
            labels(&items),
            vec![
                "verser", "touiller", "malaxer", "mélanger", "incorporer", "étaler", "fondre", "cuire",
                "avec", "dans",
            ]
        );
        assert!(items[..8].iter().all(|item| item.kind == CompletionKind::Verb));
        assert!(items[8..].iter().all(|item| item.kind == CompletionKind::Adverb));
    }

    #[test]
    fn test_inside_first_word_offers_verbs_and_adverbs() {
        let items = complete("# title\n## section\nmala\n", 2, 2);
        assert_eq!(items.len(), 10);
    }

    #[test]
    fn test_after_adverb_offers_tools() {
        let items = complete("# title\n## section\ndans sa\nmalaxer\n", 2, 7);
        assert_eq!(labels(&items), vec!["saladier", "cuillère", "plat", "mixeur", "four"]);
        assert!(items.iter().all(|item| item.kind == CompletionKind::Tool));
    }

    #[test]
    fn test_after_ingredient_verb_offers_sorted_ingredients() {
        let text = indoc! {"
            # title
            ## ingrédients
            poulet
            chocolat
            ## section
            mélanger
        "};
        let items = complete(text, 5, 9);
        assert_eq!(labels(&items), vec!["chocolat", "poulet"]);
        assert!(items.iter().all(|item| item.kind == CompletionKind::Ingredient));
    }

    #[test]
    fn test_after_plain_verb_offers_nothing() {
        assert!(complete("# t\n## s\nmalaxer \n", 2, 8).is_empty());
        assert!(complete("# t\n## s\nbidule \n", 2, 7).is_empty());
    }
}
