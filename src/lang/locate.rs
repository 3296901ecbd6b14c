//! Cursor to sentence/word resolution for completion and rename.

use super::ast::{Recipe, Sentence, Word};
use super::position::Position;

/// Where a cursor sits relative to the words of its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// No sentence starts on the cursor's line.
    NoSentence,
    /// On the word at this index, either end included.
    InsideWord(usize),
    /// In the blank before the word at this index; equal to the word count past the last word.
    BetweenWords(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location<'a> {
    pub sentence: Option<&'a Sentence>,
    pub slot: Slot,
}

impl<'a> Location<'a> {
    /// The word under the cursor, if any.
    pub fn word(&self) -> Option<&'a Word> {
        match (self.sentence, self.slot) {
            (Some(sentence), Slot::InsideWord(index)) => sentence.words.get(index),
            _ => None,
        }
    }

    /// True when the cursor is where a sentence's leading word goes.
    pub fn at_head(&self) -> bool {
        matches!(self.slot, Slot::NoSentence | Slot::InsideWord(0) | Slot::BetweenWords(0))
    }
}

/// Resolves `position` against the sentences of `recipe`.
///
/// Only the line picks the sentence; the character then picks a word or
/// the gap before one.
pub fn locate(recipe: &Recipe, position: Position) -> Location<'_> {
    let Some(sentence) = recipe
        .sentences()
        .map(|(_, sentence)| sentence)
        .find(|sentence| sentence.range.start.line == position.line)
    else {
        return Location {
            sentence: None,
            slot: Slot::NoSentence,
        };
    };

    let mut slot = Slot::BetweenWords(sentence.words.len());
    for (index, word) in sentence.words.iter().enumerate() {
        if position.character < word.range.start.character {
            slot = Slot::BetweenWords(index);
            break;
        }
        if position.character <= word.range.end.character {
            slot = Slot::InsideWord(index);
            break;
        }
    }
    Location {
        sentence: Some(sentence),
        slot,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::parser::parse;
    use crate::lang::vocabulary::Vocabulary;

    const TEXT: &str = "# t\n## s\n  verser  lait sucre\n\n";

    fn slot_at(line: u32, character: u32) -> Slot {
        let (recipe, _) = parse(TEXT, &Vocabulary::default());
        locate(&recipe, Position::new(line, character)).slot
    }

    #[test]
    fn test_no_sentence() {
        assert_eq!(slot_at(0, 0), Slot::NoSentence);
        assert_eq!(slot_at(3, 0), Slot::NoSentence);
        assert_eq!(slot_at(42, 0), Slot::NoSentence);
    }

    #[test]
    fn test_gap_before_first_word() {
        assert_eq!(slot_at(2, 0), Slot::BetweenWords(0));
        assert_eq!(slot_at(2, 1), Slot::BetweenWords(0));
    }

    #[test]
    fn test_inside_words_includes_edges() {
        assert_eq!(slot_at(2, 2), Slot::InsideWord(0));
        assert_eq!(slot_at(2, 8), Slot::InsideWord(0));
        assert_eq!(slot_at(2, 10), Slot::InsideWord(1));
        assert_eq!(slot_at(2, 14), Slot::InsideWord(1));
        assert_eq!(slot_at(2, 15), Slot::InsideWord(2));
    }

    #[test]
    fn test_gaps_between_and_after_words() {
        assert_eq!(slot_at(2, 9), Slot::BetweenWords(1));
        assert_eq!(slot_at(2, 20), Slot::InsideWord(2));
        assert_eq!(slot_at(2, 21), Slot::BetweenWords(3));
    }

    #[test]
    fn test_word_under_cursor() {
        let (recipe, _) = parse(TEXT, &Vocabulary::default());
        let location = locate(&recipe, Position::new(2, 12));
        assert_eq!(location.word().map(|w| w.content.as_str()), Some("lait"));
        assert!(!location.at_head());
        assert!(locate(&recipe, Position::new(2, 9)).word().is_none());
    }
}
