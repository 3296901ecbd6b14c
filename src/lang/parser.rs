//! Line-oriented structural parser.
//!
//! Every line is either blank, a heading (`#` title, `##`+ section) or a
//! sentence of blank-separated words. Columns are counted in Unicode scalar
//! values while scanning so that ranges stay exact on accented text.

use std::iter::Peekable;
use std::str::Chars;

use tracing::trace;

use super::ast::{Recipe, Section, Sentence, Title, Word};
use super::diagnostic::{Diagnostic, DiagnosticKind};
use super::linker;
use super::position::Range;
use super::vocabulary::Vocabulary;

/// Parses `text` into a linked [`Recipe`] plus the structural diagnostics.
///
/// Never fails: lines that do not fit the document structure are reported
/// and parsing continues with the next line.
pub fn parse(text: &str, vocabulary: &Vocabulary) -> (Recipe, Vec<Diagnostic>) {
    let mut builder = RecipeBuilder::default();
    for (line, content) in text.split('\n').enumerate() {
        let content = content.strip_suffix('\r').unwrap_or(content);
        builder.line(line as u32, content);
    }
    let RecipeBuilder { mut recipe, diagnostics } = builder;
    linker::link(&mut recipe, vocabulary);
    trace!(
        "Parsed recipe: {} section(s), {} ingredient(s), {} structural diagnostic(s)",
        recipe.sections.len(),
        recipe.ingredients.len(),
        diagnostics.len()
    );
    (recipe, diagnostics)
}

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Character cursor over a single line.
struct LineScanner<'a> {
    chars: Peekable<Chars<'a>>,
    column: u32,
}

impl<'a> LineScanner<'a> {
    fn new(content: &'a str) -> Self {
        LineScanner {
            chars: content.chars().peekable(),
            column: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.column += 1;
        Some(c)
    }

    fn skip_blanks(&mut self) {
        while self.peek().is_some_and(is_blank) {
            self.bump();
        }
    }

    fn count(&mut self, wanted: char) -> u32 {
        let mut count = 0;
        while self.peek() == Some(wanted) {
            self.bump();
            count += 1;
        }
        count
    }

    /// Consumes a maximal run of non-blank characters.
    fn word(&mut self, line: u32) -> Word {
        let start = self.column;
        let mut content = String::new();
        while let Some(c) = self.peek().filter(|c| !is_blank(*c)) {
            content.push(c);
            self.bump();
        }
        Word {
            range: Range::on_line(line, start, self.column),
            content,
        }
    }

    /// Consumes the rest of the line, returning it without trailing blanks.
    fn rest_trimmed(&mut self) -> String {
        let mut rest = String::new();
        while let Some(c) = self.bump() {
            rest.push(c);
        }
        rest.truncate(rest.trim_end_matches(is_blank).len());
        rest
    }
}

struct Heading {
    depth: u32,
    range: Range,
    name: String,
}

#[derive(Default)]
struct RecipeBuilder {
    recipe: Recipe,
    diagnostics: Vec<Diagnostic>,
}

impl RecipeBuilder {
    fn line(&mut self, line: u32, content: &str) {
        let mut scanner = LineScanner::new(content);
        scanner.skip_blanks();
        match scanner.peek() {
            None => {}
            Some('#') => {
                let heading = Self::heading(line, &mut scanner);
                self.add_heading(heading);
            }
            Some(_) => {
                let sentence = Self::sentence(line, &mut scanner);
                self.add_sentence(sentence);
            }
        }
    }

    fn heading(line: u32, scanner: &mut LineScanner<'_>) -> Heading {
        let start = scanner.column;
        let depth = scanner.count('#');
        let marker_end = scanner.column;
        scanner.skip_blanks();
        let name_start = scanner.column;
        let name = scanner.rest_trimmed();
        let end = if name.is_empty() {
            marker_end
        } else {
            name_start + name.chars().count() as u32
        };
        Heading {
            depth,
            range: Range::on_line(line, start, end),
            name,
        }
    }

    fn sentence(line: u32, scanner: &mut LineScanner<'_>) -> Sentence {
        let start = scanner.column;
        let mut words = Vec::new();
        while scanner.peek().is_some() {
            words.push(scanner.word(line));
            scanner.skip_blanks();
        }
        Sentence {
            range: Range::on_line(line, start, scanner.column),
            words,
        }
    }

    fn add_heading(&mut self, heading: Heading) {
        if heading.depth == 1 {
            if self.recipe.title.is_some() {
                self.report(heading.range, DiagnosticKind::TitleAlreadyDefined);
            } else {
                self.recipe.title = Some(Title {
                    range: heading.range,
                    content: heading.name,
                });
            }
            return;
        }
        if self.recipe.title.is_none() {
            self.report(heading.range, DiagnosticKind::SectionBeforeTitle);
        }
        self.recipe.sections.push(Section {
            range: heading.range,
            name: heading.name,
            sentences: Vec::new(),
        });
    }

    fn add_sentence(&mut self, sentence: Sentence) {
        match self.recipe.sections.last_mut() {
            Some(section) => section.sentences.push(sentence),
            None => self.report(sentence.range, DiagnosticKind::SentenceOutsideSection),
        }
    }

    fn report(&mut self, range: Range, kind: DiagnosticKind) {
        self.diagnostics.push(Diagnostic::error(range, kind));
    }
}
