//! Segment assembly.
//!
//! Folds the scanned token stream into a [`TranslationState`]: directive
//! contents go to their accumulators, code tags are parked in a
//! [`PlaceholderMap`] behind a [`Placeholder`], and literal runs form the
//! placeholder-substituted text. Resolving that text yields the ordered
//! [`Segment`] sequence of the response-building routine.

use super::Translation;
use super::classify::{Category, classify};
use super::scanner::Token;
use crate::error::{Result, SspError};
use serde::Serialize;
use std::fmt;

/// One step of the response-building routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Segment {
    /// Static text appended as-is (unescaped here; the emitter escapes it).
    Literal(String),
    /// Raw code inserted verbatim.
    Statement(String),
    /// Code whose value is appended to the response.
    Expression(String),
}

impl Segment {
    /// Whether this segment came from an embedded code tag.
    pub fn is_code(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }
}

/// Stand-in for a code tag inside the placeholder-substituted text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Placeholder(usize);

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placeholder #{}", self.0)
    }
}

/// Placeholder-substituted text: literal runs interleaved with placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    Text(String),
    Slot(Placeholder),
}

/// Bijection from placeholders to the code segments they stand for.
///
/// Placeholders are numbered from 0 in allocation order. Each one must be
/// taken exactly once.
#[derive(Debug, Default)]
pub struct PlaceholderMap {
    entries: Vec<Option<Segment>>,
}

impl PlaceholderMap {
    /// Park a code segment and return the placeholder standing for it.
    pub fn insert(&mut self, segment: Segment) -> Placeholder {
        let placeholder = Placeholder(self.entries.len());
        self.entries.push(Some(segment));
        placeholder
    }

    /// Take the segment behind a placeholder.
    ///
    /// # Errors
    ///
    /// * `SspError::PlaceholderCollision` - the placeholder was already taken
    ///   or was never allocated by this map
    pub fn take(&mut self, placeholder: Placeholder) -> Result<Segment> {
        self.entries
            .get_mut(placeholder.0)
            .and_then(Option::take)
            .ok_or_else(|| SspError::PlaceholderCollision(placeholder.to_string()))
    }

    /// Fail if any placeholder was never taken.
    fn ensure_drained(&self) -> Result<()> {
        match self.entries.iter().position(Option::is_some) {
            Some(index) => Err(SspError::UnresolvedPlaceholder(
                Placeholder(index).to_string(),
            )),
            None => Ok(()),
        }
    }
}

/// Per-translation mutable state.
///
/// Built fresh for every template; nothing here outlives one translation.
#[derive(Debug, Default)]
pub struct TranslationState {
    imports: String,
    declarations: String,
    placeholders: PlaceholderMap,
    pieces: Vec<Piece>,
}

impl TranslationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one scanned token into the state.
    pub fn accept(&mut self, token: &Token<'_>) {
        match token {
            Token::Literal(text) => self.push_text(text),
            Token::Tag(tag) => match classify(tag) {
                Category::Import => self.imports.push_str(tag.content),
                Category::Declaration => self.declarations.push_str(tag.content),
                Category::Expression => {
                    self.push_slot(Segment::Expression(tag.content.to_string()))
                }
                Category::Statement => {
                    self.push_slot(Segment::Statement(tag.content.to_string()))
                }
            },
        }
    }

    /// The placeholder-substituted text built so far.
    #[cfg(test)]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Resolve every placeholder and produce the finished translation.
    ///
    /// # Errors
    ///
    /// * `SspError::PlaceholderCollision` - a placeholder occurs twice
    /// * `SspError::UnresolvedPlaceholder` - a placeholder never occurs
    pub fn finish(mut self) -> Result<Translation> {
        if !matches!(self.pieces.last(), Some(Piece::Text(_))) {
            self.pieces.push(Piece::Text(String::new()));
        }

        let mut segments = Vec::with_capacity(self.pieces.len());
        for piece in self.pieces {
            match piece {
                Piece::Text(text) => segments.push(Segment::Literal(text)),
                Piece::Slot(placeholder) => segments.push(self.placeholders.take(placeholder)?),
            }
        }
        self.placeholders.ensure_drained()?;

        Ok(Translation {
            imports: self.imports,
            declarations: self.declarations,
            segments,
        })
    }

    /// Directives leave no piece behind, so text on both sides of one joins
    /// into a single run.
    fn push_text(&mut self, text: &str) {
        match self.pieces.last_mut() {
            Some(Piece::Text(run)) => run.push_str(text),
            _ => self.pieces.push(Piece::Text(text.to_string())),
        }
    }

    fn push_slot(&mut self, segment: Segment) {
        if !matches!(self.pieces.last(), Some(Piece::Text(_))) {
            self.pieces.push(Piece::Text(String::new()));
        }
        let placeholder = self.placeholders.insert(segment);
        self.pieces.push(Piece::Slot(placeholder));
    }
}

/// Build the segment sequence and directive accumulators from scanned tokens.
pub fn assemble(tokens: &[Token<'_>]) -> Result<Translation> {
    let mut state = TranslationState::new();
    for token in tokens {
        state.accept(token);
    }
    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::scanner::scan;

    fn assemble_str(template: &str) -> Translation {
        assemble(&scan(template).unwrap()).unwrap()
    }

    fn lit(text: &str) -> Segment {
        Segment::Literal(text.to_string())
    }

    #[test]
    fn test_literal_only() {
        let t = assemble_str("<p>hello</p>\n");
        assert_eq!(t.segments, vec![lit("<p>hello</p>\n")]);
        assert!(t.imports.is_empty());
        assert!(t.declarations.is_empty());
    }

    #[test]
    fn test_directive_example() {
        let t = assemble_str("<%@importA%>Hello<%=name%>!\n");
        assert_eq!(t.imports, "importA");
        assert_eq!(
            t.segments,
            vec![
                lit("Hello"),
                Segment::Expression("name".to_string()),
                lit("!\n"),
            ]
        );
    }

    #[test]
    fn test_directive_joins_surrounding_text() {
        let t = assemble_str("before<%!var x = 1%>after");
        assert_eq!(t.declarations, "var x = 1");
        assert_eq!(t.segments, vec![lit("beforeafter")]);
    }

    #[test]
    fn test_statement_between_literals() {
        let t = assemble_str("<ul>\n<% for i in items { %>\n<li>\n<% } %>\n</ul>\n");
        assert_eq!(
            t.segments,
            vec![
                lit("<ul>\n"),
                Segment::Statement(" for i in items { ".to_string()),
                lit("<li>\n"),
                Segment::Statement(" } ".to_string()),
                lit("</ul>\n"),
            ]
        );
    }

    #[test]
    fn test_adjacent_code_tags_keep_empty_literals() {
        let t = assemble_str("<%=a%><%=b%>");
        assert_eq!(
            t.segments,
            vec![
                lit(""),
                Segment::Expression("a".to_string()),
                lit(""),
                Segment::Expression("b".to_string()),
                lit(""),
            ]
        );
    }

    #[test]
    fn test_imports_keep_document_order() {
        let t = assemble_str("<%@A%><%!d1%><%=e%><%@B%><% s %><%!d2%><%@C%>");
        assert_eq!(t.imports, "ABC");
        assert_eq!(t.declarations, "d1d2");
    }

    #[test]
    fn test_directive_contents_are_verbatim() {
        let t = assemble_str("<%@\nimport Foundation\n%>\n");
        assert_eq!(t.imports, "\nimport Foundation\n");
        assert_eq!(t.segments, vec![lit("")]);
    }

    #[test]
    fn test_state_allocates_placeholders_in_order() {
        let tokens = scan("a<%=x%>b<%@i%><% y %>c").unwrap();
        let mut state = TranslationState::new();
        for token in &tokens {
            state.accept(token);
        }
        assert_eq!(
            state.pieces(),
            &[
                Piece::Text("a".to_string()),
                Piece::Slot(Placeholder(0)),
                Piece::Text("b".to_string()),
                Piece::Slot(Placeholder(1)),
                Piece::Text("c".to_string()),
            ]
        );
    }

    #[test]
    fn test_fresh_state_restarts_numbering() {
        let mut first = TranslationState::new();
        for token in &scan("<%=a%><%=b%>").unwrap() {
            first.accept(token);
        }
        let mut second = TranslationState::new();
        for token in &scan("<%=c%>").unwrap() {
            second.accept(token);
        }
        assert_eq!(second.pieces()[1], Piece::Slot(Placeholder(0)));
    }

    #[test]
    fn test_map_take_twice_is_collision() {
        let mut map = PlaceholderMap::default();
        let p = map.insert(Segment::Statement("x".to_string()));
        assert_eq!(map.take(p).unwrap(), Segment::Statement("x".to_string()));
        assert!(matches!(
            map.take(p),
            Err(SspError::PlaceholderCollision(_))
        ));
    }

    #[test]
    fn test_map_take_foreign_placeholder_is_collision() {
        let mut map = PlaceholderMap::default();
        assert!(matches!(
            map.take(Placeholder(7)),
            Err(SspError::PlaceholderCollision(msg)) if msg == "placeholder #7"
        ));
    }

    #[test]
    fn test_undrained_map_is_unresolved() {
        let mut map = PlaceholderMap::default();
        map.insert(Segment::Expression("a".to_string()));
        let second = map.insert(Segment::Expression("b".to_string()));
        map.take(second).unwrap();
        assert!(matches!(
            map.ensure_drained(),
            Err(SspError::UnresolvedPlaceholder(msg)) if msg == "placeholder #0"
        ));
    }

    #[test]
    fn test_segment_json_shape() {
        let json = serde_json::to_string(&Segment::Expression("name".to_string())).unwrap();
        assert_eq!(json, r#"{"kind":"expression","text":"name"}"#);
    }
}
