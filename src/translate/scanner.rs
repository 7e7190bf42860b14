//! Tag scanning.
//!
//! Splits a template into an ordered stream of literal runs and tags. A tag is
//! `<%`, an optional sigil (`@`, `!` or `=`), arbitrary content (line breaks
//! included) up to the first `%>`, and at most one trailing line terminator
//! which belongs to the tag and is never re-emitted.

use super::classify::Sigil;
use crate::error::{Result, SspError};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

/// Opening delimiter of an embedded tag.
pub const OPEN_DELIMITER: &str = "<%";

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<%([@!=]?)(.*?)%>(?:\r?\n)?").expect("tag pattern is a valid regex")
});

/// An embedded tag as it appeared in the template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag<'a> {
    /// The sigil selecting the tag's category.
    pub sigil: Sigil,
    /// Raw text between the sigil and the closing delimiter.
    pub content: &'a str,
    /// Zero-based index among all tags of the template.
    pub source_order: usize,
    /// Byte range of the whole tag, including its consumed line terminator.
    pub span: Range<usize>,
}

/// One element of the scanned template, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text outside any tag. May be empty.
    Literal(&'a str),
    /// An embedded tag.
    Tag(Tag<'a>),
}

/// Scan a template into literal runs and tags.
///
/// The returned tokens always start and end with a `Literal` and alternate
/// with tags, so adjacent tags are separated by an empty literal.
///
/// # Errors
///
/// * `SspError::MalformedTemplate` - an `<%` has no closing `%>` before the
///   end of the document
pub fn scan(template: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for (source_order, caps) in TAG_PATTERN.captures_iter(template).enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let sigil = caps
            .get(1)
            .and_then(|m| m.as_str().chars().next())
            .map_or(Sigil::None, Sigil::from_char);
        let content = caps.get(2).map_or("", |m| m.as_str());

        tokens.push(Token::Literal(&template[cursor..whole.start()]));
        tokens.push(Token::Tag(Tag {
            sigil,
            content,
            source_order,
            span: whole.range(),
        }));
        cursor = whole.end();
    }

    // Leftmost matching guarantees any open delimiter left over sits in the
    // trailing run and has nothing to close it.
    let tail = &template[cursor..];
    if let Some(offset) = tail.find(OPEN_DELIMITER) {
        let (line, column) = line_and_column(template, cursor + offset);
        return Err(SspError::MalformedTemplate { line, column });
    }
    tokens.push(Token::Literal(tail));

    Ok(tokens)
}

/// 1-based line and column (in characters) of a byte offset.
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
