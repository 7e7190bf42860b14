//! Tag classification by sigil.

use super::scanner::Tag;

/// The optional character following `<%`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sigil {
    /// `@`
    At,
    /// `!`
    Bang,
    /// `=`
    Equals,
    /// No sigil.
    None,
}

impl Sigil {
    /// Map the character after the open delimiter to a sigil.
    ///
    /// The scanner only captures `@`, `!` and `=`; anything else is content.
    pub fn from_char(c: char) -> Self {
        match c {
            '@' => Sigil::At,
            '!' => Sigil::Bang,
            '=' => Sigil::Equals,
            _ => Sigil::None,
        }
    }
}

/// What a tag contributes to the generated module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// Appended to the import section.
    Import,
    /// Appended to the member declarations.
    Declaration,
    /// Evaluated and appended to the response.
    Expression,
    /// Inserted verbatim into the response-building routine.
    Statement,
}

impl Category {
    /// Directives are hoisted out of the routine and never become segments.
    pub fn is_directive(self) -> bool {
        matches!(self, Category::Import | Category::Declaration)
    }
}

impl From<Sigil> for Category {
    fn from(sigil: Sigil) -> Self {
        match sigil {
            Sigil::At => Category::Import,
            Sigil::Bang => Category::Declaration,
            Sigil::Equals => Category::Expression,
            Sigil::None => Category::Statement,
        }
    }
}

/// Determine the category of a scanned tag.
pub fn classify(tag: &Tag<'_>) -> Category {
    Category::from(tag.sigil)
}
