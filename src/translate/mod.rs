//! Template translation pipeline.
//!
//! Turns a page template into the source of a module whose request handler
//! builds the page as a string. Stages run strictly in order:
//!
//! 1. [`scanner`] splits the template into literal runs and tags
//! 2. [`classify`] maps each tag's sigil to its category
//! 3. [`segments`] hoists directives, parks code behind placeholders and
//!    resolves them into the ordered segment sequence
//! 4. [`escape`] makes literal text safe inside a quoted string
//! 5. [`emit`] renders the body and fills the module [`skeleton`]
//!
//! # Template syntax
//!
//! | Tag            | Effect                                          |
//! |----------------|-------------------------------------------------|
//! | `<%@ ... %>`   | appended to the module's imports                |
//! | `<%! ... %>`   | appended to the generated type's members        |
//! | `<%= ... %>`   | expression appended to the response             |
//! | `<% ... %>`    | statement inserted verbatim into the handler    |
//!
//! A single line terminator directly after `%>` is part of the tag.

pub mod classify;
pub mod emit;
pub mod escape;
pub mod scanner;
pub mod segments;
pub mod skeleton;


use crate::error::Result;
use serde::Serialize;

pub use emit::Emitter;
pub use segments::Segment;
pub use skeleton::Skeleton;

/// Everything a template contributes to its generated module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    /// Concatenated `@` directive contents, in document order.
    pub imports: String,
    /// Concatenated `!` directive contents, in document order.
    pub declarations: String,
    /// The response-building routine, in document order.
    pub segments: Vec<Segment>,
}

impl Translation {
    /// Number of segments that came from code tags.
    pub fn code_segment_count(&self) -> usize {
        self.segments.iter().filter(|s| s.is_code()).count()
    }
}

/// Translate a template into its accumulators and segment sequence.
///
/// Each call builds its own state, so translations are independent.
pub fn translate(template: &str) -> Result<Translation> {
    let tokens = scanner::scan(template)?;
    segments::assemble(&tokens)
}

/// Translate a template and render the complete module.
pub fn compile_template(
    template: &str,
    emitter: &Emitter,
    product: &str,
    source_name: &str,
) -> Result<(Translation, String)> {
    let translation = translate(template)?;
    let module = emitter.emit(&translation, product, source_name)?;
    Ok((translation, module))
}
