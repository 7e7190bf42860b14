//! Rendering of the generated module.

use super::Translation;
use super::escape::escape_literal;
use super::segments::Segment;
use super::skeleton::{Skeleton, vars};
use crate::error::Result;

/// Default name of the response variable in the generated routine.
pub const DEFAULT_ACCUMULATOR: &str = "response";

/// Renders translations into complete modules.
#[derive(Debug, Clone)]
pub struct Emitter {
    skeleton: Skeleton,
    accumulator: String,
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new(Skeleton::default(), DEFAULT_ACCUMULATOR)
    }
}

impl Emitter {
    pub fn new(skeleton: Skeleton, accumulator: impl Into<String>) -> Self {
        Self {
            skeleton,
            accumulator: accumulator.into(),
        }
    }

    /// Render the body of the response-building routine.
    ///
    /// One line per segment:
    /// - literal: `<acc> += "<escaped text>"`
    /// - expression: `<acc> += <code>`
    /// - statement: `<code>`
    pub fn render_body(&self, segments: &[Segment]) -> String {
        let lines: Vec<String> = segments
            .iter()
            .map(|segment| match segment {
                Segment::Literal(text) => {
                    format!("{} += \"{}\"", self.accumulator, escape_literal(text))
                }
                Segment::Expression(code) => format!("{} += {}", self.accumulator, code),
                Segment::Statement(code) => code.clone(),
            })
            .collect();
        lines.join("\n")
    }

    /// Render the complete module for `product`.
    ///
    /// `source_name` is the template file name recorded in the module header.
    pub fn emit(&self, translation: &Translation, product: &str, source_name: &str) -> Result<String> {
        let variables = vars([
            ("source", source_name),
            ("imports", translation.imports.as_str()),
            ("product", product),
            ("declarations", translation.declarations.as_str()),
            ("accumulator", self.accumulator.as_str()),
            ("body", self.render_body(&translation.segments).as_str()),
        ]);
        self.skeleton.render(&variables)
    }
}
