//! Module skeletons.
//!
//! A skeleton is the fixed text of the generated module with `{variable}`
//! holes the emitter fills in. The variables are:
//!
//! - `{source}` - file name of the template
//! - `{imports}` - concatenated `@` directive contents
//! - `{product}` - product name, used to name the generated type
//! - `{declarations}` - concatenated `!` directive contents
//! - `{accumulator}` - name of the response variable
//! - `{body}` - the rendered segment sequence
//!
//! `{{` renders as a literal `{` and `}}` as a literal `}`; a lone `}` is
//! kept as-is. Substituted values are inserted verbatim and never rescanned.

use crate::error::{Result, SspError};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Variable names a skeleton may reference.
pub const SKELETON_VARIABLES: [&str; 6] = [
    "source",
    "imports",
    "product",
    "declarations",
    "accumulator",
    "body",
];

/// The built-in skeleton: a Dynamo session-based processor class whose
/// request handler builds the response and hands it to the connection.
pub const DEFAULT_SKELETON: &str = r#"
// compiled from {source}

import Foundation
#if os(OSX)
import Dynamo
#endif

{imports}

@objc ({product}Processor)
public class {product}Processor: DynamoSessionBasedApplication {{

{declarations}

    override public func processRequest( out: DynamoHTTPConnection, pathInfo: String, parameters: [String:String], cookies: [String:String] ) {{
        var {accumulator} = ""

        {body}
        
        out.response( {accumulator} )
    }}

}}

"#;

/// Error type for skeleton rendering failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// A variable was referenced but not provided.
    #[error("undefined variable '{name}' at position {position} in skeleton")]
    UndefinedVariable { name: String, position: usize },

    /// A `{` was found without a matching `}`.
    #[error("unmatched '{{' at position {position} in skeleton")]
    UnmatchedBrace { position: usize },

    /// An empty variable name was found (e.g., `{}`).
    #[error("empty variable name '{{}}' at position {position} in skeleton")]
    EmptyVariableName { position: usize },
}

impl From<RenderError> for SspError {
    fn from(err: RenderError) -> Self {
        SspError::SkeletonError(err.to_string())
    }
}

/// A checked module skeleton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skeleton {
    text: String,
}

impl Default for Skeleton {
    fn default() -> Self {
        Self {
            text: DEFAULT_SKELETON.to_string(),
        }
    }
}

impl Skeleton {
    /// Build a skeleton from text, rejecting unknown variables and brace errors
    /// up front so no translation fails halfway through rendering.
    pub fn new(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        let probe = vars(SKELETON_VARIABLES.iter().map(|name| (*name, "")));
        render_skeleton(&text, &probe)?;
        Ok(Self { text })
    }

    /// Load a skeleton from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            SspError::IoError(format!(
                "failed to read skeleton '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::new(text).map_err(|e| match e {
            SspError::SkeletonError(msg) => {
                SspError::SkeletonError(format!("{} ({})", msg, path.display()))
            }
            other => other,
        })
    }

    /// Fill in the skeleton.
    pub fn render(&self, variables: &HashMap<String, String>) -> Result<String> {
        Ok(render_skeleton(&self.text, variables)?)
    }
}

/// Render skeleton text by substituting variables.
///
/// Variable names are trimmed, so `{ body }` and `{body}` are the same.
pub fn render_skeleton(
    skeleton: &str,
    variables: &HashMap<String, String>,
) -> std::result::Result<String, RenderError> {
    let mut result = String::with_capacity(skeleton.len());
    let mut chars = skeleton.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '{' => {
                if let Some((_, '{')) = chars.peek() {
                    chars.next();
                    result.push('{');
                    continue;
                }

                let mut var_name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, c)) => var_name.push(c),
                        None => return Err(RenderError::UnmatchedBrace { position: pos }),
                    }
                }

                let var_name = var_name.trim();
                if var_name.is_empty() {
                    return Err(RenderError::EmptyVariableName { position: pos });
                }

                match variables.get(var_name) {
                    Some(value) => result.push_str(value),
                    None => {
                        return Err(RenderError::UndefinedVariable {
                            name: var_name.to_string(),
                            position: pos,
                        });
                    }
                }
            }
            '}' => {
                if let Some((_, '}')) = chars.peek() {
                    chars.next();
                }
                result.push('}');
            }
            _ => result.push(ch),
        }
    }

    Ok(result)
}

/// Helper to create a variables map from a list of key-value pairs.
pub fn vars<I, K, V>(pairs: I) -> HashMap<String, String>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
