//! Config struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for template compilation.
///
/// This struct represents the contents of `sspc.yaml`.
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Extension of template files, without the leading dot (default: "shtml").
    #[serde(default = "default_template_extension")]
    pub template_extension: String,

    /// Extension of generated modules, without the leading dot (default: "swift").
    #[serde(default = "default_generated_extension")]
    pub generated_extension: String,

    /// Name of the response variable in the generated handler (default: "response").
    #[serde(default = "default_accumulator")]
    pub accumulator: String,

    /// Skeleton file replacing the built-in module skeleton.
    ///
    /// Relative paths are resolved against the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<PathBuf>,

    /// NDJSON build log to append one event per translation to.
    ///
    /// Relative paths are resolved against the directory holding the config file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_log: Option<PathBuf>,

    /// Directory the config was loaded from; not part of the YAML.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            template_extension: default_template_extension(),
            generated_extension: default_generated_extension(),
            accumulator: default_accumulator(),
            skeleton: None,
            event_log: None,
            base_dir: None,
        }
    }
}
