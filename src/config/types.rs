//! Configuration constants and defaults for sspc.

/// File name looked up in the template directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "sspc.yaml";

// Default value functions for serde
pub(crate) fn default_template_extension() -> String {
    "shtml".to_string()
}
pub(crate) fn default_generated_extension() -> String {
    "swift".to_string()
}
pub(crate) fn default_accumulator() -> String {
    crate::translate::emit::DEFAULT_ACCUMULATOR.to_string()
}
