//! Configuration model for sspc.
//!
//! This module defines the Config struct that represents `sspc.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are ignored),
//! sensible defaults for optional fields, and validation of config values.

mod model;
mod operations;
pub mod types;


pub use model::Config;
pub(crate) use operations::is_identifier;
pub use types::CONFIG_FILE_NAME;
