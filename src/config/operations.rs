//! Config loading, validation, and utility operations.

use super::model::Config;
use super::types::CONFIG_FILE_NAME;
use crate::error::{Result, SspError};
use std::path::{Path, PathBuf};

impl Config {
    /// Load config from a YAML file.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SspError::IoError)` - The file could not be read
    /// * `Err(SspError::ConfigError)` - Parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SspError::IoError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let mut config = Self::from_yaml(&content)?;
        config.base_dir = path.parent().map(Path::to_path_buf);
        Ok(config)
    }

    /// Resolve the config for a template directory.
    ///
    /// An explicit path must exist. Otherwise `sspc.yaml` in `template_dir` is
    /// used when present, and the defaults when not.
    pub fn discover(explicit: Option<&Path>, template_dir: &Path) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        let candidate = template_dir.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored for forward compatibility.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SspError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - extensions must be non-empty and have no leading dots
    /// - extensions must differ, or the module would replace its template
    /// - `accumulator` must be an identifier (ASCII letters, digits, `_`,
    ///   not starting with a digit)
    pub fn validate(&self) -> Result<()> {
        for (field, ext) in [
            ("template_extension", &self.template_extension),
            ("generated_extension", &self.generated_extension),
        ] {
            if ext.is_empty() {
                return Err(SspError::ConfigError(format!(
                    "config validation failed: {} must be non-empty",
                    field
                )));
            }
            if ext.starts_with('.') {
                return Err(SspError::ConfigError(format!(
                    "config validation failed: {} must not have a leading dot (found '{}'). Use '{}' instead.",
                    field,
                    ext,
                    ext.trim_start_matches('.')
                )));
            }
        }

        if self
            .template_extension
            .eq_ignore_ascii_case(&self.generated_extension)
        {
            return Err(SspError::ConfigError(format!(
                "config validation failed: template_extension and generated_extension are both '{}'",
                self.template_extension
            )));
        }

        if !is_identifier(&self.accumulator) {
            return Err(SspError::ConfigError(format!(
                "config validation failed: accumulator '{}' is not a valid identifier",
                self.accumulator
            )));
        }

        Ok(())
    }

    /// Skeleton path resolved against the config directory.
    pub fn skeleton_path(&self) -> Option<PathBuf> {
        self.skeleton.as_deref().map(|p| self.resolve(p))
    }

    /// Event log path resolved against the config directory.
    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(|p| self.resolve(p))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// ASCII letters, digits and `_`, not starting with a digit.
pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
