//! Build context resolution for sspc.
//!
//! Resolves the product name and derives the template and generated module
//! paths from it. All commands go through this module so a missing product
//! name is reported before any file is touched.

use crate::config::{Config, is_identifier};
use crate::error::{Result, SspError};
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable holding the product name when `--product` is absent.
pub const PRODUCT_ENV_VAR: &str = "PRODUCT_NAME";

/// Paths for one template translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Product name; names the template, the module and the generated type.
    pub product: String,

    /// Template file, `{template_dir}/{product}.{template_extension}`.
    pub source_path: PathBuf,

    /// Generated module, `{out_dir}/{product}.{generated_extension}`.
    pub dest_path: PathBuf,
}

impl BuildContext {
    /// Resolve the product name from an argument or `PRODUCT_NAME`.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The validated product name
    /// * `Err(SspError::ConfigError)` - Neither source provides a usable name
    pub fn resolve_product(arg: Option<&str>) -> Result<String> {
        let from_env = env::var(PRODUCT_ENV_VAR).ok();
        Self::product_from(arg, from_env)
    }

    /// Product name resolution with the environment value passed in.
    pub fn product_from(arg: Option<&str>, env_value: Option<String>) -> Result<String> {
        let product = match arg {
            Some(name) => name.to_string(),
            None => env_value.ok_or_else(|| {
                SspError::ConfigError(format!(
                    "product name is required: pass --product or set {}",
                    PRODUCT_ENV_VAR
                ))
            })?,
        };

        validate_product(&product)?;
        Ok(product)
    }

    /// Build the context for `product`.
    ///
    /// `out_dir` defaults to `template_dir`.
    pub fn new(
        product: impl Into<String>,
        template_dir: &Path,
        out_dir: Option<&Path>,
        config: &Config,
    ) -> Result<Self> {
        let product = product.into();
        validate_product(&product)?;

        let out_dir = out_dir.unwrap_or(template_dir);
        let ctx = Self {
            source_path: template_dir.join(format!("{}.{}", product, config.template_extension)),
            dest_path: out_dir.join(format!("{}.{}", product, config.generated_extension)),
            product,
        };
        ctx.ensure_distinct_paths()?;
        Ok(ctx)
    }

    /// Fail if writing the module would replace the template.
    pub fn ensure_distinct_paths(&self) -> Result<()> {
        if same_file(&self.source_path, &self.dest_path) {
            return Err(SspError::ConfigError(format!(
                "generated module '{}' would overwrite its template",
                self.dest_path.display()
            )));
        }
        Ok(())
    }

    /// File name of the template, as recorded in the generated header.
    pub fn source_name(&self) -> String {
        self.source_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }

    /// Read the template.
    pub fn read_template(&self) -> Result<String> {
        std::fs::read_to_string(&self.source_path).map_err(|e| {
            SspError::IoError(format!(
                "failed to read template '{}': {}",
                self.source_path.display(),
                e
            ))
        })
    }
}

fn validate_product(product: &str) -> Result<()> {
    if product.trim().is_empty() {
        return Err(SspError::ConfigError(
            "product name must not be empty".to_string(),
        ));
    }
    if !is_identifier(product) {
        return Err(SspError::ConfigError(format!(
            "product name '{}' is not a valid identifier",
            product
        )));
    }
    Ok(())
}

/// Compare two paths by their canonical parent directory and file name.
///
/// Neither file has to exist; a parent that cannot be canonicalized is
/// compared as given.
pub(crate) fn same_file(a: &Path, b: &Path) -> bool {
    a == b || normalize(a) == normalize(b)
}

fn normalize(path: &Path) -> PathBuf {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) => {
            let parent = if parent.as_os_str().is_empty() {
                Path::new(".")
            } else {
                parent
            };
            parent
                .canonicalize()
                .unwrap_or_else(|_| parent.to_path_buf())
                .join(name)
        }
        _ => path.to_path_buf(),
    }
}
