//! Catalog configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional and fall back to defaults:
//! - `CATALOG_IMAGE_DIR` - Directory product images are stored under (default: `images`)
//! - `CATALOG_PLACEHOLDER_IMAGE` - Image reference assigned to products created
//!   without an image (default: `default.png`)

use std::path::PathBuf;

use thiserror::Error;

const DEFAULT_IMAGE_DIR: &str = "images";
const DEFAULT_PLACEHOLDER_IMAGE: &str = "default.png";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Catalog core configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory product images are stored under
    pub image_dir: PathBuf,
    /// Image reference assigned to products created without an image
    pub placeholder_image: String,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unusable value
    /// (empty or whitespace-only).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let image_dir = get_env_or_default("CATALOG_IMAGE_DIR", DEFAULT_IMAGE_DIR);
        validate_non_blank(&image_dir, "CATALOG_IMAGE_DIR")?;

        let placeholder_image =
            get_env_or_default("CATALOG_PLACEHOLDER_IMAGE", DEFAULT_PLACEHOLDER_IMAGE);
        validate_non_blank(&placeholder_image, "CATALOG_PLACEHOLDER_IMAGE")?;

        Ok(Self {
            image_dir: PathBuf::from(image_dir),
            placeholder_image,
        })
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            image_dir: PathBuf::from(DEFAULT_IMAGE_DIR),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_owned(),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Reject empty or whitespace-only values.
fn validate_non_blank(value: &str, var_name: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            var_name.to_string(),
            "must not be empty".to_string(),
        ));
    }
    Ok(())
}
