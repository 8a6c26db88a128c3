use std::path::{Path, PathBuf};

/// Admin tool configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | Working directory |
/// | SETTINGS_FILE | $WORK_DIR/settings.json | Settings store document |
/// | CATALOG_FILE | $WORK_DIR/catalog.json | Product repository document |
/// | LOG_LEVEL | info | trace, debug, info, warn or error |
/// | LOG_DIR | (unset) | Daily rolling log files; stdout when unset |
/// | ENVIRONMENT | development | Runtime environment |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/pricing LOG_LEVEL=debug pricing-admin audit
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the store documents
    pub work_dir: String,
    pub settings_file: PathBuf,
    pub catalog_file: PathBuf,
    pub log_level: String,
    pub log_dir: Option<String>,
    /// development | staging | production
    pub environment: String,
}

pub const DEFAULT_WORK_DIR: &str = "./data";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CATALOG_FILE_NAME: &str = "catalog.json";

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables take their defaults.
    pub fn from_env() -> Self {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| DEFAULT_WORK_DIR.into());
        Self {
            settings_file: std::env::var("SETTINGS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Path::new(&work_dir).join(SETTINGS_FILE_NAME)),
            catalog_file: std::env::var("CATALOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| Path::new(&work_dir).join(CATALOG_FILE_NAME)),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|dir| !dir.is_empty()),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            work_dir,
        }
    }

    /// Point both store documents at `work_dir`
    ///
    /// Used by tests
    pub fn with_overrides(work_dir: impl Into<String>) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.settings_file = Path::new(&config.work_dir).join(SETTINGS_FILE_NAME);
        config.catalog_file = Path::new(&config.work_dir).join(CATALOG_FILE_NAME);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_overrides_places_documents_in_work_dir() {
        let config = Config::with_overrides("/tmp/pricing-test");
        assert_eq!(config.work_dir, "/tmp/pricing-test");
        assert_eq!(
            config.settings_file,
            PathBuf::from("/tmp/pricing-test/settings.json")
        );
        assert_eq!(
            config.catalog_file,
            PathBuf::from("/tmp/pricing-test/catalog.json")
        );
    }
}
