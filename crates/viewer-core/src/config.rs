//! Viewer configuration: where data is persisted and which document backs the sample entry.
//!
//! Configuration can be loaded from a JSON file, environment variables, or created
//! programmatically.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Document opened by the home screen's "sample" action.
pub const DEFAULT_SAMPLE_URL: &str =
    "https://www.w3.org/WAI/ER/tests/xhtml/testfiles/resources/pdf/dummy.pdf";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Directory holding persisted state such as the recent files list
    pub data_dir: PathBuf,
    /// URL recorded when the sample document is opened
    pub sample_url: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self { data_dir: Self::default_data_dir(), sample_url: DEFAULT_SAMPLE_URL.to_owned() }
    }
}

impl ViewerConfig {
    /// Sets the data directory.
    pub fn with_data_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.data_dir = path.as_ref().to_path_buf();
        self
    }

    /// Sets the sample document URL.
    pub fn with_sample_url(mut self, url: impl Into<String>) -> Self {
        self.sample_url = url.into();
        self
    }

    /// Returns the platform data directory, or `./pdf-viewer` when none can be resolved.
    pub fn default_data_dir() -> PathBuf {
        storage::default_data_dir().unwrap_or_else(|_| PathBuf::from("pdf-viewer"))
    }

    /// Loads configuration from environment variables.
    ///
    /// Environment variables:
    /// - `PDF_VIEWER_DATA_DIR`: data directory path
    /// - `PDF_VIEWER_SAMPLE_URL`: sample document URL
    ///
    /// # Errors
    /// Returns an error if any environment variable is set but empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PDF_VIEWER_DATA_DIR") {
            if val.trim().is_empty() {
                return Err(ConfigError::InvalidValue("PDF_VIEWER_DATA_DIR".to_owned()));
            }
            config.data_dir = PathBuf::from(val);
        }

        if let Ok(val) = std::env::var("PDF_VIEWER_SAMPLE_URL") {
            if val.trim().is_empty() {
                return Err(ConfigError::InvalidValue("PDF_VIEWER_SAMPLE_URL".to_owned()));
            }
            config.sample_url = val;
        }

        Ok(config)
    }

    /// Loads configuration from a JSON file. Missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Saves configuration to a JSON file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for configuration key: {0}")]
    InvalidValue(String),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("malformed configuration file: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = ViewerConfig::default();
        assert_eq!(config.sample_url, DEFAULT_SAMPLE_URL);
        assert_eq!(config.data_dir, ViewerConfig::default_data_dir());
    }

    #[test]
    fn test_builder_methods() {
        let config = ViewerConfig::default()
            .with_data_dir("/custom/path")
            .with_sample_url("https://h/sample.pdf");

        assert_eq!(config.data_dir, PathBuf::from("/custom/path"));
        assert_eq!(config.sample_url, "https://h/sample.pdf");
    }

    #[test]
    #[serial]
    fn test_from_env() {
        let _guard = EnvGuard::new(&["PDF_VIEWER_DATA_DIR", "PDF_VIEWER_SAMPLE_URL"]);

        env::set_var("PDF_VIEWER_DATA_DIR", "/tmp/viewer-data");
        env::set_var("PDF_VIEWER_SAMPLE_URL", "https://h/sample.pdf");

        let config = ViewerConfig::from_env().unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/viewer-data"));
        assert_eq!(config.sample_url, "https://h/sample.pdf");
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_empty_values() {
        let _guard = EnvGuard::new(&["PDF_VIEWER_DATA_DIR", "PDF_VIEWER_SAMPLE_URL"]);

        env::set_var("PDF_VIEWER_DATA_DIR", "  ");

        let result = ViewerConfig::from_env();
        assert!(matches!(result, Err(ConfigError::InvalidValue(key)) if key == "PDF_VIEWER_DATA_DIR"));
    }

    #[test]
    fn test_file_roundtrip() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        let config = ViewerConfig::default().with_data_dir("/tmp/data");

        config.save_to_file(&path).unwrap();
        assert_eq!(ViewerConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, r#"{ "data_dir": "/tmp/only-dir" }"#).unwrap();

        let config = ViewerConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/only-dir"));
        assert_eq!(config.sample_url, DEFAULT_SAMPLE_URL);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "data_dir = 3").unwrap();

        assert!(matches!(ViewerConfig::from_file(&path), Err(ConfigError::Json(_))));
        assert!(matches!(
            ViewerConfig::from_file(temp.path().join("absent.json")),
            Err(ConfigError::Io(_))
        ));
    }

    /// Restores environment variables on drop.
    struct EnvGuard {
        vars: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new(names: &[&str]) -> Self {
            let vars = names
                .iter()
                .map(|name| {
                    let value = env::var(name).ok();
                    env::remove_var(name);
                    (name.to_string(), value)
                })
                .collect();
            Self { vars }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (name, value) in &self.vars {
                match value {
                    Some(v) => env::set_var(name, v),
                    None => env::remove_var(name),
                }
            }
        }
    }
}
