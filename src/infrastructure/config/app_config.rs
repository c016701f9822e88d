//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "tokenlens";
const APP_QUALIFIER: &str = "io";
const APP_ORGANIZATION: &str = "tokenlens";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration from config file and CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Where the collection is published.
    #[serde(default)]
    pub collection: CollectionConfig,

    /// Preview behavior.
    #[serde(default)]
    pub preview: PreviewConfig,

    /// Network behavior.
    #[serde(default)]
    pub network: NetworkConfig,
}

/// Locations of the published collection documents and images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionConfig {
    /// Root URL the collection is served from.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Metadata documents to probe, in priority order, relative to `base_url`.
    #[serde(default = "default_metadata_documents")]
    pub metadata_documents: Vec<String>,

    /// Secondary identifier→URL index, relative to `base_url`.
    #[serde(default = "default_secondary_index")]
    pub secondary_index: String,

    /// HTTPS gateway host used to rewrite `ipfs://` image URLs.
    #[serde(default = "default_ipfs_gateway")]
    pub ipfs_gateway: String,
}

impl CollectionConfig {
    fn join(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Absolute URLs of the metadata documents, in priority order.
    #[must_use]
    pub fn metadata_urls(&self) -> Vec<String> {
        self.metadata_documents.iter().map(|p| self.join(p)).collect()
    }

    /// Absolute URL of the secondary index document.
    #[must_use]
    pub fn secondary_index_url(&self) -> String {
        self.join(&self.secondary_index)
    }

    /// Conventional image URLs for `id`: thumbnail PNG, thumbnail JPEG,
    /// full PNG, full JPEG. Order is meaningful and fixed.
    #[must_use]
    pub fn template_urls(&self, id: &str) -> Vec<String> {
        vec![
            self.join(&format!("images/thumbs/{id}.png")),
            self.join(&format!("images/thumbs/{id}.jpg")),
            self.join(&format!("images/{id}.png")),
            self.join(&format!("images/{id}.jpg")),
        ]
    }
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            metadata_documents: default_metadata_documents(),
            secondary_index: default_secondary_index(),
            ipfs_gateway: default_ipfs_gateway(),
        }
    }
}

/// Preview behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewConfig {
    /// Identifier shown when the input is empty.
    #[serde(default = "default_id")]
    pub default_id: String,

    /// Inclusive upper bound for identifiers.
    #[serde(default = "default_max_id")]
    pub max_id: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            default_id: default_id(),
            max_id: default_max_id(),
        }
    }
}

/// Network behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Request timeout for index document fetches, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_metadata_documents() -> Vec<String> {
    vec!["collection_metadata.json".to_string()]
}

fn default_secondary_index() -> String {
    "images/index.json".to_string()
}

fn default_ipfs_gateway() -> String {
    "dweb.link".to_string()
}

fn default_id() -> String {
    "8929".to_string()
}

fn default_max_id() -> u32 {
    99_999
}

fn default_timeout_secs() -> u64 {
    30
}

use super::args::CliArgs;

impl AppConfig {
    /// Merges CLI arguments into the configuration. CLI wins.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(base_url) = args.base_url {
            self.collection.base_url = base_url;
        }
        if let Some(gateway) = args.ipfs_gateway {
            self.collection.ipfs_gateway = gateway;
        }
        if let Some(default_id) = args.default_id {
            self.preview.default_id = default_id;
        }
        if let Some(max_id) = args.max_id {
            self.preview.max_id = max_id;
        }
        if let Some(timeout) = args.timeout_secs {
            self.network.timeout_secs = timeout;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("tokenlens.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            collection: CollectionConfig::default(),
            preview: PreviewConfig::default(),
            network: NetworkConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_file() {
        let toml_content = r#"
            log_level = "debug"

            [collection]
            base_url = "https://tokens.example"
            metadata_documents = ["all.json", "fallback.json"]

            [preview]
            default_id = "17"
            max_id = 9999
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.collection.base_url, "https://tokens.example");
        assert_eq!(config.collection.metadata_documents.len(), 2);
        assert_eq!(config.preview.default_id, "17");
        assert_eq!(config.preview.max_id, 9999);
        // Untouched sections keep their defaults.
        assert_eq!(config.collection.ipfs_gateway, "dweb.link");
        assert_eq!(config.network.timeout_secs, 30);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.preview.default_id, "8929");
        assert_eq!(config.preview.max_id, 99_999);
        assert_eq!(config.collection.metadata_documents.len(), 1);
    }

    #[test]
    fn test_url_joining_trims_trailing_slash() {
        let collection = CollectionConfig {
            base_url: "https://tokens.example/".to_string(),
            ..CollectionConfig::default()
        };

        assert_eq!(
            collection.secondary_index_url(),
            "https://tokens.example/images/index.json"
        );
    }

    #[test]
    fn test_template_urls_fixed_order() {
        let collection = CollectionConfig {
            base_url: "https://tokens.example".to_string(),
            ..CollectionConfig::default()
        };

        assert_eq!(
            collection.template_urls("42"),
            vec![
                "https://tokens.example/images/thumbs/42.png",
                "https://tokens.example/images/thumbs/42.jpg",
                "https://tokens.example/images/42.png",
                "https://tokens.example/images/42.jpg",
            ]
        );
    }
}
