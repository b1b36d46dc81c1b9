//! Configuration management for the ShelfRank workspace
//!
//! Supports loading configuration from:
//! - Environment variables (prefixed with APP__)
//! - Configuration files (config.toml, config.yaml)
//! - Default values

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// PageRank batch configuration
    #[serde(default)]
    pub pagerank: PageRankSettings,

    /// Recommendation scoring configuration
    #[serde(default)]
    pub recommend: RecommendSettings,

    /// Observability configuration
    #[serde(default)]
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageRankSettings {
    /// Damping factor, must lie in the open interval (0, 1)
    #[serde(default = "default_damping")]
    pub damping: f64,

    /// Iteration cap for the power-iteration loop
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence tolerance (maximum per-node rank change)
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendSettings {
    /// Number of top-clicked books used as recommendation seeds
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,

    /// Similarity neighbors fetched per seed
    #[serde(default = "default_neighbors_per_seed")]
    pub neighbors_per_seed: usize,

    /// Default suggestion list length when the caller does not pass one
    #[serde(default = "default_suggestion_limit")]
    pub default_limit: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ObservabilitySettings {
    /// Log level (debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default = "default_json_logging")]
    pub json_logging: bool,

    /// Service name for tracing
    #[serde(default = "default_service_name")]
    pub service_name: String,
}

// Default value functions
fn default_damping() -> f64 { 0.85 }
fn default_max_iterations() -> usize { 100 }
fn default_tolerance() -> f64 { 1e-6 }
fn default_seed_count() -> usize { 5 }
fn default_neighbors_per_seed() -> usize { 10 }
fn default_suggestion_limit() -> usize { 10 }
fn default_log_level() -> String { "info".to_string() }
fn default_json_logging() -> bool { true }
fn default_service_name() -> String { "shelfrank".to_string() }

impl AppConfig {
    /// Load configuration from environment and files
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Load base config file
            .add_source(File::with_name("config/default").required(false))
            // Load environment-specific config
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            // Load local overrides
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables with APP__ prefix
            // e.g., APP__PAGERANK__DAMPING=0.9
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Load from a specific TOML file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pagerank: PageRankSettings::default(),
            recommend: RecommendSettings::default(),
            observability: ObservabilitySettings::default(),
        }
    }
}

impl Default for PageRankSettings {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
        }
    }
}

impl Default for RecommendSettings {
    fn default() -> Self {
        Self {
            seed_count: default_seed_count(),
            neighbors_per_seed: default_neighbors_per_seed(),
            default_limit: default_suggestion_limit(),
        }
    }
}

impl Default for ObservabilitySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logging: default_json_logging(),
            service_name: default_service_name(),
        }
    }
}
