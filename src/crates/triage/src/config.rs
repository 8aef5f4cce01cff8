//! Configuration management for Triage
//!
//! Supports dual-location configuration:
//! - User-level: ~/.triage/triage.toml
//! - Project-level: ./.triage/triage.toml
//!
//! Project-level config overrides user-level config, which overrides
//! built-in defaults. The `[routing]` section exposes the scoring
//! weights and selection threshold; the reference values are defaults,
//! not hard constants.

use crate::error::{Result, TriageError};
use crate::scorer::{
    ScoringWeights, DEFAULT_PATTERN_WEIGHT, DEFAULT_PHRASE_WEIGHT, DEFAULT_PRIORITY_DIVISOR,
};
use crate::selector::{SelectOptions, DEFAULT_MIN_SCORE, DEFAULT_TOP_N};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Main Triage configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TriageConfig {
    /// Routing weights and thresholds
    #[serde(default)]
    pub routing: RoutingConfig,

    /// Manifest location
    #[serde(default)]
    pub manifest: ManifestConfig,

    /// On-disk layout used by the generation and validation collaborators
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Routing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Score added per matching activation phrase
    #[serde(default = "default_phrase_weight")]
    pub phrase_weight: f64,

    /// Score added for a matching activation pattern
    #[serde(default = "default_pattern_weight")]
    pub pattern_weight: f64,

    /// Divisor applied to entry priority for the tie-break term
    #[serde(default = "default_priority_divisor")]
    pub priority_divisor: f64,

    /// Minimum score an entry must reach to be routable (inclusive)
    #[serde(default = "default_min_score")]
    pub min_score: f64,

    /// Number of distinct handlers to return
    #[serde(default = "default_top_n")]
    pub top_n: usize,
}

fn default_phrase_weight() -> f64 {
    DEFAULT_PHRASE_WEIGHT
}

fn default_pattern_weight() -> f64 {
    DEFAULT_PATTERN_WEIGHT
}

fn default_priority_divisor() -> f64 {
    DEFAULT_PRIORITY_DIVISOR
}

fn default_min_score() -> f64 {
    DEFAULT_MIN_SCORE
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            phrase_weight: default_phrase_weight(),
            pattern_weight: default_pattern_weight(),
            priority_divisor: default_priority_divisor(),
            min_score: default_min_score(),
            top_n: default_top_n(),
        }
    }
}

impl RoutingConfig {
    /// Scoring weights for this configuration
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            phrase: self.phrase_weight,
            pattern: self.pattern_weight,
            priority_divisor: self.priority_divisor,
        }
    }

    /// Selection options for this configuration
    pub fn select_options(&self) -> SelectOptions {
        SelectOptions {
            top_n: self.top_n,
            min_score: self.min_score,
            weights: self.weights(),
        }
    }
}

/// Manifest location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestConfig {
    /// Manifest document path, relative to the project root
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        Self {
            path: ".triage/manifest.json".to_string(),
        }
    }
}

/// On-disk layout for generated and validated resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Directory holding one subdirectory per capability (entry points)
    pub registry_dir: String,

    /// Directory holding one definition file per handler
    pub handlers_dir: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            registry_dir: ".triage/registry".to_string(),
            handlers_dir: ".triage/handlers".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl TriageConfig {
    /// Merge another config into this one (other takes precedence)
    ///
    /// The loader handles priority: defaults → user → project
    pub fn merge(&mut self, other: TriageConfig) {
        // Simple section replacement - serde fills in defaults for missing fields
        self.routing = other.routing;
        self.manifest = other.manifest;
        self.layout = other.layout;
        self.logging = other.logging;
    }
}

/// Configuration loader that handles both user and project configs
pub struct ConfigLoader {
    user_config_path: PathBuf,
    project_config_path: PathBuf,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            user_config_path: Self::user_config_path(),
            project_config_path: Self::project_config_path(),
        }
    }

    /// Get user-level config path (~/.triage/triage.toml)
    fn user_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".triage")
            .join("triage.toml")
    }

    /// Get project-level config path (./.triage/triage.toml)
    fn project_config_path() -> PathBuf {
        PathBuf::from(".triage").join("triage.toml")
    }

    /// Load configuration from both locations with project taking precedence
    pub async fn load(&self) -> Result<TriageConfig> {
        let mut config = TriageConfig::default();

        match self.load_from_path(&self.user_config_path).await {
            Ok(user_config) => {
                debug!(path = %self.user_config_path.display(), "Loaded user-level config");
                config.merge(user_config);
            }
            Err(e) => {
                debug!(
                    path = %self.user_config_path.display(),
                    error = %e,
                    "User-level config not found, using defaults"
                );
            }
        }

        match self.load_from_path(&self.project_config_path).await {
            Ok(project_config) => {
                debug!(path = %self.project_config_path.display(), "Loaded project-level config");
                config.merge(project_config);
            }
            Err(e) => {
                debug!(
                    path = %self.project_config_path.display(),
                    error = %e,
                    "Project-level config not found"
                );
            }
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    async fn load_from_path(&self, path: &PathBuf) -> Result<TriageConfig> {
        if !path.exists() {
            return Err(TriageError::Config(format!(
                "Config file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| TriageError::Config(format!("Failed to read config: {}", e)))?;

        let config: TriageConfig = toml::from_str(&content)
            .map_err(|e| TriageError::Config(format!("Failed to parse config: {}", e)))?;

        Ok(config)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Load configuration with project config taking precedence
///
/// Priority order:
/// 1. Default values
/// 2. User-level config (~/.triage/triage.toml)
/// 3. Project-level config (./.triage/triage.toml)
pub async fn load_config() -> Result<TriageConfig> {
    let loader = ConfigLoader::new();
    loader.load().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_reference_values() {
        let config = TriageConfig::default();
        assert_eq!(config.routing.phrase_weight, 10.0);
        assert_eq!(config.routing.pattern_weight, 20.0);
        assert_eq!(config.routing.priority_divisor, 100.0);
        assert_eq!(config.routing.min_score, 5.0);
        assert_eq!(config.routing.top_n, 1);
        assert_eq!(config.manifest.path, ".triage/manifest.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_merge_config() {
        let mut base = TriageConfig::default();
        let mut override_config = TriageConfig::default();
        override_config.routing.top_n = 3;
        override_config.routing.min_score = 8.0;

        base.merge(override_config);

        assert_eq!(base.routing.top_n, 3);
        assert_eq!(base.routing.min_score, 8.0);
        assert_eq!(base.routing.phrase_weight, 10.0); // Unchanged
    }

    #[test]
    fn test_routing_config_deserializes() {
        let toml = r#"
            phrase_weight = 5.0
            pattern_weight = 15.0
            top_n = 2
        "#;

        let config: RoutingConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.phrase_weight, 5.0);
        assert_eq!(config.pattern_weight, 15.0);
        assert_eq!(config.top_n, 2);
        // Missing fields fall back to defaults
        assert_eq!(config.priority_divisor, 100.0);
        assert_eq!(config.min_score, 5.0);
    }

    #[test]
    fn test_partial_document_uses_section_defaults() {
        let toml = r#"
            [logging]
            level = "debug"
        "#;

        let config: TriageConfig = toml::from_str(toml).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.routing.min_score, 5.0);
        assert_eq!(config.layout.registry_dir, ".triage/registry");
    }

    #[test]
    fn test_select_options_carry_weights() {
        let mut routing = RoutingConfig::default();
        routing.phrase_weight = 4.0;
        routing.top_n = 2;

        let options = routing.select_options();
        assert_eq!(options.top_n, 2);
        assert_eq!(options.weights.phrase, 4.0);
        assert_eq!(options.weights.pattern, 20.0);
    }
}
