//! Configuration management for PetroSphere
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files, environment variables, and CLI overrides.

use crate::error::{PetrosphereError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure for PetroSphere
///
/// This structure holds all configuration needed by the CLI, including
/// gateway settings, chat behavior, and default field coordinates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Model gateway configuration
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Chat session configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Default coordinates used by `locate` when no flags are given
    #[serde(default)]
    pub location: LocationConfig,
}

/// Model gateway configuration
///
/// Specifies the endpoint base and the per-operation model identifiers.
/// The `api_base` override allows tests to point the gateway at a mock
/// server (e.g. wiremock).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the model-serving endpoint
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// HTTP client timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Per-operation model identifiers
    #[serde(default)]
    pub models: ModelsConfig,

    /// Internal-reasoning token budget attached when reasoning mode is on
    #[serde(default = "default_thinking_budget")]
    pub thinking_budget: u32,
}

fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_thinking_budget() -> u32 {
    32768
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            timeout_seconds: default_timeout(),
            models: ModelsConfig::default(),
            thinking_budget: default_thinking_budget(),
        }
    }
}

/// Model identifiers used by each gateway operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelsConfig {
    /// Conversational model (chat sessions)
    #[serde(default = "default_chat_model")]
    pub chat: String,

    /// Grounded web-search model
    #[serde(default = "default_search_model")]
    pub search: String,

    /// Maps-grounded location model
    #[serde(default = "default_locate_model")]
    pub locate: String,

    /// Image synthesis model
    #[serde(default = "default_image_model")]
    pub image: String,

    /// Image editing model
    #[serde(default = "default_edit_model")]
    pub edit: String,

    /// Vision analysis model (thin-section inspection)
    #[serde(default = "default_vision_model")]
    pub vision: String,

    /// Lightweight summary model
    #[serde(default = "default_summary_model")]
    pub summary: String,
}

fn default_chat_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_search_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_locate_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_image_model() -> String {
    "gemini-3-pro-image-preview".to_string()
}

fn default_edit_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_vision_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_summary_model() -> String {
    "gemini-flash-lite-latest".to_string()
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            chat: default_chat_model(),
            search: default_search_model(),
            locate: default_locate_model(),
            image: default_image_model(),
            edit: default_edit_model(),
            vision: default_vision_model(),
            summary: default_summary_model(),
        }
    }
}

/// Chat session configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Greeting shown when a chat session opens
    #[serde(default = "default_greeting")]
    pub greeting: String,

    /// Start sessions in reasoning mode by default
    #[serde(default)]
    pub reasoning: bool,
}

fn default_greeting() -> String {
    "Hello! I am your PetroSphere AI assistant. How can I help you with your \
     petrological studies today? I can analyze complex rock systems, explain \
     mineral lattices, or help classify metamorphic facies."
        .to_string()
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            reasoning: false,
        }
    }
}

/// Default field coordinates for `locate`
///
/// Both fields are optional; the locate operation proceeds without a
/// location bias when they are absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude in decimal degrees
    #[serde(default)]
    pub latitude: Option<f64>,

    /// Longitude in decimal degrees
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway: GatewayConfig::default(),
            chat: ChatConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a file with env-var and CLI overrides
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the YAML configuration file
    /// * `cli` - Parsed CLI arguments whose overrides are applied last
    ///
    /// # Errors
    ///
    /// Returns error if the file exists but cannot be read or parsed
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::warn!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_env_vars();
        config.apply_cli_overrides(cli);

        Ok(config)
    }

    /// Parse configuration from a YAML file
    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| PetrosphereError::Config(format!("Failed to read {}: {}", path, e)))?;
        let config: Config = serde_yaml::from_str(&contents)
            .map_err(|e| PetrosphereError::Config(format!("Failed to parse {}: {}", path, e)))?;
        tracing::debug!("Loaded configuration from {}", path);
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_vars(&mut self) {
        if let Ok(base) = std::env::var("PETROSPHERE_API_BASE") {
            if !base.is_empty() {
                tracing::debug!("Overriding api_base from PETROSPHERE_API_BASE");
                self.gateway.api_base = base;
            }
        }
    }

    /// Apply CLI overrides
    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(base) = &cli.api_base {
            self.gateway.api_base = base.clone();
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns error if any field is out of range or empty
    pub fn validate(&self) -> Result<()> {
        if self.gateway.api_base.is_empty() {
            return Err(PetrosphereError::Config("api_base must not be empty".to_string()).into());
        }
        if !self.gateway.api_base.starts_with("http://")
            && !self.gateway.api_base.starts_with("https://")
        {
            return Err(PetrosphereError::Config(format!(
                "api_base must be an http(s) URL, got: {}",
                self.gateway.api_base
            ))
            .into());
        }
        if self.gateway.timeout_seconds == 0 {
            return Err(
                PetrosphereError::Config("timeout_seconds must be positive".to_string()).into(),
            );
        }

        let models = [
            ("chat", &self.gateway.models.chat),
            ("search", &self.gateway.models.search),
            ("locate", &self.gateway.models.locate),
            ("image", &self.gateway.models.image),
            ("edit", &self.gateway.models.edit),
            ("vision", &self.gateway.models.vision),
            ("summary", &self.gateway.models.summary),
        ];
        for (name, model) in models {
            if model.is_empty() {
                return Err(PetrosphereError::Config(format!(
                    "models.{} must not be empty",
                    name
                ))
                .into());
            }
        }

        if let (Some(lat), Some(lng)) = (self.location.latitude, self.location.longitude) {
            if !(-90.0..=90.0).contains(&lat) {
                return Err(PetrosphereError::Config(format!(
                    "latitude out of range: {}",
                    lat
                ))
                .into());
            }
            if !(-180.0..=180.0).contains(&lng) {
                return Err(PetrosphereError::Config(format!(
                    "longitude out of range: {}",
                    lng
                ))
                .into());
            }
        }

        Ok(())
    }
}
