//! Configuration type definitions.

use serde::{Deserialize, Serialize};

use crate::errors::EstimatorError;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScopecastConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub provider: EngineProvider,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub parameters: ModelParameters,
    #[serde(default)]
    pub auth: EngineAuth,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: EngineProvider::Deterministic,
            model: default_model(),
            parameters: ModelParameters::default(),
            auth: EngineAuth::default(),
        }
    }
}

/// Engine variants. The orchestrator never branches on this; it is
/// resolved once into a trait object by the engine factory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EngineProvider {
    #[default]
    Deterministic,
    OpenAI,
    Custom {
        base_url: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelParameters {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct EngineAuth {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_key_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl ScopecastConfig {
    pub fn validate(&self) -> Result<(), EstimatorError> {
        let engine = &self.engine;

        if engine.provider != EngineProvider::Deterministic {
            if engine.model.trim().is_empty() {
                return Err(EstimatorError::ConfigError(
                    "Remote engine requires a model name".to_string(),
                ));
            }
            if engine.auth.api_key.is_none() && engine.auth.api_key_env.is_none() {
                return Err(EstimatorError::ConfigError(
                    "Remote engine requires api_key or api_key_env".to_string(),
                ));
            }
        }

        if !(0.0..=2.0).contains(&engine.parameters.temperature) {
            return Err(EstimatorError::ConfigError(format!(
                "Temperature {} is outside the valid range 0.0..=2.0",
                engine.parameters.temperature
            )));
        }

        Ok(())
    }
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_max_tokens() -> u32 {
    1024
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_log_level() -> String {
    "info".to_string()
}
