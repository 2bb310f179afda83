//! Configuration loading from YAML files.

use std::path::Path;

use tokio::fs;

use crate::config::types::ScopecastConfig;
use crate::errors::EstimatorError;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads and validates configuration from a YAML file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<ScopecastConfig, EstimatorError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).await.map_err(|e| {
            EstimatorError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_str(&content)
    }

    /// Loads from a file if it exists; an absent file yields the default
    /// (deterministic) configuration so the estimator works out of the box.
    pub async fn from_file_or_default<P: AsRef<Path>>(
        path: P,
    ) -> Result<ScopecastConfig, EstimatorError> {
        let path = path.as_ref();
        if !path.exists() {
            log::info!(
                "Config file {} not found, using built-in defaults",
                path.display()
            );
            return Ok(ScopecastConfig::default());
        }
        Self::from_file(path).await
    }

    pub fn from_str(content: &str) -> Result<ScopecastConfig, EstimatorError> {
        let config: ScopecastConfig = serde_yaml::from_str(content)
            .map_err(|e| EstimatorError::ConfigError(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::types::EngineProvider;

    #[test]
    fn test_parse_minimal_remote_config() {
        let yaml = r#"
engine:
  provider: openai
  model: gpt-3.5-turbo
  auth:
    api_key_env: OPENAI_API_KEY
"#;
        let config = ConfigLoader::from_str(yaml).unwrap();
        assert_eq!(config.engine.provider, EngineProvider::OpenAI);
        assert_eq!(
            config.engine.auth.api_key_env.as_deref(),
            Some("OPENAI_API_KEY")
        );
        // Unspecified parameters fall back to defaults.
        assert_eq!(config.engine.parameters.temperature, 0.1);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_custom_provider_with_base_url() {
        let yaml = r#"
engine:
  provider:
    custom:
      base_url: http://localhost:8080/v1
  auth:
    api_key: local-key
  parameters:
    temperature: 0.2
    timeout_secs: 5
logging:
  level: debug
"#;
        let config = ConfigLoader::from_str(yaml).unwrap();
        assert_eq!(
            config.engine.provider,
            EngineProvider::Custom {
                base_url: "http://localhost:8080/v1".to_string()
            }
        );
        assert_eq!(config.engine.parameters.timeout_secs, 5);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = ConfigLoader::from_str("{}").unwrap();
        assert_eq!(config.engine.provider, EngineProvider::Deterministic);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = ConfigLoader::from_str("engine: [not: a: map").unwrap_err();
        assert!(matches!(err, EstimatorError::ConfigError(_)));
    }

    #[test]
    fn test_validation_runs_on_load() {
        let yaml = r#"
engine:
  provider: openai
"#;
        let err = ConfigLoader::from_str(yaml).unwrap_err();
        assert!(err.to_string().contains("api_key"));
    }

    #[tokio::test]
    async fn test_missing_file_falls_back_to_defaults() {
        let config = ConfigLoader::from_file_or_default("/nonexistent/scopecast.yaml")
            .await
            .unwrap();
        assert_eq!(config.engine.provider, EngineProvider::Deterministic);
    }
}
