//! Estimation engine abstractions and implementations.
//!
//! Defines the core `Engine` trait and the two implementations that satisfy
//! it: a closed-form deterministic calculator and a remote client that asks
//! a hosted text-generation model for the estimate. The orchestrator only
//! ever sees the trait, so the active variant is a configuration choice.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{EngineConfig, EngineProvider};
use crate::core_types::{EstimateResult, ProjectContext};
use crate::errors::EstimatorError;

pub mod deterministic;
pub mod prompt;
pub mod remote;

pub use deterministic::DeterministicEngine;
pub use remote::RemoteEngine;

/// Maps a non-empty selection and a project context to an estimate.
///
/// Callable any number of times; the only side effect an implementation may
/// have is the network exchange of the remote variant. An estimate is only
/// defined for a non-empty selection, and implementations reject the empty
/// case.
#[async_trait]
pub trait Engine: Send + Sync {
    async fn estimate(
        &self,
        selected: &[String],
        context: &ProjectContext,
    ) -> Result<EstimateResult, EstimatorError>;
}

/// Builds the configured engine variant.
///
/// Credentials are resolved here, once, and handed to the remote client as
/// plain constructor input; nothing downstream reads the environment.
pub fn engine_from_config(config: &EngineConfig) -> Result<Arc<dyn Engine>, EstimatorError> {
    match &config.provider {
        EngineProvider::Deterministic => Ok(Arc::new(DeterministicEngine::new())),
        EngineProvider::OpenAI => {
            let client = remote_client(config)?;
            Ok(Arc::new(client))
        }
        EngineProvider::Custom { base_url } => {
            let client = remote_client(config)?.with_api_base(base_url.clone());
            Ok(Arc::new(client))
        }
    }
}

fn remote_client(config: &EngineConfig) -> Result<RemoteEngine, EstimatorError> {
    let api_key = config
        .auth
        .api_key
        .clone()
        .or_else(|| {
            config
                .auth
                .api_key_env
                .as_ref()
                .and_then(|env_var| std::env::var(env_var).ok())
        })
        .ok_or_else(|| {
            EstimatorError::ConfigError(
                "No API key found for remote engine. Set api_key or api_key_env".to_string(),
            )
        })?;

    let mut client = RemoteEngine::new(api_key, config.model.clone());

    if config.parameters.temperature > 0.0 {
        client = client.with_temperature(config.parameters.temperature);
    }
    if config.parameters.max_tokens > 0 {
        client = client.with_max_tokens(config.parameters.max_tokens);
    }
    if config.parameters.timeout_secs > 0 {
        client = client.with_timeout(std::time::Duration::from_secs(
            config.parameters.timeout_secs,
        ));
    }

    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineAuth;

    fn remote_config() -> EngineConfig {
        EngineConfig {
            provider: EngineProvider::OpenAI,
            model: "gpt-3.5-turbo".to_string(),
            auth: EngineAuth {
                api_key: Some("test-key".to_string()),
                api_key_env: None,
            },
            ..EngineConfig::default()
        }
    }

    #[test]
    fn test_deterministic_provider_needs_no_key() {
        let config = EngineConfig::default();
        assert!(engine_from_config(&config).is_ok());
    }

    #[test]
    fn test_remote_provider_without_key_is_config_error() {
        let mut config = remote_config();
        config.auth.api_key = None;
        let err = engine_from_config(&config).err().unwrap();
        assert!(matches!(err, EstimatorError::ConfigError(_)));
    }

    #[test]
    fn test_remote_provider_with_literal_key() {
        assert!(engine_from_config(&remote_config()).is_ok());
    }

    #[test]
    fn test_custom_provider_uses_base_url() {
        let mut config = remote_config();
        config.provider = EngineProvider::Custom {
            base_url: "http://localhost:9999/v1".to_string(),
        };
        assert!(engine_from_config(&config).is_ok());
    }
}
