//! Configuration system for the estimator.
//!
//! A small YAML surface selects the engine variant and its parameters.
//! Every field has a default, so an absent file yields a working
//! deterministic setup; the remote variants additionally need a key
//! source before validation passes.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineAuth, EngineConfig, EngineProvider, LoggingConfig, ModelParameters, ScopecastConfig,
};
