//! Core library for deriving project estimates from interactive scope
//! selections.
//!
//! A visitor picks service offerings from a catalog and tunes a set of
//! project parameters; this crate turns those inputs into an estimate
//! (timeline range, investment range, effort rating, narrative insight)
//! and keeps the displayed estimate consistent with the latest inputs even
//! while slow engine calls are still in flight.
//!
//! # Architecture Overview
//!
//! - **Catalog**: the immutable, compiled-in list of selectable services
//! - **Core types**: the project context a user edits and the estimate
//!   shape the rendering layer consumes
//! - **Engines**: one trait, two implementations: a closed-form
//!   calculator and a remote client for a hosted text-generation model
//! - **Orchestrator**: owns the canonical selection and context, triggers
//!   re-estimation on every mutation, and suppresses results from
//!   superseded calls via a generation counter
//! - **Configuration**: YAML-driven engine selection with environment
//!   credential resolution

pub mod catalog;
pub mod config;
pub mod core_types;
pub mod engine;
pub mod errors;
pub mod lead;
pub mod orchestrator;

pub use catalog::{Catalog, ServiceCategory, ServiceItem};
pub use config::{ConfigLoader, ScopecastConfig};
pub use core_types::{DataVolume, EstimateResult, ProjectContext, TeamSize, Timeline};
pub use engine::{engine_from_config, DeterministicEngine, Engine, RemoteEngine};
pub use errors::EstimatorError;
pub use lead::LeadPayload;
pub use orchestrator::{EstimateState, ScopeOrchestrator};

#[cfg(test)]
pub mod test_utils;
