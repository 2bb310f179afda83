//! Selection and estimate orchestration.
//!
//! The orchestrator is the single owner of the live selection set and
//! project context. Every mutation re-derives the estimate through the
//! configured engine, and a generation counter guarantees that a slow
//! engine call completing after a newer one can never overwrite the newer
//! result: each spawned call captures the generation that issued it, and
//! its outcome is applied only while that generation is still current.
//! The underlying call is never cancelled, only its effect is suppressed.

use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use crate::catalog::Catalog;
use crate::core_types::{EstimateResult, ProjectContext};
use crate::engine::Engine;
use crate::lead::LeadPayload;

/// Message shown to the visitor when an engine call fails. Any mutation
/// re-enters Pending, so the failure is always retry-eligible.
pub const ESTIMATE_FAILED_MESSAGE: &str =
    "We couldn't generate an estimate just now. Adjust your selection to try again.";

/// What the rendering layer sees for one estimation session.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateState {
    /// Nothing selected, nothing to estimate.
    Idle,
    /// An engine call is in flight for the current inputs.
    Pending,
    /// The estimate for the current inputs.
    Settled(EstimateResult),
    /// The last call for the current inputs errored.
    Failed(String),
}

impl EstimateState {
    pub fn estimate(&self) -> Option<&EstimateResult> {
        match self {
            EstimateState::Settled(result) => Some(result),
            _ => None,
        }
    }
}

struct SessionInner {
    selection: Vec<String>,
    context: ProjectContext,
    generation: u64,
    state: EstimateState,
}

pub struct ScopeOrchestrator {
    engine: Arc<dyn Engine>,
    catalog: Catalog,
    inner: Arc<Mutex<SessionInner>>,
    updates: watch::Sender<EstimateState>,
}

impl ScopeOrchestrator {
    pub fn new(engine: Arc<dyn Engine>, catalog: Catalog) -> Self {
        let (updates, _) = watch::channel(EstimateState::Idle);
        Self {
            engine,
            catalog,
            inner: Arc::new(Mutex::new(SessionInner {
                selection: Vec::new(),
                context: ProjectContext::default(),
                generation: 0,
                state: EstimateState::Idle,
            })),
            updates,
        }
    }

    /// Adds a service to the selection. Returns false (and triggers
    /// nothing) if the id is already selected.
    pub async fn add_service(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.selection.iter().any(|selected| selected == id) {
            return false;
        }
        inner.selection.push(id.to_string());
        self.reestimate(&mut inner);
        true
    }

    /// Removes a service from the selection. Returns false (and triggers
    /// nothing) if the id is not selected.
    pub async fn remove_service(&self, id: &str) -> bool {
        let mut inner = self.inner.lock().await;
        let before = inner.selection.len();
        inner.selection.retain(|selected| selected != id);
        if inner.selection.len() == before {
            return false;
        }
        self.reestimate(&mut inner);
        true
    }

    /// Replaces the project context wholesale.
    pub async fn update_context(&self, context: ProjectContext) {
        let mut inner = self.inner.lock().await;
        inner.context = context;
        self.reestimate(&mut inner);
    }

    pub async fn selection(&self) -> Vec<String> {
        self.inner.lock().await.selection.clone()
    }

    pub async fn context(&self) -> ProjectContext {
        self.inner.lock().await.context.clone()
    }

    pub async fn state(&self) -> EstimateState {
        self.inner.lock().await.state.clone()
    }

    /// Change feed for the rendering layer. The receiver always observes
    /// the most recent state, never a superseded one.
    pub fn subscribe(&self) -> watch::Receiver<EstimateState> {
        self.updates.subscribe()
    }

    /// Read-only snapshot for the contact form, available once the current
    /// inputs have a settled estimate.
    pub async fn lead_payload(&self) -> Option<LeadPayload> {
        let inner = self.inner.lock().await;
        let estimate = inner.state.estimate()?.clone();
        let services = inner
            .selection
            .iter()
            .filter_map(|id| self.catalog.find(id).cloned())
            .collect();
        Some(LeadPayload {
            services,
            context: inner.context.clone(),
            estimate,
        })
    }

    /// Re-derives the estimate for the current inputs. Callers hold the
    /// session lock; the engine call itself runs on a spawned task tagged
    /// with the generation that issued it.
    fn reestimate(&self, inner: &mut SessionInner) {
        inner.generation += 1;
        let generation = inner.generation;

        if inner.selection.is_empty() {
            self.transition(inner, EstimateState::Idle);
            return;
        }

        self.transition(inner, EstimateState::Pending);

        let engine = Arc::clone(&self.engine);
        let selection = inner.selection.clone();
        let context = inner.context.clamped();
        let session = Arc::clone(&self.inner);
        let updates = self.updates.clone();

        tokio::spawn(async move {
            let outcome = engine.estimate(&selection, &context).await;
            let mut inner = session.lock().await;
            if inner.generation != generation {
                log::debug!(
                    "Dropping stale estimate from generation {} (current is {})",
                    generation,
                    inner.generation
                );
                return;
            }
            let state = match outcome {
                Ok(estimate) => EstimateState::Settled(estimate),
                Err(err) => {
                    log::warn!("Estimate generation failed: {}", err);
                    EstimateState::Failed(ESTIMATE_FAILED_MESSAGE.to_string())
                }
            };
            inner.state = state.clone();
            // send_replace stores the value even while nobody subscribes.
            updates.send_replace(state);
        });
    }

    fn transition(&self, inner: &mut SessionInner, state: EstimateState) {
        inner.state = state.clone();
        self.updates.send_replace(state);
    }
}
