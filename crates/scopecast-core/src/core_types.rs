//! Core type definitions for the estimation contract
//!
//! These types are the contract between the host UI, the orchestrator, and
//! the engines: the structured project parameters a user edits, and the
//! estimate shape the rendering layer consumes. Wire casing matches the
//! JSON the hosted estimation model is asked to produce, so the same types
//! serve the remote reply parser.

use serde::{Deserialize, Serialize};

/// How urgently the visitor needs the project delivered.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum Timeline {
    Urgent,
    Normal,
    Flexible,
}

/// Expected data processing volume for the project.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum DataVolume {
    #[serde(rename = "N/A")]
    NotApplicable,
    Low,
    Medium,
    High,
}

impl DataVolume {
    /// Bonus applied to the effort rating. NotApplicable and Low carry none.
    pub fn effort_bonus(&self) -> f64 {
        match self {
            DataVolume::High => 2.0,
            DataVolume::Medium => 1.0,
            DataVolume::NotApplicable | DataVolume::Low => 0.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum TeamSize {
    Small,
    Medium,
    Large,
}

/// The project parameters a visitor edits alongside their service
/// selection. Replaced wholesale on every edit; the orchestrator is the
/// only owner of the live value.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    pub complexity: u8,
    pub timeline: Timeline,
    pub data_volume: DataVolume,
    pub team_size: TeamSize,
    pub system_integration: bool,
    pub api_integrations: u32,
    #[serde(default)]
    pub description: String,
}

impl Default for ProjectContext {
    fn default() -> Self {
        Self {
            complexity: 5,
            timeline: Timeline::Normal,
            data_volume: DataVolume::Medium,
            team_size: TeamSize::Small,
            system_integration: false,
            api_integrations: 0,
            description: String::new(),
        }
    }
}

impl ProjectContext {
    /// Returns a copy with complexity forced into the 1..=10 slider range,
    /// so engine arithmetic never sees an out-of-range value.
    pub fn clamped(&self) -> Self {
        let mut ctx = self.clone();
        ctx.complexity = ctx.complexity.clamp(1, 10);
        ctx
    }
}

/// A derived project estimate. Recreated on every successful engine call;
/// absent whenever the selection is empty.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EstimateResult {
    /// "N-M weeks" or "N-M months".
    pub timeline_range: String,
    /// "$Ak-$Bk", lower bound first.
    pub investment_range: String,
    /// Effort/complexity rating, always within 1..=10.
    pub effort_rating: u8,
    /// Narrative insight for the visitor.
    pub insight: String,
}
