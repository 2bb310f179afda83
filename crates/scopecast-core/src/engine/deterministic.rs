//! Closed-form estimation engine.
//!
//! Per-service base weeks scaled by timeline urgency, per-service base
//! rate scaled by complexity, and an effort rating aggregated from the
//! context fields. The narrative insight comes from a small template set;
//! the template choice is random but the random source is injectable so
//! tests can pin it.

use async_trait::async_trait;
use rand::Rng;

use crate::core_types::{EstimateResult, ProjectContext, TeamSize, Timeline};
use crate::engine::Engine;
use crate::errors::EstimatorError;

const BASE_WEEKS_PER_SERVICE: f64 = 2.0;
const BASE_RATE_PER_SERVICE: f64 = 15_000.0;
const INSIGHT_TEMPLATE_COUNT: usize = 3;

/// Picks a template index given the number of available templates.
pub type InsightPicker = Box<dyn Fn(usize) -> usize + Send + Sync>;

pub struct DeterministicEngine {
    picker: InsightPicker,
}

impl DeterministicEngine {
    pub fn new() -> Self {
        Self {
            picker: Box::new(|count| rand::thread_rng().gen_range(0..count)),
        }
    }

    /// Replaces the random template choice, e.g. to pin a template in tests.
    pub fn with_insight_picker<F>(mut self, picker: F) -> Self
    where
        F: Fn(usize) -> usize + Send + Sync + 'static,
    {
        self.picker = Box::new(picker);
        self
    }

    fn calculate(
        &self,
        selected: &[String],
        context: &ProjectContext,
    ) -> EstimateResult {
        let context = context.clamped();
        let total_services = selected.len() as f64;

        let timeline_multiplier = match context.timeline {
            Timeline::Urgent => 0.8,
            Timeline::Normal => 1.0,
            Timeline::Flexible => 1.2,
        };

        let base_weeks = total_services * BASE_WEEKS_PER_SERVICE;
        let min_weeks = (base_weeks * timeline_multiplier * 0.8).round().max(4.0) as u64;
        // The raw upper bound can undercut the 4-week floor for small
        // selections, so it is lifted to keep the range ordered.
        let max_weeks = ((base_weeks * timeline_multiplier * 1.2).round() as u64).max(min_weeks);

        let investment_multiplier = 1.0 + (f64::from(context.complexity) - 5.0) * 0.1;
        let min_investment = round_to_thousand(
            BASE_RATE_PER_SERVICE * total_services * investment_multiplier * 0.9,
        );
        let max_investment = round_to_thousand(
            BASE_RATE_PER_SERVICE * total_services * investment_multiplier * 1.1,
        )
        .max(min_investment);

        let raw_rating = (f64::from(context.complexity)
            + total_services
            + f64::from(context.api_integrations) * 0.5
            + context.data_volume.effort_bonus()
            + if context.system_integration { 1.0 } else { 0.0 })
            / 2.0;
        let effort_rating = (raw_rating.round() as i64).clamp(1, 10) as u8;

        let insight = self.pick_insight(context.team_size, effort_rating);

        EstimateResult {
            timeline_range: format!("{}-{} weeks", min_weeks, max_weeks),
            investment_range: format!(
                "${}k-${}k",
                min_investment / 1000,
                max_investment / 1000
            ),
            effort_rating,
            insight,
        }
    }

    fn pick_insight(&self, team_size: TeamSize, rating: u8) -> String {
        let index = (self.picker)(INSIGHT_TEMPLATE_COUNT) % INSIGHT_TEMPLATE_COUNT;
        match index {
            0 => format!(
                "Based on your selections, we recommend a {}.",
                if team_size == TeamSize::Small {
                    "focused agile team"
                } else {
                    "scaled agile approach"
                }
            ),
            1 => format!(
                "This project's complexity suggests {} would be optimal.",
                if rating > 7 {
                    "a phased delivery approach"
                } else {
                    "an iterative development cycle"
                }
            ),
            _ => "With the current scope, we can deliver impactful results within the estimated timeline."
                .to_string(),
        }
    }
}

impl Default for DeterministicEngine {
    fn default() -> Self {
        Self::new()
    }
}

fn round_to_thousand(amount: f64) -> u64 {
    ((amount / 1000.0).round() as u64) * 1000
}

#[async_trait]
impl Engine for DeterministicEngine {
    async fn estimate(
        &self,
        selected: &[String],
        context: &ProjectContext,
    ) -> Result<EstimateResult, EstimatorError> {
        if selected.is_empty() {
            return Err(EstimatorError::EmptySelection);
        }
        Ok(self.calculate(selected, context))
    }
}
