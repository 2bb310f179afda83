//! Remote estimation engine backed by a hosted text-generation model.
//!
//! One chat-completions exchange per estimate: the prompt built by
//! `engine::prompt` goes out with a system instruction and a JSON response
//! format hint, and the reply must be a JSON object carrying the estimate
//! fields. A reply that is empty, not JSON, or missing a required field is
//! an invalid-reply failure; there is no deterministic fallback.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};

use crate::catalog::Catalog;
use crate::core_types::{EstimateResult, ProjectContext};
use crate::engine::prompt::{build_estimation_prompt, SYSTEM_INSTRUCTION};
use crate::engine::Engine;
use crate::errors::EstimatorError;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RemoteEngine {
    client: Client,
    catalog: Catalog,
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
}

impl RemoteEngine {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            client: Client::new(),
            catalog: Catalog::standard(),
            api_key,
            api_base: DEFAULT_API_BASE.to_string(),
            model,
            temperature: 0.1,
            max_tokens: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_api_base(mut self, api_base: String) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn build_request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_INSTRUCTION },
                { "role": "user", "content": prompt },
            ],
            "temperature": self.temperature,
            "response_format": { "type": "json_object" },
        });

        if let Some(max_tokens) = self.max_tokens {
            body["max_tokens"] = max_tokens.into();
        }

        body
    }

    fn parse_reply(&self, response: Value) -> Result<EstimateResult, EstimatorError> {
        let choices = response["choices"]
            .as_array()
            .ok_or_else(|| EstimatorError::InvalidReply("No choices in response".to_string()))?;

        if choices.is_empty() {
            return Err(EstimatorError::InvalidReply(
                "Empty choices array".to_string(),
            ));
        }

        let content = choices[0]["message"]["content"]
            .as_str()
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| {
                EstimatorError::InvalidReply("Reply has no message content".to_string())
            })?;

        let estimate: Value = serde_json::from_str(content).map_err(|e| {
            EstimatorError::InvalidReply(format!("Reply content is not JSON: {}", e))
        })?;

        let timeline_range = required_string(&estimate, "timelineRange")?;
        let investment_range = required_string(&estimate, "investmentRange")?;
        let insight = required_string(&estimate, "aiInsight")?;

        // Both field names appear in the wild depending on the prompt
        // revision that produced the reply.
        let rating = estimate
            .get("levelOfEffort")
            .or_else(|| estimate.get("complexityRating"))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                EstimatorError::InvalidReply(
                    "Missing required field levelOfEffort/complexityRating".to_string(),
                )
            })?;
        let effort_rating = (rating.round() as i64).clamp(1, 10) as u8;

        Ok(EstimateResult {
            timeline_range,
            investment_range,
            effort_rating,
            insight,
        })
    }
}

fn required_string(estimate: &Value, field: &str) -> Result<String, EstimatorError> {
    estimate
        .get(field)
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .ok_or_else(|| {
            EstimatorError::InvalidReply(format!("Missing required field {}", field))
        })
}

#[async_trait]
impl Engine for RemoteEngine {
    async fn estimate(
        &self,
        selected: &[String],
        context: &ProjectContext,
    ) -> Result<EstimateResult, EstimatorError> {
        if selected.is_empty() {
            return Err(EstimatorError::EmptySelection);
        }

        let titles = self.catalog.titles_for(selected);
        let prompt = build_estimation_prompt(&titles, context);
        let url = format!("{}/chat/completions", self.api_base);
        let body = self.build_request_body(&prompt);

        log::debug!("Estimation request to {} for {} services", url, selected.len());

        let response = self
            .client
            .post(&url)
            .timeout(self.timeout)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| EstimatorError::EngineError(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|e| EstimatorError::EngineError(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(EstimatorError::EngineError(format!(
                "API request failed with status {}: {}",
                status, response_text
            )));
        }

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            EstimatorError::InvalidReply(format!("Invalid JSON response: {}", e))
        })?;

        self.parse_reply(response_json)
    }
}
