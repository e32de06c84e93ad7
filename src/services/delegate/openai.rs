//! Chat-completions delegate for any OpenAI-compatible endpoint
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    models::{Recommendation, RecommendationRequest},
    services::delegate::{RecommendationDelegate, DELEGATE_LIMIT},
};

const SYSTEM_PROMPT: &str = "You are a travel recommendation engine. Given categories, locations, \
dates, max distance and budget, produce a ranked list of trip activities as structured JSON with \
an array 'recommendations' of objects {title, location, category, estimatedCost, \
estimatedDistanceKm, durationHours, score}. Keep costs and distances realistic for Sri Lanka if \
locations are Sri Lankan.";

const TEMPERATURE: f64 = 0.3;

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiDelegate {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiDelegate {
    pub fn new(http_client: HttpClient, api_key: String, api_url: String, model: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    fn request_body(&self, request: &RecommendationRequest) -> AppResult<Value> {
        let user_content = serde_json::to_string(request)
            .map_err(|e| AppError::Internal(format!("Preference serialization error: {}", e)))?;

        Ok(json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_content }
            ],
            "response_format": { "type": "json_object" },
            "temperature": TEMPERATURE
        }))
    }
}

/// Extracts recommendation records from the model's JSON message
///
/// Unparseable content yields an empty list. The raw list is capped at
/// [`DELEGATE_LIMIT`] first; entries that still do not fit the record shape
/// are then skipped.
fn parse_recommendations(content: &str) -> Vec<Recommendation> {
    let parsed: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Delegate returned non-JSON content");
            return Vec::new();
        }
    };

    let Some(entries) = parsed.get("recommendations").and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .take(DELEGATE_LIMIT)
        .filter_map(|entry| match serde_json::from_value(entry.clone()) {
            Ok(rec) => Some(rec),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed delegate recommendation");
                None
            }
        })
        .collect()
}

#[async_trait::async_trait]
impl RecommendationDelegate for OpenAiDelegate {
    async fn recommend(&self, request: &RecommendationRequest) -> AppResult<Vec<Recommendation>> {
        let url = format!("{}/chat/completions", self.api_url);
        let body = self.request_body(request)?;

        tracing::debug!(model = %self.model, "Requesting recommendations from delegate");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Delegate(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Delegate(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|e| AppError::Delegate(format!("Malformed completion: {}", e)))?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_else(|| "{}".to_string());

        let recommendations = parse_recommendations(&content);

        tracing::info!(
            model = %self.model,
            results = recommendations.len(),
            "Delegate recommendations received"
        );

        Ok(recommendations)
    }
}
