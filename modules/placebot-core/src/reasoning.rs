use std::time::Duration;

use async_trait::async_trait;
use foursquare_client::Place;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PlacebotError;

const OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Bounded so a slow model call cannot hold a request open indefinitely.
const REASONING_TIMEOUT: Duration = Duration::from_secs(30);

const SYSTEM_PROMPT: &str = "You are an expert assistant for location recommendations.";
const TEMPERATURE: f32 = 0.5;

/// Ranks and describes candidate places in prose.
///
/// Implementations may fail for any reason; the engine treats every error as
/// "no reasoning available" and falls back to local ranking, so failure here
/// is an ordinary branch, never a hard stop.
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn reason(&self, query: &str, places: &[Place]) -> Result<String, PlacebotError>;
}

/// Enumerate places 1-indexed as "N. name - address" and ask for a ranked,
/// descriptive narrative. The coziness hint is a fixed instruction.
pub fn build_prompt(query: &str, places: &[Place]) -> String {
    let summary = places
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            format!(
                "{}. {} - {}",
                idx + 1,
                p.name,
                p.formatted_address().unwrap_or("Address unknown")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        "You are a location assistant. Based on the following places:\n{summary}\n\
         Rank and describe them in relation to '{query}' focusing on coziness and relevance."
    )
}

// --- OpenAI wire types ---

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

pub struct OpenAiReasoner {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiReasoner {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            base_url: OPENAI_API_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    fn headers(&self) -> Result<HeaderMap, PlacebotError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|e| PlacebotError::ReasoningUnavailable(e.to_string()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[async_trait]
impl Reasoner for OpenAiReasoner {
    async fn reason(&self, query: &str, places: &[Place]) -> Result<String, PlacebotError> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                WireMessage {
                    role: "user",
                    content: build_prompt(query, places),
                },
            ],
            temperature: TEMPERATURE,
        };

        debug!(model = %self.model, places = places.len(), "OpenAI reasoning request");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .headers(self.headers()?)
            .json(&request)
            .timeout(REASONING_TIMEOUT)
            .send()
            .await
            .map_err(|e| PlacebotError::ReasoningUnavailable(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(PlacebotError::ReasoningUnavailable(format!(
                "OpenAI API error ({status}): {body}"
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| PlacebotError::ReasoningUnavailable(e.to_string()))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| PlacebotError::ReasoningUnavailable("empty completion".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use foursquare_client::Location;

    fn place(name: &str, address: Option<&str>) -> Place {
        Place {
            fsq_id: name.to_string(),
            name: name.to_string(),
            categories: Vec::new(),
            location: address.map(|a| Location {
                formatted_address: Some(a.to_string()),
            }),
            distance: None,
        }
    }

    #[test]
    fn prompt_enumerates_places_one_indexed() {
        let places = vec![
            place("First Roast", Some("1 Main St")),
            place("Bean There", None),
        ];
        let prompt = build_prompt("cozy coffee", &places);
        assert!(prompt.contains("1. First Roast - 1 Main St"));
        assert!(prompt.contains("2. Bean There - Address unknown"));
        assert!(prompt.contains("'cozy coffee'"));
        assert!(prompt.contains("coziness"));
    }
}
