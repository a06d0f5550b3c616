//! Client for the hosted generative-text API.
//!
//! Every call asks for a JSON answer constrained by a response schema, then decodes the
//! text of the first candidate into the requested payload type.

use std::env;
use std::time::Duration;

use log::debug;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{ContentError, ContentProvider, GameConcept, LevelTheme, MarketingData};
use crate::config::ContentConfig;

/// Secondary variable consulted when the configured one is unset.
pub const GEMINI_KEY_ENV: &str = "GEMINI_API_KEY";

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
}

impl GeminiClient {
    pub fn from_config(config: &ContentConfig) -> Result<Self, ContentError> {
        let api_key = env::var(&config.api_key_env)
            .or_else(|_| env::var(GEMINI_KEY_ENV))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            api_key_env: config.api_key_env.clone(),
        })
    }

    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn generate<T: DeserializeOwned>(&self, prompt: &str, schema: Value) -> Result<T, ContentError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ContentError::MissingApiKey(self.api_key_env.clone()))?;

        let url = format!("{}/models/{}:generateContent", self.endpoint, self.model);
        debug!("Requesting content from {url}");

        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request_body(prompt, schema))
            .send()?;

        if !response.status().is_success() {
            return Err(ContentError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        extract_payload(&body)
    }
}

impl ContentProvider for GeminiClient {
    fn level_theme(&self, level: u32) -> Result<LevelTheme, ContentError> {
        self.generate(&level_prompt(level), level_schema())
    }

    fn concept(&self, topic: &str) -> Result<GameConcept, ContentError> {
        self.generate(&concept_prompt(topic), concept_schema())
    }

    fn marketing_strategy(&self, concept: &GameConcept) -> Result<MarketingData, ContentError> {
        self.generate(&marketing_prompt(concept), marketing_schema())
    }
}

#[must_use]
pub fn request_body(prompt: &str, schema: Value) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
        },
    })
}

/// Decodes the JSON text carried by the first candidate of a `generateContent` reply.
pub fn extract_payload<T: DeserializeOwned>(body: &str) -> Result<T, ContentError> {
    let envelope: GenerateResponse = serde_json::from_str(body)?;
    let text = envelope
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| ContentError::Malformed("response carries no text".to_string()))?;

    // The envelope parsed, so a bad payload means the model ignored the schema
    serde_json::from_str(&text).map_err(|e| ContentError::Malformed(e.to_string()))
}

#[must_use]
pub fn level_prompt(level: u32) -> String {
    format!(
        "Generate a creative theme for a casual puzzle game level (Level {level}).\n\
         Language: Russian.\n\
         Also provide a palette of 4 hex color codes that match the theme.\n\
         Also provide a short \"Fun Fact\" or \"Positive Affirmation\" in Russian related to the theme as a reward for solving it.\n\
         The theme should be relaxing (e.g., \"Forest Rain\", \"Space Walk\", \"Cat Cafe\")."
    )
}

#[must_use]
pub fn concept_prompt(topic: &str) -> String {
    format!(
        "Generate a casual puzzle game concept based on the theme: \"{topic}\".\n\
         Language: Russian.\n\
         Provide a catchy title, a tagline, a description of the fun factor, the core mechanic, and the visual style."
    )
}

#[must_use]
pub fn marketing_prompt(concept: &GameConcept) -> String {
    format!(
        "Generate a marketing strategy for a mobile game.\n\
         Game Title: {}\n\
         Description: {}\n\
         Language: Russian.\n\
         Provide an ad headline, a social media post text, target audience description, and monetization strategy.",
        concept.title, concept.core_mechanic
    )
}

fn string_object(fields: &[&str]) -> Value {
    let properties: serde_json::Map<String, Value> = fields
        .iter()
        .map(|field| ((*field).to_string(), json!({ "type": "STRING" })))
        .collect();
    json!({
        "type": "OBJECT",
        "properties": properties,
        "required": fields,
    })
}

#[must_use]
pub fn level_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "theme": { "type": "STRING", "description": "Title of the level theme in Russian" },
            "colors": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Array of 4 hex color strings",
            },
            "funFact": { "type": "STRING", "description": "A rewarding fun fact or message in Russian" },
        },
        "required": ["theme", "colors", "funFact"],
    })
}

#[must_use]
pub fn concept_schema() -> Value {
    string_object(&["title", "tagline", "funFactor", "coreMechanic", "visualStyle"])
}

#[must_use]
pub fn marketing_schema() -> Value {
    string_object(&["headline", "socialPost", "targetAudience", "monetizationStrategy"])
}
