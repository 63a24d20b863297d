use crate::config::Config;
use crate::record::{ContentIdeas, KeywordRecord};
use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;

/// Failure of a generation request: transport error, non-success status, or
/// a payload that does not match the requested shape. Carries the
/// human-readable message the surface shows.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct GenerationError {
    pub message: String,
}

impl GenerationError {
    pub fn new(message: impl Into<String>) -> Self {
        GenerationError {
            message: message.into(),
        }
    }
}

pub const KEYWORD_FETCH_FAILED: &str = "Failed to generate keyword ideas. The model may be unavailable or the request was malformed. Please try again later.";
pub const IDEAS_FETCH_FAILED: &str = "Failed to generate content ideas. Please try again.";

/// The only boundary that touches the network. The session is generic over
/// this trait so tests and demo mode can run without a key or a connection.
#[async_trait]
pub trait KeywordGateway {
    async fn generate_keywords(
        &self,
        topic: &str,
        country: &str,
    ) -> Result<Vec<KeywordRecord>, GenerationError>;

    async fn generate_content_ideas(
        &self,
        keyword: &str,
        topic: &str,
    ) -> Result<ContentIdeas, GenerationError>;
}

/// Gemini generateContent client. Both call kinds request a strictly-typed
/// JSON response via `responseSchema`; beyond the array/shape check on the
/// returned text the schema is trusted.
pub struct GeminiClient {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    keyword_count: u32,
    keyword_temperature: f32,
    keyword_top_p: f32,
    ideas_temperature: f32,
}

impl GeminiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let api_key = std::env::var(&config.api_key_env)
            .with_context(|| format!("{} environment variable not set", config.api_key_env))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("keyword-maestro/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GeminiClient {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            keyword_count: config.keyword_count,
            keyword_temperature: config.keyword_temperature,
            keyword_top_p: config.keyword_top_p,
            ideas_temperature: config.ideas_temperature,
        })
    }

    fn request_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }

    /// POST one prompt and return the first candidate's text.
    async fn generate(&self, prompt: &str, generation_config: Value) -> anyhow::Result<String> {
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": generation_config,
        });

        log::debug!("requesting generation from {}", self.request_url());
        let response = self
            .client
            .post(self.request_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            anyhow::bail!("generation request returned {status}: {detail}");
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .context("response contained no candidate text")?;

        Ok(text.trim().to_string())
    }
}

#[async_trait]
impl KeywordGateway for GeminiClient {
    async fn generate_keywords(
        &self,
        topic: &str,
        country: &str,
    ) -> Result<Vec<KeywordRecord>, GenerationError> {
        let prompt = keyword_prompt(topic, country, self.keyword_count);
        let generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": keyword_response_schema(),
            "temperature": self.keyword_temperature,
            "topP": self.keyword_top_p,
        });

        let text = self.generate(&prompt, generation_config).await.map_err(|e| {
            log::error!("keyword generation request failed: {e:#}");
            GenerationError::new(KEYWORD_FETCH_FAILED)
        })?;

        let records = parse_keyword_payload(&text).map_err(|e| {
            log::error!("keyword payload rejected: {e:#}");
            GenerationError::new(KEYWORD_FETCH_FAILED)
        })?;

        log::info!(
            "generated {} keywords for {topic:?} in {country}",
            records.len()
        );
        Ok(records)
    }

    async fn generate_content_ideas(
        &self,
        keyword: &str,
        topic: &str,
    ) -> Result<ContentIdeas, GenerationError> {
        let prompt = ideas_prompt(keyword, topic);
        let generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": ideas_response_schema(),
            "temperature": self.ideas_temperature,
        });

        let text = self.generate(&prompt, generation_config).await.map_err(|e| {
            log::error!("content ideas request failed: {e:#}");
            GenerationError::new(IDEAS_FETCH_FAILED)
        })?;

        parse_ideas_payload(&text).map_err(|e| {
            log::error!("content ideas payload rejected: {e:#}");
            GenerationError::new(IDEAS_FETCH_FAILED)
        })
    }
}

fn keyword_prompt(topic: &str, country: &str, count: u32) -> String {
    format!(
        "Act as a world-class YouTube SEO and content strategy expert, with deep \
         knowledge of Google's keyword analysis algorithms.\n\
         My channel is about: \"{topic}\".\n\
         My target audience is in: \"{country}\".\n\n\
         Generate a list of exactly {count} related long-tail keyword ideas that are \
         excellent for YouTube videos. These keywords should have high potential for \
         discovery on both Google Search and YouTube.\n\n\
         For each keyword, provide the following metrics, specifically tailored for \
         YouTube searches within \"{country}\":\n\
         1. searchVolume: a highly accurate estimated monthly YouTube search volume, \
         as precise as Google Keyword Planner would provide but calibrated for the \
         YouTube platform.\n\
         2. competition: an estimated competition level from other creators on \
         YouTube, as a score from 1 (Low Competition) to 100 (High Competition).\n\n\
         Return the result as a valid JSON array of objects. Do not include any \
         introductory text or markdown formatting."
    )
}

fn ideas_prompt(keyword: &str, topic: &str) -> String {
    format!(
        "As a YouTube content strategist for a channel about \"{topic}\", generate \
         content ideas for the keyword \"{keyword}\".\n\
         Provide exactly 3 unique, creative, and highly clickable YouTube video titles.\n\
         Also, write a sample YouTube video description (100-150 words) that is \
         engaging, SEO-optimized for the keyword, and includes a call-to-action (like \
         subscribing or commenting).\n\
         Return the result as a single JSON object."
    )
}

fn keyword_response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "keyword": {
                    "type": "STRING",
                    "description": "The generated long-tail keyword."
                },
                "searchVolume": {
                    "type": "INTEGER",
                    "description": "Estimated monthly search volume as a whole number."
                },
                "competition": {
                    "type": "INTEGER",
                    "description": "Estimated competition score from 1 (Low) to 100 (High)."
                }
            },
            "required": ["keyword", "searchVolume", "competition"]
        }
    })
}

fn ideas_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "titles": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 3 creative, engaging video titles."
            },
            "description": {
                "type": "STRING",
                "description": "A sample video description of roughly 100-150 words."
            }
        },
        "required": ["titles", "description"]
    })
}

/// The model is asked for a JSON array; anything else is a failure even if
/// it parses.
fn parse_keyword_payload(text: &str) -> anyhow::Result<Vec<KeywordRecord>> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        anyhow::bail!("model did not return a JSON array");
    }
    Ok(serde_json::from_value(value)?)
}

fn parse_ideas_payload(text: &str) -> anyhow::Result<ContentIdeas> {
    Ok(serde_json::from_str(text)?)
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_payload_parses_the_wire_shape() {
        let text = r#"[
            {"keyword": "cooking for beginners", "searchVolume": 5000, "competition": 20},
            {"keyword": "easy cooking tips", "searchVolume": 12000, "competition": 45}
        ]"#;
        let records = parse_keyword_payload(text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].keyword, "cooking for beginners");
        assert_eq!(records[0].search_volume, 5000);
        assert_eq!(records[1].competition, 45);
    }

    #[test]
    fn keyword_payload_rejects_non_arrays() {
        assert!(parse_keyword_payload(r#"{"keyword": "x"}"#).is_err());
        assert!(parse_keyword_payload("not json at all").is_err());
    }

    #[test]
    fn keyword_payload_rejects_missing_fields() {
        let text = r#"[{"keyword": "cooking", "searchVolume": 5000}]"#;
        assert!(parse_keyword_payload(text).is_err());
    }

    #[test]
    fn ideas_payload_parses_titles_and_description() {
        let text = r#"{
            "titles": ["One", "Two", "Three"],
            "description": "Watch and subscribe."
        }"#;
        let ideas = parse_ideas_payload(text).unwrap();
        assert_eq!(ideas.titles.len(), 3);
        assert_eq!(ideas.description, "Watch and subscribe.");
    }

    #[test]
    fn candidate_text_deserializes_from_a_full_response() {
        let raw = r#"{
            "candidates": [{
                "content": {
                    "parts": [{"text": "[]"}],
                    "role": "model"
                },
                "finishReason": "STOP"
            }]
        }"#;
        let response: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text = &response.candidates[0].content.parts[0].text;
        assert_eq!(text, "[]");
    }
}
