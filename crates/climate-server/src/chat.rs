//! Conversational assistant backed by Vertex AI.
//!
//! Failures never reach the caller of [`reply_or_fallback`]; they are logged
//! and replaced with [`FALLBACK_REPLY`].

use futures::future::BoxFuture;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

/// Reply sent when the assistant backend fails.
pub const FALLBACK_REPLY: &str = "Sorry, something went wrong while generating a response.";

/// Reply sent when the backend answers without any candidate.
pub const EMPTY_REPLY: &str = "No response.";

const SYSTEM_INSTRUCTION: &str =
    "You are a helpful, explainable AI assistant for climate safety. Always explain your reasoning.";

const TEMPERATURE: f64 = 0.7;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("chat backend is not configured: {0}")]
    NotConfigured(&'static str),
    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("chat backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },
}

/// Text-in/text-out conversational capability.
pub trait ChatAssistant: Send + Sync {
    fn converse<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ChatError>>;
}

/// Ask the assistant, masking any failure behind the fixed fallback reply.
pub async fn reply_or_fallback(assistant: &dyn ChatAssistant, message: &str) -> String {
    match assistant.converse(message).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!("Chat assistant error: {}", err);
            FALLBACK_REPLY.to_string()
        }
    }
}

// === Vertex AI generateContent wire types ===

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
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
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, or [`EMPTY_REPLY`].
    fn first_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| EMPTY_REPLY.to_string())
    }
}

/// HTTP client for the Vertex AI `generateContent` endpoint.
pub struct VertexChatClient {
    client: Client,
    url: String,
    access_token: Option<String>,
}

impl VertexChatClient {
    pub fn new(config: &Config) -> Result<Self, ChatError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.chat_timeout_s.max(1)))
            .build()?;

        let base = config.vertex_endpoint.clone().unwrap_or_else(|| {
            format!("https://{}-aiplatform.googleapis.com", config.vertex_location)
        });
        let url = format!(
            "{}/v1/projects/{}/locations/{}/publishers/google/models/{}:generateContent",
            base.trim_end_matches('/'),
            config.vertex_project_id,
            config.vertex_location,
            config.vertex_model
        );

        Ok(Self {
            client,
            url,
            access_token: config.vertex_access_token.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn generate(&self, message: &str) -> Result<String, ChatError> {
        let token = self
            .access_token
            .as_deref()
            .ok_or(ChatError::NotConfigured("VERTEX_ACCESS_TOKEN is not set"))?;

        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_INSTRUCTION,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: message }],
            }],
            generation_config: GenerationConfig {
                temperature: TEMPERATURE,
            },
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(token)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status { status, body });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        Ok(parsed.first_text())
    }
}

impl ChatAssistant for VertexChatClient {
    fn converse<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
        Box::pin(self.generate(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::FutureExt;

    struct Echo;

    impl ChatAssistant for Echo {
        fn converse<'a>(&'a self, message: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
            async move { Ok(format!("echo: {message}")) }.boxed()
        }
    }

    struct Broken;

    impl ChatAssistant for Broken {
        fn converse<'a>(&'a self, _message: &'a str) -> BoxFuture<'a, Result<String, ChatError>> {
            async move { Err(ChatError::NotConfigured("test")) }.boxed()
        }
    }

    fn test_config() -> Config {
        let mut config = Config::from_env();
        config.vertex_project_id = "demo-project".to_string();
        config.vertex_location = "europe-west4".to_string();
        config.vertex_model = "gemini-1.5-pro".to_string();
        config.vertex_endpoint = None;
        config.vertex_access_token = None;
        config
    }

    #[tokio::test]
    async fn successful_reply_passes_through() {
        assert_eq!(reply_or_fallback(&Echo, "hi").await, "echo: hi");
    }

    #[tokio::test]
    async fn failure_becomes_fallback() {
        assert_eq!(reply_or_fallback(&Broken, "hi").await, FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn missing_token_is_masked() {
        let client = VertexChatClient::new(&test_config()).unwrap();
        assert_eq!(reply_or_fallback(&client, "hi").await, FALLBACK_REPLY);
    }

    #[test]
    fn builds_regional_url() {
        let client = VertexChatClient::new(&test_config()).unwrap();
        assert_eq!(
            client.url(),
            "https://europe-west4-aiplatform.googleapis.com/v1/projects/demo-project/locations/europe-west4/publishers/google/models/gemini-1.5-pro:generateContent"
        );
    }

    #[test]
    fn request_body_shape() {
        let request = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part { text: "sys" }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part { text: "hello" }],
            }],
            generation_config: GenerationConfig { temperature: 0.7 },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["systemInstruction"]["parts"][0]["text"], "sys");
        assert!(value["systemInstruction"].get("role").is_none());
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["generationConfig"]["temperature"], 0.7);
    }

    #[test]
    fn takes_first_candidate_text() {
        let parsed: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [
                {"content": {"role": "model", "parts": [{"text": "Flood risk "}, {"text": "is low."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(parsed.first_text(), "Flood risk is low.");
    }

    #[test]
    fn no_candidates_gives_empty_reply() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.first_text(), EMPTY_REPLY);
    }
}
