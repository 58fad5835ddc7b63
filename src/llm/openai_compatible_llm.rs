use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, trace};

use super::interface::{ChatMessage, OutputSchema, StructuredLLMInterface};
use crate::error::GenerationError;

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    response_format: ResponseFormat<'a>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ResponseFormat<'a> {
    #[serde(rename = "json_schema")]
    JsonSchema { json_schema: JsonSchemaSpec<'a> },
}

#[derive(Debug, Serialize)]
struct JsonSchemaSpec<'a> {
    name: &'a str,
    schema: &'a serde_json::Value,
    strict: bool,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    refusal: Option<String>,
}

/// Chat-completions client for OpenAI and API-compatible hosts, using
/// `json_schema` structured outputs.
pub struct OpenAICompatibleLLM {
    client: Client,
    model: String,
    base_url: String,
    api_key: Option<String>,
    temperature: Option<f32>,
}

impl OpenAICompatibleLLM {
    pub fn new(
        model: String,
        base_url: String,
        api_key: Option<String>,
        temperature: Option<f32>,
    ) -> Self {
        info!(
            "Initialized OpenAICompatibleLLM: model={}, base_url={}",
            model, base_url
        );
        Self {
            client: Client::new(),
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            temperature,
        }
    }
}

#[async_trait]
impl StructuredLLMInterface for OpenAICompatibleLLM {
    async fn structured_completion(
        &self,
        messages: Vec<ChatMessage>,
        schema: &OutputSchema,
    ) -> Result<serde_json::Value, GenerationError> {
        let api_key = self.api_key.as_deref().ok_or(GenerationError::MissingApiKey)?;

        let request = ChatCompletionRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat::JsonSchema {
                json_schema: JsonSchemaSpec {
                    name: &schema.name,
                    schema: &schema.schema,
                    strict: true,
                },
            },
            temperature: self.temperature,
        };
        trace!("Chat completion request: {:?}", request);

        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!("HTTP error calling {}: {}", url, e);
                GenerationError::Http(e)
            })?;

        let status = response.status();
        debug!("Chat completion status: {}", status);
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Language model API error {}: {}", status, body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!("Failed to decode chat completion: {}", e);
            GenerationError::MalformedResponse(e.to_string())
        })?;

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or(GenerationError::NoChoices)?;

        if let Some(refusal) = choice.message.refusal {
            return Err(GenerationError::Refusal(refusal));
        }
        if choice.finish_reason.as_deref() == Some("length") {
            return Err(GenerationError::MalformedResponse(
                "output was truncated at the token limit".to_string(),
            ));
        }

        let content = choice.message.content.ok_or_else(|| {
            GenerationError::MalformedResponse("message has no content".to_string())
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}
