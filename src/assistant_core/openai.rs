use anyhow::{anyhow, Result};
use async_openai::{
    config::OpenAIConfig,
    types::{self as openai_types, ChatCompletionRequestMessageArgs},
    Client,
};
use async_trait::async_trait;

use super::error::GenerationError;
use super::generator::Generator;

type ModelArgs = openai_types::CreateChatCompletionRequestArgs;

/// Generator backed by an OpenAI-compatible chat completion endpoint. Point
/// `api_base` at a local server to host the model yourself.
pub struct OpenAiGenerator {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u16,
}

impl OpenAiGenerator {
    pub fn new(model: &str, api_base: Option<&str>, max_tokens: u16) -> OpenAiGenerator {
        let mut config = OpenAIConfig::new();
        if let Some(api_base) = api_base {
            config = config.with_api_base(api_base);
        }
        OpenAiGenerator {
            client: Client::with_config(config),
            model: model.to_string(),
            max_tokens,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn chat_once(&self, prompt: &str) -> Result<String> {
        let request = ModelArgs::default()
            .max_tokens(self.max_tokens)
            .model(&self.model)
            .messages([ChatCompletionRequestMessageArgs::default()
                .role(openai_types::Role::User)
                .content(prompt)
                .build()?])
            .build()?;

        let response = self
            .client
            .chat()
            .create(request)
            .await?
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("Model returned no choices"))?
            .message;

        Ok(response.content.unwrap_or_default())
    }
}

#[async_trait]
impl Generator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let reply = self.chat_once(prompt).await?;
        let reply = reply.trim();
        if reply.is_empty() {
            return Err(GenerationError::EmptyOutput);
        }
        Ok(reply.to_string())
    }
}
