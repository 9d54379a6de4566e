//! Autocomplete suggestion generation.

use crate::config::{CompletionSettings, Prompts};
use crate::error::{Result, VidnotesError};
use crate::openai::{api_key_from_env, create_client};
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

/// Produces a continuation of the user's notes.
#[async_trait]
pub trait Completer: Send + Sync {
    /// Suggest what comes next after `current_text`, grounded in `context`.
    async fn complete(&self, current_text: &str, context: &str) -> Result<String>;
}

/// Chat-completion backed suggestion generator.
pub struct ChatCompleter {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_tokens: u32,
    prompts: Prompts,
}

impl ChatCompleter {
    /// Create a completer from settings, reading the API key from the environment.
    pub fn from_settings(settings: &CompletionSettings, prompts: Prompts, timeout: Duration) -> Result<Self> {
        let api_key = api_key_from_env(&settings.api_key_env)?;
        let client = create_client(&settings.api_base, &api_key, timeout)?;
        Ok(Self {
            client,
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            prompts,
        })
    }

    /// Build the system and user messages for a request.
    fn build_messages(&self, current_text: &str, context: &str) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context.to_string());
        vars.insert("current_text".to_string(), current_text.to_string());

        let user_prompt = self
            .prompts
            .render_with_custom(&self.prompts.autocomplete.user, &vars);

        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(self.prompts.autocomplete.system.clone())
                .build()
                .map_err(|e| VidnotesError::Completion(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| VidnotesError::Completion(e.to_string()))?
                .into(),
        ])
    }
}

#[async_trait]
impl Completer for ChatCompleter {
    #[allow(deprecated)]
    #[instrument(skip(self, current_text, context), fields(model = %self.model))]
    async fn complete(&self, current_text: &str, context: &str) -> Result<String> {
        let messages = self.build_messages(current_text, context)?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .build()
            .map_err(|e| VidnotesError::Completion(e.to_string()))?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| VidnotesError::Completion(format!("Language model API error: {}", e)))?;

        let suggestion = response
            .choices
            .first()
            .and_then(|c| c.message.content.as_ref())
            .ok_or_else(|| VidnotesError::Completion("Empty response from language model".to_string()))?
            .trim()
            .to_string();

        debug!("Generated suggestion ({} chars)", suggestion.len());
        Ok(suggestion)
    }
}
