use anyhow::Result;
use async_fn_stream::try_fn_stream;
use async_openai::{
    types::{
        ChatCompletionRequestMessageArgs, CreateChatCompletionRequestArgs,
        CreateCompletionRequestArgs, Role,
    },
    Client,
};
use async_trait::async_trait;
use backoff::ExponentialBackoffBuilder;
use futures::StreamExt;
use std::{sync::Arc, time::Duration};

use crate::stream::TokenStream;

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4";
pub const SUGGESTIONS_MODEL: &str = "gpt-3.5-turbo-instruct";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelKind {
    /// Served by the chat completions API; the prompt is sent as a single user message.
    Chat,
    /// Served by the legacy completions API.
    Completion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelParams {
    pub kind: ModelKind,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u16>,
}

impl ModelParams {
    #[must_use]
    pub fn chat(model: Option<String>) -> Self {
        Self {
            kind: ModelKind::Chat,
            model: model.unwrap_or_else(|| DEFAULT_CHAT_MODEL.to_string()),
            temperature: 0.5,
            max_tokens: None,
        }
    }

    #[must_use]
    pub fn suggestions() -> Self {
        Self {
            kind: ModelKind::Completion,
            model: SUGGESTIONS_MODEL.to_string(),
            temperature: 1.5,
            max_tokens: Some(256),
        }
    }
}

#[async_trait]
pub trait LanguageModel: Send + Sync {
    /// Starts generating a response to `prompt`, yielding text tokens as they arrive.
    async fn stream(&self, prompt: &str, params: &ModelParams) -> Result<TokenStream>;
}

pub struct OpenAI {
    client: Arc<Client>,
}

impl OpenAI {
    #[must_use]
    pub fn new(api_key: &str) -> Self {
        let backoff = ExponentialBackoffBuilder::new()
            .with_max_elapsed_time(Some(Duration::from_secs(60)))
            .build();

        Self {
            client: Arc::new(
                Client::new()
                    .with_api_key(api_key)
                    .with_backoff(backoff),
            ),
        }
    }

    fn stream_chat(&self, prompt: &str, params: &ModelParams) -> Result<TokenStream> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&params.model)
            .temperature(params.temperature)
            .stream(true)
            .messages([ChatCompletionRequestMessageArgs::default()
                .role(Role::User)
                .content(prompt)
                .build()?])
            .build()?;

        let client = self.client.clone();

        Ok(Box::pin(try_fn_stream(|emitter| async move {
            let mut responses = client.chat().create_stream(request).await?;

            while let Some(response) = responses.next().await {
                for choice in response?.choices {
                    if let Some(content) = choice.delta.content {
                        if !content.is_empty() {
                            emitter.emit(content).await;
                        }
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        })))
    }

    fn stream_completion(&self, prompt: &str, params: &ModelParams) -> Result<TokenStream> {
        let mut args = CreateCompletionRequestArgs::default();
        args.model(&params.model)
            .prompt(prompt)
            .temperature(params.temperature)
            .stream(true);

        if let Some(max_tokens) = params.max_tokens {
            args.max_tokens(max_tokens);
        }

        let request = args.build()?;
        let client = self.client.clone();

        Ok(Box::pin(try_fn_stream(|emitter| async move {
            let mut responses = client.completions().create_stream(request).await?;

            while let Some(response) = responses.next().await {
                for choice in response?.choices {
                    if !choice.text.is_empty() {
                        emitter.emit(choice.text).await;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        })))
    }
}

#[async_trait]
impl LanguageModel for OpenAI {
    async fn stream(&self, prompt: &str, params: &ModelParams) -> Result<TokenStream> {
        match params.kind {
            ModelKind::Chat => self.stream_chat(prompt, params),
            ModelKind::Completion => self.stream_completion(prompt, params),
        }
    }
}
