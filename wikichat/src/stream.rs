use anyhow::{anyhow, Result};
use futures::{future, stream, Stream, StreamExt};
use map_macro::map;
use std::pin::Pin;
use tracing::{debug, warn};

use crate::{
    chat::{format_chat_history, ChatMessage},
    document::{combine_documents, suggestions_context},
    openai::{LanguageModel, ModelParams},
    prompt,
    store::{Retriever, SuggestionStore},
};

/// Number of documents retrieved as context for a chat question.
pub const CONTEXT_DOCUMENTS: usize = 10;
/// Identifier of the precomputed record in the suggestions collection.
pub const RECENT_ARTICLES: &str = "recent_articles";

pub type TokenStream = Pin<Box<dyn Stream<Item = Result<String>> + Send>>;

/// Renders the chat prompt for the last message of `messages`, using the rest as history.
///
/// # Errors
///
/// This function will return an error if `messages` is empty or the retriever fails.
pub async fn chat_prompt(retriever: &dyn Retriever, messages: &[ChatMessage]) -> Result<String> {
    let (question, history) = messages
        .split_last()
        .ok_or_else(|| anyhow!("Cannot answer an empty conversation"))?;

    let chat_history = format_chat_history(history);
    let documents = retriever
        .similarity_search(&question.content, CONTEXT_DOCUMENTS)
        .await?;
    debug!("Retrieved {} documents for question", documents.len());

    let context = combine_documents(&documents);

    prompt::CHAT.format(&map! {
        "context" => context.as_str(),
        "chat_history" => chat_history.as_str(),
        "question" => question.content.as_str()
    })
}

/// Answers the last message of a conversation with retrieved Wikipedia context.
///
/// # Errors
///
/// This function will return an error if retrieval, prompt rendering or the model call fails
/// before the first token is produced.
pub async fn answer(
    retriever: &dyn Retriever,
    model: &dyn LanguageModel,
    messages: &[ChatMessage],
    llm: Option<String>,
) -> Result<TokenStream> {
    let prompt = chat_prompt(retriever, messages).await?;
    let tokens = model.stream(&prompt, &ModelParams::chat(llm)).await?;

    prime(tokens).await
}

/// Renders the suggestions prompt. A failing store degrades to an empty context.
///
/// # Errors
///
/// This function will return an error if the prompt cannot be rendered.
pub async fn suggestions_prompt(store: &dyn SuggestionStore) -> Result<String> {
    let context = match store.find_by_id(RECENT_ARTICLES).await.and_then(|record| {
        suggestions_context(&record.into_iter().collect::<Vec<_>>())
    }) {
        Ok(context) => context,
        Err(e) => {
            warn!("Failed to query suggestions, continuing without context: {e:#}");
            String::new()
        }
    };

    prompt::SUGGESTIONS.format(&map! { "context" => context.as_str() })
}

/// Generates sample questions from the most recently added articles.
///
/// # Errors
///
/// This function will return an error if prompt rendering or the model call fails before the
/// first token is produced.
pub async fn suggest(store: &dyn SuggestionStore, model: &dyn LanguageModel) -> Result<TokenStream> {
    let prompt = suggestions_prompt(store).await?;
    let tokens = model.stream(&prompt, &ModelParams::suggestions()).await?;

    prime(tokens).await
}

/// Waits for the first token so provider failures surface before a response is started.
/// Later tokens are forwarded as they arrive.
///
/// # Errors
///
/// Returns the error of the first item, if it is one.
pub async fn prime(mut tokens: TokenStream) -> Result<TokenStream> {
    match tokens.next().await {
        Some(Ok(first)) => Ok(Box::pin(
            stream::once(future::ready(Ok(first))).chain(tokens),
        )),
        Some(Err(e)) => Err(e),
        None => Ok(Box::pin(stream::empty::<Result<String>>())),
    }
}
