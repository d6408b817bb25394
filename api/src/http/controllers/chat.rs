use axum::extract::State;
use axum_jsonschema::Json;
use schemars::JsonSchema;
use wikichat::ChatMessage;

use crate::axum::{
    errors::{ApiError, ApiResult},
    state::AppState,
    stream::StreamingText,
};

#[derive(Debug, serde::Deserialize, JsonSchema)]
pub struct ChatRequest {
    messages: Vec<ChatMessage>,
    llm: Option<String>,
}

pub async fn stream(
    State(state): State<AppState>,
    Json(ChatRequest { messages, llm }): Json<ChatRequest>,
) -> ApiResult<StreamingText> {
    if messages.is_empty() {
        return Err(ApiError::ClientError("No messages provided.".to_string()));
    }

    let tokens = wikichat::answer(&*state.retriever, &*state.model, &messages, llm)
        .await
        .map_err(|e| state.report(e))?;

    Ok(StreamingText::new(tokens, state.reporter.clone()))
}
