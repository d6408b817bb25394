use axum::extract::State;

use crate::axum::{errors::ApiResult, state::AppState, stream::StreamingText};

/// Suggests sample questions. The request body is ignored.
pub async fn stream(State(state): State<AppState>) -> ApiResult<StreamingText> {
    let tokens = wikichat::suggest(&*state.suggestions, &*state.model)
        .await
        .map_err(|e| state.report(e))?;

    Ok(StreamingText::new(tokens, state.reporter.clone()))
}
