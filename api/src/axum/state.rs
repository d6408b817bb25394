use std::sync::Arc;
use wikichat::{
    AstraDb, AstraSuggestions, AstraVectorStore, Cohere, Config, LanguageModel, OpenAI, Retriever,
    SuggestionStore,
};

use crate::{axum::errors::ApiError, utils::reporter::ErrorReporter};

/// Provider clients shared by every request. Nothing in here is mutated after startup.
pub struct State {
    pub retriever: Arc<dyn Retriever>,
    pub suggestions: Arc<dyn SuggestionStore>,
    pub model: Arc<dyn LanguageModel>,
    pub reporter: Arc<dyn ErrorReporter>,
}

#[allow(clippy::module_name_repetitions)]
pub type AppState = Arc<State>;

impl State {
    /// Hands `error` to the error tracker and turns it into a server error response.
    pub fn report(&self, error: anyhow::Error) -> ApiError {
        tracing::error!("Request failed: {error:#}");
        self.reporter.report(&error);

        ApiError::ServerError(error)
    }
}

pub fn create(config: &Config, reporter: Arc<dyn ErrorReporter>) -> AppState {
    let astra = AstraDb::new(&config.astra);
    let embedder = Arc::new(Cohere::new(&config.cohere_api_key));

    Arc::new(State {
        reporter,
        model: Arc::new(OpenAI::new(&config.openai_api_key)),
        retriever: Arc::new(AstraVectorStore::new(
            astra.collection(&config.collection),
            embedder,
        )),
        suggestions: Arc::new(AstraSuggestions::new(
            astra.collection(&config.suggestions_collection),
        )),
    })
}
