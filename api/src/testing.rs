use anyhow::{anyhow, Result};
use async_trait::async_trait;
use futures::stream;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};
use wikichat::{
    Document, LanguageModel, ModelParams, Retriever, SuggestionRecord, SuggestionStore,
    TokenStream,
};

use crate::{
    axum::state::{AppState, State},
    utils::reporter::ErrorReporter,
};

pub struct StaticRetriever(pub Vec<Document>);

#[async_trait]
impl Retriever for StaticRetriever {
    async fn similarity_search(&self, _: &str, k: usize) -> Result<Vec<Document>> {
        Ok(self.0.iter().take(k).cloned().collect())
    }
}

/// Stands in for an unreachable vector store.
pub struct FailingRetriever;

#[async_trait]
impl Retriever for FailingRetriever {
    async fn similarity_search(&self, _: &str, _: usize) -> Result<Vec<Document>> {
        Err(anyhow!("Cohere embed request failed"))
    }
}

pub enum MockStore {
    Record(Option<SuggestionRecord>),
    Unavailable,
}

#[async_trait]
impl SuggestionStore for MockStore {
    async fn find_by_id(&self, _: &str) -> Result<Option<SuggestionRecord>> {
        match self {
            Self::Record(record) => Ok(record.clone()),
            Self::Unavailable => Err(anyhow!("Astra DB unreachable")),
        }
    }
}

pub enum Reply {
    Tokens(Vec<&'static str>),
    /// Fails before producing anything.
    Refuse,
    /// Produces the given tokens, then fails.
    Interrupt(Vec<&'static str>),
}

pub struct MockModel {
    reply: Reply,
    pub prompts: Mutex<Vec<(String, ModelParams)>>,
}

impl MockModel {
    pub fn new(reply: Reply) -> Self {
        Self {
            reply,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LanguageModel for MockModel {
    async fn stream(&self, prompt: &str, params: &ModelParams) -> Result<TokenStream> {
        self.prompts
            .lock()
            .unwrap()
            .push((prompt.to_string(), params.clone()));

        let items: Vec<Result<String>> = match &self.reply {
            Reply::Tokens(tokens) => tokens.iter().map(|t| Ok((*t).to_string())).collect(),
            Reply::Refuse => vec![Err(anyhow!("OpenAI rate limit exceeded"))],
            Reply::Interrupt(tokens) => tokens
                .iter()
                .map(|t| Ok((*t).to_string()))
                .chain([Err(anyhow!("connection reset"))])
                .collect(),
        };

        Ok(Box::pin(stream::iter(items)))
    }
}

#[derive(Default)]
pub struct CountingReporter(AtomicUsize);

impl CountingReporter {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

impl ErrorReporter for CountingReporter {
    fn report(&self, _: &anyhow::Error) {
        self.0.fetch_add(1, Ordering::SeqCst);
    }
}

pub struct Harness {
    pub state: AppState,
    pub model: Arc<MockModel>,
    pub reporter: Arc<CountingReporter>,
}

pub fn harness(documents: Vec<Document>, store: MockStore, reply: Reply) -> Harness {
    harness_with_retriever(Arc::new(StaticRetriever(documents)), store, reply)
}

pub fn harness_with_retriever(
    retriever: Arc<dyn Retriever>,
    store: MockStore,
    reply: Reply,
) -> Harness {
    let model = Arc::new(MockModel::new(reply));
    let reporter = Arc::new(CountingReporter::default());

    let state = Arc::new(State {
        retriever,
        suggestions: Arc::new(store),
        model: model.clone(),
        reporter: reporter.clone(),
    });

    Harness {
        state,
        model,
        reporter,
    }
}
