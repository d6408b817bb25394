use anyhow::Result;
use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::{
    astra::Collection,
    document::{Document, Metadata, SuggestionRecord},
};

/// Produces the vector used to query the vector store.
#[async_trait]
pub trait Embedder: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;
}

#[async_trait]
pub trait Retriever: Send + Sync {
    /// Returns the `k` documents most similar to `query`, most relevant first.
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>>;
}

#[async_trait]
pub trait SuggestionStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<SuggestionRecord>>;
}

/// Page text lives under `content`; metadata fields sit next to it at the top level.
#[derive(Debug, serde::Deserialize)]
struct StoredDocument {
    content: String,
    #[serde(flatten)]
    metadata: Metadata,
}

impl From<StoredDocument> for Document {
    fn from(stored: StoredDocument) -> Self {
        Self {
            page_content: stored.content,
            metadata: stored.metadata,
        }
    }
}

pub struct AstraVectorStore {
    collection: Collection,
    embedder: Arc<dyn Embedder>,
}

impl AstraVectorStore {
    #[must_use]
    pub fn new(collection: Collection, embedder: Arc<dyn Embedder>) -> Self {
        Self {
            collection,
            embedder,
        }
    }
}

#[async_trait]
impl Retriever for AstraVectorStore {
    async fn similarity_search(&self, query: &str, k: usize) -> Result<Vec<Document>> {
        let vector = self.embedder.embed(query).await?;
        let documents = self
            .collection
            .vector_find::<StoredDocument>(vector, k)
            .await?;

        Ok(documents.into_iter().map(Into::into).collect())
    }
}

pub struct AstraSuggestions {
    collection: Collection,
}

impl AstraSuggestions {
    #[must_use]
    pub const fn new(collection: Collection) -> Self {
        Self { collection }
    }
}

#[async_trait]
impl SuggestionStore for AstraSuggestions {
    async fn find_by_id(&self, id: &str) -> Result<Option<SuggestionRecord>> {
        self.collection
            .find_one(
                json!({ "_id": id }),
                json!({
                    "recent_articles.metadata.title": 1,
                    "recent_articles.suggested_chunks.content": 1,
                }),
            )
            .await
    }
}
