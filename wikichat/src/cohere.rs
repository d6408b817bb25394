use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;

use crate::store::Embedder;

const EMBED_URL: &str = "https://api.cohere.ai/v1/embed";
const EMBEDDING_MODEL: &str = "embed-english-v3.0";

pub struct Cohere {
    client: Client,
    api_key: String,
}

#[derive(Debug, serde::Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

impl Cohere {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Embedder for Cohere {
    /// Embeds a search query with Cohere's English v3 model.
    ///
    /// # Errors
    ///
    /// This function will return an error if the Embed API returns an error.
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let response: EmbedResponse = self
            .client
            .post(EMBED_URL)
            .bearer_auth(&self.api_key)
            .json(&json!({
                "texts": [text],
                "model": EMBEDDING_MODEL,
                "input_type": "search_query",
            }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response
            .embeddings
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Could not find embedding"))
    }
}
