use anyhow::{anyhow, Result};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

use crate::config::AstraConfig;

const API_PATH: &str = "api/json/v1";

pub struct AstraDb {
    client: Client,
    token: String,
    base_url: String,
}

impl AstraDb {
    #[must_use]
    pub fn new(config: &AstraConfig) -> Self {
        Self {
            client: Client::new(),
            token: config.token.clone(),
            base_url: format!(
                "{}/{API_PATH}/{}",
                config.endpoint.trim_end_matches('/'),
                config.keyspace
            ),
        }
    }

    #[must_use]
    pub fn collection(&self, name: &str) -> Collection {
        Collection::new(
            self.client.clone(),
            self.token.clone(),
            format!("{}/{name}", self.base_url),
        )
    }
}

#[derive(Debug, serde::Deserialize)]
struct CommandError {
    message: String,
}

#[derive(Debug, serde::Deserialize)]
struct CommandResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<CommandError>,
}

#[derive(Debug, serde::Deserialize)]
struct Documents<T> {
    documents: Vec<T>,
}

#[derive(Debug, serde::Deserialize)]
struct SingleDocument<T> {
    document: Option<T>,
}

pub struct Collection {
    client: Client,
    token: String,
    url: String,
}

impl Collection {
    pub const fn new(client: Client, token: String, url: String) -> Self {
        Self { client, token, url }
    }

    /// Returns the `limit` documents closest to `vector`, without their stored vectors.
    ///
    /// # Errors
    ///
    /// This function will return an error if the Data API rejects the command.
    pub async fn vector_find<T: DeserializeOwned>(
        &self,
        vector: Vec<f32>,
        limit: usize,
    ) -> Result<Vec<T>> {
        let data = self
            .command(json!({
                "find": {
                    "sort": { "$vector": vector },
                    "projection": { "$vector": 0 },
                    "options": { "limit": limit },
                }
            }))
            .await?;

        let Documents { documents } = serde_json::from_value(data)?;
        debug!("Found {} documents", documents.len());

        Ok(documents)
    }

    /// Finds a single document matching `filter`, returning only the projected fields.
    ///
    /// # Errors
    ///
    /// This function will return an error if the Data API rejects the command.
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        filter: Value,
        projection: Value,
    ) -> Result<Option<T>> {
        let data = self
            .command(json!({
                "findOne": {
                    "filter": filter,
                    "projection": projection,
                }
            }))
            .await?;

        let SingleDocument { document } = serde_json::from_value(data)?;

        Ok(document)
    }

    async fn command(&self, body: Value) -> Result<Value> {
        let response: CommandResponse = self
            .client
            .post(&self.url)
            .header("Token", &self.token)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        into_data(response)
    }
}

/// The Data API reports command failures in the body, even on a successful HTTP status.
fn into_data(response: CommandResponse) -> Result<Value> {
    if !response.errors.is_empty() {
        let messages = response
            .errors
            .into_iter()
            .map(|e| e.message)
            .collect::<Vec<_>>();

        return Err(anyhow!("Astra DB command failed: {}", messages.join("; ")));
    }

    response
        .data
        .ok_or_else(|| anyhow!("No data field in response"))
}
