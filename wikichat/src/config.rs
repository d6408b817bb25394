use anyhow::{anyhow, Result};
use std::env;

const DEFAULT_KEYSPACE: &str = "default_keyspace";

/// Connection details for the Astra DB Data API.
#[derive(Debug, Clone)]
pub struct AstraConfig {
    pub token: String,
    pub endpoint: String,
    pub keyspace: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub astra: AstraConfig,
    /// Collection holding the embedded Wikipedia chunks.
    pub collection: String,
    /// Collection holding the precomputed `recent_articles` record.
    pub suggestions_collection: String,
    pub cohere_api_key: String,
    pub openai_api_key: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first required variable that is not set.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            astra: AstraConfig {
                token: required("ASTRA_DB_APPLICATION_TOKEN")?,
                endpoint: required("ASTRA_DB_ENDPOINT")?,
                keyspace: env::var("ASTRA_DB_NAMESPACE")
                    .unwrap_or_else(|_| DEFAULT_KEYSPACE.to_string()),
            },
            collection: required("ASTRA_DB_COLLECTION")?,
            suggestions_collection: required("ASTRA_DB_SUGGESTIONS_COLLECTION")?,
            cohere_api_key: required("COHERE_API_KEY")?,
            openai_api_key: required("OPENAI_API_KEY")?,
        })
    }
}

fn required(var: &str) -> Result<String> {
    env::var(var).map_err(|_| anyhow!("${var} not set"))
}
