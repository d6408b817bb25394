#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

mod astra;
pub mod chat;
mod cohere;
mod config;
pub mod document;
pub mod openai;
pub mod prompt;
pub mod store;
pub mod stream;

pub use astra::{AstraDb, Collection};
pub use chat::{ChatMessage, Role};
pub use cohere::Cohere;
pub use config::{AstraConfig, Config};
pub use document::{Document, Metadata, SuggestionRecord};
pub use openai::{LanguageModel, ModelKind, ModelParams, OpenAI};
pub use store::{AstraSuggestions, AstraVectorStore, Embedder, Retriever, SuggestionStore};
pub use stream::{answer, suggest, TokenStream};
