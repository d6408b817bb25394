#![warn(clippy::all, clippy::pedantic, clippy::nursery)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use futures::StreamExt;
use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::debug;
use tracing_subscriber::{
    prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use ::wikichat::{
    answer, document::combine_documents, stream::CONTEXT_DOCUMENTS, suggest, AstraDb,
    AstraSuggestions, AstraVectorStore, ChatMessage, Cohere, Config, OpenAI, Retriever,
    TokenStream,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Answers a question with Wikipedia context.
    Ask {
        query: String,
        #[arg(long)]
        llm: Option<String>,
    },
    /// Generates sample questions from the most recent articles.
    Suggest,
    /// Prints the context retrieved for a question.
    Search {
        query: String,
        #[arg(long, default_value_t = CONTEXT_DOCUMENTS)]
        limit: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "cli=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let config = Config::from_env()?;
    let astra = AstraDb::new(&config.astra);
    let retriever = AstraVectorStore::new(
        astra.collection(&config.collection),
        Arc::new(Cohere::new(&config.cohere_api_key)),
    );

    match cli.command {
        Commands::Ask { query, llm } => {
            let model = OpenAI::new(&config.openai_api_key);
            let tokens = answer(&retriever, &model, &[ChatMessage::user(query)], llm).await?;

            print_tokens(tokens).await?;
        }
        Commands::Suggest => {
            let model = OpenAI::new(&config.openai_api_key);
            let store = AstraSuggestions::new(astra.collection(&config.suggestions_collection));
            let tokens = suggest(&store, &model).await?;

            print_tokens(tokens).await?;
        }
        Commands::Search { query, limit } => {
            let documents = retriever.similarity_search(&query, limit).await?;
            debug!("Retrieved {} documents", documents.len());

            println!("{}", combine_documents(&documents));
        }
    }

    Ok(())
}

async fn print_tokens(mut tokens: TokenStream) -> Result<()> {
    let mut stdout = io::stdout();

    while let Some(token) = tokens.next().await {
        write!(stdout, "{}", token?)?;
        stdout.flush()?;
    }

    writeln!(stdout)?;

    Ok(())
}
