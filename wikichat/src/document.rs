use anyhow::Result;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct Metadata {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
}

/// A chunk of a Wikipedia page returned by the vector store.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: Metadata,
}

/// Serializes retrieved documents into the context blob handed to the chat prompt.
#[must_use]
pub fn combine_documents(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| {
            format!(
                "\nTitle: {}\nURL: {}\nContent: {}",
                doc.metadata.title, doc.metadata.url, doc.page_content
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct ArticleMetadata {
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct SuggestedChunk {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct RecentArticle {
    #[serde(default)]
    pub metadata: ArticleMetadata,
    #[serde(default)]
    pub suggested_chunks: Vec<SuggestedChunk>,
}

/// The precomputed `recent_articles` record kept in the suggestions collection.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct SuggestionRecord {
    #[serde(default)]
    pub recent_articles: Vec<RecentArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Suggestion {
    pub title: String,
    pub content: Vec<String>,
}

impl SuggestionRecord {
    /// Only the leading article of a record feeds the suggestions prompt.
    #[must_use]
    pub fn suggestion(&self) -> Option<Suggestion> {
        let article = self.recent_articles.first()?;

        Some(Suggestion {
            title: article.metadata.title.clone(),
            content: article
                .suggested_chunks
                .iter()
                .map(|chunk| chunk.content.clone())
                .collect(),
        })
    }
}

/// Serializes suggestion records into the JSON context of the suggestions prompt.
///
/// # Errors
///
/// Returns an error if the suggestions cannot be serialized.
pub fn suggestions_context(records: &[SuggestionRecord]) -> Result<String> {
    let suggestions = records
        .iter()
        .filter_map(SuggestionRecord::suggestion)
        .collect::<Vec<_>>();

    Ok(serde_json::to_string(&suggestions)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn document(title: &str, url: &str, content: &str) -> Document {
        Document {
            page_content: content.to_string(),
            metadata: Metadata {
                title: title.to_string(),
                url: url.to_string(),
            },
        }
    }

    #[test]
    fn combines_documents_in_retrieval_order() {
        let context = combine_documents(&[
            document("Rust", "https://en.wikipedia.org/wiki/Rust", "Iron oxide."),
            document("Ferris", "https://en.wikipedia.org/wiki/Ferris", "A crab."),
        ]);

        assert_eq!(
            context,
            "\nTitle: Rust\nURL: https://en.wikipedia.org/wiki/Rust\nContent: Iron oxide.\n\n\nTitle: Ferris\nURL: https://en.wikipedia.org/wiki/Ferris\nContent: A crab."
        );
    }

    #[test]
    fn no_documents_yield_empty_context() {
        assert_eq!(combine_documents(&[]), "");
    }

    #[test]
    fn maps_first_article_of_each_record() {
        let record: SuggestionRecord = serde_json::from_value(json!({
            "_id": "recent_articles",
            "recent_articles": [
                {
                    "metadata": { "title": "Moon landing" },
                    "suggested_chunks": [{ "content": "Apollo 11" }, { "content": "1969" }]
                },
                {
                    "metadata": { "title": "Ignored" },
                    "suggested_chunks": []
                }
            ]
        }))
        .unwrap();

        assert_eq!(
            suggestions_context(&[record, SuggestionRecord::default()]).unwrap(),
            r#"[{"title":"Moon landing","content":["Apollo 11","1969"]}]"#
        );
    }

    #[test]
    fn record_without_articles_contributes_nothing() {
        let record: SuggestionRecord = serde_json::from_value(json!({
            "_id": "recent_articles",
            "recent_articles": []
        }))
        .unwrap();

        assert!(record.suggestion().is_none());
        assert_eq!(suggestions_context(&[record]).unwrap(), "[]");
    }

    #[test]
    fn no_records_serialize_to_empty_array() {
        assert_eq!(suggestions_context(&[]).unwrap(), "[]");
    }
}
