use anyhow::{anyhow, Result};
use indoc::indoc;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

const CHAT_TEMPLATE: &str = indoc! {r#"
    You are an AI assistant answering questions about anything from Wikipedia the context will provide you with the most relevant page data along with the source page's title and URL.
    Refer to the context as Wikipedia data. Format responses using markdown where applicable and don't return images.
    If referencing the text/context refer to it as Wikipedia.
    At the end of the response on a line by itself add one markdown link to the Wikipedia URL where the most relevant data was found label it with the title of the Wikipedia page and no "Source:" or "Wikipedia" prefix or other text.
    The max links you should include is 1, refer to this source as "the source below".
    if the context is empty, answer it to the best of your ability. If you cannot find the answer user's question in the context, reply with "I'm sorry, I'm only allowed to answer questions related to the top 1,000 Wikipedia pages".

    <context>
      {context}
    </context>

    <chat_history>
      {chat_history}
    </chat_history>

    QUESTION: {question}  
"#};

const SUGGESTIONS_TEMPLATE: &str = indoc! {"
    You are an assistant who creates sample questions to ask a chatbot.
    Given the context below of the most recently added data to the most popular pages on Wikipedia come up with 4 suggested questions
    Make the suggested questions on a variety of topics 
    keep them to less than 12 words each
    Do not number the questions 
    Do not add quotes around the questions

    <context>
      {context}
    </context>"};

lazy_static! {
    static ref SLOT: Regex = Regex::new(r"\{\{|\}\}|\{([A-Za-z_][A-Za-z0-9_]*)\}").unwrap();
    pub static ref CHAT: PromptTemplate = PromptTemplate::from_template(CHAT_TEMPLATE);
    pub static ref SUGGESTIONS: PromptTemplate = PromptTemplate::from_template(SUGGESTIONS_TEMPLATE);
}

/// A text pattern with `{name}` slots. `{{` and `}}` render as literal braces.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    #[must_use]
    pub fn from_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Slot names in order of first appearance.
    #[must_use]
    pub fn input_variables(&self) -> Vec<&str> {
        let mut variables = Vec::new();

        for name in SLOT
            .captures_iter(&self.template)
            .filter_map(|captures| captures.get(1))
        {
            if !variables.contains(&name.as_str()) {
                variables.push(name.as_str());
            }
        }

        variables
    }

    /// Renders the template in a single pass, so substituted values are never re-scanned.
    ///
    /// # Errors
    ///
    /// Returns an error if a slot has no value in `values`.
    pub fn format(&self, values: &HashMap<&str, &str>) -> Result<String> {
        let mut rendered = String::with_capacity(self.template.len());
        let mut cursor = 0;

        for captures in SLOT.captures_iter(&self.template) {
            let Some(token) = captures.get(0) else {
                continue;
            };

            rendered.push_str(&self.template[cursor..token.start()]);

            match captures.get(1) {
                Some(name) => rendered.push_str(
                    values
                        .get(name.as_str())
                        .ok_or_else(|| anyhow!("Missing value for prompt variable `{}`", name.as_str()))?,
                ),
                None => rendered.push_str(&token.as_str()[..1]),
            }

            cursor = token.end();
        }

        rendered.push_str(&self.template[cursor..]);

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use map_macro::map;

    #[test]
    fn substitutes_named_slots() {
        let template = PromptTemplate::from_template("Q: {question}\nA: {answer} ({question})");

        let rendered = template
            .format(&map! { "question" => "why?", "answer" => "because" })
            .unwrap();

        assert_eq!(rendered, "Q: why?\nA: because (why?)");
        assert_eq!(template.input_variables(), vec!["question", "answer"]);
    }

    #[test]
    fn doubled_braces_are_literal() {
        let template = PromptTemplate::from_template("{{\"key\": {value}}}");

        assert_eq!(
            template.format(&map! { "value" => "1" }).unwrap(),
            "{\"key\": 1}"
        );
    }

    #[test]
    fn substituted_values_are_not_expanded() {
        let template = PromptTemplate::from_template("<context>{context}</context>");

        assert_eq!(
            template
                .format(&map! { "context" => "set {x} = {{y}}" })
                .unwrap(),
            "<context>set {x} = {{y}}</context>"
        );
    }

    #[test]
    fn missing_values_are_an_error() {
        let err = CHAT
            .format(&map! { "context" => "", "question" => "hi" })
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing value for prompt variable `chat_history`"
        );
    }

    #[test]
    fn fixed_templates_keep_their_exact_wording() {
        assert!(CHAT_TEMPLATE.ends_with("QUESTION: {question}  \n"));
        assert!(SUGGESTIONS_TEMPLATE.contains("on a variety of topics \nkeep them"));
        assert!(SUGGESTIONS_TEMPLATE.contains("Do not number the questions \nDo not add"));
    }

    #[test]
    fn fixed_templates_expose_their_slots() {
        assert_eq!(
            CHAT.input_variables(),
            vec!["context", "chat_history", "question"]
        );
        assert_eq!(SUGGESTIONS.input_variables(), vec!["context"]);
    }
}
