use axum::{
    body::StreamBody,
    http::header,
    response::{IntoResponse, Response},
};
use futures::TryStreamExt;
use std::sync::Arc;
use wikichat::TokenStream;

use crate::utils::reporter::ErrorReporter;

/// Relays model tokens to the client as a chunked plain-text body.
///
/// A failure after the first token can no longer change the status code, so it is
/// reported and the body is cut short.
pub struct StreamingText {
    tokens: TokenStream,
    reporter: Arc<dyn ErrorReporter>,
}

impl StreamingText {
    pub fn new(tokens: TokenStream, reporter: Arc<dyn ErrorReporter>) -> Self {
        Self { tokens, reporter }
    }
}

impl IntoResponse for StreamingText {
    fn into_response(self) -> Response {
        let reporter = self.reporter;
        let body = StreamBody::new(self.tokens.inspect_err(move |e| {
            tracing::error!("Token stream failed: {e:#}");
            reporter.report(e);
        }));

        (
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
