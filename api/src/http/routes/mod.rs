use axum::{routing::get, Json, Router};
use std::env;

mod api;

use crate::axum::state::AppState;

pub fn mount() -> Router<AppState> {
    Router::new()
        .nest("/api", api::mount())
        .route("/version", get(version))
        .route("/", get(|| async {}))
}

#[derive(serde::Serialize)]
struct WikichatVersion {
    semver: String,
    rev: Option<String>,
    compile_time: String,
}

#[allow(clippy::unused_async)]
async fn version() -> Json<WikichatVersion> {
    Json(WikichatVersion {
        rev: env::var("GIT_REV").ok(),
        semver: env!("CARGO_PKG_VERSION").to_string(),
        compile_time: env!("STATIC_BUILD_DATE").to_string(),
    })
}
