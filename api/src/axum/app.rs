use axum::Router;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use wikichat::Config;

use crate::{
    axum::state::{self, AppState},
    http::routes,
    utils::reporter,
};

pub fn create() -> Router {
    let config = Config::from_env().expect("Failed to load configuration");

    router(state::create(&config, reporter::from_env()))
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::mount())
        .layer(
            CorsLayer::permissive()
                .allow_origin(AllowOrigin::mirror_request())
                .allow_headers(AllowHeaders::mirror_request()),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
