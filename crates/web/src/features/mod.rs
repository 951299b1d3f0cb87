use std::time::Duration;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

pub mod competitions;

pub fn api_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(Duration::from_secs(3600));

    Router::new()
        .nest(
            competitions::handlers::COMPETITIONS_PATH,
            competitions::routes::routes(),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
