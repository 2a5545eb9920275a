mod explain;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::HeaderName;
use axum::routing::post;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Permissive CORS: any origin, plus the headers browser clients send.
/// Every OPTIONS request is answered here as a preflight.
fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([
            AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            CONTENT_TYPE,
        ])
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/explain-question", post(explain::explain_question))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
