//! Router configuration.

use axum::middleware;
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::{access_log, handlers, state::AppState};

/// Create the router with every catalog route.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/comics",
            get(handlers::list_comics).post(handlers::create_comic),
        )
        .route("/comics/updateGlobal", put(handlers::stamp_comics))
        .route(
            "/comics/{id}",
            get(handlers::get_comic)
                .put(handlers::update_comic)
                .delete(handlers::delete_comic),
        )
        .route("/generate-pdf", get(handlers::generate_pdf))
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            access_log::log_request,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
