use std::sync::Arc;

use axum::routing::{delete, get};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/bookings",
            get(handlers::bookings::list_bookings).post(handlers::bookings::create_booking),
        )
        .route("/bookings/:id", delete(handlers::bookings::cancel_booking))
        .route("/rooms", get(handlers::rooms::list_rooms))
        .route("/slots", get(handlers::rooms::get_slots))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
