use axum::{
    Router,
    routing::{get, post},
};
use diesel::{
    SqliteConnection,
    r2d2::{ConnectionManager, Pool},
};
use time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod schema;
pub mod state;
pub mod utils;

use crate::state::AppState;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// JSON API routes. Handlers expect a session layer to be installed by the caller.
pub fn api_router(state: AppState) -> Router {
    let session_router = Router::new()
        .route("/", post(handlers::sessions::start_session))
        .route(
            "/{session_id}/exerciseResult",
            post(handlers::sessions::record_exercise_result),
        )
        .route(
            "/{session_id}/complete",
            post(handlers::sessions::complete_session),
        );

    let review_router = Router::new()
        .route("/{review_id}/complete", post(handlers::schedule::complete_review));

    Router::new()
        .nest("/sessions", session_router)
        .nest("/reviews", review_router)
        .route("/users/{user_id}/schedule", get(handlers::schedule::get_schedule))
        .with_state(state)
}

pub fn session_layer() -> SessionManagerLayer<MemoryStore> {
    SessionManagerLayer::new(MemoryStore::default())
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(false)
}

/// Full application: API under `/api`, health check, sessions.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_router(state))
        .layer(session_layer())
}

async fn health() -> &'static str {
    "ok"
}
