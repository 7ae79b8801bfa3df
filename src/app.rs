use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/heatmap", get(handlers::get_heatmap).post(handlers::layout_heatmap))
        .route("/api/activity", get(handlers::get_activity))
        .route("/api/workouts", post(handlers::log_workout))
        .route(
            "/api/challenge",
            get(handlers::get_challenge)
                .put(handlers::update_challenge)
                .delete(handlers::clear_challenge),
        )
        .with_state(state)
}
