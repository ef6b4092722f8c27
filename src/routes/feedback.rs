use crate::handler::feedback_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::feedback_state::FeedbackState;
use crate::state::token_state::TokenState;
use axum::routing::{get, post};
use axum::{middleware, Router};

pub fn routes(feedback_state: FeedbackState, token_state: TokenState) -> Router {
    Router::new()
        .route("/submit", post(feedback_handler::submit_feedback))
        .route("/all", get(feedback_handler::all_feedback))
        .with_state(feedback_state)
        .layer(middleware::from_fn_with_state(
            token_state,
            auth_middleware::auth,
        ))
}
