use crate::handler::heart_rate_handler;
use crate::middleware::auth as auth_middleware;
use crate::state::heart_rate_state::HeartRateState;
use crate::state::token_state::TokenState;
use axum::routing::post;
use axum::{middleware, Router};

pub fn routes(heart_rate_state: HeartRateState, token_state: TokenState) -> Router {
    Router::new()
        .route(
            "/",
            post(heart_rate_handler::add_heart_rate).get(heart_rate_handler::heart_rate_history),
        )
        .with_state(heart_rate_state)
        .layer(middleware::from_fn_with_state(
            token_state,
            auth_middleware::auth,
        ))
}
