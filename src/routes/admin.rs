use crate::handler::admin_handler;
use crate::middleware::admin_auth;
use crate::state::admin_state::AdminState;
use crate::state::token_state::TokenState;
use axum::routing::{delete, get, post, put};
use axum::{middleware, Router};

pub fn routes(admin_state: AdminState, token_state: TokenState) -> Router {
    let public = Router::new()
        .route("/register", post(admin_handler::register_admin))
        .route("/login", post(admin_handler::login_admin))
        .with_state(admin_state.clone());

    let protected = Router::new()
        .route("/profile", get(admin_handler::admin_profile))
        .route("/dashboard", get(admin_handler::dashboard))
        .route("/feedback", get(admin_handler::patient_feedback))
        .route("/patients", get(admin_handler::all_patients))
        .route(
            "/patients/update-status/{id}",
            put(admin_handler::update_patient_status),
        )
        .route("/patients/{id}", delete(admin_handler::delete_patient))
        .with_state(admin_state)
        .layer(middleware::from_fn_with_state(
            token_state,
            admin_auth::admin_auth,
        ));

    public.merge(protected)
}
