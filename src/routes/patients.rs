use crate::handler::{auth_handler, checkup_handler, profile_handler, register_handler};
use crate::middleware::auth as auth_middleware;
use crate::state::auth_state::AuthState;
use crate::state::patient_state::PatientState;
use crate::state::token_state::TokenState;
use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower::ServiceBuilder;

pub fn routes(auth_state: AuthState, patient_state: PatientState, token_state: TokenState) -> Router {
    let public = Router::new()
        .route("/register", post(register_handler::register))
        .route("/login", post(auth_handler::login))
        .with_state(auth_state);

    let protected = Router::new()
        .route("/profile", get(profile_handler::profile))
        .route("/edit-profile", put(profile_handler::edit_profile))
        .route("/set-checkup-date", put(checkup_handler::set_checkup_date))
        .with_state(patient_state)
        .layer(ServiceBuilder::new().layer(middleware::from_fn_with_state(
            token_state,
            auth_middleware::auth,
        )));

    public.merge(protected)
}
