//! HTTP transport adapter.
//!
//! Translates requests into service calls and service results into status
//! codes. Every `/api/v1` route except registration requires HTTP Basic
//! credentials; see [`auth::AuthenticatedUser`].

pub mod auth;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, patch, post},
};
use std::time::Duration;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use handlers::{lists, users};
pub use state::AppState;

/// Builds the application router.
///
/// Requests that run longer than `request_timeout` are answered with 408.
#[must_use]
pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let api = Router::new()
        .route("/list", post(lists::create_list))
        .route("/list/all", get(lists::list_all))
        .route(
            "/list/{id}",
            get(lists::get_list)
                .put(lists::update_list)
                .delete(lists::delete_list),
        )
        .route("/list/{id}/active/{active}", patch(lists::set_active))
        .route("/list/{id}/task/add", patch(lists::add_task))
        .route("/list/{id}/task/remove/{task_id}", patch(lists::remove_task))
        .route("/user/register", post(users::register))
        .route("/user/me", get(users::me).put(users::update_me))
        .route("/user/me/password", patch(users::change_password));

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/api/v1", api)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
