//! Router tests against mocked services.


use axum::{Router, body::Body, http::Request, http::Response};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use http_body_util::BodyExt;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

use super::{AppState, error::ApiError, router};
use crate::todo_list::services::MockToDoListService;
use crate::user::domain::{PasswordHash, Role, UserCredentials, Username};
use crate::user::services::{MockUserService, UserServiceError};

pub(super) const PASSWORD: &str = "correct horse";

pub(super) fn alice() -> Username {
    Username::new("alice").expect("valid username")
}

/// User service mock accepting `alice` with [`PASSWORD`].
pub(super) fn users_accepting_alice() -> MockUserService {
    let mut users = MockUserService::new();
    users.expect_authenticate().returning(|username, password| {
        if username.as_str() == "alice" && password == PASSWORD {
            Ok(UserCredentials {
                username: username.clone(),
                password_hash: PasswordHash::new("$argon2id$stub"),
                roles: vec![Role::User],
            })
        } else {
            Err(UserServiceError::InvalidCredentials)
        }
    });
    users
}

pub(super) fn app(lists: MockToDoListService, users: MockUserService) -> Router {
    router(
        AppState::new(Arc::new(lists), Arc::new(users)),
        Duration::from_secs(5),
    )
}

pub(super) fn basic(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

pub(super) fn authorised(method: &str, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", basic("alice", PASSWORD))
}

pub(super) async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

pub(super) async fn error_body(response: Response<Body>) -> ApiError {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("error body should be JSON")
}
