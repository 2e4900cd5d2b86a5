//! HTTP Basic authentication.
//!
//! [`AuthenticatedUser`] resolves the caller for every protected route.
//! Missing, malformed and wrong credentials all produce the same 401.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use tracing::debug;

use super::{error::ApiErrorResponse, state::AppState};
use crate::user::domain::{Role, Username};
use crate::user::services::UserServiceError;

/// The authenticated caller of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser(pub Username);

/// Username and password decoded from an `Authorization: Basic` header.
pub(crate) struct BasicCredentials {
    pub(crate) username: String,
    pub(crate) password: String,
}

/// Decodes Basic credentials from `headers`, if present and well formed.
#[must_use]
pub(crate) fn basic_credentials(headers: &HeaderMap) -> Option<BasicCredentials> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let text = String::from_utf8(decoded).ok()?;
    let (username, password) = text.split_once(':')?;
    Some(BasicCredentials {
        username: username.to_owned(),
        password: password.to_owned(),
    })
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(credentials) = basic_credentials(&parts.headers) else {
            debug!("request without usable basic credentials");
            return Err(ApiErrorResponse::unauthorized());
        };
        let Ok(username) = Username::new(credentials.username) else {
            return Err(ApiErrorResponse::unauthorized());
        };

        let authenticated = state
            .users
            .authenticate(&username, &credentials.password)
            .await
            .map_err(|err| match err {
                UserServiceError::InvalidCredentials | UserServiceError::UserNotFound(_) => {
                    ApiErrorResponse::unauthorized()
                }
                other => ApiErrorResponse::from(other),
            })?;

        if !authenticated.has_role(Role::User) {
            return Err(ApiErrorResponse::forbidden(format!(
                "user {username} lacks the {} role",
                Role::User
            )));
        }
        Ok(Self(username))
    }
}
