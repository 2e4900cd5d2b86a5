//! `/api/v1/user` handlers.

use axum::{Json, extract::State, http::StatusCode};

use crate::http::{
    auth::AuthenticatedUser,
    dto::{PasswordChangeRequest, ProfileRequest, RegisterRequest, UserResponse},
    error::ApiErrorResponse,
    extract::JsonBody,
    state::AppState,
};
use crate::user::services::{RegisterUserRequest, UpdateUserRequest};

/// `POST /api/v1/user/register`; the only unauthenticated API route.
pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiErrorResponse> {
    let RegisterRequest {
        username,
        password,
        display_name,
        email,
    } = body;

    let mut request = RegisterUserRequest::new(username, password);
    if let Some(name) = display_name {
        request = request.with_display_name(name);
    }
    if let Some(address) = email {
        request = request.with_email(address);
    }

    let view = state.users.create_user(request).await?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(view))))
}

/// `GET /api/v1/user/me`.
pub async fn me(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
) -> Result<Json<UserResponse>, ApiErrorResponse> {
    let view = state.users.get_user_by_username(&username).await?;
    Ok(Json(UserResponse::from(view)))
}

/// `PUT /api/v1/user/me`.
pub async fn update_me(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    JsonBody(body): JsonBody<ProfileRequest>,
) -> Result<Json<UserResponse>, ApiErrorResponse> {
    let mut request = UpdateUserRequest::new(username);
    if let Some(name) = body.display_name {
        request = request.with_display_name(name);
    }
    if let Some(address) = body.email {
        request = request.with_email(address);
    }

    let view = state.users.update_user(request).await?;
    Ok(Json(UserResponse::from(view)))
}

/// `PATCH /api/v1/user/me/password`.
pub async fn change_password(
    State(state): State<AppState>,
    AuthenticatedUser(username): AuthenticatedUser,
    JsonBody(body): JsonBody<PasswordChangeRequest>,
) -> Result<StatusCode, ApiErrorResponse> {
    state.users.change_password(&username, body.password).await?;
    Ok(StatusCode::NO_CONTENT)
}
