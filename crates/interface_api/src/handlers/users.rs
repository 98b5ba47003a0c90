//! User handlers

use axum::{extract::State, Json};

use domain_party::UserInfo;

use crate::dto::users::*;
use crate::extract::Payload;
use crate::{error::ApiError, AppState};

/// Creates a user; an existing user is returned unchanged
pub async fn create_user(
    State(state): State<AppState>,
    Payload(request): Payload<CreateUserRequest>,
) -> Result<Json<UserInfo>, ApiError> {
    let user = state.users.create_user(request.into()).await?;
    Ok(Json(user.info()))
}

/// Checks a username and password
pub async fn authenticate(
    State(state): State<AppState>,
    Payload(request): Payload<AuthenticateRequest>,
) -> Result<Json<AuthenticateResponse>, ApiError> {
    let authenticated = state
        .users
        .authenticate(&request.username, &request.password)
        .await?;
    Ok(Json(AuthenticateResponse { authenticated }))
}

/// Returns a user's public details, or `null`
pub async fn get_user_info(
    State(state): State<AppState>,
    Payload(request): Payload<UserInfoRequest>,
) -> Result<Json<Option<UserInfo>>, ApiError> {
    let info = state.users.user_info(&request.username).await?;
    Ok(Json(info))
}

/// Replaces a user's password
pub async fn update_password(
    State(state): State<AppState>,
    Payload(request): Payload<UpdatePasswordRequest>,
) -> Result<Json<UpdatePasswordResponse>, ApiError> {
    let updated = state
        .users
        .update_password(&request.username, &request.new_password)
        .await?;
    Ok(Json(UpdatePasswordResponse { updated }))
}
