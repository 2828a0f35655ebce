//! Registration and sign-in endpoints

use axum::extract::State;

use crate::{
    error::AppResult,
    models::{
        response::{ApiResponse, Empty},
        user::{CurrentUser, SigninRequest, SignupRequest, TokenData},
    },
    AppState,
};

use super::Json;

/// Register a new account (public; always creates a plain user)
#[utoipa::path(
    post,
    path = "/auth/signup",
    tag = "auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered successfully"),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn signup(
    State(state): State<AppState>,
    caller: Option<CurrentUser>,
    Json(request): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state.services.users.signup(request, caller.as_ref()).await?;

    Ok(Json(ApiResponse::ok_empty("User registered successfully")))
}

/// Register an account from the management surface; superadmin callers may
/// set the new account's role
#[utoipa::path(
    post,
    path = "/management/signup",
    tag = "management",
    security(("bearer_auth" = [])),
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered successfully"),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Role not allowed"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn management_signup(
    State(state): State<AppState>,
    caller: CurrentUser,
    Json(request): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state.services.users.signup(request, Some(&caller)).await?;

    Ok(Json(ApiResponse::ok_empty("User registered successfully")))
}

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/auth/signin",
    tag = "auth",
    request_body = SigninRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenData),
        (status = 401, description = "Invalid email or password")
    )
)]
pub async fn signin(
    State(state): State<AppState>,
    Json(request): Json<SigninRequest>,
) -> AppResult<Json<ApiResponse<TokenData>>> {
    let token = state.services.users.signin(request).await?;

    Ok(Json(ApiResponse::ok("Login successful", TokenData { token })))
}
