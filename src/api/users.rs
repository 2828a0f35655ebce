//! User administration endpoints (superadmin surface)

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        response::{ApiResponse, Empty, Pagination},
        user::{PublicUser, UserPage, UserQuery},
    },
    AppState,
};

use super::{Json, Path, Query};

/// Get a single user by id, or a page of users when no id is given
#[utoipa::path(
    get,
    path = "/management/user/getuser",
    tag = "management",
    security(("bearer_auth" = [])),
    params(UserQuery),
    responses(
        (status = 200, description = "User(s) retrieved successfully", body = UserPage),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Superadmin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let user: PublicUser = state.services.users.get_user(id).await?;
        return Ok(Json(ApiResponse::ok("User retrieved successfully", user)).into_response());
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    let (users, total) = state.services.users.list_users(page, limit).await?;

    Ok(Json(ApiResponse::ok(
        "Users retrieved successfully",
        UserPage {
            users,
            pagination: Pagination { page, limit, total },
        },
    ))
    .into_response())
}

/// Delete a user; books they created are left in place
#[utoipa::path(
    delete,
    path = "/management/user/deleteuser/{id}",
    tag = "management",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted successfully"),
        (status = 401, description = "Not authenticated"),
        (status = 403, description = "Superadmin role required"),
        (status = 404, description = "User not found")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state.services.users.delete_user(id).await?;

    Ok(Json(ApiResponse::ok_empty("User deleted successfully")))
}
