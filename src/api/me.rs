//! Self-service endpoints: the caller's profile and their own books

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookPage, BookQuery, BookWithOwner, CreateBook, UpdateBook},
        response::{ApiResponse, Empty, Pagination},
        user::{CurrentUser, PublicUser},
    },
    AppState,
};

use super::{Json, Path, Query};

/// The calling user's own profile
#[utoipa::path(
    get,
    path = "/user/userandbook/getme",
    tag = "user",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User profile retrieved", body = PublicUser),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> AppResult<Json<ApiResponse<PublicUser>>> {
    let profile = state.services.users.get_profile(user.user_id).await?;

    Ok(Json(ApiResponse::ok("User profile retrieved", profile)))
}

/// Get one of the caller's own books by id, or a page of them
#[utoipa::path(
    get,
    path = "/user/userandbook/getbooks",
    tag = "user",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "User books retrieved", body = BookPage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found or not authorized")
    )
)]
pub async fn get_my_books(
    State(state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<BookQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let book: BookWithOwner = state
            .services
            .catalog
            .get_book(id, Some(user.user_id))
            .await?;
        return Ok(Json(ApiResponse::ok("Book retrieved", book)).into_response());
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    let (books, total) = state
        .services
        .catalog
        .list_books(page, limit, Some(user.user_id))
        .await?;

    Ok(Json(ApiResponse::ok(
        "User books retrieved",
        BookPage {
            books,
            pagination: Pagination { page, limit, total },
        },
    ))
    .into_response())
}

/// Browse the whole catalog regardless of ownership, or fetch any single
/// book by id
#[utoipa::path(
    get,
    path = "/user/userandbook/getallbooks",
    tag = "user",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Books retrieved successfully", body = BookPage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_all_books(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let book: BookWithOwner = state.services.catalog.get_book(id, None).await?;
        return Ok(Json(ApiResponse::ok("Book retrieved", book)).into_response());
    }

    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);
    let (books, total) = state.services.catalog.list_books(page, limit, None).await?;

    Ok(Json(ApiResponse::ok(
        "Books retrieved successfully",
        BookPage {
            books,
            pagination: Pagination { page, limit, total },
        },
    ))
    .into_response())
}

/// Add a book owned by the caller
#[utoipa::path(
    post,
    path = "/user/userandbook/addbook",
    tag = "user",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book added successfully", body = Book),
        (status = 400, description = "All book fields are required"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Book with this title already exists")
    )
)]
pub async fn add_my_book(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.add_book(input, user.user_id).await?;

    Ok(Json(ApiResponse::ok("Book added successfully", book)))
}

/// Update one of the caller's own books
#[utoipa::path(
    put,
    path = "/user/userandbook/updatebook/{id}",
    tag = "user",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found or not authorized"),
        (status = 409, description = "Another book with this title already exists")
    )
)]
pub async fn update_my_book(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state
        .services
        .catalog
        .update_book(id, input, Some(user.user_id))
        .await?;

    Ok(Json(ApiResponse::ok("Book updated successfully", book)))
}

/// Delete one of the caller's own books
#[utoipa::path(
    delete,
    path = "/user/userandbook/deletebook/{id}",
    tag = "user",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted successfully"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found or not authorized")
    )
)]
pub async fn delete_my_book(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state
        .services
        .catalog
        .delete_book(id, Some(user.user_id))
        .await?;

    Ok(Json(ApiResponse::ok_empty("Book deleted successfully")))
}
