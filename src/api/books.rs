//! Book administration endpoints (management surface, whole catalog)

use axum::{
    extract::State,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        book::{Book, BookPage, BookQuery, BookWithOwner, CreateBook, SearchQuery, UpdateBook},
        response::{ApiResponse, Empty, Pagination},
        user::CurrentUser,
    },
    AppState,
};

use super::{Json, Path, Query};

/// Add a book to the catalog, owned by the calling administrator
#[utoipa::path(
    post,
    path = "/management/book/addbook",
    tag = "management",
    security(("bearer_auth" = [])),
    request_body = CreateBook,
    responses(
        (status = 200, description = "Book added successfully", body = Book),
        (status = 400, description = "All book fields are required"),
        (status = 401, description = "Not authenticated"),
        (status = 409, description = "Book with this title already exists")
    )
)]
pub async fn add_book(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(input): Json<CreateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.add_book(input, user.user_id).await?;

    Ok(Json(ApiResponse::ok("Book added successfully", book)))
}

/// Get a single book by id, or a page of the whole catalog when no id is given
#[utoipa::path(
    get,
    path = "/management/book/getbook",
    tag = "management",
    security(("bearer_auth" = [])),
    params(BookQuery),
    responses(
        (status = 200, description = "Book(s) retrieved successfully", body = BookPage),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Query(query): Query<BookQuery>,
) -> AppResult<Response> {
    if let Some(id) = query.id {
        let book: BookWithOwner = state.services.catalog.get_book(id, None).await?;
        return Ok(Json(ApiResponse::ok("Book retrieved successfully", book)).into_response());
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

/// Update any book in the catalog
#[utoipa::path(
    put,
    path = "/management/book/updatebook/{id}",
    tag = "management",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Another book with this title already exists")
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(input): Json<UpdateBook>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.update_book(id, input, None).await?;

    Ok(Json(ApiResponse::ok("Book updated successfully", book)))
}

/// Delete any book in the catalog
#[utoipa::path(
    delete,
    path = "/management/book/deletebook/{id}",
    tag = "management",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book deleted successfully"),
        (status = 401, description = "Not authenticated"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Empty>>> {
    state.services.catalog.delete_book(id, None).await?;

    Ok(Json(ApiResponse::ok_empty("Book deleted successfully")))
}

/// Search the catalog by title substring, case-insensitively
#[utoipa::path(
    get,
    path = "/management/book/searchbook",
    tag = "management",
    security(("bearer_auth" = [])),
    params(SearchQuery),
    responses(
        (status = 200, description = "Books search results", body = BookPage),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<ApiResponse<BookPage>>> {
    let search = query.search.unwrap_or_default();
    let page = query.page.unwrap_or(1);
    let limit = query.limit.unwrap_or(10);

    let (books, total) = state
        .services
        .catalog
        .search_books(&search, page, limit)
        .await?;

    Ok(Json(ApiResponse::ok(
        "Books search results",
        BookPage {
            books,
            pagination: Pagination { page, limit, total },
        },
    )))
}
