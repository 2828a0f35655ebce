//! Catalog service: book CRUD shared by both API surfaces

use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, BookWithOwner, CreateBook, UpdateBook},
        response::Pagination,
        user::PublicUser,
    },
    repository::Repository,
};

/// Book operations behind the administrative and self-service surfaces.
///
/// `scope` selects the surface: `None` operates on the whole catalog,
/// `Some(owner)` restricts every lookup and mutation to books created by
/// that owner.
#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a book owned by `owner`; the title must be unique across the
    /// whole catalog, regardless of who created the existing book
    pub async fn add_book(&self, input: CreateBook, owner: Uuid) -> AppResult<Book> {
        let title = required(input.title)?;
        let author = required(input.author)?;
        let published_year = input.published_year.ok_or_else(missing_fields)?;
        let genre = required(input.genre)?;

        if self.repository.books.title_exists(&title).await? {
            return Err(AppError::Conflict(
                "Book with this title already exists".to_string(),
            ));
        }

        let book = self
            .repository
            .books
            .create(&title, &author, published_year, &genre, owner)
            .await?;

        tracing::info!(book_id = %book.id, owner = %owner, "book created");
        Ok(book)
    }

    /// Fetch one book with its owner's public profile embedded
    pub async fn get_book(&self, id: Uuid, scope: Option<Uuid>) -> AppResult<BookWithOwner> {
        let book = self
            .repository
            .books
            .get_by_id(id, scope)
            .await?
            .ok_or_else(|| not_found(scope))?;

        self.attach_owner(book).await
    }

    /// Page of books, newest first; `scope` filters to one owner when set
    pub async fn list_books(
        &self,
        page: i64,
        limit: i64,
        scope: Option<Uuid>,
    ) -> AppResult<(Vec<BookWithOwner>, i64)> {
        let limit = limit.max(1);
        let offset = Pagination::offset(page, limit);
        let (books, total) = self.repository.books.list(scope, limit, offset).await?;
        let books = self.attach_owners(books).await?;

        Ok((books, total))
    }

    /// Case-insensitive title substring search across the whole catalog;
    /// an empty search matches everything
    pub async fn search_books(
        &self,
        search: &str,
        page: i64,
        limit: i64,
    ) -> AppResult<(Vec<BookWithOwner>, i64)> {
        let limit = limit.max(1);
        let offset = Pagination::offset(page, limit);
        let (books, total) = self
            .repository
            .books
            .search_by_title(search, limit, offset)
            .await?;
        let books = self.attach_owners(books).await?;

        Ok((books, total))
    }

    /// Overwrite the supplied fields of an existing book; ownership and
    /// creation time are immutable
    pub async fn update_book(
        &self,
        id: Uuid,
        input: UpdateBook,
        scope: Option<Uuid>,
    ) -> AppResult<Book> {
        let mut book = self
            .repository
            .books
            .get_by_id(id, scope)
            .await?
            .ok_or_else(|| not_found(scope))?;

        if let Some(title) = supplied(input.title) {
            if title != book.title {
                if self.repository.books.title_exists(&title).await? {
                    return Err(AppError::Conflict(
                        "Another book with this title already exists".to_string(),
                    ));
                }
                book.title = title;
            }
        }
        if let Some(author) = supplied(input.author) {
            book.author = author;
        }
        if let Some(year) = input.published_year {
            book.published_year = year;
        }
        if let Some(genre) = supplied(input.genre) {
            book.genre = genre;
        }

        self.repository.books.update(&book).await
    }

    /// Remove a book under the same scope rule as update
    pub async fn delete_book(&self, id: Uuid, scope: Option<Uuid>) -> AppResult<()> {
        if !self.repository.books.delete(id, scope).await? {
            return Err(not_found(scope));
        }

        tracing::info!(book_id = %id, "book deleted");
        Ok(())
    }

    /// Embed the owner's public profile into a single book
    async fn attach_owner(&self, book: Book) -> AppResult<BookWithOwner> {
        let owner = self
            .repository
            .users
            .get_by_id(book.created_by)
            .await?
            .map(PublicUser::from);

        Ok(BookWithOwner::new(book, owner))
    }

    /// Embed owner profiles into a whole page with one batched lookup
    async fn attach_owners(&self, books: Vec<Book>) -> AppResult<Vec<BookWithOwner>> {
        if books.is_empty() {
            return Ok(Vec::new());
        }

        let mut ids: Vec<Uuid> = books.iter().map(|b| b.created_by).collect();
        ids.sort_unstable();
        ids.dedup();

        let owners: HashMap<Uuid, PublicUser> = self
            .repository
            .users
            .get_many(&ids)
            .await?
            .into_iter()
            .map(|user| (user.id, PublicUser::from(user)))
            .collect();

        Ok(books
            .into_iter()
            .map(|book| {
                let owner = owners.get(&book.created_by).cloned();
                BookWithOwner::new(book, owner)
            })
            .collect())
    }
}

/// Not-found wording depends on the surface: the owner-scoped message does
/// not reveal whether the book exists under someone else
fn not_found(scope: Option<Uuid>) -> AppError {
    match scope {
        Some(_) => AppError::NotFound("Book not found or not authorized".to_string()),
        None => AppError::NotFound("Book not found".to_string()),
    }
}

/// A create field must be present and non-empty
fn required(field: Option<String>) -> AppResult<String> {
    match field {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(missing_fields()),
    }
}

fn missing_fields() -> AppError {
    AppError::Validation("All book fields are required".to_string())
}

/// An update field counts as unsupplied when absent or empty
fn supplied(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_fields_must_be_present_and_non_empty() {
        assert!(required(None).is_err());
        assert!(required(Some(String::new())).is_err());
        assert_eq!(required(Some("Dune".to_string())).unwrap(), "Dune");
    }

    #[test]
    fn empty_update_fields_are_ignored() {
        assert_eq!(supplied(None), None);
        assert_eq!(supplied(Some(String::new())), None);
        assert_eq!(supplied(Some("Dune".to_string())), Some("Dune".to_string()));
    }

    #[test]
    fn not_found_wording_depends_on_the_scope() {
        match not_found(Some(Uuid::new_v4())) {
            AppError::NotFound(msg) => assert_eq!(msg, "Book not found or not authorized"),
            other => panic!("unexpected error: {other:?}"),
        }
        match not_found(None) {
            AppError::NotFound(msg) => assert_eq!(msg, "Book not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
