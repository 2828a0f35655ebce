//! Books repository for database operations

use chrono::Utc;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::book::Book};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Insert a new book and return the stored record
    pub async fn create(
        &self,
        title: &str,
        author: &str,
        published_year: i32,
        genre: &str,
        created_by: Uuid,
    ) -> AppResult<Book> {
        let now = Utc::now();
        let book = sqlx::query_as::<_, Book>(
            r#"
            INSERT INTO books (id, title, author, published_year, genre, created_by, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, author, published_year, genre, created_by, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(author)
        .bind(published_year)
        .bind(genre)
        .bind(created_by)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        Ok(book)
    }

    /// Get book by ID, optionally restricted to books created by `owner`
    pub async fn get_by_id(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<Option<Book>> {
        let book = match owner {
            Some(owner) => {
                sqlx::query_as::<_, Book>(
                    "SELECT * FROM books WHERE id = $1 AND created_by = $2",
                )
                .bind(id)
                .bind(owner)
                .fetch_optional(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Book>("SELECT * FROM books WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?
            }
        };

        Ok(book)
    }

    /// Check if a book with this exact title already exists
    pub async fn title_exists(&self, title: &str) -> AppResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE title = $1)")
                .bind(title)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    /// Page of books, newest first, optionally restricted to one owner,
    /// with the total count under the same filter
    pub async fn list(
        &self,
        owner: Option<Uuid>,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        let (books, total) = match owner {
            Some(owner) => {
                let total: i64 =
                    sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE created_by = $1")
                        .bind(owner)
                        .fetch_one(&self.pool)
                        .await?;

                let books = sqlx::query_as::<_, Book>(
                    r#"
                    SELECT * FROM books WHERE created_by = $1
                    ORDER BY created_at DESC LIMIT $2 OFFSET $3
                    "#,
                )
                .bind(owner)
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (books, total)
            }
            None => {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
                    .fetch_one(&self.pool)
                    .await?;

                let books = sqlx::query_as::<_, Book>(
                    "SELECT * FROM books ORDER BY created_at DESC LIMIT $1 OFFSET $2",
                )
                .bind(limit)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?;

                (books, total)
            }
        };

        Ok((books, total))
    }

    /// Page of books whose title contains the term (case-insensitive),
    /// newest first; an empty term matches every book
    pub async fn search_by_title(
        &self,
        term: &str,
        limit: i64,
        offset: i64,
    ) -> AppResult<(Vec<Book>, i64)> {
        let like = format!("%{}%", escape_like(term));

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE title ILIKE $1")
            .bind(&like)
            .fetch_one(&self.pool)
            .await?;

        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT * FROM books WHERE title ILIKE $1
            ORDER BY created_at DESC LIMIT $2 OFFSET $3
            "#,
        )
        .bind(&like)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok((books, total))
    }

    /// Persist the merged field values for an existing book, refreshing updated_at
    pub async fn update(&self, book: &Book) -> AppResult<Book> {
        let updated = sqlx::query_as::<_, Book>(
            r#"
            UPDATE books
            SET title = $1, author = $2, published_year = $3, genre = $4, updated_at = $5
            WHERE id = $6
            RETURNING id, title, author, published_year, genre, created_by, created_at, updated_at
            "#,
        )
        .bind(&book.title)
        .bind(&book.author)
        .bind(book.published_year)
        .bind(&book.genre)
        .bind(Utc::now())
        .bind(book.id)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    /// Delete a book, optionally restricted to books created by `owner`;
    /// returns whether a record was removed
    pub async fn delete(&self, id: Uuid, owner: Option<Uuid>) -> AppResult<bool> {
        let result = match owner {
            Some(owner) => {
                sqlx::query("DELETE FROM books WHERE id = $1 AND created_by = $2")
                    .bind(id)
                    .bind(owner)
                    .execute(&self.pool)
                    .await?
            }
            None => {
                sqlx::query("DELETE FROM books WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };

        Ok(result.rows_affected() > 0)
    }
}

/// Escape LIKE metacharacters so the search term matches literally
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}
