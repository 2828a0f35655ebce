//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::models::{response::Pagination, user::PublicUser};

/// Book record as stored; returned by create and update with the raw owner id
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Book with the owner's public profile in place of the raw id.
///
/// `created_by` is null when the owning account has since been deleted.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookWithOwner {
    pub id: Uuid,
    pub title: String,
    pub author: String,
    pub published_year: i32,
    pub genre: String,
    pub created_by: Option<PublicUser>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BookWithOwner {
    pub fn new(book: Book, owner: Option<PublicUser>) -> Self {
        Self {
            id: book.id,
            title: book.title,
            author: book.author,
            published_year: book.published_year,
            genre: book.genre,
            created_by: owner,
            created_at: book.created_at,
            updated_at: book.updated_at,
        }
    }
}

/// Create book request; every field must be present and non-empty
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
}

/// Update book request; only supplied fields are written
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBook {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_year: Option<i32>,
    pub genre: Option<String>,
}

/// Book query parameters (single book by id, or a page)
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct BookQuery {
    pub id: Option<Uuid>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Title search query parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct SearchQuery {
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// Page of books plus pagination info
#[derive(Debug, Serialize, ToSchema)]
pub struct BookPage {
    pub books: Vec<BookWithOwner>,
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::Role;

    fn book() -> Book {
        Book {
            id: Uuid::new_v4(),
            title: "Dune".to_string(),
            author: "Frank Herbert".to_string(),
            published_year: 1965,
            genre: "Science Fiction".to_string(),
            created_by: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn books_serialize_with_camel_case_fields() {
        let value = serde_json::to_value(book()).unwrap();
        assert!(value.get("publishedYear").is_some());
        assert!(value.get("createdBy").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        assert!(value.get("published_year").is_none());
    }

    #[test]
    fn orphaned_books_carry_a_null_owner() {
        let value = serde_json::to_value(BookWithOwner::new(book(), None)).unwrap();
        assert_eq!(value["createdBy"], serde_json::Value::Null);
    }

    #[test]
    fn owned_books_embed_the_public_profile() {
        let b = book();
        let owner = PublicUser {
            id: b.created_by,
            email: "owner@example.com".to_string(),
            role: Role::User,
            created_at: Utc::now(),
        };
        let value = serde_json::to_value(BookWithOwner::new(b, Some(owner))).unwrap();
        assert_eq!(value["createdBy"]["email"], "owner@example.com");
        assert!(value["createdBy"].get("passwordHash").is_none());
    }
}
