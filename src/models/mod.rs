//! Data models for Libris

pub mod book;
pub mod response;
pub mod user;

// Re-export commonly used types
pub use book::{Book, BookWithOwner};
pub use response::{ApiResponse, Empty, Pagination};
pub use user::{CurrentUser, PublicUser, Role, User};
