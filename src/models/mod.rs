//! Data models for the catalog

pub mod author;
pub mod book;
pub mod book_instance;
pub mod genre;
pub mod language;
pub mod user;

// Re-export commonly used types
pub use author::Author;
pub use book::{Book, BookDetails, BookShort};
pub use book_instance::{BookInstance, LoanStatus};
pub use genre::Genre;
pub use language::Language;
pub use user::{Permission, User, UserClaims};
