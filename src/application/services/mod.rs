//! Business logic services for the application layer.

pub mod author_service;
pub mod book_service;

pub use author_service::AuthorService;
pub use book_service::BookService;
