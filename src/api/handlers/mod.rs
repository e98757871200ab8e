//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod authors;
pub mod books;
pub mod health;

pub use authors::{create_author_handler, get_author_handler, list_authors_handler};
pub use books::{
    add_author_handler, create_book_handler, delete_book_handler, get_book_handler,
    list_books_handler, update_book_handler,
};
pub use health::health_handler;
