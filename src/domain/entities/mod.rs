//! Core domain entities representing the catalog data model.
//!
//! # Entity Types
//!
//! - [`Book`] - A catalogued book and its author set
//! - [`Author`] - An author that books reference
//! - [`Language`] - Closed set of book languages
//!
//! # Design Pattern
//!
//! Entities come with separate structs for creation, following the "New Type"
//! pattern used across the service:
//! - `NewBook`, `NewAuthor` - For creating new records
//! - `BookDetails` - Scalar book fields shared by create and update

pub mod author;
pub mod book;
pub mod language;

pub use author::{Author, NewAuthor};
pub use book::{Book, BookDetails, NewBook};
pub use language::{Language, UnknownLanguage};
