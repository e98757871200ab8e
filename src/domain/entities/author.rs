//! Author entity.

/// An author known to the catalog.
///
/// Identity is the `id`: two authors with the same id are the same author,
/// whatever their name fields say.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i64,
    pub full_name: String,
}

impl Author {
    /// Creates a new Author instance.
    pub fn new(id: i64, full_name: String) -> Self {
        Self { id, full_name }
    }
}

/// Input data for registering a new author.
#[derive(Debug, Clone)]
pub struct NewAuthor {
    pub full_name: String,
}
