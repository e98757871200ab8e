//! Localized messages returned to API clients.

// Lookups
pub const BOOK_NOT_FOUND: &str = "Livre non trouvé.";
pub const BOOK_MISSING: &str = "Le livre n'existe pas.";
pub const AUTHOR_MISSING: &str = "L'auteur n'existe pas.";

// Book payload gates
pub const TITLE_BLANK: &str = "Le titre du livre ne peut pas être vide.";
pub const ISBN_INVALID: &str = "Le code isbn du livre n'est pas correct.";
pub const LANGUAGE_INVALID: &str = "La langue du livre est mauvaise.";
pub const YEAR_INVALID: &str = "L'année de sortie du livre n'est pas correcte";
pub const ID_MISMATCH: &str = "L'ancien et le nouvel auteur n'ont pas le même id.";

// Request bodies
pub const BODY_UNREADABLE: &str = "Le corps de la requête est illisible.";
