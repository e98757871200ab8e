//! DTOs for authors.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Author;

/// Wire representation of an author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorDto {
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
}

impl From<Author> for AuthorDto {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            full_name: author.full_name,
        }
    }
}

impl From<AuthorDto> for Author {
    fn from(dto: AuthorDto) -> Self {
        Author::new(dto.id, dto.full_name)
    }
}

/// Request body for `POST /api/v1/authors`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateAuthorRequest {
    #[validate(length(min = 1, max = 255, message = "Author name must be 1-255 characters"))]
    pub full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_name_defaults_to_empty() {
        let dto: AuthorDto = serde_json::from_str(r#"{ "id": 4 }"#).unwrap();

        assert_eq!(dto.id, 4);
        assert!(dto.full_name.is_empty());
    }

    #[test]
    fn test_create_request_length() {
        let ok = CreateAuthorRequest {
            full_name: "George Sand".to_string(),
        };
        let empty = CreateAuthorRequest {
            full_name: String::new(),
        };
        let long = CreateAuthorRequest {
            full_name: "x".repeat(256),
        };

        assert!(ok.validate().is_ok());
        assert!(empty.validate().is_err());
        assert!(long.validate().is_err());
    }
}
