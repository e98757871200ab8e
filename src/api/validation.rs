//! Validation gates applied to book payloads.
//!
//! Gates run in a fixed order and the first failing one is reported, so a
//! payload with several problems always yields the same message.

use serde_json::json;

use crate::api::dto::book::BookDto;
use crate::api::messages::{ISBN_INVALID, LANGUAGE_INVALID, TITLE_BLANK, YEAR_INVALID};
use crate::domain::entities::{BookDetails, Language};
use crate::error::AppError;

/// Smallest accepted ISBN value.
pub const MIN_ISBN: i64 = 100_000_000;


/// Validates a creation payload and extracts the book details.
///
/// # Rules
///
/// 1. Title must be present and not blank
/// 2. ISBN must be at least [`MIN_ISBN`]
/// 3. Language, when present, must be a known code (any case)
/// 4. Year must not be after `current_year`; negative years are allowed
///
/// # Errors
///
/// Returns [`AppError::Validation`] for the first rule violated.
pub fn validate_new_book(dto: &BookDto, current_year: i32) -> Result<BookDetails, AppError> {
    let title = match dto.title.as_deref() {
        Some(title) if !title.trim().is_empty() => title.to_string(),
        _ => {
            return Err(AppError::bad_request(
                TITLE_BLANK,
                json!({ "field": "title" }),
            ));
        }
    };

    if dto.isbn < MIN_ISBN {
        return Err(AppError::bad_request(
            ISBN_INVALID,
            json!({ "field": "isbn", "min": MIN_ISBN }),
        ));
    }

    let language = parse_language(dto.language.as_deref())?;

    if dto.year > current_year {
        return Err(AppError::bad_request(
            YEAR_INVALID,
            json!({ "field": "year", "max": current_year }),
        ));
    }

    Ok(BookDetails {
        title,
        isbn: dto.isbn,
        year: dto.year,
        language,
    })
}

/// Extracts book details from an update payload.
///
/// Only the language is checked, since it has to map onto [`Language`].
/// A missing title is stored as an empty string.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the language code is unknown.
pub fn book_details(dto: &BookDto) -> Result<BookDetails, AppError> {
    Ok(BookDetails {
        title: dto.title.clone().unwrap_or_default(),
        isbn: dto.isbn,
        year: dto.year,
        language: parse_language(dto.language.as_deref())?,
    })
}

fn parse_language(raw: Option<&str>) -> Result<Option<Language>, AppError> {
    raw.map(|code| {
        code.parse::<Language>().map_err(|e| {
            AppError::bad_request(
                LANGUAGE_INVALID,
                json!({
                    "field": "language",
                    "reason": e.to_string(),
                    "allowed": Language::all().map(Language::code).collect::<Vec<_>>(),
                }),
            )
        })
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2024;

    fn valid_dto() -> BookDto {
        BookDto {
            id: Some(1),
            title: Some("Le Petit Prince".to_string()),
            isbn: 207_040_850,
            year: 1943,
            language: Some("fr".to_string()),
            authors: Vec::new(),
        }
    }

    fn message(result: Result<BookDetails, AppError>) -> String {
        match result.unwrap_err() {
            AppError::Validation { message, .. } => message,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_payload() {
        let details = validate_new_book(&valid_dto(), YEAR).unwrap();

        assert_eq!(details.title, "Le Petit Prince");
        assert_eq!(details.language, Some(Language::French));
    }

    #[test]
    fn test_title_missing_or_blank() {
        let mut dto = valid_dto();
        dto.title = None;
        assert_eq!(message(validate_new_book(&dto, YEAR)), TITLE_BLANK);

        dto.title = Some("   ".to_string());
        assert_eq!(message(validate_new_book(&dto, YEAR)), TITLE_BLANK);
    }

    #[test]
    fn test_isbn_boundary() {
        let mut dto = valid_dto();
        dto.isbn = 99_999_999;
        assert_eq!(message(validate_new_book(&dto, YEAR)), ISBN_INVALID);

        dto.isbn = MIN_ISBN - 1;
        assert_eq!(message(validate_new_book(&dto, YEAR)), ISBN_INVALID);

        dto.isbn = MIN_ISBN;
        assert!(validate_new_book(&dto, YEAR).is_ok());
    }

    #[test]
    fn test_language_is_case_insensitive() {
        let mut dto = valid_dto();
        dto.language = Some("FR".to_string());
        assert_eq!(
            validate_new_book(&dto, YEAR).unwrap().language,
            Some(Language::French)
        );

        dto.language = Some("xx".to_string());
        assert_eq!(message(validate_new_book(&dto, YEAR)), LANGUAGE_INVALID);

        dto.language = None;
        assert_eq!(validate_new_book(&dto, YEAR).unwrap().language, None);
    }

    #[test]
    fn test_year_bounds() {
        let mut dto = valid_dto();
        dto.year = YEAR + 1;
        assert_eq!(message(validate_new_book(&dto, YEAR)), YEAR_INVALID);

        dto.year = YEAR;
        assert!(validate_new_book(&dto, YEAR).is_ok());

        dto.year = -500;
        assert!(validate_new_book(&dto, YEAR).is_ok());
    }

    #[test]
    fn test_first_failing_gate_wins() {
        let dto = BookDto {
            title: Some(String::new()),
            isbn: 1,
            year: YEAR + 10,
            language: Some("xx".to_string()),
            ..BookDto::default()
        };
        assert_eq!(message(validate_new_book(&dto, YEAR)), TITLE_BLANK);

        let dto = BookDto {
            title: Some("Ok".to_string()),
            ..dto
        };
        assert_eq!(message(validate_new_book(&dto, YEAR)), ISBN_INVALID);

        let dto = BookDto {
            isbn: MIN_ISBN,
            ..dto
        };
        assert_eq!(message(validate_new_book(&dto, YEAR)), LANGUAGE_INVALID);

        let dto = BookDto {
            language: None,
            ..dto
        };
        assert_eq!(message(validate_new_book(&dto, YEAR)), YEAR_INVALID);
    }

    #[test]
    fn test_update_details_only_check_language() {
        let dto = BookDto {
            title: None,
            isbn: 5,
            year: YEAR + 100,
            language: Some("EN".to_string()),
            ..BookDto::default()
        };

        let details = book_details(&dto).unwrap();
        assert_eq!(details.title, "");
        assert_eq!(details.language, Some(Language::English));

        let dto = BookDto {
            language: Some("klingon".to_string()),
            ..dto
        };
        assert_eq!(message(book_details(&dto)), LANGUAGE_INVALID);
    }
}
