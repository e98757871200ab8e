//! Closed set of languages a book can be catalogued in.

use std::fmt;
use std::str::FromStr;

/// Language of a catalogued book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    French,
    English,
    German,
    Spanish,
    Italian,
    Portuguese,
    Dutch,
    Russian,
    Japanese,
    Chinese,
}

/// Lookup table from wire code to language. Codes are stored lowercase.
const LANGUAGE_CODES: &[(&str, Language)] = &[
    ("fr", Language::French),
    ("en", Language::English),
    ("de", Language::German),
    ("es", Language::Spanish),
    ("it", Language::Italian),
    ("pt", Language::Portuguese),
    ("nl", Language::Dutch),
    ("ru", Language::Russian),
    ("ja", Language::Japanese),
    ("zh", Language::Chinese),
];

/// Error returned when a language code is not part of [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown language code '{0}'")]
pub struct UnknownLanguage(pub String);

impl Language {
    /// Returns every supported language, in table order.
    pub fn all() -> impl Iterator<Item = Language> {
        LANGUAGE_CODES.iter().map(|(_, language)| *language)
    }

    /// Canonical lowercase code used on the wire and in storage.
    pub fn code(self) -> &'static str {
        LANGUAGE_CODES
            .iter()
            .find(|(_, language)| *language == self)
            .map(|(code, _)| *code)
            .unwrap_or_default()
    }
}

impl FromStr for Language {
    type Err = UnknownLanguage;

    /// Parses a language code, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LANGUAGE_CODES
            .iter()
            .find(|(code, _)| code.eq_ignore_ascii_case(s))
            .map(|(_, language)| *language)
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
