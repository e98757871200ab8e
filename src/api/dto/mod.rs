//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization/deserialization. Conversions
//! between entities and DTOs live next to the DTO they produce.

pub mod author;
pub mod book;
pub mod health;
