//! REST API layer for HTTP request/response handling.
//!
//! This layer translates HTTP requests into catalog operations and formats
//! responses according to API contracts.
//!
//! # Modules
//!
//! - [`dto`] - Data Transfer Objects and entity conversions
//! - [`extract`] - Request extractors with API error rejections
//! - [`handlers`] - HTTP request handlers
//! - [`messages`] - Localized client-facing messages
//! - [`middleware`] - Request processing middleware
//! - [`routes`] - Route configuration and composition
//! - [`validation`] - Ordered validation gates for book payloads

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod messages;
pub mod middleware;
pub mod routes;
pub mod validation;
