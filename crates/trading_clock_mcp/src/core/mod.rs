//! # Trading Clock Core
//!
//! This module emulates the server clock of a trading terminal. The server
//! runs at UTC+2 in winter and UTC+3 inside a fixed yearly DST window that
//! does not follow any IANA timezone.
//!
//! ## Features
//! - DST window calculation for any calendar year
//! - Offset resolution for any UTC instant
//! - Offset-qualified ISO 8601 rendering of the server time
//! - Conversion of server timestamps into the observer's local time
//!
//! ## Modules
//! - `clock`: Injectable source of the current UTC instant
//! - `dst`: DST window and server offset rules
//! - `error`: Custom error types and error handling
//! - `models`: Data structures for requests and responses
//! - `provider`: Trading clock operations combining clock, rules and rendering
//! - `render`: Server timestamp rendering and local-time conversion
//! - `utils`: Format constants and parsing helpers

pub mod clock;
pub mod dst;
pub mod error;
pub mod models;
pub mod provider;
pub mod render;
pub mod utils;
