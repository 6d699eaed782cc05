//! Trading Clock MCP Server
//!
//! Emulates a trading terminal's server clock, which runs at UTC+2 and
//! switches to UTC+3 between the second Sunday of March and the first Sunday
//! of November (02:00 UTC). The `core` module can be used on its own; the
//! `server` module exposes it over the Model Context Protocol.

pub mod cli;
pub mod config;
pub mod core;
pub mod server;
pub mod utils;
