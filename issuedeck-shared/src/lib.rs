//! # IssueDeck Shared Library
//!
//! Data access, authentication and summary plumbing shared by the
//! IssueDeck API server and its integration tests.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Users, teams, projects and issues with their SQL operations
//! - `auth`: Passwords, session tokens, session middleware and ownership checks
//! - `summary`: Prompt rendering and the text-completion client

pub mod auth;
pub mod db;
pub mod models;
pub mod summary;

/// Current version of the IssueDeck shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
