//! # CNR Common Library
//!
//! Shared code for the candidate nomination restore tools:
//! - Error and result types
//! - TOML bootstrap configuration and path resolution
//! - Database pool initialization, store schema and row models

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
