//! # Slapvote Common Library
//!
//! Shared code for the slapvote backend including:
//! - Database schema, models and initialization
//! - Vote classification rules (slap/scrap verdicts)
//! - Configuration loading
//! - Error types
//! - Timestamp utilities

pub mod classify;
pub mod config;
pub mod db;
pub mod error;
pub mod time;

pub use classify::Verdict;
pub use error::{Error, Result};
