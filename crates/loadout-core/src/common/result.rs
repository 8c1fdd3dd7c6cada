//! Common Result Type
//!
//! Type alias for application results.

use super::error::LoadoutError;

/// Application result type
///
/// Uses LoadoutError for consistent error handling across the crate.
pub type LoadoutResult<T> = Result<T, LoadoutError>;
