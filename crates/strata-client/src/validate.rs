//! Argument validation run before any request is built or dispatched.
//!
//! These checks enforce the caller contract: structural argument errors are
//! returned immediately, never delivered through a network failure path.

use crate::error::{Error, ErrorKind, Result};

/// Require a non-blank string argument.
pub fn require_non_blank(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument(format!(
            "{} must not be blank",
            name
        ))));
    }
    Ok(())
}

/// Require a non-empty collection argument.
pub fn require_non_empty<T>(name: &str, values: &[T]) -> Result<()> {
    if values.is_empty() {
        return Err(Error::new(ErrorKind::InvalidArgument(format!(
            "{} must not be empty",
            name
        ))));
    }
    Ok(())
}
