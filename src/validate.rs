//! Argument validation
//!
//! Every endpoint method checks its required arguments here before any
//! request is built, so bad input fails fast with `Error::InvalidArgument`.

use crate::error::{Error, Result};

/// Require a non-empty, non-whitespace string argument
pub fn not_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid_argument(name, "must not be empty"));
    }
    Ok(())
}

/// Require a non-zero numeric identifier
pub fn non_zero(value: u64, name: &str) -> Result<()> {
    if value == 0 {
        return Err(Error::invalid_argument(name, "must be greater than zero"));
    }
    Ok(())
}

/// Require an optional numeric option to be non-zero when present
pub fn non_zero_if_set(value: Option<u32>, name: &str) -> Result<()> {
    match value {
        Some(0) => Err(Error::invalid_argument(name, "must be greater than zero")),
        _ => Ok(()),
    }
}
