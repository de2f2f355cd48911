//! Name validation shared by plugins, modules and command nodes.
//!
//! Every name that ends up as a subcommand goes through [`normalize_name`], so
//! a valid plugin or module name is always a valid command name.

use thiserror::Error;

/// Maximum length of a plugin, module or command name.
pub const MAX_NAME_LENGTH: usize = 64;

/// Reasons a raw name is rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidNameError {
    /// The name is empty after trimming.
    #[error("name must not be empty")]
    Empty,

    /// The name does not start with an ASCII letter or digit.
    #[error("name '{0}' must start with a lowercase letter or digit")]
    InvalidStart(String),

    /// The name contains characters outside `[a-z0-9_-]`.
    #[error(
        "name '{0}' contains invalid characters (only lowercase alphanumerics, '-' and '_' allowed)"
    )]
    InvalidCharacters(String),

    /// The name exceeds [`MAX_NAME_LENGTH`].
    #[error("name '{0}' exceeds {MAX_NAME_LENGTH} character limit")]
    TooLong(String),
}

/// Trims, lowercases and validates a name.
///
/// # Errors
///
/// Returns [`InvalidNameError`] when the normalized value is empty, too long,
/// or contains characters outside `[a-z0-9_-]`.
pub fn normalize_name(value: &str) -> Result<String, InvalidNameError> {
    let normalized = value.trim().to_ascii_lowercase();

    let Some(first) = normalized.chars().next() else {
        return Err(InvalidNameError::Empty);
    };
    if !first.is_ascii_alphanumeric() {
        return Err(InvalidNameError::InvalidStart(normalized));
    }

    let is_valid = normalized.chars().all(|character| {
        character.is_ascii_lowercase() || character.is_ascii_digit() || matches!(character, '-' | '_')
    });
    if !is_valid {
        return Err(InvalidNameError::InvalidCharacters(normalized));
    }

    if normalized.len() > MAX_NAME_LENGTH {
        return Err(InvalidNameError::TooLong(normalized));
    }

    Ok(normalized)
}
