//! The `access:` line at the top of every secret.

use crate::core::constants::{ACCESS_PLACEHOLDER, ACCESS_PREFIX};
use crate::core::domain::AccessExpression;
use crate::error::GuardError;

/// Read the access expression from the first line of `content`.
///
/// The prefix and line terminator are stripped; the rest of the line is
/// returned as written.
///
/// # Errors
///
/// Returns `GuardError::MissingOrEmptyAccessLine` if the first line lacks
/// the `access: ` prefix or has nothing after it.
pub fn extract(content: &str) -> Result<AccessExpression, GuardError> {
    let first = content.split('\n').next().unwrap_or_default();
    let first = first.strip_suffix('\r').unwrap_or(first);

    let expression = first
        .strip_prefix(ACCESS_PREFIX)
        .ok_or(GuardError::MissingOrEmptyAccessLine)?;

    if expression.trim().is_empty() {
        return Err(GuardError::MissingOrEmptyAccessLine);
    }

    Ok(AccessExpression::new(expression))
}

/// Render an access line, newline included.
pub fn inject(expression: &AccessExpression) -> String {
    format!("{}{}\n", ACCESS_PREFIX, expression)
}

/// Seed text for a new secret: a placeholder access line the author
/// must replace.
pub fn placeholder() -> String {
    inject(&AccessExpression::new(ACCESS_PLACEHOLDER))
}
