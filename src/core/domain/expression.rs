//! Access expressions.

use std::fmt;

/// The recipient list from a secret's `access:` line, e.g. `alice, @admins`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessExpression(String);

impl AccessExpression {
    pub fn new(expression: impl Into<String>) -> Self {
        Self(expression.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tokens separated by runs of spaces, tabs, and commas.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        tokenize(&self.0)
    }
}

impl fmt::Display for AccessExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split on runs of tab, space, and comma.
pub(crate) fn tokenize(text: &str) -> impl Iterator<Item = &str> {
    text.split([' ', '\t', ','])
        .filter(|token| !token.is_empty())
}
