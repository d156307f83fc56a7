//! The trust roster: users, groups, and recipient resolution.
//!
//! A roster is parsed from the verified body of a directory's `.users`
//! file. It is built once per invocation and never mutated afterwards.
//!
//! ```text
//! # people
//! alice = 0123456789ABCDEF0123456789ABCDEF01234567
//! bob   = 89ABCDEF0123456789ABCDEF0123456789ABCDEF
//!
//! # groups may only refer to what is declared above them
//! @admins = alice
//! @all    = @admins, bob
//! ```

mod parse;
mod resolve;

use std::collections::BTreeMap;

use crate::core::domain::{AccessExpression, Group, Recipients, User};
use crate::core::types::{GroupName, UserName};
use crate::error::ResolveError;

pub use parse::parse;
pub use resolve::resolve;

/// How blank and `#` comment lines in a roster are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommentPolicy {
    /// Ignore blank lines and lines starting with `#`.
    #[default]
    Skip,
    /// Legacy strict mode: every line must be a declaration.
    Reject,
}

impl CommentPolicy {
    pub fn from_skip(skip: bool) -> Self {
        if skip {
            Self::Skip
        } else {
            Self::Reject
        }
    }
}

/// Validated users and groups for one directory scope.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    users: BTreeMap<UserName, User>,
    groups: BTreeMap<GroupName, Group>,
}

impl Roster {
    /// Parse roster text. See [`parse`].
    pub fn parse(text: &str, comments: CommentPolicy) -> Result<Self, crate::error::RosterError> {
        parse(text, comments)
    }

    pub fn user(&self, name: &str) -> Option<&User> {
        self.users.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Users sorted by name.
    pub fn users(&self) -> impl Iterator<Item = &User> {
        self.users.values()
    }

    /// Groups sorted by name.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.groups.values()
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Expand an access expression into key fingerprints. See [`resolve`].
    pub fn resolve(&self, expression: &AccessExpression) -> Result<Recipients, ResolveError> {
        resolve(expression, self)
    }
}
