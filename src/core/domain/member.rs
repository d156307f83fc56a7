//! Roster members: users and groups.

use crate::core::domain::Fingerprint;
use crate::core::types::{GroupName, UserName};

/// A person (or machine) that can receive secrets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    name: UserName,
    key: Fingerprint,
}

impl User {
    pub fn new(name: impl Into<UserName>, key: Fingerprint) -> Self {
        Self {
            name: name.into(),
            key,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fingerprint of the user's encryption key.
    pub fn key(&self) -> &Fingerprint {
        &self.key
    }
}

/// A reference held by a group, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    User(UserName),
    Group(GroupName),
}

impl Member {
    /// Classify a member token by its `@` prefix.
    pub fn from_token(token: &str) -> Self {
        if token.starts_with('@') {
            Self::Group(token.to_string())
        } else {
            Self::User(token.to_string())
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::User(name) | Self::Group(name) => name,
        }
    }
}

/// A named, ordered collection of users and previously declared groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    name: GroupName,
    members: Vec<Member>,
}

impl Group {
    pub fn new(name: impl Into<GroupName>, members: Vec<Member>) -> Self {
        Self {
            name: name.into(),
            members,
        }
    }

    /// Group name including the leading `@`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}
