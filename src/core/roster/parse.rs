//! Roster grammar.
//!
//! ```text
//! user  := NAME  ws* "=" ws* HEX{40} ws*      NAME  = [A-Za-z0-9:-]+
//! group := GROUP ws* "=" ws* member*          GROUP = "@" [A-Za-z0-9-]+
//! ```
//!
//! Group members are separated by runs of spaces, tabs, and commas, and
//! each must already be declared. That single rule keeps the group graph
//! acyclic without any cycle detection.

use tracing::{debug, trace};

use super::{CommentPolicy, Roster};
use crate::core::domain::{tokenize, Fingerprint, Group, Member, User};
use crate::core::validation;
use crate::error::RosterError;

/// Parse verified roster text.
///
/// Parsing is all or nothing: the first offending line aborts with an
/// error naming its 1-based line number.
///
/// # Errors
///
/// - `MalformedLine` for anything that is not a declaration (or a
///   blank/comment line under [`CommentPolicy::Skip`])
/// - `DuplicateUser` / `DuplicateGroup` for a second declaration of a name
/// - `UnknownReference` for a group member not declared above it
pub fn parse(text: &str, comments: CommentPolicy) -> Result<Roster, RosterError> {
    let mut roster = Roster::default();

    for (index, line) in text.lines().enumerate() {
        let number = index + 1;

        if comments == CommentPolicy::Skip && is_ignorable(line) {
            continue;
        }

        let malformed = || RosterError::MalformedLine {
            line: number,
            content: line.to_string(),
        };

        let (name, value) = split_declaration(line).ok_or_else(malformed)?;

        if name.starts_with('@') {
            if !validation::is_group_name(name) {
                return Err(malformed());
            }
            declare_group(&mut roster, number, name, value)?;
        } else {
            if !validation::is_user_name(name) {
                return Err(malformed());
            }
            let key = Fingerprint::parse(value.trim_end()).ok_or_else(malformed)?;
            declare_user(&mut roster, number, name, key)?;
        }
    }

    debug!(
        users = roster.users.len(),
        groups = roster.groups.len(),
        "roster parsed"
    );

    Ok(roster)
}

fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

/// Split `NAME ws* = ws* VALUE` into name and value.
fn split_declaration(line: &str) -> Option<(&str, &str)> {
    let (left, right) = line.split_once('=')?;
    Some((left.trim_end(), right.trim_start()))
}

fn declare_user(
    roster: &mut Roster,
    line: usize,
    name: &str,
    key: Fingerprint,
) -> Result<(), RosterError> {
    if roster.users.contains_key(name) {
        return Err(RosterError::DuplicateUser {
            line,
            name: name.to_string(),
        });
    }

    trace!(user = name, key = %key, "user declared");
    roster.users.insert(name.to_string(), User::new(name, key));
    Ok(())
}

fn declare_group(
    roster: &mut Roster,
    line: usize,
    name: &str,
    value: &str,
) -> Result<(), RosterError> {
    if roster.groups.contains_key(name) {
        return Err(RosterError::DuplicateGroup {
            line,
            name: name.to_string(),
        });
    }

    let mut members = Vec::new();
    for token in tokenize(value) {
        let member = Member::from_token(token);
        let known = match &member {
            Member::Group(group) => roster.groups.contains_key(group),
            Member::User(user) => roster.users.contains_key(user),
        };
        if !known {
            return Err(RosterError::UnknownReference {
                line,
                name: token.to_string(),
            });
        }
        members.push(member);
    }

    trace!(group = name, members = members.len(), "group declared");
    roster
        .groups
        .insert(name.to_string(), Group::new(name, members));
    Ok(())
}
