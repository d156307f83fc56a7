//! Recipient resolution.

use tracing::{debug, trace};

use super::Roster;
use crate::core::domain::{AccessExpression, Recipients};
use crate::error::ResolveError;

/// Expand an access expression into the deduplicated set of key
/// fingerprints it names, recursing through groups in declaration order.
///
/// An expression naming only empty groups resolves to an empty set; that
/// is left for the caller to reject.
///
/// Group nesting is capped at the number of groups in the roster. A
/// parsed roster can never reach the cap, so hitting it means the roster
/// was built some other way with a cycle in it.
///
/// # Errors
///
/// - `UnknownUser` / `UnknownGroup` for a token the roster does not declare
/// - `TooDeep` when group nesting exceeds the cap
pub fn resolve(expression: &AccessExpression, roster: &Roster) -> Result<Recipients, ResolveError> {
    let limit = roster.group_count();
    let mut recipients = Recipients::new();

    for token in expression.tokens() {
        expand(token, roster, 0, limit, &mut recipients)?;
    }

    debug!(
        expression = %expression,
        recipients = recipients.len(),
        "access expression resolved"
    );

    Ok(recipients)
}

fn expand(
    token: &str,
    roster: &Roster,
    depth: usize,
    limit: usize,
    recipients: &mut Recipients,
) -> Result<(), ResolveError> {
    if token.starts_with('@') {
        let group = roster
            .group(token)
            .ok_or_else(|| ResolveError::UnknownGroup(token.to_string()))?;

        if depth >= limit {
            return Err(ResolveError::TooDeep {
                group: token.to_string(),
                limit,
            });
        }

        trace!(group = token, depth, "expanding group");
        for member in group.members() {
            expand(member.name(), roster, depth + 1, limit, recipients)?;
        }
    } else {
        let user = roster
            .user(token)
            .ok_or_else(|| ResolveError::UnknownUser(token.to_string()))?;
        recipients.insert(user.key().clone(), user.name());
    }

    Ok(())
}
