//! Roster command.
//!
//! Print the verified roster of the current directory.

use crate::cli::context::Context;
use crate::cli::output;
use crate::error::Result;

/// Show users, groups, and who signed the roster.
pub fn execute(ctx: &Context, json: bool) -> Result<()> {
    let roster = ctx.scope.roster();

    if json {
        let users: Vec<_> = roster
            .users()
            .map(|u| serde_json::json!({ "name": u.name(), "fingerprint": u.key().as_str() }))
            .collect();
        let groups: Vec<_> = roster
            .groups()
            .map(|g| {
                let members: Vec<_> = g.members().iter().map(|m| m.name()).collect();
                serde_json::json!({ "name": g.name(), "members": members })
            })
            .collect();

        let result = serde_json::json!({
            "signer": ctx.scope.signer().as_str(),
            "users": users,
            "groups": groups
        });
        output::line(&serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    output::blank();
    output::kv("scope", output::path(ctx.scope.dir()));
    output::kv("signed by", ctx.scope.signer());

    output::blank();
    output::header(&format!("{} users", output::count(roster.user_count())));
    output::rule();
    for user in roster.users() {
        output::kv(user.name(), user.key().short());
    }

    if roster.group_count() > 0 {
        output::blank();
        output::header(&format!("{} groups", output::count(roster.group_count())));
        output::rule();
        for group in roster.groups() {
            let members: Vec<_> = group.members().iter().map(|m| m.name()).collect();
            output::kv(group.name(), members.join(" "));
        }
    }

    Ok(())
}
