//! Resolve command.
//!
//! Show who an access expression would encrypt to, without touching any file.

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::domain::AccessExpression;
use crate::error::Result;

/// Resolve an expression against the verified roster and list recipients.
pub fn execute(ctx: &Context, expression: &str, json: bool) -> Result<()> {
    let expression = AccessExpression::new(expression);
    let recipients = ctx.scope.roster().resolve(&expression)?;

    if json {
        let recipients_json: Vec<_> = recipients
            .iter()
            .map(|(key, user)| {
                serde_json::json!({
                    "user": user,
                    "fingerprint": key.as_str()
                })
            })
            .collect();

        let result = serde_json::json!({
            "expression": expression.as_str(),
            "recipients": recipients_json,
            "count": recipients.len()
        });
        output::line(&serde_json::to_string_pretty(&result)?);
    } else if recipients.is_empty() {
        output::dimmed("no recipients");
    } else {
        output::blank();
        output::header(&format!("{} recipients", output::count(recipients.len())));
        output::rule();
        for (key, user) in recipients.iter() {
            output::kv(user, key);
        }
    }

    Ok(())
}
