//! Keys commands.
//!
//! Inspect and fetch the public keys of everyone in the roster.

use std::io::{self, Read};
use std::path::Path;

use tracing::{debug, info};

use crate::cli::context::Context;
use crate::cli::output;
use crate::core::cipher::{Gpg, KeyInfo, KeyRing};
use crate::core::config::Config;
use crate::core::domain::{Fingerprint, User};
use crate::error::{CipherError, Result};

/// State of one roster user's key in the local keyring.
enum KeyState {
    Missing,
    Present(KeyInfo),
}

impl KeyState {
    fn label(&self) -> (&'static str, bool) {
        match self {
            Self::Missing => ("missing", false),
            Self::Present(info) if info.usable() => ("ok", true),
            Self::Present(_) => ("unusable", false),
        }
    }
}

fn lookup(keys: &dyn KeyRing, user: &User) -> Result<KeyState> {
    Ok(match keys.describe(user.key())? {
        Some(info) => KeyState::Present(info),
        None => KeyState::Missing,
    })
}

/// Show each roster user's key status.
pub fn display(ctx: &Context, json: bool) -> Result<()> {
    let roster = ctx.scope.roster();
    let mut rows = Vec::with_capacity(roster.user_count());
    for user in roster.users() {
        rows.push((user, lookup(&ctx.gpg, user)?));
    }

    if json {
        let keys_json: Vec<_> = rows
            .iter()
            .map(|(user, state)| {
                let info = match state {
                    KeyState::Present(info) => Some(info),
                    KeyState::Missing => None,
                };
                serde_json::json!({
                    "user": user.name(),
                    "fingerprint": user.key().as_str(),
                    "status": state.label().0,
                    "key": info
                })
            })
            .collect();
        output::line(&serde_json::to_string_pretty(&keys_json)?);
        return Ok(());
    }

    output::blank();
    output::header(&format!("{} keys", output::count(rows.len())));
    output::rule();
    for (user, state) in &rows {
        let (word, good) = state.label();
        let mut detail = format!("{}  {}", output::status(word, good), user.key().short());
        if let KeyState::Present(info) = state {
            if let Some(uid) = &info.user_id {
                detail.push_str(&format!("  {}", uid));
            }
            if let Some(expires) = info.expires {
                detail.push_str(&format!("  expires {}", expires.format("%Y-%m-%d")));
            }
        }
        output::kv(user.name(), detail);
    }

    let missing = rows
        .iter()
        .filter(|(_, state)| matches!(state, KeyState::Missing))
        .count();
    if missing > 0 {
        output::blank();
        output::hint("run: huddle keys refresh");
    }

    Ok(())
}

/// Fetch every roster key from the keyserver.
pub fn refresh(ctx: &Context, keyserver: Option<&str>) -> Result<()> {
    let keyserver = keyserver.unwrap_or(&ctx.config.settings.keyserver);
    let wanted: Vec<Fingerprint> = ctx.scope.roster().users().map(|u| u.key().clone()).collect();

    info!(keyserver, keys = wanted.len(), "refreshing keys");
    ctx.gpg.receive(keyserver, &wanted)?;

    let mut still_missing = Vec::new();
    for user in ctx.scope.roster().users() {
        if !ctx.gpg.has_key(user.key())? {
            still_missing.push(user.name());
        }
    }

    if still_missing.is_empty() {
        output::success(&format!("refreshed {} keys", output::count(wanted.len())));
    } else {
        output::warn(&format!("still missing keys for: {}", still_missing.join(", ")));
    }
    Ok(())
}

/// Import public key material from a file or stdin.
///
/// Needs only the configuration, not a trusted scope.
pub fn import(config_path: Option<&Path>, file: Option<&Path>) -> Result<()> {
    let config = Config::load(config_path)?;
    let gpg = Gpg::new(config.gpg_program());

    let material = match file {
        Some(path) => std::fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };
    debug!(bytes = material.len(), "importing key material");

    if !gpg.import(&material)? {
        return Err(CipherError::KeyImportFailed("no keys were imported".to_string()).into());
    }
    output::success("imported keys");
    Ok(())
}
