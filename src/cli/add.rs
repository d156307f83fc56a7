//! Add command.
//!
//! Create a secret in the editor, seeded with a placeholder access line.
//! When stdin is piped, its content is used instead of an editor.

use std::io::{self, IsTerminal, Read};
use std::path::Path;

use tracing::info;
use zeroize::Zeroizing;

use crate::cli::context::Context;
use crate::cli::{edit, output};
use crate::core::access;
use crate::core::secrets::Secrets;
use crate::error::Result;

/// Create a new secret.
pub fn execute(ctx: &Context, file: &Path) -> Result<()> {
    info!(path = %file.display(), "adding secret");

    Secrets::ensure_absent(file)?;
    let secrets = ctx.secrets();

    if !io::stdin().is_terminal() {
        let mut input = Zeroizing::new(String::new());
        io::stdin().read_to_string(&mut input)?;
        secrets.create(file, &input)?;
    } else {
        edit::compose(ctx, file, &access::placeholder(), |text| {
            secrets.create(file, text)
        })?;
    }

    output::success(&format!("added {}", output::path(file)));
    Ok(())
}
