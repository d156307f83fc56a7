//! Per-invocation setup shared by commands.

use std::path::Path;

use crate::core::cipher::Gpg;
use crate::core::config::Config;
use crate::core::editor::Editor;
use crate::core::scope::Scope;
use crate::core::secrets::Secrets;
use crate::error::Result;

/// Configuration, backend, and verified roster for the current directory.
pub struct Context {
    pub config: Config,
    pub gpg: Gpg,
    pub scope: Scope,
}

impl Context {
    /// Load configuration and open the scope of the working directory.
    pub fn open(config_path: Option<&Path>) -> Result<Self> {
        let config = Config::load(config_path)?;
        let gpg = Gpg::new(config.gpg_program());
        let scope = Scope::open(&config, &gpg)?;

        Ok(Self { config, gpg, scope })
    }

    pub fn secrets(&self) -> Secrets<'_> {
        Secrets::new(self.scope.roster(), &self.gpg, &self.gpg)
    }

    pub fn editor(&self) -> Result<Editor> {
        Editor::find(self.config.settings.editor.as_deref())
    }
}
