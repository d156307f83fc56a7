//! External editor and scratch files.
//!
//! Plaintext handed to an editor lives in a [`Scratch`] file: created
//! owner-only, and removed when the `Scratch` is dropped, which happens
//! on every path out of [`Editor::edit`].

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::atomic::{AtomicBool, Ordering};

use tempfile::NamedTempFile;
use tracing::{debug, warn};
use zeroize::Zeroizing;

use crate::core::constants;
use crate::error::{EnvError, Result};

static EDITING: AtomicBool = AtomicBool::new(false);
static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Ctrl-C handler body, installed by the binary.
///
/// While an editor runs the interrupt is recorded and the edit fails once
/// the editor exits, so the scratch file is still removed. Otherwise the
/// process exits immediately.
pub fn handle_interrupt() {
    if EDITING.load(Ordering::SeqCst) {
        INTERRUPTED.store(true, Ordering::SeqCst);
    } else {
        std::process::exit(130);
    }
}

/// Marks an edit in progress for the lifetime of the value.
struct EditSession;

impl EditSession {
    fn begin() -> Self {
        INTERRUPTED.store(false, Ordering::SeqCst);
        EDITING.store(true, Ordering::SeqCst);
        EditSession
    }

    fn interrupted(&self) -> bool {
        INTERRUPTED.load(Ordering::SeqCst)
    }
}

impl Drop for EditSession {
    fn drop(&mut self) {
        EDITING.store(false, Ordering::SeqCst);
    }
}

/// An owner-only temporary file holding plaintext.
pub struct Scratch {
    file: NamedTempFile,
}

impl Scratch {
    /// Create a scratch file containing `contents`.
    ///
    /// `suffix` (e.g. `.yaml`) lets editors pick syntax highlighting.
    pub fn create(contents: &str, suffix: &str) -> Result<Self> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("huddle-").suffix(suffix);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o600));
        }

        let mut file = builder.tempfile()?;

        #[cfg(unix)]
        crate::core::validation::validate_file_permissions(file.path(), 0o600)?;

        file.write_all(contents.as_bytes())?;
        file.flush()?;

        debug!(path = %file.path().display(), "scratch file created");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    /// Read the file back by path, since editors may replace it.
    pub fn read(&self) -> Result<Zeroizing<String>> {
        Ok(Zeroizing::new(std::fs::read_to_string(self.path())?))
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        debug!(path = %self.file.path().display(), "removing scratch file");
    }
}

/// An editor command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Editor {
    program: PathBuf,
    args: Vec<String>,
}

impl Editor {
    /// Find an editor: `configured`, then `$VISUAL`, `$EDITOR`, then the
    /// usual suspects on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::NoEditor` if none of them can be found.
    pub fn find(configured: Option<&str>) -> Result<Self> {
        let from_env = ["VISUAL", "EDITOR"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok());

        let candidates = configured
            .map(str::to_string)
            .into_iter()
            .chain(from_env)
            .chain(constants::FALLBACK_EDITORS.iter().map(|e| e.to_string()));

        for candidate in candidates {
            match Self::from_command(&candidate) {
                Some(editor) => return Ok(editor),
                None => debug!(candidate = %candidate, "editor not found"),
            }
        }

        Err(EnvError::NoEditor.into())
    }

    /// Parse a command such as `code --wait`, resolving the program on
    /// `PATH`. Returns `None` if it is empty or cannot be found.
    pub fn from_command(command: &str) -> Option<Self> {
        let mut words = command.split_whitespace();
        let program = which::which(words.next()?).ok()?;
        Some(Self {
            program,
            args: words.map(str::to_string).collect(),
        })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Open `contents` in the editor and return the edited text.
    ///
    /// Blocks until the editor exits. The scratch file is removed before
    /// this returns, whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns `EnvError::EditorFailed` if the editor cannot be started or
    /// exits unsuccessfully, and `EnvError::Interrupted` on Ctrl-C.
    pub fn edit(&self, contents: &str, suffix: &str) -> Result<Zeroizing<String>> {
        // Declared first so it drops last: the scratch file is gone before
        // Ctrl-C can exit the process again.
        let session = EditSession::begin();
        let scratch = Scratch::create(contents, suffix)?;

        debug!(editor = %self.program.display(), "launching editor");
        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(scratch.path())
            .status()
            .map_err(|e| EnvError::EditorFailed(format!("{}: {}", self.program.display(), e)))?;

        if session.interrupted() {
            warn!("interrupted during edit");
            return Err(EnvError::Interrupted.into());
        }
        if !status.success() {
            return Err(EnvError::EditorFailed(status.to_string()).into());
        }

        scratch.read()
    }
}
