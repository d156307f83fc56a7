//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create a huddle command with an isolated environment.
    ///
    /// - HOME and the config point into the temporary home
    /// - gpg is the fake script, with the test's keyring
    /// - the current directory is the scope directory
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("huddle").expect("failed to find huddle binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("HUDDLE_CONFIG", self.config_path());
        cmd.env("HUDDLE_GPG", self.fake_gpg_path());
        cmd.env("FAKE_GPG_KEYS", self.keyring.join(" "));
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("HUDDLE_LOG");
        cmd.env_remove("VISUAL");
        cmd.env_remove("EDITOR");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Run `huddle <args>`.
    pub fn run(&self, args: &[&str]) -> Output {
        self.cmd().args(args).output().expect("failed to run huddle")
    }

    /// Shortcut for `huddle add <file>` with `contents` piped on stdin.
    pub fn add(&self, file: &str, contents: &str) -> Output {
        self.cmd()
            .args(["add", file])
            .write_stdin(contents)
            .output()
            .expect("failed to run huddle add")
    }

    /// Shortcut for `huddle cat <file>`.
    pub fn cat(&self, file: &str) -> Output {
        self.run(&["cat", file])
    }

    /// Shortcut for `huddle edit <file>` with the given editor command.
    pub fn edit_with(&self, file: &str, editor: &str) -> Output {
        self.cmd()
            .args(["edit", file])
            .env("EDITOR", editor)
            .output()
            .expect("failed to run huddle edit")
    }
}
