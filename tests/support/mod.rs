//! Test support utilities for huddle integration tests.
//!
//! Provides an isolated home, config, and scope directory per test, plus
//! a stand-in `gpg` so command flows run without a real keyring.

#![allow(dead_code)]

pub mod assertions;
pub mod commands;
pub mod fixtures;

#[allow(unused_imports)]
pub use assertions::*;
#[allow(unused_imports)]
pub use fixtures::*;

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Child processes use `.current_dir()` and explicit env vars, so tests
/// can run in parallel.
pub struct Test {
    /// Scope directory holding the roster and secrets
    pub dir: TempDir,
    /// Temporary home directory, also holding the config and fake tools
    pub home: TempDir,
    /// Fingerprints the fake keyring knows about
    pub keyring: Vec<String>,
}

impl Test {
    /// Create an empty environment: no config, no roster.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        let t = Self {
            dir,
            home,
            keyring: Vec::new(),
        };
        write_executable(&t.fake_gpg_path(), FAKE_GPG);
        t
    }

    /// Create a trusted scope with the standard roster signed by `ADMIN`
    /// and every roster key present in the keyring.
    pub fn scope() -> Self {
        let mut t = Self::new();
        t.trust(ADMIN);
        t.sign_roster(ADMIN, ROSTER);
        t.keyring = vec![ALICE.into(), BOB.into(), CAROL.into()];
        t
    }

    pub fn config_path(&self) -> PathBuf {
        self.home.path().join(".huddle").join("config.toml")
    }

    pub fn fake_gpg_path(&self) -> PathBuf {
        self.home.path().join("fake-gpg")
    }

    /// Write a config trusting `signer` for the scope directory.
    pub fn trust(&self, signer: &str) {
        self.write_config(&format!(
            "[trust]\n{:?} = [{:?}]\n",
            self.dir.path().display().to_string(),
            signer
        ));
    }

    pub fn write_config(&self, contents: &str) {
        let path = self.config_path();
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    /// Write `.users` as the fake gpg's signed format.
    pub fn sign_roster(&self, signer: &str, roster: &str) {
        self.write(".users", &format!("SIGNED-BY {}\n{}", signer, roster));
    }

    pub fn write(&self, name: &str, contents: &str) {
        std::fs::write(self.dir.path().join(name), contents).unwrap();
    }

    pub fn read(&self, name: &str) -> String {
        std::fs::read_to_string(self.dir.path().join(name)).unwrap()
    }

    pub fn exists(&self, name: &str) -> bool {
        self.dir.path().join(name).exists()
    }

    /// Write an editor script that runs `body` with the file as `$1`.
    pub fn editor(&self, body: &str) -> String {
        let script = self.home.path().join("editor.sh");
        write_executable(&script, &format!("#!/bin/sh\n{}\n", body));
        format!("sh {}", script.display())
    }
}

#[cfg(unix)]
fn write_executable(path: &Path, contents: &str) {
    use std::os::unix::fs::PermissionsExt;

    std::fs::write(path, contents).expect("failed to write script");
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
        .expect("failed to chmod script");
}

#[cfg(not(unix))]
fn write_executable(path: &Path, contents: &str) {
    std::fs::write(path, contents).expect("failed to write script");
}
