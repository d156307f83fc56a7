//! Tests for error reporting and global flags.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help() {
    Test::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"));
}

#[test]
fn test_version() {
    Test::new()
        .cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("huddle "));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    let output = t.run(&["unknown-command"]);
    assert!(!output.status.success());
}

#[test]
fn test_ls_not_implemented() {
    Test::new()
        .cmd()
        .args(["ls", "."])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::starts_with("error: ls is not implemented"));
}

#[test]
fn test_missing_config() {
    let t = Test::new();

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "config not found");
    assert_stderr_contains(&output, "[trust]");
}

#[test]
fn test_untrusted_directory() {
    let t = Test::new();
    t.write_config(&format!("[trust]\n\"/nonexistent/huddle\" = [{:?}]\n", ADMIN));
    t.sign_roster(ADMIN, ROSTER);

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "not a trusted scope");
}

#[test]
fn test_missing_roster() {
    let t = Test::new();
    t.trust(ADMIN);

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "roster not found");
}

#[test]
fn test_roster_signed_by_stranger() {
    let t = Test::new();
    t.trust(ADMIN);
    t.sign_roster(MALLORY, ROSTER);

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "not from a trusted signer");
}

#[test]
fn test_unsigned_roster() {
    let t = Test::new();
    t.trust(ADMIN);
    t.write(".users", ROSTER);

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "not from a trusted signer");
}

#[test]
fn test_malformed_roster() {
    let t = Test::new();
    t.trust(ADMIN);
    t.sign_roster(ADMIN, "alice = A1A1\n");

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "roster line 1");
}

#[test]
fn test_strict_comments() {
    let t = Test::new();
    t.write_config(&format!(
        "[settings]\nskip_comments = false\n\n[trust]\n{:?} = [{:?}]\n",
        t.dir.path().display().to_string(),
        ADMIN
    ));
    t.sign_roster(ADMIN, ROSTER);

    let output = t.run(&["roster"]);
    assert_error(&output);
    assert_stderr_contains(&output, "roster line 1: malformed");
}

#[test]
fn test_missing_gpg() {
    let t = Test::scope();

    let output = t
        .cmd()
        .arg("roster")
        .env("HUDDLE_GPG", "huddle-test-no-such-gpg")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "huddle-test-no-such-gpg not found");
}

#[test]
fn test_completions() {
    let t = Test::new();

    let output = t.run(&["completions", "bash"]);
    assert_success(&output);
    assert_stdout_contains(&output, "huddle");
}
