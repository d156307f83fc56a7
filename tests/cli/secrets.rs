//! Tests for creating, reading, and rewriting secrets.

use crate::support::*;

const SECRET: &str = "access: @ops\nDB_PASSWORD=hunter2\n";

#[test]
fn test_add_then_cat() {
    let t = Test::scope();

    let output = t.add("db.env", SECRET);
    assert_success(&output);
    assert_stdout_contains(&output, "added db.env");

    let stored = t.read("db.env");
    assert!(stored.starts_with("-----BEGIN PGP MESSAGE-----"));
    assert!(stored.contains(ALICE));
    assert!(stored.contains(BOB));
    assert!(!stored.contains(CAROL));

    let output = t.cat("db.env");
    assert_success(&output);
    assert_eq!(stdout(&output), SECRET);
}

#[test]
fn test_add_is_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));

    let mode = std::fs::metadata(t.dir.path().join("db.env"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_add_refuses_existing_file() {
    let t = Test::scope();
    t.write("db.env", "keep me\n");

    let output = t.add("db.env", SECRET);
    assert_error(&output);
    assert_stderr_contains(&output, "file already exists");
    assert_eq!(t.read("db.env"), "keep me\n");
}

#[test]
fn test_add_missing_access_line() {
    let t = Test::scope();

    let output = t.add("db.env", "DB_PASSWORD=hunter2\n");
    assert_error(&output);
    assert_stderr_contains(&output, "access:");
    assert!(!t.exists("db.env"));
}

#[test]
fn test_add_placeholder_rejected() {
    let t = Test::scope();

    let output = t.add("db.env", "access: FIXME\nx\n");
    assert_error(&output);
    assert_stderr_contains(&output, "unknown user: FIXME");
    assert!(!t.exists("db.env"));
}

#[test]
fn test_add_missing_key_writes_nothing() {
    let mut t = Test::scope();
    t.keyring = vec![ALICE.into()];

    let output = t.add("db.env", SECRET);
    assert_error(&output);
    assert_stderr_contains(&output, "missing keys for recipients: bob");
    assert_stderr_contains(&output, "huddle keys refresh");
    assert!(!t.exists("db.env"));
}

#[test]
fn test_cat_plaintext_file() {
    let t = Test::scope();
    t.write("notes.txt", SECRET);

    let output = t.cat("notes.txt");
    assert_error(&output);
    assert_stderr_contains(&output, "not encrypted");
}

#[test]
fn test_cat_missing_file() {
    let t = Test::scope();

    let output = t.cat("nope.env");
    assert_error(&output);
    assert_stderr_contains(&output, "file not found");
}

#[test]
fn test_enc_then_reencrypt() {
    let t = Test::scope();
    t.write("db.env", SECRET);

    let output = t.run(&["enc", "db.env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "encrypted db.env");
    let first = t.read("db.env");
    assert!(first.starts_with("-----BEGIN PGP MESSAGE-----"));

    let output = t.run(&["encrypt", "db.env"]);
    assert_success(&output);
    assert_stdout_contains(&output, "re-encrypted db.env");
    assert_eq!(t.read("db.env"), first);
}

#[test]
fn test_reencrypt_follows_roster_changes() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));

    t.sign_roster(ADMIN, &ROSTER.replace("@ops = @admins, bob", "@ops = @admins, carol"));

    assert_success(&t.run(&["enc", "db.env"]));
    let stored = t.read("db.env");
    assert!(stored.contains(CAROL));
    assert!(!stored.contains(BOB));
}

#[test]
fn test_decrypt_in_place() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));

    let output = t.run(&["decrypt", "db.env"]);
    assert_success(&output);
    assert_stderr_contains(&output, "huddle enc db.env");
    assert_eq!(t.read("db.env"), SECRET);
}

#[test]
fn test_edit_changes_secret() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let editor = t.editor("sed -i.bak 's/hunter2/correct-horse/' \"$1\" && rm -f \"$1.bak\"");

    let output = t.edit_with("db.env", &editor);
    assert_success(&output);
    assert_stdout_contains(&output, "updated db.env");

    let output = t.cat("db.env");
    assert_stdout_contains(&output, "DB_PASSWORD=correct-horse");
}

#[test]
fn test_edit_without_changes() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let before = t.read("db.env");
    let editor = t.editor("true");

    let output = t.edit_with("db.env", &editor);
    assert_success(&output);
    assert_stdout_contains(&output, "no changes");
    assert_eq!(t.read("db.env"), before);
}

#[test]
fn test_edit_bad_access_line_keeps_file() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let before = t.read("db.env");
    let editor = t.editor("printf 'access: mallory\\nx\\n' > \"$1\"");

    let output = t.edit_with("db.env", &editor);
    assert_error(&output);
    assert_stderr_contains(&output, "unknown user: mallory");
    assert_eq!(t.read("db.env"), before);
}

#[test]
fn test_edit_failing_editor() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let editor = t.editor("exit 3");

    let output = t.edit_with("db.env", &editor);
    assert_error(&output);
    assert_stderr_contains(&output, "editor exited unsuccessfully");
}

#[test]
fn test_mod_alias() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let editor = t.editor("true");

    let output = t
        .cmd()
        .args(["mod", "db.env"])
        .env("EDITOR", &editor)
        .output()
        .unwrap();
    assert_success(&output);
}

#[test]
fn test_interrupt_during_edit() {
    let t = Test::scope();
    assert_success(&t.add("db.env", SECRET));
    let before = t.read("db.env");
    let record = t.home.path().join("scratch-path");
    let editor = t.editor(&format!(
        "echo \"$1\" > {}\nkill -INT $PPID\nsleep 1\nprintf 'access: alice\\nchanged\\n' > \"$1\"",
        record.display()
    ));

    let output = t.edit_with("db.env", &editor);
    assert_error(&output);
    assert_stderr_contains(&output, "error: interrupted");

    let scratch = std::fs::read_to_string(&record).unwrap();
    assert!(!std::path::Path::new(scratch.trim()).exists());
    assert_eq!(t.read("db.env"), before);
}
