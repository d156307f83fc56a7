//! Tests for the `keys` commands.

use crate::support::*;

#[test]
fn test_keys_display() {
    let mut t = Test::scope();
    t.keyring = vec![ALICE.into(), BOB.into()];

    let output = t.run(&["keys", "display"]);
    assert_success(&output);
    assert_stdout_contains(&output, "ok");
    assert_stdout_contains(&output, "missing");
    assert_stderr_contains(&output, "huddle keys refresh");
}

#[test]
fn test_keys_display_json() {
    let mut t = Test::scope();
    t.keyring = vec![ALICE.into()];

    let output = t.run(&["keys", "display", "--json"]);
    assert_success(&output);

    let json: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    let keys = json.as_array().unwrap();
    assert_eq!(keys.len(), 3);
    assert_eq!(keys[0]["user"], "alice");
    assert_eq!(keys[0]["status"], "ok");
    assert_eq!(keys[0]["key"]["user_id"], "Test <test@example.com>");
    assert_eq!(keys[0]["key"]["created"], "2024-01-01T00:00:00Z");
    assert!(keys[0]["key"]["expires"].is_null());
    assert_eq!(keys[1]["status"], "missing");
    assert!(keys[1]["key"].is_null());
}

#[test]
fn test_keys_refresh_reports_still_missing() {
    let mut t = Test::scope();
    t.keyring = vec![ALICE.into(), BOB.into()];

    let output = t.run(&["keys", "refresh", "--keyserver", "hkps://keys.example.org"]);
    assert_success(&output);
    assert_stderr_contains(&output, "still missing keys for: carol");
}

#[test]
fn test_keys_refresh_all_present() {
    let t = Test::scope();

    let output = t.run(&["keys", "refresh"]);
    assert_success(&output);
    assert_stdout_contains(&output, "refreshed 3 keys");
}

#[test]
fn test_keys_import_needs_no_scope() {
    let t = Test::new();
    t.write_config("");

    let output = t
        .cmd()
        .args(["keys", "import"])
        .write_stdin("-----BEGIN PGP PUBLIC KEY BLOCK-----\n")
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "imported keys");
}

#[test]
fn test_keys_import_rejected() {
    let t = Test::new();
    t.write_config("");

    let output = t
        .cmd()
        .args(["keys", "import"])
        .write_stdin("")
        .output()
        .unwrap();
    assert_error(&output);
    assert_stderr_contains(&output, "error: key import failed: no keys were imported");
}
