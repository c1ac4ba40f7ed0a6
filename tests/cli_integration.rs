//! CLI integration tests for shoplist
//!
//! These run the binary against a temporary store directory, checking that
//! every command persists across invocations.

use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Get a command instance bound to a store inside `dir`
fn shoplist_cmd(dir: &Path) -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("shoplist"));
    cmd.env("SHOPLIST_STORE", dir.join("store"))
        .env("SHOPLIST_CONFIG", dir.join("config.toml"))
        .env_remove("RUST_LOG");
    cmd
}

fn list_path(dir: &Path) -> std::path::PathBuf {
    dir.join("store").join("shoppingList.json")
}

/// Runs `list --format json` and returns the parsed items
fn list_json(dir: &Path) -> Vec<serde_json::Value> {
    let output = shoplist_cmd(dir)
        .args(["list", "--format", "json"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    serde_json::from_str(&stdout).unwrap()
}

fn add(dir: &Path, args: &[&str]) {
    shoplist_cmd(dir).arg("add").args(args).assert().success();
}

// =============================================================================
// Load Tests
// =============================================================================

#[test]
fn test_list_empty_store() {
    let dir = TempDir::new().unwrap();

    shoplist_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("shopping list is empty"));

    assert!(!list_path(dir.path()).exists());
}

#[test]
fn test_list_corrupt_store_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("store")).unwrap();
    fs::write(list_path(dir.path()), "{broken").unwrap();

    shoplist_cmd(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"));

    // Storage is left for the user to inspect
    assert_eq!(fs::read_to_string(list_path(dir.path())).unwrap(), "{broken");
}

// =============================================================================
// Add Tests
// =============================================================================

#[test]
fn test_add_persists_item() {
    let dir = TempDir::new().unwrap();

    shoplist_cmd(dir.path())
        .args(["add", "Milk", "--quantity", "2", "--category", "Food", "--price", "1.50"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added Milk"));

    let items = list_json(dir.path());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Milk");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["category"], "Food");
    assert_eq!(items[0]["price"], 1.5);
    assert_eq!(items[0]["purchased"], false);

    let stored: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(list_path(dir.path())).unwrap()).unwrap();
    assert_eq!(stored, serde_json::Value::Array(items));
}

#[test]
fn test_add_applies_defaults() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Eggs", "--price", "abc"]);

    let items = list_json(dir.path());
    assert_eq!(items[0]["quantity"], 1);
    assert_eq!(items[0]["category"], "Uncategorized");
    assert_eq!(items[0]["price"], 0.0);
}

#[test]
fn test_add_duplicate_fails() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk"]);
    let before = fs::read_to_string(list_path(dir.path())).unwrap();

    shoplist_cmd(dir.path())
        .args(["add", "Milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already on the list"));

    assert_eq!(fs::read_to_string(list_path(dir.path())).unwrap(), before);
}

#[test]
fn test_add_blank_name_fails() {
    let dir = TempDir::new().unwrap();

    shoplist_cmd(dir.path())
        .args(["add", " "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("name"));

    assert!(!list_path(dir.path()).exists());
}

#[test]
fn test_add_json_output() {
    let dir = TempDir::new().unwrap();

    let output = shoplist_cmd(dir.path())
        .args(["--format", "json", "add", "Tea"])
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["success"], true);
    assert_eq!(json["result"]["outcome"], "added");
    assert_eq!(json["result"]["item"]["name"], "Tea");
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

#[test]
fn test_add_over_corrupt_store_fails() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("store")).unwrap();
    fs::write(list_path(dir.path()), "nope").unwrap();

    shoplist_cmd(dir.path())
        .args(["add", "Milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Warning"))
        .stderr(predicate::str::contains("Failed to add item"));

    assert_eq!(fs::read_to_string(list_path(dir.path())).unwrap(), "nope");
}

#[test]
fn test_add_over_non_utf8_store_suggests_clear() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("store")).unwrap();
    fs::write(list_path(dir.path()), [0xff, 0xfe, b'[', b']']).unwrap();

    shoplist_cmd(dir.path())
        .args(["add", "Milk"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("corrupt"))
        .stderr(predicate::str::contains("Run 'shoplist clear'"));

    assert_eq!(
        fs::read(list_path(dir.path())).unwrap(),
        [0xff, 0xfe, b'[', b']']
    );
}

// =============================================================================
// Edit Tests
// =============================================================================

#[test]
fn test_edit_updates_fields() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk", "-q", "2", "-c", "Food", "-p", "1.5"]);
    let id = list_json(dir.path())[0]["id"].clone();

    shoplist_cmd(dir.path())
        .args(["edit", "0", "--name", "Oat milk", "--price", "2.25"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated Oat milk"));

    let items = list_json(dir.path());
    assert_eq!(items[0]["id"], id);
    assert_eq!(items[0]["name"], "Oat milk");
    assert_eq!(items[0]["quantity"], 2);
    assert_eq!(items[0]["category"], "Food");
    assert_eq!(items[0]["price"], 2.25);
}

#[test]
fn test_edit_out_of_bounds_fails() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["A"]);
    add(dir.path(), &["B"]);
    add(dir.path(), &["C"]);
    let before = fs::read_to_string(list_path(dir.path())).unwrap();

    shoplist_cmd(dir.path())
        .args(["edit", "5", "--name", "X"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No item at index 5"));

    assert_eq!(fs::read_to_string(list_path(dir.path())).unwrap(), before);
}

#[test]
fn test_edit_blank_field_fails() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk"]);

    shoplist_cmd(dir.path())
        .args(["edit", "0", "--category", ""])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category"));
}

// =============================================================================
// Toggle / Remove Tests
// =============================================================================

#[test]
fn test_toggle_marks_purchased() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk"]);
    let id = list_json(dir.path())[0]["id"].to_string();

    shoplist_cmd(dir.path())
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("marked as purchased"));
    assert_eq!(list_json(dir.path())[0]["purchased"], true);

    shoplist_cmd(dir.path())
        .args(["toggle", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("unmarked"));
    assert_eq!(list_json(dir.path())[0]["purchased"], false);
}

#[test]
fn test_list_shows_purchase_mark_and_total() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk", "-q", "2", "-p", "1.5"]);
    let id = list_json(dir.path())[0]["id"].to_string();
    shoplist_cmd(dir.path()).args(["toggle", &id]).assert().success();

    shoplist_cmd(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("[x]"))
        .stdout(predicate::str::contains("Milk"))
        .stdout(predicate::str::contains("1 purchased, total 3.00"));
}

#[test]
fn test_remove_twice_is_noop() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk"]);
    add(dir.path(), &["Eggs"]);
    let id = list_json(dir.path())[0]["id"].to_string();

    shoplist_cmd(dir.path())
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed item"));
    let after_first = fs::read_to_string(list_path(dir.path())).unwrap();

    shoplist_cmd(dir.path())
        .args(["remove", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("was not on the list"));

    assert_eq!(fs::read_to_string(list_path(dir.path())).unwrap(), after_first);
    let items = list_json(dir.path());
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Eggs");
}

#[test]
fn test_remove_rejects_non_numeric_id() {
    let dir = TempDir::new().unwrap();

    shoplist_cmd(dir.path())
        .args(["remove", "Milk"])
        .assert()
        .failure();
}

// =============================================================================
// Clear Tests
// =============================================================================

#[test]
fn test_clear_removes_list_and_token() {
    let dir = TempDir::new().unwrap();
    add(dir.path(), &["Milk"]);
    let token = dir.path().join("store").join("userToken.json");
    let user = dir.path().join("store").join("user.json");
    fs::write(&token, "\"session\"").unwrap();
    fs::write(&user, r#"{"email":"a@b.co","name":"Ada"}"#).unwrap();

    shoplist_cmd(dir.path())
        .arg("clear")
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    assert!(!list_path(dir.path()).exists());
    assert!(!token.exists());
    assert!(user.exists());
    assert!(list_json(dir.path()).is_empty());
}

#[test]
fn test_clear_recovers_corrupt_store() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("store")).unwrap();
    fs::write(list_path(dir.path()), "nope").unwrap();

    shoplist_cmd(dir.path()).arg("clear").assert().success();
    add(dir.path(), &["Milk"]);

    assert_eq!(list_json(dir.path()).len(), 1);
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_default_format() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "default_format = \"json\"\n").unwrap();

    let output = shoplist_cmd(dir.path()).arg("list").assert().success();
    let stdout = String::from_utf8_lossy(&output.get_output().stdout);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn test_config_data_dir_used_without_override() {
    let dir = TempDir::new().unwrap();
    let data_dir = dir.path().join("configured");
    fs::write(
        dir.path().join("config.toml"),
        format!("data_dir = {:?}\n", data_dir.display().to_string()),
    )
    .unwrap();

    shoplist_cmd(dir.path())
        .env_remove("SHOPLIST_STORE")
        .args(["add", "Milk"])
        .assert()
        .success();

    assert!(data_dir.join("shoppingList.json").exists());
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.toml"), "default_format = 3\n").unwrap();

    shoplist_cmd(dir.path())
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let dir = TempDir::new().unwrap();

    shoplist_cmd(dir.path())
        .args(["--verbose", "list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("opening store"));
}
