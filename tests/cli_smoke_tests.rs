mod common;

use std::path::Path;

use assert_cmd::Command;
use bookkeeping_core::storage::{JsonStorage, WorkspaceStore};
use predicates::prelude::*;
use predicates::str::contains;
use tempfile::TempDir;

use common::sample_workspace;

fn cli(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("bookkeeping_cli").unwrap();
    cmd.env("BOOKKEEPING_HOME", home)
        .env("NO_COLOR", "1")
        .env("RUST_LOG", "off");
    cmd
}

/// Saves a sample company under `home` the way the CLI expects to find it.
fn seeded_home() -> TempDir {
    let home = TempDir::new().unwrap();
    let storage = JsonStorage::new(Some(home.path().to_path_buf())).unwrap();
    storage.save(&sample_workspace("Acme Holdings")).unwrap();
    home
}

#[test]
fn help_lists_commands() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("help")
        .assert()
        .success()
        .stdout(contains("categories").and(contains("list")));
}

#[test]
fn unknown_command_suggests_closest_match() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .arg("lsit")
        .assert()
        .failure()
        .stderr(contains("did you mean `list`"));
}

#[test]
fn category_tree_renders_nested_lines() {
    let home = seeded_home();
    cli(home.path())
        .args(["categories", "Acme Holdings", "--type", "inflow"])
        .assert()
        .success()
        .stdout(contains("Income (1)").and(contains("  - Salary")))
        .stdout(contains("Rent").not());
}

#[test]
fn categories_accept_an_exported_file() {
    let home = TempDir::new().unwrap();
    let path = home.path().join("export.json");
    let storage = JsonStorage::new(Some(home.path().to_path_buf())).unwrap();
    storage
        .save_to_path(&sample_workspace("Exported"), &path)
        .unwrap();

    cli(home.path())
        .arg("categories")
        .arg(format!("--file={}", path.display()))
        .assert()
        .success()
        .stdout(contains("Rent (1)").and(contains("  - Office")));
}

#[test]
fn list_filters_and_pages_customers() {
    let home = seeded_home();
    cli(home.path())
        .args(["list", "customers", "Acme Holdings", "--search", "ACME"])
        .assert()
        .success()
        .stdout(contains("Acme Corp").and(contains("Globex").not()))
        .stdout(contains("Page 1/1 (1-1 of 1)"));

    cli(home.path())
        .args(["list", "customers", "Acme Holdings", "--page-size", "2", "--page", "9"])
        .assert()
        .success()
        .stdout(contains("Initech").and(contains("Page 2/2 (3-3 of 3)")));
}

#[test]
fn viewer_role_cannot_list_users() {
    let home = seeded_home();
    cli(home.path())
        .args(["list", "users", "Acme Holdings", "--role", "viewer"])
        .assert()
        .failure()
        .stderr(contains("may not view users"));

    cli(home.path())
        .args(["list", "methods", "Acme Holdings", "--role", "viewer"])
        .assert()
        .success()
        .stdout(contains("Cash"));
}

#[test]
fn stored_companies_are_listed() {
    let home = seeded_home();
    cli(home.path())
        .args(["list", "companies"])
        .assert()
        .success()
        .stdout(contains("Acme Holdings").and(contains("acme-holdings")));
}

#[test]
fn page_size_setting_is_persisted() {
    let home = seeded_home();
    cli(home.path())
        .args(["config", "set", "page_size", "1"])
        .assert()
        .success();

    cli(home.path())
        .args(["list", "methods", "Acme Holdings"])
        .assert()
        .success()
        .stdout(contains("Page 1/2 (1-1 of 2) - next: --page 2"));
}

#[test]
fn config_show_prints_stored_settings() {
    let home = TempDir::new().unwrap();
    cli(home.path())
        .args(["config", "set", "page_size", "7"])
        .assert()
        .success();

    cli(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(contains("\"defaultPageSize\": 7").and(contains("config.json")));
}
