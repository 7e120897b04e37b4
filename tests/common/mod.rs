#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use bookkeeping_core::{
    config::ConfigManager,
    domain::{
        bank::BankAccount,
        category::{CategoryRecord, CategoryType},
        company::Company,
        customer::Customer,
        method::PaymentMethod,
        user::{Role, User},
        workspace::Workspace,
    },
    storage::JsonStorage,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a storage backend and config manager rooted in a unique directory.
pub fn setup_test_env() -> (JsonStorage, ConfigManager, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(Some(base.clone())).expect("create json storage backend");
    let config_manager =
        ConfigManager::with_base_dir(base.clone()).expect("create config manager for temp dir");
    (storage, config_manager, base)
}

pub fn category(id: &str, name: &str, kind: CategoryType, parent: Option<&str>) -> CategoryRecord {
    let record = CategoryRecord::new(id, name, kind);
    match parent {
        Some(parent) => record.with_parent(parent),
        None => record,
    }
}

/// A small company with a two-level category tree and a few directory entries.
pub fn sample_workspace(name: &str) -> Workspace {
    let mut workspace = Workspace::new(Company::new(name).with_contact(
        "office@example.com",
        "+1 555 0100",
        "1 Main St",
    ));
    workspace.categories = vec![
        category("1", "Income", CategoryType::Inflow, None),
        category("2", "Salary", CategoryType::Inflow, Some("1")),
        category("3", "Rent", CategoryType::Outflow, Some("none")),
        category("4", "Office", CategoryType::Outflow, Some("3")),
    ];
    workspace.customers = vec![
        Customer::new("Acme Corp").with_email("billing@acme.test"),
        Customer::new("Globex").with_phone("+44 20 7946 0000"),
        Customer::new("Initech").with_email("tps@initech.test"),
    ];
    workspace.methods = vec![PaymentMethod::new("Cash"), PaymentMethod::new("Card")];
    workspace.banks = vec![BankAccount::new("Operating", "First Bank")];
    workspace.users = vec![User::new("Olivia", "olivia@example.com", Role::Owner)];
    workspace
}
