mod common;

use std::fs;

use bookkeeping_core::{
    config::Config,
    core::{hierarchy::HierarchyBuilder, permissions::Session, services::CompanyService},
    domain::{category::CategoryType, user::Role},
    errors::BookkeepingError,
    storage::WorkspaceStore,
};
use common::{sample_workspace, setup_test_env};

#[test]
fn saved_workspace_loads_back_unchanged() {
    let (storage, _, _) = setup_test_env();
    let workspace = sample_workspace("Acme Holdings");

    storage.save(&workspace).expect("save workspace");
    let loaded = storage.load("Acme Holdings").expect("load workspace");

    assert_eq!(loaded, workspace);
    assert!(storage.workspace_path("Acme Holdings").ends_with("acme-holdings.json"));
}

#[test]
fn list_reports_companies_by_name() {
    let (storage, _, _) = setup_test_env();
    storage.save(&sample_workspace("zeta traders")).unwrap();
    storage.save(&sample_workspace("Alpha Goods")).unwrap();
    fs::write(storage.companies_dir().join("broken.json"), "{ not json").unwrap();
    fs::write(storage.companies_dir().join("notes.txt"), "ignored").unwrap();

    let listed = storage.list().expect("list workspaces");

    let names: Vec<&str> = listed.iter().map(|meta| meta.company_name.as_str()).collect();
    assert_eq!(names, vec!["Alpha Goods", "zeta traders"]);
    assert_eq!(listed[0].slug, "alpha-goods");
}

#[test]
fn companies_sharing_a_file_name_do_not_overwrite_each_other() {
    let (storage, _, _) = setup_test_env();
    let first = sample_workspace("Acme Ltd");
    storage.save(&first).unwrap();

    let clash = storage.save(&sample_workspace("acme-ltd"));

    assert!(matches!(clash, Err(BookkeepingError::InvalidInput(_))));
    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company_id, first.company.id);
    assert_eq!(storage.load("Acme Ltd").unwrap().company.id, first.company.id);
}

#[test]
fn renamed_company_keeps_a_single_file() {
    let (storage, _, _) = setup_test_env();
    let mut workspace = sample_workspace("Old Name");
    storage.save(&workspace).unwrap();
    let owner = Session::new("owner", workspace.company.id.clone(), Role::Owner);

    CompanyService::rename(&mut workspace, &owner, "New Name").unwrap();
    storage.save(&workspace).unwrap();

    let listed = storage.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].company_name, "New Name");
    assert!(!storage.workspace_path("Old Name").exists());
    assert!(matches!(
        storage.load("Old Name"),
        Err(BookkeepingError::CompanyNotFound(_))
    ));
}

#[test]
fn missing_company_is_reported() {
    let (storage, _, _) = setup_test_env();

    let load = storage.load("Nobody Ltd");
    let remove = storage.remove("Nobody Ltd");

    assert!(matches!(load, Err(BookkeepingError::CompanyNotFound(name)) if name == "Nobody Ltd"));
    assert!(matches!(remove, Err(BookkeepingError::CompanyNotFound(_))));
}

#[test]
fn removed_company_disappears_from_listing() {
    let (storage, _, _) = setup_test_env();
    storage.save(&sample_workspace("Short Lived")).unwrap();

    storage.remove("Short Lived").expect("remove workspace");

    assert!(storage.list().unwrap().is_empty());
    assert!(!storage.workspace_path("Short Lived").exists());
}

#[test]
fn api_style_file_loads_through_path_helpers() {
    let (storage, _, base) = setup_test_env();
    let path = base.join("export.json");
    fs::write(
        &path,
        r#"{
            "company": {"id": "c1", "name": "Imported"},
            "categories": [
                {"id": 1, "name": "Income", "type": "inflow", "parentId": null},
                {"id": 2, "name": "Salary", "type": "inflow", "parentId": 1},
                {"id": 3, "name": "Orphan", "type": "inflow", "parentId": "99"},
                {"id": 4, "name": "Rent", "type": "outflow", "parentId": "none"}
            ],
            "updatedAt": "2024-05-01T10:00:00Z"
        }"#,
    )
    .unwrap();

    let workspace = storage.load_from_path(&path).expect("load exported file");
    let forest = HierarchyBuilder::build(&workspace.categories, CategoryType::Inflow);

    assert_eq!(workspace.schema_version, 1);
    assert_eq!(workspace.company.currency, "USD");
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children[0].name, "Salary");

    let copy = base.join("copy.json");
    storage.save_to_path(&workspace, &copy).unwrap();
    assert_eq!(storage.load_from_path(&copy).unwrap(), workspace);
    assert!(!base.join("copy.json.tmp").exists());
}

#[test]
fn corrupt_file_is_a_storage_error() {
    let (storage, _, base) = setup_test_env();
    let path = base.join("corrupt.json");
    fs::write(&path, "[1, 2").unwrap();

    let err = storage.load_from_path(&path).unwrap_err();

    assert!(matches!(err, BookkeepingError::StorageError(_)));
}

#[test]
fn config_lives_beside_the_data() {
    let (_, config_manager, base) = setup_test_env();
    let mut config = Config::default();
    config.last_opened_company = Some("Acme Holdings".into());

    config_manager.save(&config).unwrap();

    assert!(config_manager.path().starts_with(&base));
    assert_eq!(config_manager.load().unwrap(), config);
}
