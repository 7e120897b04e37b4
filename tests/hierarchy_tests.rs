mod common;

use bookkeeping_core::{
    core::hierarchy::{CategoryNode, HierarchyBuilder},
    domain::category::{CategoryRecord, CategoryType},
};
use common::category;

fn names(forest: &[CategoryNode]) -> Vec<&str> {
    forest.iter().map(|node| node.name.as_str()).collect()
}

#[test]
fn example_records_build_two_roots() {
    let json = r#"[
        {"id": 1, "parentId": null, "type": "inflow", "name": "Income"},
        {"id": 2, "parentId": 1, "type": "inflow", "name": "Salary"},
        {"id": 3, "parentId": 99, "type": "inflow", "name": "Orphan"}
    ]"#;
    let records: Vec<CategoryRecord> = serde_json::from_str(json).unwrap();

    let forest = HierarchyBuilder::build(&records, CategoryType::Inflow);

    assert_eq!(names(&forest), vec!["Income", "Orphan"]);
    assert_eq!(names(&forest[0].children), vec!["Salary"]);
    assert!(forest[1].is_leaf());
}

#[test]
fn flattening_counts_every_record_of_the_type() {
    let mut records = Vec::new();
    for id in 0..200 {
        let parent = (id > 0).then(|| ((id - 1) / 3).to_string());
        let kind = if id % 7 == 0 && id > 0 {
            CategoryType::Outflow
        } else {
            CategoryType::Inflow
        };
        records.push(category(&id.to_string(), &format!("c{id}"), kind, parent.as_deref()));
    }
    let expected = records
        .iter()
        .filter(|record| record.kind == CategoryType::Inflow)
        .count();

    let forest = HierarchyBuilder::build(&records, CategoryType::Inflow);

    assert_eq!(HierarchyBuilder::node_count(&forest), expected);
    let mut seen: Vec<&str> = HierarchyBuilder::flatten(&forest)
        .iter()
        .map(|entry| entry.node.id.as_str())
        .collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), expected);
}

#[test]
fn missing_none_and_dangling_parents_are_roots() {
    let records = vec![
        category("a", "Null parent", CategoryType::Outflow, None),
        category("b", "None token", CategoryType::Outflow, Some("none")),
        category("c", "Dangling", CategoryType::Outflow, Some("zzz")),
        category("d", "Other type parent", CategoryType::Outflow, Some("x")),
        category("x", "Inflow root", CategoryType::Inflow, None),
    ];

    let forest = HierarchyBuilder::build(&records, CategoryType::Outflow);

    assert_eq!(
        names(&forest),
        vec!["Null parent", "None token", "Dangling", "Other type parent"]
    );
}

#[test]
fn siblings_keep_input_order() {
    let records = vec![
        category("b", "B", CategoryType::Inflow, Some("p")),
        category("p", "Parent", CategoryType::Inflow, None),
        category("a", "A", CategoryType::Inflow, Some("p")),
        category("c", "C", CategoryType::Inflow, Some("p")),
    ];

    let forest = HierarchyBuilder::build(&records, CategoryType::Inflow);

    assert_eq!(names(&forest), vec!["Parent"]);
    assert_eq!(names(&forest[0].children), vec!["B", "A", "C"]);
}

#[test]
fn cyclic_parents_still_terminate() {
    let records = vec![
        category("1", "One", CategoryType::Inflow, Some("3")),
        category("2", "Two", CategoryType::Inflow, Some("1")),
        category("3", "Three", CategoryType::Inflow, Some("2")),
        category("4", "Loop", CategoryType::Inflow, Some("4")),
    ];

    let forest = HierarchyBuilder::build(&records, CategoryType::Inflow);

    assert_eq!(names(&forest), vec!["One", "Loop"]);
    assert_eq!(HierarchyBuilder::node_count(&forest), 4);
    let labels = HierarchyBuilder::indented_labels(&forest, "- ");
    let rendered: Vec<&str> = labels.iter().map(|(_, label)| label.as_str()).collect();
    assert_eq!(rendered, vec!["One", "- Two", "- - Three", "Loop"]);
}

#[test]
fn forest_serializes_with_api_field_names() {
    let records = vec![
        category("1", "Income", CategoryType::Inflow, None),
        category("2", "Salary", CategoryType::Inflow, Some("1")),
    ];
    let forest = HierarchyBuilder::build(&records, CategoryType::Inflow);

    let value = serde_json::to_value(&forest).unwrap();

    assert_eq!(value[0]["type"], "inflow");
    assert_eq!(value[0]["parentId"], serde_json::Value::Null);
    assert_eq!(value[0]["children"][0]["parentId"], "1");
}
