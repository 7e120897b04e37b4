mod common;

use bookkeeping_core::{
    core::listing::{ListQuery, PaginatedFilteredView},
    domain::{customer::Customer, NamedEntity},
};
use common::sample_workspace;

fn customers(count: usize) -> Vec<Customer> {
    (1..=count)
        .map(|n| Customer::new(format!("Customer {n:02}")))
        .collect()
}

#[test]
fn same_arguments_give_the_same_page() {
    let items = customers(37);
    let query = ListQuery::new(2, 10).with_search("customer 1");

    let first = PaginatedFilteredView::apply_searchable(&items, &query);
    let second = PaginatedFilteredView::apply_searchable(&items, &query);

    assert_eq!(first, second);
    assert_eq!(first.filtered_count, 10);
    assert_eq!(first.total_pages, 1);
    assert_eq!(first.effective_page, 1);
}

#[test]
fn page_past_the_end_shows_the_last_page() {
    let items = customers(23);

    let view = PaginatedFilteredView::apply_searchable(&items, &ListQuery::new(5, 10));

    assert_eq!(view.total_pages, 3);
    assert_eq!(view.effective_page, 3);
    let visible: Vec<&str> = view.visible_items.iter().map(|c| c.name()).collect();
    assert_eq!(visible, vec!["Customer 21", "Customer 22", "Customer 23"]);
}

#[test]
fn search_matches_any_case() {
    let items = vec![
        Customer::new("Alpha"),
        Customer::new("beta"),
        Customer::new("Gamma"),
    ];

    let query = ListQuery::default().with_search("A");
    let view = PaginatedFilteredView::apply_searchable(&items, &query);

    assert_eq!(view.filtered_count, 3);
    assert_eq!(view.visible_items.len(), 3);
}

#[test]
fn no_matches_still_yields_one_page() {
    let items = customers(5);
    let query = ListQuery::new(3, 10).with_search("nobody");

    let view = PaginatedFilteredView::apply_searchable(&items, &query);

    assert_eq!(view.total_pages, 1);
    assert_eq!(view.effective_page, 1);
    assert!(view.visible_items.is_empty());
}

#[test]
fn secondary_fields_are_searched() {
    let workspace = sample_workspace("Listing Co");

    let by_email = PaginatedFilteredView::apply_searchable(
        &workspace.customers,
        &ListQuery::default().with_search("INITECH.TEST"),
    );
    let by_phone = PaginatedFilteredView::apply_searchable(
        &workspace.customers,
        &ListQuery::default().with_search("7946"),
    );

    assert_eq!(by_email.visible_items[0].name, "Initech");
    assert_eq!(by_phone.visible_items[0].name, "Globex");
}

#[test]
fn source_collection_is_untouched() {
    let items = customers(12);
    let before = items.clone();

    let query = ListQuery::new(2, 5).with_search("0");
    let view = PaginatedFilteredView::apply_searchable(&items, &query);

    assert_eq!(view.range_label(), "6-10 of 10");
    assert_eq!(items, before);
}

#[test]
fn shrinking_collection_reclamps_the_page() {
    let mut items = customers(30);
    let mut query = ListQuery::new(3, 10);
    assert_eq!(
        PaginatedFilteredView::apply_searchable(&items, &query).effective_page,
        3
    );

    items.truncate(12);
    let view = PaginatedFilteredView::apply_searchable(&items, &query);
    query.reclamp(view.total_pages);

    assert_eq!(query.page, 2);
    assert_eq!(view.visible_items.len(), 2);
}
