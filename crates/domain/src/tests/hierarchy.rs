// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_departments, create_test_districts, create_test_provinces, create_test_wards,
};
use crate::hierarchy::{
    add, ensure_parent_exists, find_by_name, flatten, has_children, list_children, remove, render,
    reparent, would_create_cycle,
};
use crate::{Department, DomainError, FlatNode, LocationItem};

fn ids<T: crate::HierarchyNode>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

#[test]
fn test_list_children_single_chain() {
    let provinces: Vec<LocationItem> = vec![LocationItem::root("P1", "Province 1")];
    let districts: Vec<LocationItem> = vec![LocationItem::child("D1", "District 1", "P1")];
    let wards: Vec<LocationItem> = vec![LocationItem::child("W1", "Ward 1", "D1")];

    assert_eq!(ids(&list_children(&provinces, None)), vec!["P1"]);
    assert_eq!(ids(&list_children(&districts, Some("P1"))), vec!["D1"]);
    assert_eq!(ids(&list_children(&wards, Some("D1"))), vec!["W1"]);
    assert!(list_children(&wards, Some("P1")).is_empty());
}

#[test]
fn test_list_children_keeps_insertion_order() {
    let districts: Vec<LocationItem> = create_test_districts();

    assert_eq!(ids(&list_children(&districts, Some("79"))), vec!["760", "778"]);
    assert_eq!(ids(&list_children(&districts, Some("01"))), vec!["001"]);
}

#[test]
fn test_has_children() {
    let wards: Vec<LocationItem> = create_test_wards();

    assert!(has_children(&wards, "760"));
    assert!(has_children(&wards, "778"));
    assert!(!has_children(&wards, "001"));
}

#[test]
fn test_add_rejects_duplicate_id() {
    let provinces: Vec<LocationItem> = create_test_provinces();

    let result: Result<Vec<LocationItem>, DomainError> =
        add(&provinces, LocationItem::root("79", "Thành phố mới"));
    assert_eq!(
        result,
        Err(DomainError::DuplicateId {
            id: String::from("79")
        })
    );
}

#[test]
fn test_add_does_not_modify_input() {
    let provinces: Vec<LocationItem> = create_test_provinces();

    let next: Vec<LocationItem> =
        add(&provinces, LocationItem::root("48", "Đà Nẵng")).expect("add should succeed");
    assert_eq!(provinces.len(), 2);
    assert_eq!(next.len(), 3);
    assert_eq!(next[2].id, "48");
}

#[test]
fn test_remove_leaves_children_untouched() {
    let departments: Vec<Department> = create_test_departments();

    let next: Vec<Department> = remove(&departments, "2");
    assert_eq!(next.len(), 4);
    let orphan: &Department = next
        .iter()
        .find(|d| d.id == "3")
        .expect("child should remain");
    assert_eq!(orphan.parent_id.as_deref(), Some("2"));
}

#[test]
fn test_reparent_is_idempotent() {
    let departments: Vec<Department> = create_test_departments();

    let once: Vec<Department> =
        reparent(&departments, "3", Some("4")).expect("reparent should succeed");
    let twice: Vec<Department> = reparent(&once, "3", Some("4")).expect("reparent should succeed");
    assert_eq!(once, twice);
    assert_eq!(ids(&list_children(&twice, Some("4"))), vec!["3"]);
}

#[test]
fn test_reparent_to_root() {
    let departments: Vec<Department> = create_test_departments();

    let next: Vec<Department> = reparent(&departments, "2", None).expect("reparent should succeed");
    assert_eq!(ids(&list_children(&next, None)), vec!["1", "2", "5"]);
}

#[test]
fn test_reparent_rejects_self_parent() {
    let departments: Vec<Department> = create_test_departments();

    let result: Result<Vec<Department>, DomainError> = reparent(&departments, "2", Some("2"));
    assert_eq!(
        result,
        Err(DomainError::SelfParent {
            id: String::from("2")
        })
    );
}

#[test]
fn test_reparent_unknown_item() {
    let departments: Vec<Department> = create_test_departments();

    let result: Result<Vec<Department>, DomainError> = reparent(&departments, "99", None);
    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[test]
fn test_would_create_cycle_detects_descendant_parent() {
    let departments: Vec<Department> = create_test_departments();

    assert!(would_create_cycle(&departments, "1", "3"));
    assert!(would_create_cycle(&departments, "2", "3"));
    assert!(would_create_cycle(&departments, "2", "2"));
    assert!(!would_create_cycle(&departments, "3", "4"));
    assert!(!would_create_cycle(&departments, "5", "1"));
}

#[test]
fn test_would_create_cycle_terminates_on_existing_loop() {
    let looped: Vec<Department> = vec![
        Department::new("a", "A", Some("b")),
        Department::new("b", "B", Some("a")),
        Department::new("c", "C", None),
    ];

    assert!(!would_create_cycle(&looped, "c", "a"));
}

#[test]
fn test_ensure_parent_exists() {
    let provinces: Vec<LocationItem> = create_test_provinces();

    assert!(ensure_parent_exists(&provinces, "province", "79").is_ok());
    assert_eq!(
        ensure_parent_exists(&provinces, "province", "48"),
        Err(DomainError::ParentNotFound {
            parent_kind: "province",
            parent_id: String::from("48")
        })
    );
}

#[test]
fn test_find_by_name() {
    let wards: Vec<LocationItem> = create_test_wards();

    let ward: Option<&LocationItem> = find_by_name(&wards, "Phường Đa Kao");
    assert_eq!(ward.map(|w| w.id.as_str()), Some("26740"));
    assert!(find_by_name(&wards, "Phường Không Có").is_none());
}

#[test]
fn test_flatten_department_tree() {
    let departments: Vec<Department> = create_test_departments();

    let rows: Vec<FlatNode<'_, Department>> = flatten(&departments);
    let shape: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.item.id.as_str(), row.depth))
        .collect();
    assert_eq!(
        shape,
        vec![("1", 0), ("2", 1), ("3", 2), ("4", 1), ("5", 0)]
    );
}

#[test]
fn test_render_subtree_from_level() {
    let departments: Vec<Department> = create_test_departments();

    let rows: Vec<FlatNode<'_, Department>> = render(&departments, Some("1"), 1);
    let shape: Vec<(&str, usize)> = rows
        .iter()
        .map(|row| (row.item.id.as_str(), row.depth))
        .collect();
    assert_eq!(shape, vec![("2", 1), ("3", 2), ("4", 1)]);
}

#[test]
fn test_render_terminates_on_parent_loop() {
    let looped: Vec<Department> = vec![
        Department::new("a", "A", Some("b")),
        Department::new("b", "B", Some("a")),
    ];

    let rows: Vec<FlatNode<'_, Department>> = render(&looped, Some("a"), 0);
    let shape: Vec<&str> = rows.iter().map(|row| row.item.id.as_str()).collect();
    assert_eq!(shape, vec!["b", "a"]);
    assert!(flatten(&looped).is_empty());
}
