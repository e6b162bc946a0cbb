// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::create_test_state;
use crate::{CategoryForm, CategoryKind, Command, State};

#[test]
fn test_switching_tabs_selects_default_parent() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::default();

    form.switch_to(CategoryKind::District, &state);
    assert_eq!(form.input.parent_id.as_deref(), Some("P1"));

    form.switch_to(CategoryKind::Ward, &state);
    assert_eq!(form.input.parent_id.as_deref(), Some("D1"));

    form.switch_to(CategoryKind::Province, &state);
    assert_eq!(form.input.parent_id, None);
}

#[test]
fn test_valid_selection_is_kept() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Ward);
    form.input.parent_id = Some(String::from("D2"));

    form.select_default_parent(&state);
    assert_eq!(form.input.parent_id.as_deref(), Some("D2"));
}

#[test]
fn test_stale_selection_is_replaced() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::District);
    form.input.parent_id = Some(String::from("D1"));

    form.select_default_parent(&state);
    assert_eq!(form.input.parent_id.as_deref(), Some("P1"));
}

#[test]
fn test_no_default_without_parents() {
    let state: State = State::new();
    let mut form: CategoryForm = CategoryForm::default();

    form.switch_to(CategoryKind::Ward, &state);
    assert_eq!(form.input.parent_id, None);
}

#[test]
fn test_default_selection_does_not_override_edit() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Ward);
    assert!(form.begin_edit("W1", &state));
    assert_eq!(form.input.parent_id.as_deref(), Some("D1"));

    form.input.parent_id = Some(String::from("D9"));
    form.select_default_parent(&state);
    assert_eq!(form.input.parent_id.as_deref(), Some("D9"));
}

#[test]
fn test_begin_edit_loads_position_code() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Position);

    assert!(form.begin_edit("pos2", &state));
    assert_eq!(form.input.name, "Trưởng Phòng");
    assert_eq!(form.input.code, "TP");
    assert_eq!(form.editing_id.as_deref(), Some("pos2"));
}

#[test]
fn test_begin_edit_unknown_item_leaves_form() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Department);
    form.input.name = String::from("typed");

    assert!(!form.begin_edit("dep9", &state));
    assert_eq!(form.input.name, "typed");
    assert!(!form.is_editing());
}

#[test]
fn test_save_command_carries_editing_id() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Department);
    assert!(form.begin_edit("dep3", &state));
    form.input.name = String::from("Nhóm B2B Mới");

    match form.to_save_command() {
        Command::SaveCategory {
            kind,
            input,
            editing_id,
        } => {
            assert_eq!(kind, CategoryKind::Department);
            assert_eq!(input.name, "Nhóm B2B Mới");
            assert_eq!(input.parent_id.as_deref(), Some("dep2"));
            assert_eq!(editing_id.as_deref(), Some("dep3"));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn test_deleting_edited_item_resets_form() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::District);
    assert!(form.begin_edit("D2", &state));

    form.after_delete("D1");
    assert!(form.is_editing());

    form.after_delete("D2");
    assert!(!form.is_editing());
    assert!(form.input.name.is_empty());
    assert_eq!(form.input.parent_id.as_deref(), Some("P1"));
}

#[test]
fn test_switching_tab_abandons_edit() {
    let state: State = create_test_state();
    let mut form: CategoryForm = CategoryForm::new(CategoryKind::Position);
    assert!(form.begin_edit("pos1", &state));

    form.switch_to(CategoryKind::Department, &state);
    assert!(!form.is_editing());
    assert!(form.input.code.is_empty());
}
