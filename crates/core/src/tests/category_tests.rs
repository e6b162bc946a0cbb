// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_actor, create_test_cause, create_test_state, test_today};
use crate::{
    CategoryError, CategoryInput, CategoryKind, Command, CoreError, SequentialIds, State,
    TransitionResult, apply,
};
use hrm_audit::CollectionKind;
use hrm_domain::{DomainError, Position, normalize_position_code};
use std::collections::HashSet;

fn run(state: &State, command: Command) -> Result<TransitionResult, CoreError> {
    let mut ids: SequentialIds = SequentialIds::starting_at(100);
    apply(
        state,
        command,
        &mut ids,
        test_today(),
        create_test_actor(),
        create_test_cause(),
    )
}

fn save(kind: CategoryKind, name: &str, code: &str, parent: Option<&str>) -> Command {
    Command::SaveCategory {
        kind,
        input: CategoryInput {
            name: name.to_string(),
            code: code.to_string(),
            parent_id: parent.map(str::to_string),
        },
        editing_id: None,
    }
}

fn edit(kind: CategoryKind, id: &str, name: &str, code: &str, parent: Option<&str>) -> Command {
    Command::SaveCategory {
        kind,
        input: CategoryInput {
            name: name.to_string(),
            code: code.to_string(),
            parent_id: parent.map(str::to_string),
        },
        editing_id: Some(id.to_string()),
    }
}

fn delete(kind: CategoryKind, id: &str) -> Command {
    Command::DeleteCategory {
        kind,
        id: id.to_string(),
        confirmed: true,
    }
}

#[test]
fn test_create_province_appends_with_fresh_id() {
    let state: State = create_test_state();

    let result: TransitionResult = run(
        &state,
        save(CategoryKind::Province, "  Đà Nẵng ", "", None),
    )
    .unwrap();

    let added = result.new_state.provinces.last().unwrap();
    assert_eq!(added.id, "100");
    assert_eq!(added.name, "Đà Nẵng");
    assert_eq!(added.parent_id, None);
    assert_eq!(result.new_state.provinces.len(), 3);
    assert_eq!(state.provinces.len(), 2);
}

#[test]
fn test_save_emits_one_event_for_the_collection() {
    let state: State = create_test_state();

    let result: TransitionResult =
        run(&state, save(CategoryKind::Ward, "Phường Đa Kao", "", Some("D1"))).unwrap();

    assert_eq!(result.changed_collections(), vec![CollectionKind::Wards]);
    let event = &result.audit_events[0];
    assert_eq!(event.action.name, "SaveCategory");
    assert_eq!(event.actor.id, "hr-01");
    assert_eq!(event.before.data, "wards_count=1");
    assert_eq!(event.after.data, "wards_count=2");
}

#[test]
fn test_blank_name_is_rejected() {
    let state: State = create_test_state();

    for kind in CategoryKind::ALL {
        let result = run(&state, save(kind, "   ", "X", Some("P1")));
        assert_eq!(
            result,
            Err(CoreError::Category(CategoryError::NameRequired)),
            "{kind}"
        );
    }
}

#[test]
fn test_district_and_ward_creation_require_parent() {
    let state: State = create_test_state();

    for kind in [CategoryKind::District, CategoryKind::Ward] {
        let result = run(&state, save(kind, "Mới", "", None));
        assert_eq!(
            result,
            Err(CoreError::Category(CategoryError::ParentRequired))
        );
        let blank = run(&state, save(kind, "Mới", "", Some("  ")));
        assert_eq!(blank, Err(CoreError::Category(CategoryError::ParentRequired)));
    }
}

#[test]
fn test_district_parent_must_exist() {
    let state: State = create_test_state();

    let result = run(&state, save(CategoryKind::District, "Quận 3", "", Some("P9")));
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParentNotFound {
            parent_kind: "province",
            parent_id: String::from("P9")
        }))
    );
}

#[test]
fn test_ward_parent_must_be_a_district() {
    let state: State = create_test_state();

    let result = run(&state, save(CategoryKind::Ward, "Phường 1", "", Some("P1")));
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::ParentNotFound {
            parent_kind: "district",
            ..
        }))
    ));
}

#[test]
fn test_edit_location_without_parent_keeps_parent() {
    let state: State = create_test_state();

    let result: TransitionResult =
        run(&state, edit(CategoryKind::District, "D2", "Quận Bảy", "", None)).unwrap();

    let district = &result.new_state.districts[1];
    assert_eq!(district.name, "Quận Bảy");
    assert_eq!(district.parent_id.as_deref(), Some("P1"));
}

#[test]
fn test_edit_location_moves_parent() {
    let state: State = create_test_state();

    let result: TransitionResult =
        run(&state, edit(CategoryKind::District, "D2", "Quận 7", "", Some("P2"))).unwrap();

    assert_eq!(result.new_state.districts[1].parent_id.as_deref(), Some("P2"));
    assert_eq!(result.new_state.districts.len(), 2);
}

#[test]
fn test_edit_unknown_item_is_not_found() {
    let state: State = create_test_state();

    let result = run(&state, edit(CategoryKind::Province, "P9", "Huế", "", None));
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotFound {
            kind: "province",
            ..
        }))
    ));
}

#[test]
fn test_department_cannot_be_its_own_parent() {
    let state: State = create_test_state();

    let result = run(
        &state,
        edit(CategoryKind::Department, "dep2", "Phòng Kinh Doanh", "", Some("dep2")),
    );
    assert_eq!(
        result,
        Err(CoreError::Category(CategoryError::SelfParent {
            id: String::from("dep2")
        }))
    );
}

#[test]
fn test_department_cannot_move_under_its_descendant() {
    let state: State = create_test_state();

    let result = run(
        &state,
        edit(CategoryKind::Department, "dep1", "Ban Giám Đốc", "", Some("dep3")),
    );
    assert_eq!(
        result,
        Err(CoreError::Category(CategoryError::CycleDetected {
            id: String::from("dep1"),
            parent_id: String::from("dep3")
        }))
    );
}

#[test]
fn test_department_edit_without_parent_moves_to_root() {
    let state: State = create_test_state();

    let result: TransitionResult = run(
        &state,
        edit(CategoryKind::Department, "dep3", "Nhóm B2B", "", None),
    )
    .unwrap();

    let moved = result
        .new_state
        .departments
        .iter()
        .find(|d| d.id == "dep3")
        .unwrap();
    assert_eq!(moved.parent_id, None);
}

#[test]
fn test_department_create_under_parent() {
    let state: State = create_test_state();

    let result: TransitionResult = run(
        &state,
        save(CategoryKind::Department, "Nhóm B2C", "", Some("dep2")),
    )
    .unwrap();

    let added = result.new_state.departments.last().unwrap();
    assert_eq!(added.parent_id.as_deref(), Some("dep2"));
    assert_eq!(result.changed_collections(), vec![CollectionKind::Departments]);
}

#[test]
fn test_position_code_is_normalized() {
    let state: State = create_test_state();

    let result: TransitionResult = run(
        &state,
        save(CategoryKind::Position, "Nhân Viên", " nv ", None),
    )
    .unwrap();

    assert_eq!(result.new_state.positions.last().unwrap().code, "NV");
}

#[test]
fn test_position_code_is_required() {
    let state: State = create_test_state();

    let result = run(&state, save(CategoryKind::Position, "Nhân Viên", "  ", None));
    assert_eq!(result, Err(CoreError::Category(CategoryError::CodeRequired)));
}

#[test]
fn test_duplicate_position_code_is_case_insensitive() {
    let state: State = create_test_state();

    let result = run(&state, save(CategoryKind::Position, "Tổng Giám Đốc", "gd", None));
    assert_eq!(
        result,
        Err(CoreError::Category(CategoryError::DuplicateCode {
            code: String::from("GD")
        }))
    );
}

#[test]
fn test_position_edit_may_keep_its_own_code() {
    let state: State = create_test_state();

    let result: TransitionResult = run(
        &state,
        edit(CategoryKind::Position, "pos1", "Tổng Giám Đốc", "gd", None),
    )
    .unwrap();

    assert_eq!(result.new_state.positions[0].name, "Tổng Giám Đốc");
    assert_eq!(result.new_state.positions[0].code, "GD");
}

#[test]
fn test_position_edit_cannot_take_another_code() {
    let state: State = create_test_state();

    let result = run(&state, edit(CategoryKind::Position, "pos1", "Giám Đốc", "TP", None));
    assert!(matches!(
        result,
        Err(CoreError::Category(CategoryError::DuplicateCode { .. }))
    ));
}

#[test]
fn test_position_codes_stay_unique_across_saves() {
    let mut state: State = create_test_state();
    let mut ids: SequentialIds = SequentialIds::starting_at(100);
    let attempts: [(&str, &str); 6] = [
        ("Nhân Viên", "nv"),
        ("Nhân Viên 2", "NV"),
        ("Kế Toán", "kt"),
        ("Trưởng Nhóm", " tp"),
        ("Kế Toán Trưởng", "KT "),
        ("Thực Tập", "tt"),
    ];

    for (name, code) in attempts {
        if let Ok(result) = apply(
            &state,
            save(CategoryKind::Position, name, code, None),
            &mut ids,
            test_today(),
            create_test_actor(),
            create_test_cause(),
        ) {
            state = result.new_state;
        }
    }

    let codes: Vec<String> = state
        .positions
        .iter()
        .map(|p: &Position| normalize_position_code(&p.code))
        .collect();
    let unique: HashSet<&String> = codes.iter().collect();
    assert_eq!(codes.len(), unique.len());
    assert_eq!(codes, vec!["GD", "TP", "NV", "KT", "TT"]);
}

#[test]
fn test_delete_requires_confirmation() {
    let state: State = create_test_state();

    let result = run(
        &state,
        Command::DeleteCategory {
            kind: CategoryKind::Ward,
            id: String::from("W1"),
            confirmed: false,
        },
    );
    assert_eq!(
        result,
        Err(CoreError::DeleteNotConfirmed {
            id: String::from("W1")
        })
    );
}

#[test]
fn test_delete_ward_and_position() {
    let state: State = create_test_state();

    let wards: TransitionResult = run(&state, delete(CategoryKind::Ward, "W1")).unwrap();
    assert!(wards.new_state.wards.is_empty());
    assert_eq!(wards.changed_collections(), vec![CollectionKind::Wards]);

    let positions: TransitionResult = run(&state, delete(CategoryKind::Position, "pos2")).unwrap();
    assert_eq!(positions.new_state.positions.len(), 1);
}

#[test]
fn test_delete_blocked_while_children_exist() {
    let state: State = create_test_state();

    assert_eq!(
        run(&state, delete(CategoryKind::Province, "P1")),
        Err(CoreError::DomainViolation(DomainError::HasChildren {
            kind: "province",
            id: String::from("P1"),
            children: 2
        }))
    );
    assert!(matches!(
        run(&state, delete(CategoryKind::District, "D1")),
        Err(CoreError::DomainViolation(DomainError::HasChildren { .. }))
    ));
    assert!(matches!(
        run(&state, delete(CategoryKind::Department, "dep2")),
        Err(CoreError::DomainViolation(DomainError::HasChildren { .. }))
    ));
}

#[test]
fn test_delete_childless_parent() {
    let state: State = create_test_state();

    let result: TransitionResult = run(&state, delete(CategoryKind::Province, "P2")).unwrap();
    assert_eq!(result.new_state.provinces.len(), 1);
    let result: TransitionResult = run(&state, delete(CategoryKind::District, "D2")).unwrap();
    assert_eq!(result.new_state.districts.len(), 1);
}

#[test]
fn test_delete_unknown_item() {
    let state: State = create_test_state();

    assert!(matches!(
        run(&state, delete(CategoryKind::Position, "pos9")),
        Err(CoreError::DomainViolation(DomainError::NotFound {
            kind: "position",
            ..
        }))
    ));
}
