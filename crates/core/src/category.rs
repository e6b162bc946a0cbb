// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Save and delete rules for reference data.

use crate::command::{CategoryInput, CategoryKind};
use crate::error::{CategoryError, CoreError};
use crate::ids::IdGenerator;
use crate::state::State;
use hrm_domain::hierarchy::{
    self, HierarchyNode, ensure_parent_exists, find_by_id, has_children, would_create_cycle,
};
use hrm_domain::{Department, DomainError, LocationItem, Position, normalize_position_code};

fn selected_parent(input: &CategoryInput) -> Option<String> {
    input
        .parent_id
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
}

fn not_found(kind: CategoryKind, id: &str) -> CoreError {
    CoreError::DomainViolation(DomainError::NotFound {
        kind: kind.as_str(),
        id: id.to_string(),
    })
}

/// Computes the state after saving a reference item.
///
/// With `editing_id` the existing item's mutable fields are replaced in
/// place; otherwise a new item with a fresh identifier is appended.
pub(crate) fn save(
    state: &State,
    kind: CategoryKind,
    input: &CategoryInput,
    editing_id: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> Result<State, CoreError> {
    let name: &str = input.name.trim();
    if name.is_empty() {
        return Err(CategoryError::NameRequired.into());
    }

    let mut next: State = state.clone();
    match kind {
        CategoryKind::Province => {
            next.provinces = save_location(&state.provinces, name, None, editing_id, ids, kind)?;
        }
        CategoryKind::District => {
            let parent: Option<String> = selected_parent(input);
            if let Some(parent_id) = &parent {
                ensure_parent_exists(&state.provinces, "province", parent_id)?;
            }
            next.districts =
                save_location(&state.districts, name, parent, editing_id, ids, kind)?;
        }
        CategoryKind::Ward => {
            let parent: Option<String> = selected_parent(input);
            if let Some(parent_id) = &parent {
                ensure_parent_exists(&state.districts, "district", parent_id)?;
            }
            next.wards = save_location(&state.wards, name, parent, editing_id, ids, kind)?;
        }
        CategoryKind::Department => {
            next.departments =
                save_department(&state.departments, name, selected_parent(input), editing_id, ids)?;
        }
        CategoryKind::Position => {
            next.positions = save_position(&state.positions, name, &input.code, editing_id, ids)?;
        }
    }
    Ok(next)
}

fn save_location(
    items: &[LocationItem],
    name: &str,
    parent: Option<String>,
    editing_id: Option<&str>,
    ids: &mut dyn IdGenerator,
    kind: CategoryKind,
) -> Result<Vec<LocationItem>, CoreError> {
    let needs_parent: bool = kind.parent_kind().is_some();
    match editing_id {
        Some(id) => {
            if find_by_id(items, id).is_none() {
                return Err(not_found(kind, id));
            }
            Ok(items
                .iter()
                .cloned()
                .map(|mut item| {
                    if item.id == id {
                        item.name = name.to_string();
                        // Editing without a new selection keeps the current parent.
                        if parent.is_some() {
                            item.parent_id.clone_from(&parent);
                        }
                    }
                    item
                })
                .collect())
        }
        None => {
            if needs_parent && parent.is_none() {
                return Err(CategoryError::ParentRequired.into());
            }
            let item: LocationItem = LocationItem {
                id: ids.next_id(),
                name: name.to_string(),
                parent_id: parent,
            };
            Ok(hierarchy::add(items, item)?)
        }
    }
}

fn save_department(
    items: &[Department],
    name: &str,
    parent: Option<String>,
    editing_id: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> Result<Vec<Department>, CoreError> {
    match editing_id {
        Some(id) => {
            if find_by_id(items, id).is_none() {
                return Err(not_found(CategoryKind::Department, id));
            }
            if let Some(parent_id) = parent.as_deref() {
                if parent_id == id {
                    return Err(CategoryError::SelfParent { id: id.to_string() }.into());
                }
                ensure_parent_exists(items, "department", parent_id)?;
                if would_create_cycle(items, id, parent_id) {
                    return Err(CategoryError::CycleDetected {
                        id: id.to_string(),
                        parent_id: parent_id.to_string(),
                    }
                    .into());
                }
            }
            let reparented: Vec<Department> = hierarchy::reparent(items, id, parent.as_deref())?;
            Ok(reparented
                .into_iter()
                .map(|mut item| {
                    if item.id() == id {
                        item.name = name.to_string();
                    }
                    item
                })
                .collect())
        }
        None => {
            if let Some(parent_id) = parent.as_deref() {
                ensure_parent_exists(items, "department", parent_id)?;
            }
            let item: Department = Department {
                id: ids.next_id(),
                name: name.to_string(),
                parent_id: parent,
            };
            Ok(hierarchy::add(items, item)?)
        }
    }
}

fn save_position(
    items: &[Position],
    name: &str,
    code: &str,
    editing_id: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> Result<Vec<Position>, CoreError> {
    let code: String = normalize_position_code(code);
    if code.is_empty() {
        return Err(CategoryError::CodeRequired.into());
    }
    let taken: bool = items
        .iter()
        .any(|p| normalize_position_code(&p.code) == code && Some(p.id.as_str()) != editing_id);
    if taken {
        return Err(CategoryError::DuplicateCode { code }.into());
    }

    match editing_id {
        Some(id) => {
            if !items.iter().any(|p| p.id == id) {
                return Err(not_found(CategoryKind::Position, id));
            }
            Ok(items
                .iter()
                .cloned()
                .map(|mut item| {
                    if item.id == id {
                        item.name = name.to_string();
                        item.code.clone_from(&code);
                    }
                    item
                })
                .collect())
        }
        None => {
            let mut next: Vec<Position> = items.to_vec();
            next.push(Position {
                id: ids.next_id(),
                code,
                name: name.to_string(),
            });
            Ok(next)
        }
    }
}

fn ensure_childless<T: HierarchyNode>(
    children: &[T],
    kind: CategoryKind,
    id: &str,
) -> Result<(), CoreError> {
    if has_children(children, id) {
        let count: usize = children
            .iter()
            .filter(|child| child.parent_id() == Some(id))
            .count();
        return Err(DomainError::HasChildren {
            kind: kind.as_str(),
            id: id.to_string(),
            children: count,
        }
        .into());
    }
    Ok(())
}

/// Computes the state after deleting a reference item.
///
/// Provinces, districts and departments that are still referenced as a
/// parent cannot be deleted. Wards and positions are removed freely.
pub(crate) fn delete(
    state: &State,
    kind: CategoryKind,
    id: &str,
    confirmed: bool,
) -> Result<State, CoreError> {
    if !confirmed {
        return Err(CoreError::DeleteNotConfirmed { id: id.to_string() });
    }

    let mut next: State = state.clone();
    match kind {
        CategoryKind::Province => {
            find_by_id(&state.provinces, id).ok_or_else(|| not_found(kind, id))?;
            ensure_childless(&state.districts, kind, id)?;
            next.provinces = hierarchy::remove(&state.provinces, id);
        }
        CategoryKind::District => {
            find_by_id(&state.districts, id).ok_or_else(|| not_found(kind, id))?;
            ensure_childless(&state.wards, kind, id)?;
            next.districts = hierarchy::remove(&state.districts, id);
        }
        CategoryKind::Ward => {
            find_by_id(&state.wards, id).ok_or_else(|| not_found(kind, id))?;
            next.wards = hierarchy::remove(&state.wards, id);
        }
        CategoryKind::Department => {
            find_by_id(&state.departments, id).ok_or_else(|| not_found(kind, id))?;
            ensure_childless(&state.departments, kind, id)?;
            next.departments = hierarchy::remove(&state.departments, id);
        }
        CategoryKind::Position => {
            if !state.positions.iter().any(|p| p.id == id) {
                return Err(not_found(kind, id));
            }
            next.positions.retain(|p| p.id != id);
        }
    }
    Ok(next)
}
