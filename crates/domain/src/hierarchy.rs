// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Parent/child reference collections.
//!
//! These functions are structural only: they keep identifiers unique and
//! parent links well-formed, and leave business policy (which parent kinds
//! are allowed, what happens to children on delete) to the caller.
//! Every mutating function returns a new collection; inputs are never
//! modified.

use crate::error::DomainError;
use crate::types::{Department, LocationItem};
use std::collections::HashSet;

/// An item that can take part in a parent/child collection.
pub trait HierarchyNode: Clone {
    /// The item identifier.
    fn id(&self) -> &str;
    /// The item display name.
    fn name(&self) -> &str;
    /// The parent identifier, if any.
    fn parent_id(&self) -> Option<&str>;
    /// Replaces the parent identifier.
    fn set_parent_id(&mut self, parent_id: Option<String>);
}

impl HierarchyNode for LocationItem {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn set_parent_id(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
    }
}

impl HierarchyNode for Department {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    fn set_parent_id(&mut self, parent_id: Option<String>) {
        self.parent_id = parent_id;
    }
}

/// Returns the items whose parent is `parent_id`, in insertion order.
///
/// With `parent_id == None` the root items (those without a parent) are returned.
#[must_use]
pub fn list_children<'a, T: HierarchyNode>(items: &'a [T], parent_id: Option<&str>) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| item.parent_id() == parent_id)
        .collect()
}

/// Finds an item by identifier.
#[must_use]
pub fn find_by_id<'a, T: HierarchyNode>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

/// Finds the first item with the given display name.
#[must_use]
pub fn find_by_name<'a, T: HierarchyNode>(items: &'a [T], name: &str) -> Option<&'a T> {
    items.iter().find(|item| item.name() == name)
}

/// Returns true if any item references `id` as its parent.
#[must_use]
pub fn has_children<T: HierarchyNode>(items: &[T], id: &str) -> bool {
    items.iter().any(|item| item.parent_id() == Some(id))
}

/// Appends `new_item` to the collection.
///
/// # Errors
///
/// Returns `DomainError::DuplicateId` if an item with the same id exists.
pub fn add<T: HierarchyNode>(items: &[T], new_item: T) -> Result<Vec<T>, DomainError> {
    if find_by_id(items, new_item.id()).is_some() {
        return Err(DomainError::DuplicateId {
            id: new_item.id().to_string(),
        });
    }
    let mut next: Vec<T> = items.to_vec();
    next.push(new_item);
    Ok(next)
}

/// Removes the item with `id`. Descendants are left untouched.
#[must_use]
pub fn remove<T: HierarchyNode>(items: &[T], id: &str) -> Vec<T> {
    items.iter().filter(|item| item.id() != id).cloned().collect()
}

/// Moves the item `id` under `new_parent_id` (or to the root with `None`).
///
/// Applying the same reparent twice yields the same collection.
///
/// # Errors
///
/// Returns an error if:
/// - `new_parent_id` equals `id` (`DomainError::SelfParent`)
/// - no item has the given `id` (`DomainError::NotFound`)
pub fn reparent<T: HierarchyNode>(
    items: &[T],
    id: &str,
    new_parent_id: Option<&str>,
) -> Result<Vec<T>, DomainError> {
    if new_parent_id == Some(id) {
        return Err(DomainError::SelfParent { id: id.to_string() });
    }
    if find_by_id(items, id).is_none() {
        return Err(DomainError::NotFound {
            kind: "item",
            id: id.to_string(),
        });
    }
    Ok(items
        .iter()
        .cloned()
        .map(|mut item| {
            if item.id() == id {
                item.set_parent_id(new_parent_id.map(str::to_string));
            }
            item
        })
        .collect())
}

/// Returns true if making `new_parent_id` the parent of `id` would close a loop.
///
/// Walks the ancestor chain of the proposed parent; a chain that already
/// loops without reaching `id` stops at the first repeated node.
#[must_use]
pub fn would_create_cycle<T: HierarchyNode>(items: &[T], id: &str, new_parent_id: &str) -> bool {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut cursor: Option<&str> = Some(new_parent_id);
    while let Some(current) = cursor {
        if current == id {
            return true;
        }
        if !seen.insert(current) {
            return false;
        }
        cursor = find_by_id(items, current).and_then(|item| item.parent_id());
    }
    false
}

/// Checks that `parent_id` names an item of `parents`.
///
/// # Errors
///
/// Returns `DomainError::ParentNotFound` if it does not.
pub fn ensure_parent_exists<P: HierarchyNode>(
    parents: &[P],
    parent_kind: &'static str,
    parent_id: &str,
) -> Result<(), DomainError> {
    if find_by_id(parents, parent_id).is_none() {
        return Err(DomainError::ParentNotFound {
            parent_kind,
            parent_id: parent_id.to_string(),
        });
    }
    Ok(())
}

/// One row of a flattened tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatNode<'a, T> {
    /// The item.
    pub item: &'a T,
    /// Distance from the starting level (0 for roots).
    pub depth: usize,
}

/// Flattens the whole tree depth-first, each parent before its children.
#[must_use]
pub fn flatten<T: HierarchyNode>(items: &[T]) -> Vec<FlatNode<'_, T>> {
    render(items, None, 0)
}

/// Flattens the subtree below `parent_id`, starting at depth `level`.
///
/// Siblings keep insertion order. Nodes caught in a parent loop are
/// emitted at most once.
#[must_use]
pub fn render<'a, T: HierarchyNode>(
    items: &'a [T],
    parent_id: Option<&str>,
    level: usize,
) -> Vec<FlatNode<'a, T>> {
    let mut out: Vec<FlatNode<'a, T>> = Vec::new();
    let mut visited: HashSet<&'a str> = HashSet::new();
    render_into(items, parent_id, level, &mut visited, &mut out);
    out
}

fn render_into<'a, T: HierarchyNode>(
    items: &'a [T],
    parent_id: Option<&str>,
    level: usize,
    visited: &mut HashSet<&'a str>,
    out: &mut Vec<FlatNode<'a, T>>,
) {
    for item in list_children(items, parent_id) {
        if !visited.insert(item.id()) {
            continue;
        }
        out.push(FlatNode { item, depth: level });
        render_into(items, Some(item.id()), level + 1, visited, out);
    }
}
