// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Coercion of department and position lists arriving from outside.
//!
//! Seed documents and older clients send these lists either as plain names
//! or as structured objects. They are normalized here, once, so the core
//! only ever sees `Department` and `Position`.

use hrm::IdGenerator;
use hrm_domain::{Department, Position, normalize_position_code};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A department or position entry as supplied by a collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReferenceEntry {
    /// Just the display name.
    Name(String),
    /// A structured entry; every field but the name is optional.
    Item {
        /// Identifier, generated when absent.
        #[serde(default)]
        id: Option<String>,
        /// Display name.
        name: String,
        /// Position code.
        #[serde(default)]
        code: Option<String>,
        /// Parent department id.
        #[serde(default, rename = "parentId")]
        parent_id: Option<String>,
    },
}

impl ReferenceEntry {
    fn name(&self) -> &str {
        match self {
            Self::Name(name) | Self::Item { name, .. } => name.trim(),
        }
    }

    fn id(&self) -> Option<&str> {
        match self {
            Self::Name(_) => None,
            Self::Item { id, .. } => id.as_deref().map(str::trim).filter(|id| !id.is_empty()),
        }
    }
}

/// Normalizes department entries.
///
/// Plain names become root departments. Entries with a blank name are
/// dropped, and a parent id that names no department in the list is
/// cleared so the entry becomes a root.
pub fn normalize_departments(entries: &[ReferenceEntry], ids: &mut dyn IdGenerator) -> Vec<Department> {
    let mut departments: Vec<Department> = entries
        .iter()
        .filter(|entry| !entry.name().is_empty())
        .map(|entry| {
            let id: String = entry.id().map_or_else(|| ids.next_id(), str::to_string);
            let parent_id: Option<&str> = match entry {
                ReferenceEntry::Name(_) => None,
                ReferenceEntry::Item { parent_id, .. } => parent_id.as_deref(),
            };
            Department::new(&id, entry.name(), parent_id)
        })
        .collect();

    let known: HashSet<String> = departments.iter().map(|d| d.id.clone()).collect();
    for department in &mut departments {
        let dangling: bool = department
            .parent_id
            .as_ref()
            .is_some_and(|parent| !known.contains(parent) || *parent == department.id);
        if dangling {
            tracing::debug!(id = %department.id, "Dropping unknown department parent");
            department.parent_id = None;
        }
    }
    departments
}

/// Normalizes position entries.
///
/// Codes are trimmed and uppercased. An entry without a code gets one made
/// from the initials of its name; a numeric suffix is added when that code
/// is already taken, so the result never repeats a code.
pub fn normalize_positions(entries: &[ReferenceEntry], ids: &mut dyn IdGenerator) -> Vec<Position> {
    let mut taken: HashSet<String> = HashSet::new();
    let mut positions: Vec<Position> = Vec::new();

    for entry in entries.iter().filter(|entry| !entry.name().is_empty()) {
        let supplied: Option<String> = match entry {
            ReferenceEntry::Name(_) => None,
            ReferenceEntry::Item { code, .. } => code
                .as_deref()
                .map(normalize_position_code)
                .filter(|code| !code.is_empty()),
        };
        let mut base: String = supplied.unwrap_or_else(|| initials_code(entry.name()));
        if base.is_empty() {
            base = String::from("POS");
        }
        let code: String = unique_code(&base, &taken);
        taken.insert(code.clone());

        let id: String = entry.id().map_or_else(|| ids.next_id(), str::to_string);
        positions.push(Position::new(&id, &code, entry.name()));
    }
    positions
}

/// Builds an uppercase code from the first letter of each word.
#[must_use]
pub fn initials_code(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .collect();
    normalize_position_code(&initials)
}

fn unique_code(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    let mut suffix: usize = 2;
    loop {
        let candidate: String = format!("{base}{suffix}");
        if !taken.contains(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}
