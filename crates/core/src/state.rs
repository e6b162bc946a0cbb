// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrm_audit::{AuditEvent, CollectionKind, StateSnapshot};
use hrm_domain::{Candidate, Department, Employee, LocationItem, Position};

/// The complete in-memory record set.
///
/// State is a value: transitions never modify it in place, they return
/// a new `State` alongside the audit events describing the change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    /// The employee roster.
    pub employees: Vec<Employee>,
    /// Recruitment candidates.
    pub candidates: Vec<Candidate>,
    /// Top-level locations.
    pub provinces: Vec<LocationItem>,
    /// Locations whose parent is a province.
    pub districts: Vec<LocationItem>,
    /// Locations whose parent is a district.
    pub wards: Vec<LocationItem>,
    /// The department tree.
    pub departments: Vec<Department>,
    /// The position catalog.
    pub positions: Vec<Position>,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of items in a collection.
    #[must_use]
    pub fn len_of(&self, collection: CollectionKind) -> usize {
        match collection {
            CollectionKind::Employees => self.employees.len(),
            CollectionKind::Candidates => self.candidates.len(),
            CollectionKind::Provinces => self.provinces.len(),
            CollectionKind::Districts => self.districts.len(),
            CollectionKind::Wards => self.wards.len(),
            CollectionKind::Departments => self.departments.len(),
            CollectionKind::Positions => self.positions.len(),
        }
    }

    /// Converts one collection to a snapshot for audit purposes.
    #[must_use]
    pub fn to_snapshot(&self, collection: CollectionKind) -> StateSnapshot {
        StateSnapshot::new(format!(
            "{}_count={}",
            collection.as_str().to_lowercase(),
            self.len_of(collection)
        ))
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. A transition touching two collections (promotion) carries
/// both changes in the same `new_state`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// One audit event per changed collection, in commit order.
    pub audit_events: Vec<AuditEvent>,
}

impl TransitionResult {
    /// Returns the collections changed by this transition.
    #[must_use]
    pub fn changed_collections(&self) -> Vec<CollectionKind> {
        self.audit_events.iter().map(|e| e.collection).collect()
    }
}
