// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::fmt;

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an HR operator, the seed loader, or an automated process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    /// The name of the action (e.g., "`SaveEmployee`", "`PromoteCandidate`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The persisted collections a change can touch.
///
/// Each committed change names exactly one collection; replication pushes
/// that collection in full under its tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    /// The employee roster.
    Employees,
    /// Recruitment candidates.
    Candidates,
    /// Top-level locations.
    Provinces,
    /// Second-level locations.
    Districts,
    /// Third-level locations.
    Wards,
    /// The department tree.
    Departments,
    /// The flat position catalog.
    Positions,
}

impl CollectionKind {
    /// All collections, in replication order.
    pub const ALL: [Self; 7] = [
        Self::Employees,
        Self::Candidates,
        Self::Provinces,
        Self::Districts,
        Self::Wards,
        Self::Departments,
        Self::Positions,
    ];

    /// Returns the tag used for this collection on the replication wire.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Employees => "EMPLOYEES",
            Self::Candidates => "CANDIDATES",
            Self::Provinces => "PROVINCES",
            Self::Districts => "DISTRICTS",
            Self::Wards => "WARDS",
            Self::Departments => "DEPARTMENTS",
            Self::Positions => "POSITIONS",
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A snapshot of a collection at a point in time.
///
/// Holds a short summary (for example the item count), not the items
/// themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateSnapshot {
    /// A string representation of the state.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }
}

/// An immutable record of one committed collection change.
///
/// Every successful command produces one event per collection it changed.
/// Events are produced only after the new state is complete, so a
/// consumer observing an event may read the collection it names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The collection that changed.
    pub collection: CollectionKind,
    /// The collection before the transition.
    pub before: StateSnapshot,
    /// The collection after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `collection` - The collection that changed
    /// * `before` - The collection before the transition
    /// * `after` - The collection after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        collection: CollectionKind,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            collection,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_event(collection: CollectionKind) -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("hr-01"), String::from("operator")),
            Cause::new(String::from("req-456"), String::from("Operator request")),
            Action::new(String::from("SaveEmployee"), None),
            collection,
            StateSnapshot::new(String::from("employees=1")),
            StateSnapshot::new(String::from("employees=2")),
        )
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("hr-01"), String::from("operator"));

        assert_eq!(actor.id, "hr-01");
        assert_eq!(actor.actor_type, "operator");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("PromoteCandidate"),
            Some(String::from("c1 -> NV003")),
        );

        assert_eq!(action.name, "PromoteCandidate");
        assert_eq!(action.details, Some(String::from("c1 -> NV003")));
    }

    #[test]
    fn test_collection_tags() {
        let tags: Vec<&str> = CollectionKind::ALL.iter().map(CollectionKind::as_str).collect();

        assert_eq!(
            tags,
            vec![
                "EMPLOYEES",
                "CANDIDATES",
                "PROVINCES",
                "DISTRICTS",
                "WARDS",
                "DEPARTMENTS",
                "POSITIONS"
            ]
        );
        assert_eq!(CollectionKind::Wards.to_string(), "WARDS");
    }

    #[test]
    fn test_audit_event_carries_collection() {
        let event: AuditEvent = create_event(CollectionKind::Employees);

        assert_eq!(event.collection, CollectionKind::Employees);
        assert_eq!(event.before.data, "employees=1");
        assert_eq!(event.after.data, "employees=2");
    }

    #[test]
    fn test_audit_event_equality() {
        assert_eq!(
            create_event(CollectionKind::Employees),
            create_event(CollectionKind::Employees)
        );
        assert_ne!(
            create_event(CollectionKind::Employees),
            create_event(CollectionKind::Candidates)
        );
    }
}
