// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain operations.
///
/// Field-level validation of an employee record does not use this type;
/// see [`crate::ValidationReport`]. These errors cover structural and
/// referential rules of the reference hierarchies and lifecycle rules of
/// candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An item with the same identifier already exists in the collection.
    DuplicateId {
        /// The duplicated identifier.
        id: String,
    },
    /// An item was assigned itself as its own parent.
    SelfParent {
        /// The item identifier.
        id: String,
    },
    /// The referenced parent does not exist in the parent collection.
    ParentNotFound {
        /// The kind of parent that was expected (e.g., "province").
        parent_kind: &'static str,
        /// The missing parent identifier.
        parent_id: String,
    },
    /// The requested item does not exist.
    NotFound {
        /// The kind of item (e.g., "district", "employee").
        kind: &'static str,
        /// The missing identifier.
        id: String,
    },
    /// The item still has children and cannot be removed.
    HasChildren {
        /// The kind of item (e.g., "province").
        kind: &'static str,
        /// The item identifier.
        id: String,
        /// Number of direct children referencing the item.
        children: usize,
    },
    /// A recruitment status transition is not permitted.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// A candidate cannot be promoted from its current status.
    CandidateNotPromotable {
        /// The candidate identifier.
        candidate_id: String,
        /// The candidate's current status.
        status: String,
    },
    /// Failed to parse a calendar date.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Address level is neither 2 nor 3.
    InvalidAddressLevel(u8),
    /// Employee status string is not recognized.
    InvalidEmployeeStatus(String),
    /// Recruitment status string is not recognized.
    InvalidRecruitmentStatus(String),
    /// Gender string is not recognized.
    InvalidGender(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "An item with id '{id}' already exists"),
            Self::SelfParent { id } => write!(f, "Item '{id}' cannot be its own parent"),
            Self::ParentNotFound {
                parent_kind,
                parent_id,
            } => write!(f, "Parent {parent_kind} '{parent_id}' not found"),
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            Self::HasChildren { kind, id, children } => write!(
                f,
                "Cannot delete {kind} '{id}': {children} child item(s) still reference it"
            ),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Invalid status transition from {from} to {to}: {reason}")
            }
            Self::CandidateNotPromotable {
                candidate_id,
                status,
            } => write!(
                f,
                "Candidate '{candidate_id}' cannot be promoted while in status {status}"
            ),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::InvalidAddressLevel(level) => {
                write!(f, "Invalid address level: {level}. Must be 2 or 3")
            }
            Self::InvalidEmployeeStatus(status) => {
                write!(f, "Invalid employee status: {status}")
            }
            Self::InvalidRecruitmentStatus(status) => {
                write!(f, "Invalid recruitment status: {status}")
            }
            Self::InvalidGender(gender) => write!(f, "Invalid gender: {gender}"),
        }
    }
}

impl std::error::Error for DomainError {}
