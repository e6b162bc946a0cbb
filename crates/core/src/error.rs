// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrm_domain::{DomainError, ValidationReport};

/// Rule violations raised while saving reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryError {
    /// The trimmed name is empty.
    NameRequired,
    /// A position was saved without a code.
    CodeRequired,
    /// Another position already uses this (normalized) code.
    DuplicateCode {
        /// The normalized code.
        code: String,
    },
    /// A district or ward was created without choosing its parent.
    ParentRequired,
    /// A department was made its own parent.
    SelfParent {
        /// The department identifier.
        id: String,
    },
    /// The chosen parent department is a descendant of the edited one.
    CycleDetected {
        /// The department being edited.
        id: String,
        /// The proposed parent.
        parent_id: String,
    },
}

impl std::fmt::Display for CategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameRequired => write!(f, "name required"),
            Self::CodeRequired => write!(f, "code required"),
            Self::DuplicateCode { code } => write!(f, "duplicate code: '{code}' is already in use"),
            Self::ParentRequired => write!(f, "parent required"),
            Self::SelfParent { id } => write!(f, "self parent: '{id}' cannot be its own parent"),
            Self::CycleDetected { id, parent_id } => write!(
                f,
                "cycle detected: '{parent_id}' is a descendant of '{id}'"
            ),
        }
    }
}

impl std::error::Error for CategoryError {}

/// Errors that can occur during state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A reference-data save was rejected.
    Category(CategoryError),
    /// A record failed field validation. Carries every field error found.
    Validation(ValidationReport),
    /// A candidate was saved with required fields left blank.
    MissingCandidateFields(Vec<&'static str>),
    /// A destructive delete was requested without confirmation.
    DeleteNotConfirmed {
        /// The item that would have been deleted.
        id: String,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::Category(err) => write!(f, "Invalid category: {err}"),
            Self::Validation(report) => write!(f, "Validation failed: {report}"),
            Self::MissingCandidateFields(fields) => {
                write!(f, "Missing required fields: {}", fields.join(", "))
            }
            Self::DeleteNotConfirmed { id } => {
                write!(f, "Deleting '{id}' requires confirmation")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}

impl From<CategoryError> for CoreError {
    fn from(err: CategoryError) -> Self {
        Self::Category(err)
    }
}
