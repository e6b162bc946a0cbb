// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrm_audit::CollectionKind;
use hrm_domain::{Candidate, Employee, PromotionDetails, RecruitmentStatus};

/// The reference-data kinds maintained through the category form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoryKind {
    /// Top-level location.
    Province,
    /// Location under a province.
    District,
    /// Location under a district.
    Ward,
    /// Node of the department tree.
    Department,
    /// Entry of the flat position catalog.
    Position,
}

impl CategoryKind {
    /// All kinds, in form tab order.
    pub const ALL: [Self; 5] = [
        Self::Province,
        Self::District,
        Self::Ward,
        Self::Department,
        Self::Position,
    ];

    /// Returns the machine name of the kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::District => "district",
            Self::Ward => "ward",
            Self::Department => "department",
            Self::Position => "position",
        }
    }

    /// Returns the collection that stores items of this kind.
    #[must_use]
    pub const fn collection(&self) -> CollectionKind {
        match self {
            Self::Province => CollectionKind::Provinces,
            Self::District => CollectionKind::Districts,
            Self::Ward => CollectionKind::Wards,
            Self::Department => CollectionKind::Departments,
            Self::Position => CollectionKind::Positions,
        }
    }

    /// Returns the kind of the parent collection, if items of this kind
    /// have parents drawn from another collection.
    #[must_use]
    pub const fn parent_kind(&self) -> Option<Self> {
        match self {
            Self::District => Some(Self::Province),
            Self::Ward => Some(Self::District),
            Self::Department => Some(Self::Department),
            Self::Province | Self::Position => None,
        }
    }
}

impl std::fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Form values submitted when saving a reference item.
///
/// `code` is used by positions only; `parent_id` by districts, wards and
/// departments. Other kinds ignore them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryInput {
    /// Display name.
    pub name: String,
    /// Position code.
    pub code: String,
    /// Selected parent identifier.
    pub parent_id: Option<String>,
}

/// A command represents operator intent as data only.
///
/// Commands are the only way to request state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Create a reference item, or update it when `editing_id` is set.
    SaveCategory {
        /// Which collection.
        kind: CategoryKind,
        /// The submitted form values.
        input: CategoryInput,
        /// The item being edited, if any.
        editing_id: Option<String>,
    },
    /// Delete a reference item.
    DeleteCategory {
        /// Which collection.
        kind: CategoryKind,
        /// The item to delete.
        id: String,
        /// Whether the operator confirmed the delete.
        confirmed: bool,
    },
    /// Validate and store an employee record, replacing any record with the same id.
    SaveEmployee {
        /// The complete record.
        employee: Employee,
    },
    /// Remove an employee record.
    DeleteEmployee {
        /// The record identifier.
        id: String,
    },
    /// Store a candidate, either as a new entry or replacing one by id.
    SaveCandidate {
        /// The candidate form values. The `id` is replaced when `is_new`.
        candidate: Candidate,
        /// Whether a fresh identifier should be assigned.
        is_new: bool,
    },
    /// Move a candidate along the recruitment lifecycle.
    SetCandidateStatus {
        /// The candidate identifier.
        id: String,
        /// The requested status.
        status: RecruitmentStatus,
    },
    /// Hire a passed candidate: add the employee and mark the candidate converted.
    PromoteCandidate {
        /// The candidate identifier.
        candidate_id: String,
        /// Employment details for the new record.
        details: PromotionDetails,
    },
}

impl Command {
    /// Returns the action name recorded in audit events.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SaveCategory { .. } => "SaveCategory",
            Self::DeleteCategory { .. } => "DeleteCategory",
            Self::SaveEmployee { .. } => "SaveEmployee",
            Self::DeleteEmployee { .. } => "DeleteEmployee",
            Self::SaveCandidate { .. } => "SaveCandidate",
            Self::SetCandidateStatus { .. } => "SetCandidateStatus",
            Self::PromoteCandidate { .. } => "PromoteCandidate",
        }
    }
}
