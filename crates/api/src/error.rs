// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use hrm::{CategoryError, CoreError};
use hrm_domain::{DomainError, FieldError, ValidationReport};
use serde::Serialize;

/// One rejected field of a submitted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    /// The field name as it appears in the JSON record.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
    /// True if the value collides with another record.
    pub duplicate: bool,
}

impl FieldIssue {
    fn required(field: &str) -> Self {
        Self {
            field: field.to_string(),
            message: FieldError::Required.to_string(),
            duplicate: false,
        }
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// A domain rule was violated.
    #[error("Domain rule violation ({rule}): {message}")]
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    #[error("Invalid input for field '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A submitted record failed field validation.
    ///
    /// Every rejected field is listed, not just the first.
    #[error("Validation failed for {} field(s)", issues.len())]
    ValidationFailed {
        /// The rejected fields in canonical field order.
        issues: Vec<FieldIssue>,
    },
    /// A value that must be unique is already in use.
    #[error("Duplicate value for field '{field}': {message}")]
    Duplicate {
        /// The field holding the duplicate value.
        field: String,
        /// A human-readable description of the collision.
        message: String,
    },
    /// A requested resource was not found.
    #[error("{resource_type} not found: {message}")]
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// True for failures caused only by values colliding with other records.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        match self {
            Self::Duplicate { .. } => true,
            Self::ValidationFailed { issues } => {
                !issues.is_empty() && issues.iter().all(|issue| issue.duplicate)
            }
            _ => false,
        }
    }
}

/// Lists the issues of a validation report in canonical field order.
#[must_use]
pub fn report_issues(report: &ValidationReport) -> Vec<FieldIssue> {
    report
        .iter()
        .map(|(field, error)| FieldIssue {
            field: field.as_str().to_string(),
            message: error.to_string(),
            duplicate: error.is_duplicate(),
        })
        .collect()
}

/// Translates a domain error into an API error.
///
/// This function provides explicit mapping from domain errors to API errors,
/// ensuring domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::DuplicateId { id } => ApiError::Duplicate {
            field: String::from("id"),
            message: format!("An item with id '{id}' already exists"),
        },
        DomainError::SelfParent { id } => ApiError::DomainRuleViolation {
            rule: String::from("no_self_parent"),
            message: format!("'{id}' cannot be its own parent"),
        },
        DomainError::ParentNotFound {
            parent_kind,
            parent_id,
        } => ApiError::DomainRuleViolation {
            rule: String::from("parent_exists"),
            message: format!("The selected {parent_kind} '{parent_id}' does not exist"),
        },
        DomainError::NotFound { kind, id } => ApiError::ResourceNotFound {
            resource_type: kind.to_string(),
            message: format!("{kind} '{id}' does not exist"),
        },
        DomainError::HasChildren { kind, id, children } => ApiError::DomainRuleViolation {
            rule: String::from("delete_without_children"),
            message: format!("Cannot delete {kind} '{id}': it still has {children} child item(s)"),
        },
        DomainError::InvalidStatusTransition { from, to, reason } => {
            ApiError::DomainRuleViolation {
                rule: String::from("recruitment_lifecycle"),
                message: format!("Cannot move candidate from '{from}' to '{to}': {reason}"),
            }
        }
        DomainError::CandidateNotPromotable {
            candidate_id,
            status,
        } => ApiError::DomainRuleViolation {
            rule: String::from("promote_passed_only"),
            message: format!(
                "Candidate '{candidate_id}' has status '{status}'; only passed candidates can be promoted"
            ),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Invalid date '{date_string}': {error}"),
        },
        DomainError::InvalidAddressLevel(level) => ApiError::InvalidInput {
            field: String::from("addressLevel"),
            message: format!("Address level must be 2 or 3, got {level}"),
        },
        DomainError::InvalidEmployeeStatus(value) | DomainError::InvalidRecruitmentStatus(value) => {
            ApiError::InvalidInput {
                field: String::from("status"),
                message: format!("Unknown status '{value}'"),
            }
        }
        DomainError::InvalidGender(value) => ApiError::InvalidInput {
            field: String::from("gender"),
            message: format!("Unknown gender '{value}'"),
        },
    }
}

/// Translates a category-engine error into an API error.
#[must_use]
pub fn translate_category_error(err: CategoryError) -> ApiError {
    let message: String = err.to_string();
    match err {
        CategoryError::NameRequired => ApiError::InvalidInput {
            field: String::from("name"),
            message,
        },
        CategoryError::CodeRequired => ApiError::InvalidInput {
            field: String::from("code"),
            message,
        },
        CategoryError::ParentRequired => ApiError::InvalidInput {
            field: String::from("parentId"),
            message,
        },
        CategoryError::DuplicateCode { .. } => ApiError::Duplicate {
            field: String::from("code"),
            message,
        },
        CategoryError::SelfParent { .. } => ApiError::DomainRuleViolation {
            rule: String::from("no_self_parent"),
            message,
        },
        CategoryError::CycleDetected { .. } => ApiError::DomainRuleViolation {
            rule: String::from("acyclic_departments"),
            message,
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Category(category_err) => translate_category_error(category_err),
        CoreError::Validation(report) => ApiError::ValidationFailed {
            issues: report_issues(&report),
        },
        CoreError::MissingCandidateFields(fields) => ApiError::ValidationFailed {
            issues: fields.into_iter().map(FieldIssue::required).collect(),
        },
        CoreError::DeleteNotConfirmed { id } => ApiError::DomainRuleViolation {
            rule: String::from("delete_confirmation"),
            message: format!("Deleting '{id}' must be confirmed"),
        },
    }
}
