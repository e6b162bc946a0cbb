// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Recruitment status tracking and candidate promotion.
//!
//! Candidates move `Pending -> Interviewed -> Passed | Failed`. A passed
//! candidate becomes `Converted` only through promotion into an employee;
//! no ordinary status edit can reach or leave `Converted`.

use crate::error::DomainError;
use crate::types::{AddressLevel, Candidate, Employee, EmployeeStatus};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Recruitment status of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecruitmentStatus {
    /// Waiting for an interview.
    Pending,
    /// Interviewed, decision outstanding.
    Interviewed,
    /// Accepted; may be promoted to employee.
    Passed,
    /// Rejected.
    Failed,
    /// Promoted to an employee record.
    Converted,
}

impl RecruitmentStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Interviewed,
        Self::Passed,
        Self::Failed,
        Self::Converted,
    ];

    /// Returns the machine representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Interviewed => "interviewed",
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Converted => "converted",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Chờ phỏng vấn",
            Self::Interviewed => "Đã phỏng vấn",
            Self::Passed => "Đạt",
            Self::Failed => "Không đạt",
            Self::Converted => "Đã chuyển nhân viên",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s || status.label() == s)
            .ok_or_else(|| DomainError::InvalidRecruitmentStatus(s.to_string()))
    }

    /// Returns true if no further transition is defined from this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Failed | Self::Converted)
    }

    /// Validates an operator-initiated status change.
    ///
    /// Keeping the same status is always allowed for non-terminal states.
    /// `Converted` can never be the target; use [`promote_candidate`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the change is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        if new_status == Self::Converted {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "candidates are converted only by promotion".to_string(),
            });
        }

        let valid: bool = *self == new_status
            || match self {
                Self::Pending => new_status == Self::Interviewed,
                Self::Interviewed => matches!(new_status, Self::Passed | Self::Failed),
                Self::Passed | Self::Failed | Self::Converted => false,
            };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by recruitment lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for RecruitmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// Employment details supplied when a candidate is hired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromotionDetails {
    /// Employee code for the new record.
    pub employee_code: String,
    /// Monthly base salary.
    pub salary: u64,
    /// Department name.
    pub department: String,
    /// Position name.
    pub position: String,
    /// First working day.
    pub start_date: Option<Date>,
}

/// Checks that `candidate` may be hired.
///
/// # Errors
///
/// Returns `DomainError::CandidateNotPromotable` unless the candidate is `Passed`.
pub fn ensure_promotable(candidate: &Candidate) -> Result<(), DomainError> {
    if candidate.status == RecruitmentStatus::Passed {
        return Ok(());
    }
    Err(DomainError::CandidateNotPromotable {
        candidate_id: candidate.id.clone(),
        status: candidate.status.as_str().to_string(),
    })
}

/// Builds the employee record for a passed candidate.
///
/// The new record takes the employment details from `details`, the
/// personal and contact data from the candidate, the identifier
/// `employee_id`, and starts in `Probation`. Marking the candidate as
/// converted is the caller's job and must be committed together with the
/// new employee.
///
/// # Errors
///
/// Returns `DomainError::CandidateNotPromotable` unless the candidate is `Passed`.
pub fn promote_candidate(
    candidate: &Candidate,
    details: &PromotionDetails,
    employee_id: &str,
) -> Result<Employee, DomainError> {
    ensure_promotable(candidate)?;

    Ok(Employee {
        id: employee_id.to_string(),
        employee_code: details.employee_code.trim().to_string(),
        full_name: candidate.full_name.clone(),
        gender: candidate.gender,
        dob: candidate.dob,
        phone: candidate.phone.clone(),
        email: candidate.email.clone(),
        identity_card: candidate.identity_card.clone(),
        issued_date: None,
        issued_place: String::new(),
        street: candidate.street.clone().unwrap_or_default(),
        province: candidate.province.clone().unwrap_or_default(),
        district: candidate.district.clone().unwrap_or_default(),
        ward: candidate.ward.clone().unwrap_or_default(),
        address_level: AddressLevel::Three,
        department: details.department.clone(),
        position: details.position.clone(),
        start_date: details.start_date,
        resignation_date: None,
        salary: details.salary,
        status: EmployeeStatus::Probation,
        avatar_url: None,
    })
}
