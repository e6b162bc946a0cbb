// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::recruitment::RecruitmentStatus;
use serde::{Deserialize, Serialize};
use time::Date;
use time::macros::format_description;

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// Parses an ISO 8601 calendar date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is not a valid date.
pub fn parse_date(value: &str) -> Result<Date, DomainError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|e| {
        DomainError::DateParseError {
            date_string: value.to_string(),
            error: e.to_string(),
        }
    })
}

/// Parses an optional date where an empty string means "not entered".
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if a non-empty string is not a valid date.
pub fn parse_optional_date(value: &str) -> Result<Option<Date>, DomainError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    parse_date(value).map(Some)
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// One node of the administrative location tree.
///
/// Provinces have no parent, districts point at a province and wards point
/// at a district. The identifier is unique within its level only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationItem {
    /// Identifier, unique within its level.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Identifier of the parent in the level above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl LocationItem {
    /// Creates a root location (a province).
    #[must_use]
    pub fn root(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: None,
        }
    }

    /// Creates a location below `parent_id`.
    #[must_use]
    pub fn child(id: &str, name: &str, parent_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: Some(parent_id.to_string()),
        }
    }
}

/// A node of the department tree. Depth is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    /// Identifier, unique across all departments.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Parent department; `None` for a root department.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
}

impl Department {
    /// Creates a department.
    #[must_use]
    pub fn new(id: &str, name: &str, parent_id: Option<&str>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        }
    }
}

/// A job position.
///
/// Codes are unique across all positions, compared case-insensitively,
/// and stored in uppercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// Identifier.
    pub id: String,
    /// Position code, normalized to uppercase.
    pub code: String,
    /// Display name.
    pub name: String,
}

impl Position {
    /// Creates a position, normalizing the code.
    #[must_use]
    pub fn new(id: &str, code: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            code: normalize_position_code(code),
            name: name.to_string(),
        }
    }
}

/// Normalizes a position code: trimmed and uppercase.
#[must_use]
pub fn normalize_position_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Employment status of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    /// Currently working.
    Active,
    /// On probation.
    Probation,
    /// No longer employed.
    Resigned,
    /// On maternity or sick leave.
    OnLeave,
}

impl EmployeeStatus {
    /// All statuses in canonical display order.
    pub const ALL: [Self; 4] = [Self::Active, Self::Probation, Self::OnLeave, Self::Resigned];

    /// Returns the machine representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Probation => "probation",
            Self::Resigned => "resigned",
            Self::OnLeave => "on_leave",
        }
    }

    /// Returns the human-readable label shown to operators.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Đang làm việc",
            Self::Probation => "Thử việc",
            Self::Resigned => "Đã nghỉ việc",
            Self::OnLeave => "Nghỉ thai sản/ốm",
        }
    }

    /// Parses a status from its machine representation or its label.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidEmployeeStatus` if the value is not recognized.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value || status.label() == value)
            .ok_or_else(|| DomainError::InvalidEmployeeStatus(value.to_string()))
    }
}

/// Gender of a person.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
    /// Other or undisclosed.
    Other,
}

impl Gender {
    /// All genders in canonical display order.
    pub const ALL: [Self; 3] = [Self::Male, Self::Female, Self::Other];

    /// Returns the machine representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Nam",
            Self::Female => "Nữ",
            Self::Other => "Khác",
        }
    }

    /// Parses a gender from its machine representation or label.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGender` if the value is not recognized.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        Self::ALL
            .into_iter()
            .find(|gender| gender.as_str() == value || gender.label() == value)
            .ok_or_else(|| DomainError::InvalidGender(value.to_string()))
    }
}

/// How many levels of the location tree an address uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum AddressLevel {
    /// Province and ward only; the district is derived from the ward.
    Two,
    /// Province, district and ward.
    Three,
}

impl TryFrom<u8> for AddressLevel {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            other => Err(DomainError::InvalidAddressLevel(other)),
        }
    }
}

impl From<AddressLevel> for u8 {
    fn from(level: AddressLevel) -> Self {
        match level {
            AddressLevel::Two => 2,
            AddressLevel::Three => 3,
        }
    }
}

/// An employee record.
///
/// Address components, department and position hold the *names* of the
/// selected reference items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Record identifier.
    pub id: String,
    /// Employee code, unique across the roster.
    pub employee_code: String,
    /// Full name.
    pub full_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    #[serde(default, with = "iso_date::option")]
    pub dob: Option<Date>,
    /// Mobile phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// National identity card number, unique across the roster.
    pub identity_card: String,
    /// Date the identity card was issued.
    #[serde(default, with = "iso_date::option")]
    pub issued_date: Option<Date>,
    /// Authority that issued the identity card.
    pub issued_place: String,
    /// Street line of the address.
    pub street: String,
    /// Province name.
    pub province: String,
    /// District name. Derived from the ward at address level 2.
    pub district: String,
    /// Ward name.
    pub ward: String,
    /// Address representation.
    pub address_level: AddressLevel,
    /// Department name.
    pub department: String,
    /// Position name.
    pub position: String,
    /// First working day.
    #[serde(default, with = "iso_date::option")]
    pub start_date: Option<Date>,
    /// Last working day, if resigned.
    #[serde(default, with = "iso_date::option")]
    pub resignation_date: Option<Date>,
    /// Monthly base salary.
    pub salary: u64,
    /// Employment status.
    pub status: EmployeeStatus,
    /// Optional avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Employee {
    /// Creates a blank record for the "add new" flow.
    ///
    /// The record gets the supplied identifier and a placeholder employee code
    /// derived from it. Status defaults to `Active`, the address uses three
    /// levels and the start date is `today`.
    #[must_use]
    pub fn new_draft(id: &str, today: Date) -> Self {
        Self {
            id: id.to_string(),
            employee_code: placeholder_employee_code(id),
            full_name: String::new(),
            gender: Gender::Male,
            dob: None,
            phone: String::new(),
            email: String::new(),
            identity_card: String::new(),
            issued_date: None,
            issued_place: String::new(),
            street: String::new(),
            province: String::new(),
            district: String::new(),
            ward: String::new(),
            address_level: AddressLevel::Three,
            department: String::new(),
            position: String::new(),
            start_date: Some(today),
            resignation_date: None,
            salary: 0,
            status: EmployeeStatus::Active,
            avatar_url: None,
        }
    }

    /// Composes the full address line: street, ward, district, province.
    ///
    /// The street segment is omitted when empty.
    #[must_use]
    pub fn address_line(&self) -> String {
        let tail: String = format!("{}, {}, {}", self.ward, self.district, self.province);
        if self.street.trim().is_empty() {
            tail
        } else {
            format!("{}, {tail}", self.street)
        }
    }
}

/// Derives a placeholder employee code (`NV` + 4 digits) from a record id.
///
/// The last four digits of the identifier are used, zero-padded.
#[must_use]
pub fn placeholder_employee_code(id: &str) -> String {
    let digits: Vec<char> = id.chars().filter(char::is_ascii_digit).collect();
    let tail: String = digits[digits.len().saturating_sub(4)..].iter().collect();
    format!("NV{tail:0>4}")
}

/// A recruitment candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Record identifier.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// Gender.
    pub gender: Gender,
    /// Date of birth.
    #[serde(default, with = "iso_date::option")]
    pub dob: Option<Date>,
    /// Mobile phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// National identity card number.
    pub identity_card: String,
    /// Street line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Province name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    /// District name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district: Option<String>,
    /// Ward name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ward: Option<String>,
    /// Position applied for.
    pub applied_position: String,
    /// Link to the CV.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cv_url: Option<String>,
    /// Scheduled or completed interview date.
    #[serde(default, with = "iso_date::option")]
    pub interview_date: Option<Date>,
    /// Recruitment status.
    pub status: RecruitmentStatus,
    /// Free-form note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Candidate {
    /// Creates an empty pending candidate, as shown by a fresh form.
    #[must_use]
    pub fn blank(id: &str) -> Self {
        Self {
            id: id.to_string(),
            full_name: String::new(),
            gender: Gender::Male,
            dob: None,
            phone: String::new(),
            email: String::new(),
            identity_card: String::new(),
            street: None,
            province: None,
            district: None,
            ward: None,
            applied_position: String::new(),
            cv_url: None,
            interview_date: None,
            status: RecruitmentStatus::Pending,
            note: None,
        }
    }
}
