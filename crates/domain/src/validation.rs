// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee record validation.
//!
//! Validation collects every violated rule instead of stopping at the
//! first one, so an operator sees all problems with a record at once.
//! Duplicate checks are exposed separately so they can be re-run on every
//! change of the employee code or identity card field.

use crate::types::{AddressLevel, Employee};
use std::collections::BTreeMap;
use time::Date;

/// Identity card values shorter than this are not checked for duplicates.
pub const IDENTITY_CARD_DUPLICATE_MIN_LEN: usize = 9;

/// Fields of an employee record that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EmployeeField {
    /// `employee_code`
    EmployeeCode,
    /// `full_name`
    FullName,
    /// `phone`
    Phone,
    /// `email`
    Email,
    /// `dob`
    Dob,
    /// `identity_card`
    IdentityCard,
    /// `issued_date`
    IssuedDate,
    /// `issued_place`
    IssuedPlace,
    /// `start_date`
    StartDate,
    /// `resignation_date`
    ResignationDate,
    /// `department`
    Department,
    /// `position`
    Position,
    /// `province`
    Province,
    /// `district`
    District,
    /// `ward`
    Ward,
}

impl EmployeeField {
    /// Returns the wire name of the field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EmployeeCode => "employeeCode",
            Self::FullName => "fullName",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Dob => "dob",
            Self::IdentityCard => "identityCard",
            Self::IssuedDate => "issuedDate",
            Self::IssuedPlace => "issuedPlace",
            Self::StartDate => "startDate",
            Self::ResignationDate => "resignationDate",
            Self::Department => "department",
            Self::Position => "position",
            Self::Province => "province",
            Self::District => "district",
            Self::Ward => "ward",
        }
    }
}

impl std::fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a single field was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is required but empty.
    Required,
    /// The value does not have the expected shape.
    InvalidFormat {
        /// A description of the expected shape.
        expected: &'static str,
    },
    /// The date lies after today.
    DateInFuture,
    /// The date lies before the date held by another field.
    DateBefore {
        /// The field the date must not precede.
        other: EmployeeField,
    },
    /// Another employee already uses this employee code.
    DuplicateCode,
    /// Another employee already uses this identity card number.
    DuplicateIdentity,
}

impl FieldError {
    /// Returns true for errors that depend on the rest of the roster.
    #[must_use]
    pub const fn is_duplicate(&self) -> bool {
        matches!(self, Self::DuplicateCode | Self::DuplicateIdentity)
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required => write!(f, "This field is required"),
            Self::InvalidFormat { expected } => write!(f, "Invalid format, expected {expected}"),
            Self::DateInFuture => write!(f, "Date cannot be in the future"),
            Self::DateBefore { other } => write!(f, "Date cannot be earlier than {other}"),
            Self::DuplicateCode => write!(f, "Employee code already exists"),
            Self::DuplicateIdentity => write!(f, "Identity card number already exists"),
        }
    }
}

/// The outcome of validating one employee record.
///
/// At most one error is kept per field; fields are ordered as declared in
/// [`EmployeeField`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<EmployeeField, FieldError>,
}

impl ValidationReport {
    /// Creates an empty (passing) report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: BTreeMap::new(),
        }
    }

    /// Returns true if no field was rejected.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error recorded for `field`, if any.
    #[must_use]
    pub fn error(&self, field: EmployeeField) -> Option<&FieldError> {
        self.errors.get(&field)
    }

    /// Iterates over the rejected fields in field order.
    pub fn iter(&self) -> impl Iterator<Item = (EmployeeField, &FieldError)> {
        self.errors.iter().map(|(field, error)| (*field, error))
    }

    /// Number of rejected fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no field was rejected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Records an error, replacing any earlier error for the same field.
    pub fn insert(&mut self, field: EmployeeField, error: FieldError) {
        self.errors.insert(field, error);
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{field}: {error}"))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Returns true if the phone is a Vietnamese mobile number: `0`, then one
/// of `3 5 7 8 9`, then eight more digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let bytes: &[u8] = phone.as_bytes();
    bytes.len() == 10
        && bytes[0] == b'0'
        && matches!(bytes[1], b'3' | b'5' | b'7' | b'8' | b'9')
        && bytes[2..].iter().all(u8::is_ascii_digit)
}

/// Returns true if `value` contains only ASCII digits (or is empty).
///
/// Used to reject non-digit keystrokes in the phone field before they reach
/// the record.
#[must_use]
pub fn is_digit_input(value: &str) -> bool {
    value.bytes().all(|b| b.is_ascii_digit())
}

/// Returns true for a `local@domain.tld` shaped address.
///
/// Neither part may contain whitespace or a second `@`, and the domain must
/// contain a dot with at least one character on each side.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    let clean = |part: &str| !part.is_empty() && !part.chars().any(|c| c.is_whitespace() || c == '@');
    if !clean(local) || !clean(domain) {
        return false;
    }
    let chars: Vec<char> = domain.chars().collect();
    chars.len() >= 3 && chars[1..chars.len() - 1].contains(&'.')
}

/// Returns true if another employee already uses `code`.
///
/// `own_id` is the identifier of the record being edited, which is excluded
/// from the comparison. An empty code is never a duplicate.
#[must_use]
pub fn is_duplicate_code(code: &str, own_id: &str, roster: &[Employee]) -> bool {
    let code: &str = code.trim();
    if code.is_empty() {
        return false;
    }
    roster
        .iter()
        .any(|e| e.id != own_id && e.employee_code.trim() == code)
}

/// Returns true if another employee already uses identity card `card`.
///
/// Values shorter than [`IDENTITY_CARD_DUPLICATE_MIN_LEN`] characters are
/// treated as still being typed and are never reported.
#[must_use]
pub fn is_duplicate_identity(card: &str, own_id: &str, roster: &[Employee]) -> bool {
    let card: &str = card.trim();
    if card.chars().count() < IDENTITY_CARD_DUPLICATE_MIN_LEN {
        return false;
    }
    roster
        .iter()
        .any(|e| e.id != own_id && e.identity_card.trim() == card)
}

/// Runs the live duplicate checks for the two unique fields.
///
/// This is the subset of [`validate_employee`] that depends on the roster,
/// intended to be called on every edit of either field.
#[must_use]
pub fn check_duplicates(record: &Employee, roster: &[Employee]) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::new();
    if is_duplicate_code(&record.employee_code, &record.id, roster) {
        report.insert(EmployeeField::EmployeeCode, FieldError::DuplicateCode);
    }
    if is_duplicate_identity(&record.identity_card, &record.id, roster) {
        report.insert(EmployeeField::IdentityCard, FieldError::DuplicateIdentity);
    }
    report
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Validates an employee record against the static rules and the roster.
///
/// All applicable errors are collected. The record's own id is excluded
/// from the duplicate checks, so a stored record may be validated against
/// the roster that contains it.
#[must_use]
pub fn validate_employee(record: &Employee, roster: &[Employee], today: Date) -> ValidationReport {
    let mut report: ValidationReport = ValidationReport::new();

    if is_blank(&record.employee_code) {
        report.insert(EmployeeField::EmployeeCode, FieldError::Required);
    } else if is_duplicate_code(&record.employee_code, &record.id, roster) {
        report.insert(EmployeeField::EmployeeCode, FieldError::DuplicateCode);
    }

    if is_blank(&record.full_name) {
        report.insert(EmployeeField::FullName, FieldError::Required);
    }

    if is_blank(&record.phone) {
        report.insert(EmployeeField::Phone, FieldError::Required);
    } else if !is_valid_phone(&record.phone) {
        report.insert(
            EmployeeField::Phone,
            FieldError::InvalidFormat {
                expected: "a 10-digit mobile number starting with 03, 05, 07, 08 or 09",
            },
        );
    }

    if is_blank(&record.email) {
        report.insert(EmployeeField::Email, FieldError::Required);
    } else if !is_valid_email(&record.email) {
        report.insert(
            EmployeeField::Email,
            FieldError::InvalidFormat {
                expected: "an address like name@example.com",
            },
        );
    }

    if record.dob.is_some_and(|dob| dob > today) {
        report.insert(EmployeeField::Dob, FieldError::DateInFuture);
    }

    if is_blank(&record.identity_card) {
        report.insert(EmployeeField::IdentityCard, FieldError::Required);
    } else if is_duplicate_identity(&record.identity_card, &record.id, roster) {
        report.insert(EmployeeField::IdentityCard, FieldError::DuplicateIdentity);
    }

    match record.issued_date {
        None => report.insert(EmployeeField::IssuedDate, FieldError::Required),
        Some(issued) => {
            if issued > today {
                report.insert(EmployeeField::IssuedDate, FieldError::DateInFuture);
            }
            // Preceding the birth date is the more specific problem.
            if record.dob.is_some_and(|dob| issued < dob) {
                report.insert(
                    EmployeeField::IssuedDate,
                    FieldError::DateBefore {
                        other: EmployeeField::Dob,
                    },
                );
            }
        }
    }

    if is_blank(&record.issued_place) {
        report.insert(EmployeeField::IssuedPlace, FieldError::Required);
    }

    if let (Some(start), Some(dob)) = (record.start_date, record.dob) {
        if start < dob {
            report.insert(
                EmployeeField::StartDate,
                FieldError::DateBefore {
                    other: EmployeeField::Dob,
                },
            );
        }
    }

    if let (Some(resigned), Some(start)) = (record.resignation_date, record.start_date) {
        if resigned < start {
            report.insert(
                EmployeeField::ResignationDate,
                FieldError::DateBefore {
                    other: EmployeeField::StartDate,
                },
            );
        }
    }

    if is_blank(&record.department) {
        report.insert(EmployeeField::Department, FieldError::Required);
    }
    if is_blank(&record.position) {
        report.insert(EmployeeField::Position, FieldError::Required);
    }
    if is_blank(&record.province) {
        report.insert(EmployeeField::Province, FieldError::Required);
    }
    if record.address_level == AddressLevel::Three && is_blank(&record.district) {
        report.insert(EmployeeField::District, FieldError::Required);
    }
    if is_blank(&record.ward) {
        report.insert(EmployeeField::Ward, FieldError::Required);
    }

    report
}
