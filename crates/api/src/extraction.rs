// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Pre-fill of records from document extraction output.
//!
//! The extraction service reads a CV or free text and answers with a loose
//! JSON object. Its output is untrusted: values that do not fit a field are
//! dropped, and the filled record is validated exactly like manual entry.
//! Nothing here commits anything.

use crate::error::{ApiError, FieldIssue, report_issues};
use hrm_domain::{
    Candidate, Employee, Gender, ValidationReport, is_digit_input, parse_date, validate_employee,
};
use serde::Deserialize;
use serde_json::Value;
use time::Date;

/// Fields the extraction service may return. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub full_name: Option<String>,
    pub gender: Option<String>,
    pub dob: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub identity_card: Option<String>,
    pub issued_date: Option<String>,
    pub issued_place: Option<String>,
    pub street: Option<String>,
    pub ward: Option<String>,
    pub district: Option<String>,
    pub province: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    /// A number, or a string of digits with optional grouping.
    pub salary: Option<Value>,
}

/// A record filled from extraction output, with what validation thinks of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefill {
    /// The filled record, not yet saved.
    pub employee: Employee,
    /// Fields that would block saving as-is.
    pub issues: Vec<FieldIssue>,
}

/// Parses the raw extraction response.
///
/// A JSON `null` means the service found nothing and yields `Ok(None)`.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the text is not a JSON object.
pub fn parse_extraction(raw: &str) -> Result<Option<ExtractedFields>, ApiError> {
    let value: Value = serde_json::from_str(raw).map_err(|e| ApiError::InvalidInput {
        field: String::from("extraction"),
        message: format!("Extraction output is not JSON: {e}"),
    })?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| ApiError::InvalidInput {
            field: String::from("extraction"),
            message: format!("Extraction output has an unexpected shape: {e}"),
        })
}

/// Fills an employee draft from extracted fields and validates the result.
#[must_use]
pub fn prefill_employee(
    draft: &Employee,
    fields: &ExtractedFields,
    roster: &[Employee],
    today: Date,
) -> Prefill {
    let mut employee: Employee = draft.clone();

    fill_text(&mut employee.full_name, fields.full_name.as_deref());
    fill_text(&mut employee.email, fields.email.as_deref());
    fill_text(&mut employee.identity_card, fields.identity_card.as_deref());
    fill_text(&mut employee.issued_place, fields.issued_place.as_deref());
    fill_text(&mut employee.street, fields.street.as_deref());
    fill_text(&mut employee.province, fields.province.as_deref());
    fill_text(&mut employee.district, fields.district.as_deref());
    fill_text(&mut employee.ward, fields.ward.as_deref());
    fill_text(&mut employee.department, fields.department.as_deref());
    fill_text(&mut employee.position, fields.position.as_deref());

    if let Some(phone) = fields.phone.as_deref().and_then(clean_phone) {
        employee.phone = phone;
    }
    if let Some(gender) = fields.gender.as_deref().and_then(coerce_gender) {
        employee.gender = gender;
    }
    if let Some(dob) = fields.dob.as_deref().and_then(coerce_date) {
        employee.dob = Some(dob);
    }
    if let Some(issued) = fields.issued_date.as_deref().and_then(coerce_date) {
        employee.issued_date = Some(issued);
    }
    if let Some(salary) = fields.salary.as_ref().and_then(coerce_salary) {
        employee.salary = salary;
    }

    let report: ValidationReport = validate_employee(&employee, roster, today);
    Prefill {
        employee,
        issues: report_issues(&report),
    }
}

/// Fills a candidate form from extracted fields.
///
/// The extracted position becomes the applied position.
#[must_use]
pub fn prefill_candidate(draft: &Candidate, fields: &ExtractedFields) -> Candidate {
    let mut candidate: Candidate = draft.clone();

    fill_text(&mut candidate.full_name, fields.full_name.as_deref());
    fill_text(&mut candidate.email, fields.email.as_deref());
    fill_text(&mut candidate.identity_card, fields.identity_card.as_deref());
    fill_text(&mut candidate.applied_position, fields.position.as_deref());
    fill_optional(&mut candidate.street, fields.street.as_deref());
    fill_optional(&mut candidate.province, fields.province.as_deref());
    fill_optional(&mut candidate.district, fields.district.as_deref());
    fill_optional(&mut candidate.ward, fields.ward.as_deref());

    if let Some(phone) = fields.phone.as_deref().and_then(clean_phone) {
        candidate.phone = phone;
    }
    if let Some(gender) = fields.gender.as_deref().and_then(coerce_gender) {
        candidate.gender = gender;
    }
    if let Some(dob) = fields.dob.as_deref().and_then(coerce_date) {
        candidate.dob = Some(dob);
    }
    candidate
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn fill_text(target: &mut String, value: Option<&str>) {
    if let Some(value) = non_blank(value) {
        *target = value.to_string();
    }
}

fn fill_optional(target: &mut Option<String>, value: Option<&str>) {
    if let Some(value) = non_blank(value) {
        *target = Some(value.to_string());
    }
}

/// Drops spaces, dots and dashes; anything else non-numeric rejects the value.
fn clean_phone(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != '-')
        .collect();
    if cleaned.is_empty() || !is_digit_input(&cleaned) {
        return None;
    }
    Some(cleaned)
}

fn coerce_gender(raw: &str) -> Option<Gender> {
    let value: &str = raw.trim();
    if let Ok(gender) = Gender::parse(value) {
        return Some(gender);
    }
    match value.to_lowercase().as_str() {
        "nam" | "m" => Some(Gender::Male),
        "nữ" | "nu" | "f" => Some(Gender::Female),
        "khác" | "khac" => Some(Gender::Other),
        _ => None,
    }
}

fn coerce_date(raw: &str) -> Option<Date> {
    non_blank(Some(raw)).and_then(|value| parse_date(value).ok())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn coerce_salary(raw: &Value) -> Option<u64> {
    match raw {
        Value::Number(number) => number.as_u64().or_else(|| {
            number
                .as_f64()
                .filter(|v| v.is_finite() && *v >= 0.0)
                .map(|v| v.round() as u64)
        }),
        Value::String(text) => {
            // Grouping separators only; words or units reject the value.
            let digits: String = text
                .chars()
                .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
                .collect();
            if digits.is_empty() || !is_digit_input(&digits) {
                return None;
            }
            digits.parse().ok()
        }
        _ => None,
    }
}
