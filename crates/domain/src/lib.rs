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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod address;
mod error;
pub mod hierarchy;
mod recruitment;
mod roster;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use address::{
    AddressChange, apply_address_change, available_districts, available_wards, parent_district_of,
};
pub use error::DomainError;
pub use hierarchy::{FlatNode, HierarchyNode};
pub use recruitment::{PromotionDetails, RecruitmentStatus, ensure_promotable, promote_candidate};
pub use roster::{
    DashboardFilter, DashboardTab, GroupCount, RosterFilter, RosterSummary, available_statuses,
    count_by_department, count_by_gender, dashboard_list, filter_roster, summarize,
};
pub use types::{
    AddressLevel, Candidate, Department, Employee, EmployeeStatus, Gender, LocationItem, Position,
    format_date, normalize_position_code, parse_date, parse_optional_date,
    placeholder_employee_code,
};
pub use validation::{
    EmployeeField, FieldError, IDENTITY_CARD_DUPLICATE_MIN_LEN, ValidationReport,
    check_duplicates, is_digit_input, is_duplicate_code, is_duplicate_identity, is_valid_email,
    is_valid_phone, validate_employee,
};
