// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Initial data for a fresh process.

use crate::error::ApiError;
use crate::reference::{ReferenceEntry, normalize_departments, normalize_positions};
use hrm::{IdGenerator, State};
use hrm_domain::hierarchy;
use hrm_domain::{
    AddressLevel, Candidate, Department, DomainError, Employee, EmployeeStatus, Gender,
    LocationItem, Position, RecruitmentStatus,
};
use serde::Deserialize;
use std::collections::HashSet;
use time::macros::date;

/// A seed document. Every collection is optional and defaults to empty.
///
/// Departments and positions may be given as plain names or as objects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeedDocument {
    pub employees: Vec<Employee>,
    pub candidates: Vec<Candidate>,
    pub provinces: Vec<LocationItem>,
    pub districts: Vec<LocationItem>,
    pub wards: Vec<LocationItem>,
    pub departments: Vec<ReferenceEntry>,
    pub positions: Vec<ReferenceEntry>,
}

impl SeedDocument {
    /// Parses a seed document from JSON.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if the JSON does not describe a seed document.
    pub fn from_json(json: &str) -> Result<Self, ApiError> {
        serde_json::from_str(json).map_err(|e| invalid_seed(&e.to_string()))
    }

    /// Builds the initial state, normalizing department and position entries.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` if:
    /// - an identifier repeats within a collection
    /// - a district or ward names a parent that is not in the level above
    /// - department parents form a loop
    pub fn into_state(self, ids: &mut dyn IdGenerator) -> Result<State, ApiError> {
        let provinces: Vec<LocationItem> = seed_level(self.provinces, None)?;
        let districts: Vec<LocationItem> =
            seed_level(self.districts, Some((provinces.as_slice(), "province")))?;
        let wards: Vec<LocationItem> =
            seed_level(self.wards, Some((districts.as_slice(), "district")))?;

        let departments: Vec<Department> = normalize_departments(&self.departments, ids)
            .into_iter()
            .try_fold(Vec::new(), |acc, department| hierarchy::add(&acc, department))
            .map_err(seed_error)?;
        if let Some(looped) = departments.iter().find(|d| {
            d.parent_id
                .as_deref()
                .is_some_and(|parent| hierarchy::would_create_cycle(&departments, &d.id, parent))
        }) {
            return Err(invalid_seed(&format!(
                "department '{}' is its own ancestor",
                looped.id
            )));
        }

        let positions: Vec<Position> = normalize_positions(&self.positions, ids);
        ensure_unique_ids("position", positions.iter().map(|p| p.id.as_str()))?;
        ensure_unique_ids("employee", self.employees.iter().map(|e| e.id.as_str()))?;
        ensure_unique_ids("candidate", self.candidates.iter().map(|c| c.id.as_str()))?;

        Ok(State {
            employees: self.employees,
            candidates: self.candidates,
            provinces,
            districts,
            wards,
            departments,
            positions,
        })
    }
}

/// Adds one address level item by item. Below the top level every item
/// must name a parent in `parents`.
fn seed_level(
    items: Vec<LocationItem>,
    parents: Option<(&[LocationItem], &'static str)>,
) -> Result<Vec<LocationItem>, ApiError> {
    let mut level: Vec<LocationItem> = Vec::with_capacity(items.len());
    for item in items {
        if let Some((parents, parent_kind)) = parents {
            let parent_id: &str = item.parent_id.as_deref().unwrap_or_default();
            hierarchy::ensure_parent_exists(parents, parent_kind, parent_id)
                .map_err(seed_error)?;
        }
        level = hierarchy::add(&level, item).map_err(seed_error)?;
    }
    Ok(level)
}

fn ensure_unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ApiError> {
    let mut seen: HashSet<&str> = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(invalid_seed(&format!("{kind} id '{id}' appears more than once")));
        }
    }
    Ok(())
}

fn seed_error(err: DomainError) -> ApiError {
    invalid_seed(&err.to_string())
}

fn invalid_seed(reason: &str) -> ApiError {
    ApiError::InvalidInput {
        field: String::from("seed"),
        message: format!("Invalid seed document: {reason}"),
    }
}

/// Built-in sample data used when no seed document is configured.
#[must_use]
pub fn sample_state() -> State {
    State {
        employees: vec![sample_employee_an(), sample_employee_bich()],
        candidates: vec![sample_candidate()],
        provinces: vec![
            LocationItem::root("79", "Hồ Chí Minh"),
            LocationItem::root("01", "Hà Nội"),
            LocationItem::root("48", "Đà Nẵng"),
        ],
        districts: vec![
            LocationItem::child("760", "Quận 1", "79"),
            LocationItem::child("769", "Thành phố Thủ Đức", "79"),
            LocationItem::child("778", "Quận 7", "79"),
            LocationItem::child("001", "Quận Ba Đình", "01"),
            LocationItem::child("005", "Quận Cầu Giấy", "01"),
        ],
        wards: vec![
            LocationItem::child("26734", "Phường Bến Nghé", "760"),
            LocationItem::child("26740", "Phường Đa Kao", "760"),
            LocationItem::child("26848", "Phường Thảo Điền", "769"),
            LocationItem::child("27085", "Phường Tân Phong", "778"),
        ],
        departments: vec![
            Department::new("dep1", "Ban Giám Đốc", None),
            Department::new("dep2", "Phòng Kinh Doanh (Sales)", Some("dep1")),
            Department::new("dep3", "Phòng Marketing", Some("dep1")),
            Department::new("dep4", "Phòng Nhân Sự (HR)", Some("dep1")),
            Department::new("dep5", "Phòng Kế Toán", Some("dep1")),
            Department::new("dep6", "Phòng CNTT (IT)", Some("dep1")),
            Department::new("dep7", "Kho Vận & Logistics", None),
            Department::new("dep8", "Nhà Máy Sản Xuất", None),
        ],
        positions: vec![
            Position::new("pos1", "GD", "Giám Đốc"),
            Position::new("pos2", "TP", "Trưởng Phòng"),
            Position::new("pos3", "PP", "Phó Phòng"),
            Position::new("pos4", "TN", "Trưởng Nhóm"),
            Position::new("pos5", "CV", "Chuyên Viên"),
            Position::new("pos6", "NV", "Nhân Viên"),
            Position::new("pos7", "TTS", "Thực Tập Sinh"),
            Position::new("pos8", "CN", "Công Nhân"),
        ],
    }
}

fn sample_employee_an() -> Employee {
    Employee {
        id: String::from("1"),
        employee_code: String::from("NV001"),
        full_name: String::from("Nguyễn Văn An"),
        gender: Gender::Male,
        dob: Some(date!(1990 - 05 - 15)),
        phone: String::from("0901234567"),
        email: String::from("an.nguyen@cadovina.com"),
        identity_card: String::from("001090000001"),
        issued_date: Some(date!(2020 - 01 - 01)),
        issued_place: String::from("Cục CS QLHC"),
        street: String::from("123 Lê Lợi"),
        province: String::from("Hồ Chí Minh"),
        district: String::from("Quận 1"),
        ward: String::from("Phường Bến Nghé"),
        address_level: AddressLevel::Three,
        department: String::from("Phòng Kinh Doanh (Sales)"),
        position: String::from("Trưởng Phòng"),
        start_date: Some(date!(2022 - 01 - 01)),
        resignation_date: None,
        salary: 25_000_000,
        status: EmployeeStatus::Active,
        avatar_url: None,
    }
}

fn sample_employee_bich() -> Employee {
    Employee {
        id: String::from("2"),
        employee_code: String::from("NV002"),
        full_name: String::from("Trần Thị Bích"),
        gender: Gender::Female,
        dob: Some(date!(1995 - 08 - 20)),
        phone: String::from("0909888777"),
        email: String::from("bich.tran@cadovina.com"),
        identity_card: String::from("079195000002"),
        issued_date: Some(date!(2021 - 05 - 10)),
        issued_place: String::from("Cục CS QLHC"),
        street: String::from("456 Nguyễn Văn Linh"),
        province: String::from("Hồ Chí Minh"),
        district: String::from("Quận 7"),
        ward: String::from("Phường Tân Phong"),
        address_level: AddressLevel::Three,
        department: String::from("Phòng Kế Toán"),
        position: String::from("Chuyên Viên"),
        start_date: Some(date!(2023 - 03 - 15)),
        resignation_date: None,
        salary: 15_000_000,
        status: EmployeeStatus::Probation,
        avatar_url: None,
    }
}

fn sample_candidate() -> Candidate {
    let mut candidate: Candidate = Candidate::blank("c1");
    candidate.full_name = String::from("Lê Văn Ứng Viên");
    candidate.gender = Gender::Male;
    candidate.dob = Some(date!(1998 - 12 - 12));
    candidate.phone = String::from("0987654321");
    candidate.email = String::from("ungvien@gmail.com");
    candidate.identity_card = String::from("0303938485");
    candidate.applied_position = String::from("Nhân Viên Kinh Doanh");
    candidate.interview_date = Some(date!(2023 - 11 - 20));
    candidate.status = RecruitmentStatus::Pending;
    candidate.province = Some(String::from("Hồ Chí Minh"));
    candidate.district = Some(String::from("Quận 1"));
    candidate.ward = Some(String::from("Phường Bến Nghé"));
    candidate.note = Some(String::from("Có kinh nghiệm 2 năm sale B2B"));
    candidate
}
