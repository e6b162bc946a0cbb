// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::State;
use hrm_audit::{Actor, Cause};
use hrm_domain::{
    AddressLevel, Candidate, Department, Employee, EmployeeStatus, Gender, LocationItem, Position,
    RecruitmentStatus,
};
use time::Date;
use time::macros::date;

pub const fn test_today() -> Date {
    date!(2026 - 10 - 18)
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-01"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn create_test_employee(id: &str, code: &str, identity_card: &str) -> Employee {
    Employee {
        id: id.to_string(),
        employee_code: code.to_string(),
        full_name: String::from("Nguyễn Văn An"),
        gender: Gender::Male,
        dob: Some(date!(1990 - 05 - 15)),
        phone: String::from("0901234567"),
        email: String::from("an.nguyen@example.com"),
        identity_card: identity_card.to_string(),
        issued_date: Some(date!(2020 - 01 - 01)),
        issued_place: String::from("Cục CS QLHC"),
        street: String::from("123 Lê Lợi"),
        province: String::from("Hồ Chí Minh"),
        district: String::from("Quận 1"),
        ward: String::from("Phường Bến Nghé"),
        address_level: AddressLevel::Three,
        department: String::from("Phòng Kinh Doanh"),
        position: String::from("Trưởng Phòng"),
        start_date: Some(date!(2022 - 01 - 01)),
        resignation_date: None,
        salary: 25_000_000,
        status: EmployeeStatus::Active,
        avatar_url: None,
    }
}

pub fn create_test_candidate(id: &str, status: RecruitmentStatus) -> Candidate {
    let mut candidate: Candidate = Candidate::blank(id);
    candidate.full_name = String::from("Lê Văn Cường");
    candidate.phone = String::from("0987654321");
    candidate.email = String::from("cuong.le@example.com");
    candidate.identity_card = String::from("079095000003");
    candidate.dob = Some(date!(1995 - 03 - 20));
    candidate.province = Some(String::from("Hồ Chí Minh"));
    candidate.applied_position = String::from("Nhân Viên");
    candidate.status = status;
    candidate
}

/// Reference data plus one employee (NV001) and one candidate (c1, pending).
pub fn create_test_state() -> State {
    State {
        employees: vec![create_test_employee("e1", "NV001", "001090000001")],
        candidates: vec![create_test_candidate("c1", RecruitmentStatus::Pending)],
        provinces: vec![
            LocationItem::root("P1", "Hồ Chí Minh"),
            LocationItem::root("P2", "Hà Nội"),
        ],
        districts: vec![
            LocationItem::child("D1", "Quận 1", "P1"),
            LocationItem::child("D2", "Quận 7", "P1"),
        ],
        wards: vec![LocationItem::child("W1", "Phường Bến Nghé", "D1")],
        departments: vec![
            Department::new("dep1", "Ban Giám Đốc", None),
            Department::new("dep2", "Phòng Kinh Doanh", Some("dep1")),
            Department::new("dep3", "Nhóm B2B", Some("dep2")),
        ],
        positions: vec![
            Position::new("pos1", "GD", "Giám Đốc"),
            Position::new("pos2", "TP", "Trưởng Phòng"),
        ],
    }
}
