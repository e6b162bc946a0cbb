// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{AddressLevel, Department, Employee, EmployeeStatus, Gender, LocationItem};
use time::Date;
use time::macros::date;

pub const fn test_today() -> Date {
    date!(2026 - 10 - 18)
}

/// A record that passes every validation rule.
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
        department: String::from("Phòng Kinh Doanh (Sales)"),
        position: String::from("Trưởng Phòng"),
        start_date: Some(date!(2022 - 01 - 01)),
        resignation_date: None,
        salary: 25_000_000,
        status: EmployeeStatus::Active,
        avatar_url: None,
    }
}

pub fn create_test_provinces() -> Vec<LocationItem> {
    vec![
        LocationItem::root("79", "Hồ Chí Minh"),
        LocationItem::root("01", "Hà Nội"),
    ]
}

pub fn create_test_districts() -> Vec<LocationItem> {
    vec![
        LocationItem::child("760", "Quận 1", "79"),
        LocationItem::child("778", "Quận 7", "79"),
        LocationItem::child("001", "Quận Ba Đình", "01"),
    ]
}

pub fn create_test_wards() -> Vec<LocationItem> {
    vec![
        LocationItem::child("26734", "Phường Bến Nghé", "760"),
        LocationItem::child("26740", "Phường Đa Kao", "760"),
        LocationItem::child("27085", "Phường Tân Phong", "778"),
    ]
}

pub fn create_test_departments() -> Vec<Department> {
    vec![
        Department::new("1", "Ban Giám Đốc", None),
        Department::new("2", "Phòng Kinh Doanh", Some("1")),
        Department::new("3", "Nhóm B2B", Some("2")),
        Department::new("4", "Phòng Kế Toán", Some("1")),
        Department::new("5", "Nhà Máy", None),
    ]
}
