// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_employee, test_today};
use crate::{
    AddressLevel, DomainError, Employee, EmployeeStatus, Gender, Position, format_date,
    parse_date, parse_optional_date, placeholder_employee_code,
};
use time::macros::date;

#[test]
fn test_parse_date_accepts_iso_dates() {
    assert_eq!(parse_date("2020-01-01"), Ok(date!(2020 - 01 - 01)));
    assert_eq!(parse_date(" 1995-08-20 "), Ok(date!(1995 - 08 - 20)));
}

#[test]
fn test_parse_date_rejects_garbage() {
    let result: Result<time::Date, DomainError> = parse_date("20/08/1995");
    assert!(matches!(result, Err(DomainError::DateParseError { .. })));
}

#[test]
fn test_parse_optional_date_treats_empty_as_missing() {
    assert_eq!(parse_optional_date(""), Ok(None));
    assert_eq!(parse_optional_date("   "), Ok(None));
    assert_eq!(
        parse_optional_date("2022-01-01"),
        Ok(Some(date!(2022 - 01 - 01)))
    );
}

#[test]
fn test_format_date_zero_pads() {
    assert_eq!(format_date(date!(2023 - 03 - 05)), "2023-03-05");
}

#[test]
fn test_placeholder_employee_code_pads_short_ids() {
    assert_eq!(placeholder_employee_code("42"), "NV0042");
    assert_eq!(placeholder_employee_code("7"), "NV0007");
}

#[test]
fn test_placeholder_employee_code_uses_last_four_digits() {
    assert_eq!(placeholder_employee_code("1718000012345"), "NV2345");
    assert_eq!(placeholder_employee_code("emp-"), "NV0000");
}

#[test]
fn test_new_draft_defaults() {
    let draft: Employee = Employee::new_draft("815", test_today());

    assert_eq!(draft.id, "815");
    assert_eq!(draft.employee_code, "NV0815");
    assert_eq!(draft.status, EmployeeStatus::Active);
    assert_eq!(draft.gender, Gender::Male);
    assert_eq!(draft.address_level, AddressLevel::Three);
    assert_eq!(draft.salary, 0);
    assert_eq!(draft.start_date, Some(test_today()));
}

#[test]
fn test_position_code_is_normalized() {
    let position: Position = Position::new("p1", "  tp ", "Trưởng Phòng");
    assert_eq!(position.code, "TP");
}

#[test]
fn test_status_parse_accepts_label_and_machine_name() {
    assert_eq!(EmployeeStatus::parse("on_leave"), Ok(EmployeeStatus::OnLeave));
    assert_eq!(EmployeeStatus::parse("Thử việc"), Ok(EmployeeStatus::Probation));
    assert!(EmployeeStatus::parse("fired").is_err());
}

#[test]
fn test_gender_parse() {
    assert_eq!(Gender::parse("Nữ"), Ok(Gender::Female));
    assert_eq!(Gender::parse("other"), Ok(Gender::Other));
    assert!(matches!(
        Gender::parse("unknown"),
        Err(DomainError::InvalidGender(_))
    ));
}

#[test]
fn test_address_level_from_u8() {
    assert_eq!(AddressLevel::try_from(2), Ok(AddressLevel::Two));
    assert_eq!(AddressLevel::try_from(3), Ok(AddressLevel::Three));
    assert_eq!(
        AddressLevel::try_from(1),
        Err(DomainError::InvalidAddressLevel(1))
    );
}

#[test]
fn test_address_line_omits_empty_street() {
    let mut employee: Employee = create_test_employee("1", "NV001", "001090000001");
    assert_eq!(
        employee.address_line(),
        "123 Lê Lợi, Phường Bến Nghé, Quận 1, Hồ Chí Minh"
    );

    employee.street = String::new();
    assert_eq!(employee.address_line(), "Phường Bến Nghé, Quận 1, Hồ Chí Minh");
}

#[test]
fn test_employee_serializes_with_wire_names() {
    let employee: Employee = create_test_employee("1", "NV001", "001090000001");
    let json: String = serde_json::to_string(&employee).unwrap();

    assert!(json.contains("\"employeeCode\""));
    assert!(json.contains("\"dob\":\"1990-05-15\""));
    assert!(json.contains("\"addressLevel\":3"));
    assert!(json.contains("\"status\":\"active\""));
}
