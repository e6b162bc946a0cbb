// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Spreadsheet export of the roster.

use crate::error::ApiError;
use hrm_domain::{Employee, format_date};
use time::Date;

/// Column headers, in export order.
pub const EXPORT_HEADERS: [&str; 13] = [
    "Mã NV",
    "Họ Tên",
    "Giới Tính",
    "Ngày Sinh",
    "SĐT",
    "Email",
    "CCCD/CMND",
    "Phòng Ban",
    "Chức Vụ",
    "Ngày Vào Làm",
    "Lương Cơ Bản",
    "Trạng Thái",
    "Địa Chỉ Chi Tiết",
];

/// Suggested download name for an export made on `today`.
#[must_use]
pub fn export_file_name(today: Date) -> String {
    format!("Danh_Sach_Nhan_Vien_{}.csv", format_date(today))
}

fn optional_date(date: Option<Date>) -> String {
    date.map(format_date).unwrap_or_default()
}

fn export_row(employee: &Employee) -> [String; 13] {
    [
        employee.employee_code.clone(),
        employee.full_name.clone(),
        employee.gender.label().to_string(),
        optional_date(employee.dob),
        employee.phone.clone(),
        employee.email.clone(),
        employee.identity_card.clone(),
        employee.department.clone(),
        employee.position.clone(),
        optional_date(employee.start_date),
        employee.salary.to_string(),
        employee.status.label().to_string(),
        employee.address_line(),
    ]
}

/// Writes one row per employee, in roster order, as UTF-8 CSV.
///
/// The output starts with a byte order mark so spreadsheet tools pick the
/// right encoding.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the CSV writer fails.
pub fn export_roster<'a>(
    employees: impl IntoIterator<Item = &'a Employee>,
) -> Result<Vec<u8>, ApiError> {
    let mut buffer: Vec<u8> = "\u{feff}".as_bytes().to_vec();
    {
        let mut writer: csv::Writer<&mut Vec<u8>> = csv::Writer::from_writer(&mut buffer);
        writer
            .write_record(EXPORT_HEADERS)
            .map_err(|e| export_failed(&e))?;
        for employee in employees {
            writer
                .write_record(export_row(employee))
                .map_err(|e| export_failed(&e))?;
        }
        writer.flush().map_err(|e| ApiError::Internal {
            message: format!("Failed to finish roster export: {e}"),
        })?;
    }
    Ok(buffer)
}

fn export_failed(err: &csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write roster export: {err}"),
    }
}
