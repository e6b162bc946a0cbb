// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_ids, create_test_state, test_today};
use crate::{
    ApiError, CandidatePrefillRequest, ExtractedFields, Prefill, PrefillRequest, PrefillResponse,
    parse_extraction, prefill_candidate, prefill_candidate_form, prefill_employee,
    prefill_from_extraction,
};
use hrm::{SequentialIds, State};
use hrm_domain::{Candidate, Employee, Gender};
use time::macros::date;

const CV_EXTRACTION: &str = r#"{
    "fullName": "  Hoàng Thị Mai ",
    "gender": "Nữ",
    "dob": "1997-04-02",
    "phone": "093 456 7890",
    "email": "mai.hoang@example.com",
    "identityCard": "079197000456",
    "issuedDate": "2021-08-15",
    "issuedPlace": "Cục CS QLHC",
    "street": "12 Pasteur",
    "ward": "Phường Bến Nghé",
    "district": "Quận 1",
    "province": "Hồ Chí Minh",
    "department": "Phòng Marketing",
    "position": "Chuyên Viên",
    "salary": 18000000
}"#;

#[test]
fn test_parse_extraction_null_means_nothing_found() {
    assert_eq!(parse_extraction("null").unwrap(), None);
}

#[test]
fn test_parse_extraction_rejects_non_json() {
    assert!(matches!(
        parse_extraction("Sorry, I could not read that file."),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "extraction"
    ));
}

#[test]
fn test_prefill_employee_from_cv() {
    let state: State = create_test_state();
    let fields: ExtractedFields = parse_extraction(CV_EXTRACTION).unwrap().unwrap();
    let draft: Employee = Employee::new_draft("1000", test_today());

    let prefill: Prefill = prefill_employee(&draft, &fields, &state.employees, test_today());

    let employee: &Employee = &prefill.employee;
    assert_eq!(employee.id, "1000");
    assert_eq!(employee.employee_code, "NV1000");
    assert_eq!(employee.full_name, "Hoàng Thị Mai");
    assert_eq!(employee.gender, Gender::Female);
    assert_eq!(employee.dob, Some(date!(1997 - 04 - 02)));
    assert_eq!(employee.phone, "0934567890");
    assert_eq!(employee.salary, 18_000_000);
    assert_eq!(employee.department, "Phòng Marketing");
    assert!(prefill.issues.is_empty(), "{:?}", prefill.issues);
}

#[test]
fn test_unusable_values_are_dropped() {
    let state: State = create_test_state();
    let fields: ExtractedFields = parse_extraction(
        r#"{"fullName": "Ngô Văn Tùng", "dob": "15/03/1990", "phone": "+84 912 345 678",
            "gender": "unknown", "salary": "khoảng 15 triệu"}"#,
    )
    .unwrap()
    .unwrap();
    let draft: Employee = Employee::new_draft("1000", test_today());

    let prefill: Prefill = prefill_employee(&draft, &fields, &state.employees, test_today());

    assert_eq!(prefill.employee.full_name, "Ngô Văn Tùng");
    assert_eq!(prefill.employee.dob, None);
    assert!(prefill.employee.phone.is_empty());
    assert_eq!(prefill.employee.gender, Gender::Male);
    assert_eq!(prefill.employee.salary, 0);
}

#[test]
fn test_grouped_salary_string_is_accepted() {
    let state: State = create_test_state();
    let fields: ExtractedFields = parse_extraction(r#"{"salary": "12.000.000"}"#)
        .unwrap()
        .unwrap();
    let draft: Employee = Employee::new_draft("1000", test_today());

    let prefill: Prefill = prefill_employee(&draft, &fields, &state.employees, test_today());
    assert_eq!(prefill.employee.salary, 12_000_000);
}

#[test]
fn test_prefill_is_validated_like_manual_entry() {
    let state: State = create_test_state();
    let fields: ExtractedFields =
        parse_extraction(r#"{"fullName": "Nguyễn Văn An", "identityCard": "001090000001"}"#)
            .unwrap()
            .unwrap();
    let draft: Employee = Employee::new_draft("1000", test_today());

    let prefill: Prefill = prefill_employee(&draft, &fields, &state.employees, test_today());

    let duplicate = prefill
        .issues
        .iter()
        .find(|issue| issue.field == "identityCard")
        .unwrap();
    assert!(duplicate.duplicate);
    assert!(prefill.issues.iter().any(|issue| issue.field == "phone"));
    assert_eq!(state.employees.len(), 2);
}

#[test]
fn test_prefill_candidate_maps_position() {
    let fields: ExtractedFields = parse_extraction(CV_EXTRACTION).unwrap().unwrap();
    let draft: Candidate = Candidate::blank("");

    let candidate: Candidate = prefill_candidate(&draft, &fields);

    assert_eq!(candidate.applied_position, "Chuyên Viên");
    assert_eq!(candidate.full_name, "Hoàng Thị Mai");
    assert_eq!(candidate.ward.as_deref(), Some("Phường Bến Nghé"));
    assert_eq!(candidate.phone, "0934567890");
}

#[test]
fn test_prefill_from_extraction_uses_fresh_draft() {
    let state: State = create_test_state();
    let mut ids: SequentialIds = create_test_ids();

    let response: PrefillResponse = prefill_from_extraction(
        &state,
        &PrefillRequest {
            extraction: CV_EXTRACTION.to_string(),
        },
        &mut ids,
        test_today(),
    )
    .unwrap();
    assert_eq!(response.employee.id, "1000");
    assert!(response.issues.is_empty());

    let nothing = prefill_from_extraction(
        &state,
        &PrefillRequest {
            extraction: String::from("null"),
        },
        &mut ids,
        test_today(),
    );
    assert!(matches!(nothing, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_prefill_candidate_form_keeps_entered_values() {
    let mut form: Candidate = Candidate::blank("c7");
    form.note = Some(String::from("Giới thiệu nội bộ"));
    form.full_name = String::from("Hoàng Mai");

    let candidate: Candidate = prefill_candidate_form(&CandidatePrefillRequest {
        extraction: String::from(r#"{"fullName": "  ", "position": "Chuyên Viên"}"#),
        form: Some(form),
    })
    .unwrap();

    assert_eq!(candidate.id, "c7");
    assert_eq!(candidate.full_name, "Hoàng Mai");
    assert_eq!(candidate.applied_position, "Chuyên Viên");
    assert_eq!(candidate.note.as_deref(), Some("Giới thiệu nội bộ"));
}

#[test]
fn test_prefill_candidate_form_without_form_or_fields() {
    let candidate: Candidate = prefill_candidate_form(&CandidatePrefillRequest {
        extraction: CV_EXTRACTION.to_string(),
        form: None,
    })
    .unwrap();
    assert_eq!(candidate.id, "");
    assert_eq!(candidate.full_name, "Hoàng Thị Mai");

    let nothing = prefill_candidate_form(&CandidatePrefillRequest {
        extraction: String::from("null"),
        form: None,
    });
    assert!(matches!(nothing, Err(ApiError::ResourceNotFound { .. })));

    let garbage = prefill_candidate_form(&CandidatePrefillRequest {
        extraction: String::from("not json"),
        form: None,
    });
    assert!(matches!(garbage, Err(ApiError::InvalidInput { .. })));
}
