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
    clippy::all
)]

mod error;
mod export;
mod extraction;
mod handlers;
mod reference;
mod request_response;
mod seed;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, FieldIssue, report_issues, translate_category_error, translate_core_error,
    translate_domain_error,
};
pub use export::{EXPORT_HEADERS, export_file_name, export_roster};
pub use extraction::{
    ExtractedFields, Prefill, parse_extraction, prefill_candidate, prefill_employee,
};
pub use handlers::{
    ApiResult, address_options, check_record_duplicates, dashboard, delete_category,
    delete_employee, discard_draft, edit_address, list_categories, list_employees, load_draft,
    new_employee, options, parse_category_kind, prefill_candidate_form, prefill_from_extraction,
    promote_candidate, save_candidate, save_category, save_draft, save_employee,
    set_candidate_status, summary, validate_record,
};
pub use reference::{ReferenceEntry, initials_code, normalize_departments, normalize_positions};
pub use request_response::{
    AddressChangeRequest, AddressEditRequest, AddressOptionsResponse, CandidatePrefillRequest,
    CategoryListResponse, CategoryRow, DashboardQuery, DashboardResponse, DeleteRequest,
    DraftResponse, GroupCountInfo, MutationResponse, OptionInfo, OptionsResponse, PrefillRequest, PrefillResponse,
    PromoteCandidateRequest, PromoteCandidateResponse, RosterQuery, RosterResponse,
    SaveCandidateRequest, SaveCategoryRequest, SaveDraftRequest, SetCandidateStatusRequest,
    SummaryResponse, ValidationResponse,
};
pub use seed::{SeedDocument, sample_state};
