// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers: request translation, command application and responses.

use crate::error::{ApiError, report_issues, translate_core_error, translate_domain_error};
use crate::extraction::{
    ExtractedFields, Prefill, parse_extraction, prefill_candidate, prefill_employee,
};
use crate::request_response::{
    AddressChangeRequest, AddressEditRequest, AddressOptionsResponse, CandidatePrefillRequest,
    CategoryListResponse, CategoryRow, DashboardQuery, DashboardResponse, DeleteRequest, DraftResponse, GroupCountInfo,
    MutationResponse, OptionInfo, OptionsResponse, PrefillRequest, PrefillResponse,
    PromoteCandidateRequest, PromoteCandidateResponse, RosterQuery, RosterResponse,
    SaveCandidateRequest, SaveCategoryRequest, SaveDraftRequest, SetCandidateStatusRequest,
    SummaryResponse, ValidationResponse,
};
use hrm::{
    CandidateDraft, CategoryInput, CategoryKind, Command, CoreError, DraftStore, IdGenerator,
    RecruitmentDesk, State, TransitionResult, apply, new_employee_draft,
};
use hrm_audit::{Actor, AuditEvent, Cause};
use hrm_domain::{
    AddressChange, Candidate, DashboardFilter, DashboardTab, Employee, EmployeeStatus, Gender,
    HierarchyNode, LocationItem, PromotionDetails, RecruitmentStatus, RosterFilter,
    RosterSummary, ValidationReport, apply_address_change, available_districts,
    available_statuses, available_wards, check_duplicates, count_by_department, count_by_gender,
    dashboard_list, filter_roster, hierarchy, parse_optional_date, summarize, validate_employee,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

/// The result of an API operation that includes the response and its audit trail.
///
/// This ensures that successful API operations always produce an audit trail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The API response.
    pub response: T,
    /// One audit event per changed collection.
    pub audit_events: Vec<AuditEvent>,
    /// The new state after the operation.
    pub new_state: State,
}

impl<T> ApiResult<T> {
    fn from_transition(response: T, transition: TransitionResult) -> Self {
        Self {
            response,
            audit_events: transition.audit_events,
            new_state: transition.new_state,
        }
    }
}

fn changed_tags(transition: &TransitionResult) -> Vec<String> {
    transition
        .changed_collections()
        .into_iter()
        .map(|collection| collection.as_str().to_string())
        .collect()
}

/// Trimmed, non-empty filter value.
fn filter_value(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn option_info(value: &str, label: &str) -> OptionInfo {
    OptionInfo {
        value: value.to_string(),
        label: label.to_string(),
    }
}

fn status_options(statuses: &[EmployeeStatus]) -> Vec<OptionInfo> {
    statuses
        .iter()
        .map(|status| option_info(status.as_str(), status.label()))
        .collect()
}

fn parse_employee_status(value: Option<&str>) -> Result<Option<EmployeeStatus>, ApiError> {
    filter_value(value)
        .map(|status| EmployeeStatus::parse(&status))
        .transpose()
        .map_err(translate_domain_error)
}

/// Resolves a reference kind from a route segment.
///
/// Both the singular name (`district`) and the collection name
/// (`districts`) are accepted.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown kind.
pub fn parse_category_kind(segment: &str) -> Result<CategoryKind, ApiError> {
    CategoryKind::ALL
        .into_iter()
        .find(|kind| {
            kind.as_str().eq_ignore_ascii_case(segment)
                || kind.collection().as_str().eq_ignore_ascii_case(segment)
        })
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Category"),
            message: format!("Unknown category '{segment}'"),
        })
}

fn last_category_id(state: &State, kind: CategoryKind) -> Option<String> {
    match kind {
        CategoryKind::Province => state.provinces.last().map(|i| i.id.clone()),
        CategoryKind::District => state.districts.last().map(|i| i.id.clone()),
        CategoryKind::Ward => state.wards.last().map(|i| i.id.clone()),
        CategoryKind::Department => state.departments.last().map(|i| i.id.clone()),
        CategoryKind::Position => state.positions.last().map(|i| i.id.clone()),
    }
}

/// Creates or edits a reference item.
///
/// # Errors
///
/// Returns an error if:
/// - the name (or, for positions, the code) is blank
/// - a position code is already in use
/// - a district or ward has no existing parent
/// - a department would become its own ancestor
/// - the edited item does not exist
pub fn save_category(
    state: &State,
    kind: CategoryKind,
    request: SaveCategoryRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    let editing_id: Option<String> = request.editing_id;
    let is_edit: bool = editing_id.is_some();
    let command: Command = Command::SaveCategory {
        kind,
        input: CategoryInput {
            name: request.name,
            code: request.code,
            parent_id: request.parent_id,
        },
        editing_id: editing_id.clone(),
    };

    let transition: TransitionResult =
        apply(state, command, ids, today, actor, cause).map_err(translate_core_error)?;

    let id: String = editing_id
        .or_else(|| last_category_id(&transition.new_state, kind))
        .unwrap_or_default();
    let verb: &str = if is_edit { "Updated" } else { "Created" };
    let response: MutationResponse = MutationResponse {
        message: format!("{verb} {kind} '{id}'"),
        changed: changed_tags(&transition),
        id,
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Deletes a reference item after confirmation.
///
/// # Errors
///
/// Returns an error if the delete is not confirmed, the item does not
/// exist, or a province, district or department still has children.
#[allow(clippy::too_many_arguments)]
pub fn delete_category(
    state: &State,
    kind: CategoryKind,
    id: &str,
    request: DeleteRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    let command: Command = Command::DeleteCategory {
        kind,
        id: id.to_string(),
        confirmed: request.confirmed,
    };
    let transition: TransitionResult =
        apply(state, command, ids, today, actor, cause).map_err(translate_core_error)?;

    let response: MutationResponse = MutationResponse {
        id: id.to_string(),
        changed: changed_tags(&transition),
        message: format!("Deleted {kind} '{id}'"),
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Lists the items of one reference kind.
///
/// Departments come as a flattened tree, each parent before its children,
/// with their depth. Other kinds keep insertion order.
#[must_use]
pub fn list_categories(state: &State, kind: CategoryKind) -> CategoryListResponse {
    let items: Vec<CategoryRow> = match kind {
        CategoryKind::Province => location_rows(&state.provinces, &[]),
        CategoryKind::District => location_rows(&state.districts, &state.provinces),
        CategoryKind::Ward => location_rows(&state.wards, &state.districts),
        CategoryKind::Department => hierarchy::flatten(&state.departments)
            .into_iter()
            .map(|node| CategoryRow {
                id: node.item.id.clone(),
                name: node.item.name.clone(),
                code: None,
                parent_id: node.item.parent_id.clone(),
                parent_name: parent_name(&state.departments, node.item.parent_id()),
                depth: node.depth,
            })
            .collect(),
        CategoryKind::Position => state
            .positions
            .iter()
            .map(|position| CategoryRow {
                id: position.id.clone(),
                name: position.name.clone(),
                code: Some(position.code.clone()),
                parent_id: None,
                parent_name: None,
                depth: 0,
            })
            .collect(),
    };
    CategoryListResponse {
        kind: kind.as_str().to_string(),
        items,
    }
}

fn parent_name<T: HierarchyNode>(parents: &[T], parent_id: Option<&str>) -> Option<String> {
    parent_id
        .and_then(|id| hierarchy::find_by_id(parents, id))
        .map(|parent| parent.name().to_string())
}

fn location_rows(items: &[LocationItem], parents: &[LocationItem]) -> Vec<CategoryRow> {
    items
        .iter()
        .map(|item| CategoryRow {
            id: item.id.clone(),
            name: item.name.clone(),
            code: None,
            parent_id: item.parent_id.clone(),
            parent_name: parent_name(parents, item.parent_id.as_deref()),
            depth: 0,
        })
        .collect()
}

/// Starts a blank employee record for the "add new" form.
#[must_use]
pub fn new_employee(ids: &mut dyn IdGenerator, today: Date) -> Employee {
    new_employee_draft(ids, today)
}

/// Saves an employee record, creating it if its id is unknown.
///
/// A blank id is replaced with a fresh one.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every rejected field.
pub fn save_employee(
    state: &State,
    mut employee: Employee,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    if employee.id.trim().is_empty() {
        employee.id = ids.next_id();
    }
    let id: String = employee.id.clone();
    let existed: bool = state.employees.iter().any(|e| e.id == id);

    let transition: TransitionResult = apply(
        state,
        Command::SaveEmployee { employee },
        ids,
        today,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let verb: &str = if existed { "Updated" } else { "Created" };
    let response: MutationResponse = MutationResponse {
        message: format!("{verb} employee '{id}'"),
        changed: changed_tags(&transition),
        id,
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Deletes an employee record after confirmation.
///
/// # Errors
///
/// Returns an error if the delete is not confirmed or the employee does not exist.
pub fn delete_employee(
    state: &State,
    id: &str,
    request: DeleteRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    if !request.confirmed {
        return Err(translate_core_error(CoreError::DeleteNotConfirmed {
            id: id.to_string(),
        }));
    }
    let transition: TransitionResult = apply(
        state,
        Command::DeleteEmployee { id: id.to_string() },
        ids,
        today,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let response: MutationResponse = MutationResponse {
        id: id.to_string(),
        changed: changed_tags(&transition),
        message: format!("Deleted employee '{id}'"),
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Validates a record against the roster without saving it.
#[must_use]
pub fn validate_record(state: &State, record: &Employee, today: Date) -> ValidationResponse {
    validation_response(&validate_employee(record, &state.employees, today))
}

/// Runs only the live duplicate checks (employee code and identity card).
#[must_use]
pub fn check_record_duplicates(state: &State, record: &Employee) -> ValidationResponse {
    validation_response(&check_duplicates(record, &state.employees))
}

fn validation_response(report: &ValidationReport) -> ValidationResponse {
    ValidationResponse {
        valid: report.is_valid(),
        issues: report_issues(report),
    }
}

/// Applies one address edit to an unsaved record.
#[must_use]
pub fn edit_address(state: &State, request: AddressEditRequest) -> Employee {
    let change: AddressChange = match request.change {
        AddressChangeRequest::Province(name) => AddressChange::Province(name),
        AddressChangeRequest::District(name) => AddressChange::District(name),
        AddressChangeRequest::Ward(name) => AddressChange::Ward(name),
        AddressChangeRequest::Level(level) => AddressChange::Level(level),
    };
    apply_address_change(&request.record, change, &state.districts, &state.wards)
}

/// Lists the address choices for a record as currently entered.
#[must_use]
pub fn address_options(state: &State, record: &Employee) -> AddressOptionsResponse {
    AddressOptionsResponse {
        provinces: state.provinces.clone(),
        districts: available_districts(&record.province, &state.provinces, &state.districts)
            .into_iter()
            .cloned()
            .collect(),
        wards: available_wards(record, &state.provinces, &state.districts, &state.wards)
            .into_iter()
            .cloned()
            .collect(),
    }
}

/// Fills a fresh employee draft from extraction output.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the extraction output is not a JSON
/// object, and `ApiError::ResourceNotFound` if it is `null`.
pub fn prefill_from_extraction(
    state: &State,
    request: &PrefillRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
) -> Result<PrefillResponse, ApiError> {
    let fields: ExtractedFields =
        parse_extraction(&request.extraction)?.ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Extraction"),
            message: String::from("No fields could be extracted"),
        })?;
    let draft: Employee = new_employee_draft(ids, today);
    let prefill: Prefill = prefill_employee(&draft, &fields, &state.employees, today);
    Ok(PrefillResponse {
        employee: prefill.employee,
        issues: prefill.issues,
    })
}

/// Fills the recruitment form from extraction output.
///
/// Only non-blank extracted values overwrite what the form already holds.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the extraction output is not a JSON
/// object, and `ApiError::ResourceNotFound` if it is `null`.
pub fn prefill_candidate_form(request: &CandidatePrefillRequest) -> Result<Candidate, ApiError> {
    let fields: ExtractedFields =
        parse_extraction(&request.extraction)?.ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Extraction"),
            message: String::from("No fields could be extracted"),
        })?;
    let form: Candidate = request
        .form
        .clone()
        .unwrap_or_else(|| Candidate::blank(""));
    Ok(prefill_candidate(&form, &fields))
}

/// Saves a candidate and clears the recruitment draft on success.
///
/// # Errors
///
/// Returns an error if name, phone or applied position is missing, or the
/// status change is not allowed.
#[allow(clippy::too_many_arguments)]
pub fn save_candidate(
    state: &State,
    request: SaveCandidateRequest,
    drafts: &mut dyn DraftStore,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    let is_new: bool = request.is_new;
    let edited_id: String = request.candidate.id.clone();
    let mut desk = RecruitmentDesk::new(drafts);
    let transition: TransitionResult = desk
        .save(state, request.candidate, is_new, ids, today, actor, cause)
        .map_err(translate_core_error)?;

    let id: String = if is_new {
        transition
            .new_state
            .candidates
            .last()
            .map(|c| c.id.clone())
            .unwrap_or_default()
    } else {
        edited_id
    };
    let verb: &str = if is_new { "Created" } else { "Updated" };
    let response: MutationResponse = MutationResponse {
        message: format!("{verb} candidate '{id}'"),
        changed: changed_tags(&transition),
        id,
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Moves a candidate along the recruitment pipeline.
///
/// # Errors
///
/// Returns an error if the status is unknown, the candidate does not exist,
/// or the transition is not allowed.
pub fn set_candidate_status(
    state: &State,
    id: &str,
    request: &SetCandidateStatusRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<MutationResponse>, ApiError> {
    let status: RecruitmentStatus = request
        .status
        .trim()
        .parse()
        .map_err(translate_domain_error)?;
    let transition: TransitionResult = apply(
        state,
        Command::SetCandidateStatus {
            id: id.to_string(),
            status,
        },
        ids,
        today,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let response: MutationResponse = MutationResponse {
        id: id.to_string(),
        changed: changed_tags(&transition),
        message: format!("Candidate '{id}' is now {}", status.label()),
    };
    Ok(ApiResult::from_transition(response, transition))
}

/// Hires a passed candidate.
///
/// The new employee and the converted candidate are committed together.
///
/// # Errors
///
/// Returns an error if the candidate does not exist or has not passed, the
/// employee code is blank or taken, or the start date is malformed.
pub fn promote_candidate(
    state: &State,
    candidate_id: &str,
    request: PromoteCandidateRequest,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<ApiResult<PromoteCandidateResponse>, ApiError> {
    let start_date: Option<Date> =
        parse_optional_date(&request.start_date).map_err(|e| ApiError::InvalidInput {
            field: String::from("startDate"),
            message: e.to_string(),
        })?;
    let details: PromotionDetails = PromotionDetails {
        employee_code: request.employee_code,
        salary: request.salary,
        department: request.department,
        position: request.position,
        start_date,
    };

    let transition: TransitionResult = apply(
        state,
        Command::PromoteCandidate {
            candidate_id: candidate_id.to_string(),
            details,
        },
        ids,
        today,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let (employee_id, employee_code): (String, String) = transition
        .new_state
        .employees
        .last()
        .map(|e| (e.id.clone(), e.employee_code.clone()))
        .unwrap_or_default();
    let response: PromoteCandidateResponse = PromoteCandidateResponse {
        candidate_id: candidate_id.to_string(),
        message: format!("Candidate '{candidate_id}' hired as {employee_code}"),
        employee_id,
        employee_code,
    };
    Ok(ApiResult::from_transition(response, transition))
}

fn draft_response(draft: CandidateDraft) -> Result<DraftResponse, ApiError> {
    let saved_at: String = draft
        .saved_at
        .format(&Rfc3339)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to format draft timestamp: {e}"),
        })?;
    Ok(DraftResponse {
        form: draft.form,
        editing_id: draft.editing_id,
        saved_at,
    })
}

/// Saves the recruitment draft, replacing any earlier one.
///
/// # Errors
///
/// Returns `ApiError::Internal` if the timestamp cannot be formatted.
pub fn save_draft(
    drafts: &mut dyn DraftStore,
    request: SaveDraftRequest,
    now: OffsetDateTime,
) -> Result<DraftResponse, ApiError> {
    let mut desk = RecruitmentDesk::new(drafts);
    desk.save_draft(request.form, request.editing_id, now);
    let draft: CandidateDraft = desk.restore_draft().ok_or_else(|| ApiError::Internal {
        message: String::from("Draft was not stored"),
    })?;
    draft_response(draft)
}

/// Returns the saved recruitment draft.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if no draft is saved.
pub fn load_draft(drafts: &mut dyn DraftStore) -> Result<DraftResponse, ApiError> {
    let desk = RecruitmentDesk::new(drafts);
    let draft: CandidateDraft = desk.restore_draft().ok_or_else(|| ApiError::ResourceNotFound {
        resource_type: String::from("Draft"),
        message: String::from("No recruitment draft is saved"),
    })?;
    draft_response(draft)
}

/// Throws the recruitment draft away. Returns true if there was one.
pub fn discard_draft(drafts: &mut dyn DraftStore) -> bool {
    RecruitmentDesk::new(drafts).discard_draft()
}

/// Lists the roster with search, department and status filters.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown status.
pub fn list_employees(state: &State, query: &RosterQuery) -> Result<RosterResponse, ApiError> {
    let filter: RosterFilter = RosterFilter {
        search: filter_value(query.search.as_deref()),
        department: filter_value(query.department.as_deref()),
        status: parse_employee_status(query.status.as_deref())?,
    };
    let employees: Vec<Employee> = filter_roster(&state.employees, &filter)
        .into_iter()
        .cloned()
        .collect();
    let offered: Vec<EmployeeStatus> =
        available_statuses(&state.employees, filter.department.as_deref());
    Ok(RosterResponse {
        total: employees.len(),
        employees,
        status_options: status_options(&offered),
    })
}

/// Lists the dashboard table for the working or resigned tab.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` for an unknown tab or status.
pub fn dashboard(state: &State, query: &DashboardQuery) -> Result<DashboardResponse, ApiError> {
    let tab: DashboardTab = match filter_value(query.tab.as_deref()).as_deref() {
        None | Some("working") => DashboardTab::Working,
        Some("resigned") => DashboardTab::Resigned,
        Some(other) => {
            return Err(ApiError::InvalidInput {
                field: String::from("tab"),
                message: format!("Unknown tab '{other}', expected 'working' or 'resigned'"),
            });
        }
    };
    let filter: DashboardFilter = DashboardFilter {
        tab,
        department: filter_value(query.department.as_deref()),
        position: filter_value(query.position.as_deref()),
        status: parse_employee_status(query.status.as_deref())?,
    };
    let employees: Vec<Employee> = dashboard_list(&state.employees, &filter)
        .into_iter()
        .cloned()
        .collect();
    Ok(DashboardResponse {
        tab: match tab {
            DashboardTab::Working => String::from("working"),
            DashboardTab::Resigned => String::from("resigned"),
        },
        employees,
    })
}

/// Summary figures for the dashboard.
#[must_use]
pub fn summary(state: &State) -> SummaryResponse {
    let totals: RosterSummary = summarize(&state.employees);
    SummaryResponse {
        total: totals.total,
        active: totals.active,
        resigned: totals.resigned,
        total_salary: totals.total_salary,
        by_department: count_by_department(&state.employees)
            .into_iter()
            .map(|group| GroupCountInfo {
                label: group.key.clone(),
                key: group.key,
                count: group.count,
            })
            .collect(),
        by_gender: count_by_gender(&state.employees)
            .into_iter()
            .map(|group| GroupCountInfo {
                key: group.key.as_str().to_string(),
                label: group.key.label().to_string(),
                count: group.count,
            })
            .collect(),
    }
}

/// Option lists in canonical order.
#[must_use]
pub fn options() -> OptionsResponse {
    OptionsResponse {
        employee_statuses: status_options(&EmployeeStatus::ALL),
        genders: Gender::ALL
            .iter()
            .map(|gender| option_info(gender.as_str(), gender.label()))
            .collect(),
        recruitment_statuses: RecruitmentStatus::ALL
            .iter()
            .map(|status| option_info(status.as_str(), status.label()))
            .collect(),
    }
}
