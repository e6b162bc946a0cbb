// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response data transfer objects.

use crate::error::FieldIssue;
use hrm_domain::{AddressLevel, Candidate, Employee, LocationItem};
use serde::{Deserialize, Serialize};

/// API request to create or edit a reference item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaveCategoryRequest {
    /// Display name.
    pub name: String,
    /// Position code; ignored for other kinds.
    pub code: String,
    /// Selected parent id.
    pub parent_id: Option<String>,
    /// The item being edited, or `None` to create.
    pub editing_id: Option<String>,
}

/// API request to delete a reference item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteRequest {
    /// The operator confirmed the delete.
    pub confirmed: bool,
}

/// API request to save a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveCandidateRequest {
    /// The form values.
    pub candidate: Candidate,
    /// True when adding a new candidate.
    #[serde(default)]
    pub is_new: bool,
}

/// API request to move a candidate along the recruitment pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetCandidateStatusRequest {
    /// Machine name or label of the new status.
    pub status: String,
}

/// API request to promote a candidate to employee.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PromoteCandidateRequest {
    /// Employee code for the new record.
    pub employee_code: String,
    /// Basic salary.
    pub salary: u64,
    /// Department name.
    pub department: String,
    /// Position name.
    pub position: String,
    /// Start date (`YYYY-MM-DD`); empty for none.
    pub start_date: String,
}

/// API request to save the recruitment draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDraftRequest {
    /// The form values as typed.
    pub form: Candidate,
    /// The candidate being edited, if any.
    #[serde(default)]
    pub editing_id: Option<String>,
}

/// The saved recruitment draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftResponse {
    /// The form values.
    pub form: Candidate,
    /// The candidate being edited, if any.
    pub editing_id: Option<String>,
    /// When the draft was saved (RFC 3339).
    pub saved_at: String,
}

/// Roster list filters. Blank values mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterQuery {
    pub search: Option<String>,
    pub department: Option<String>,
    pub status: Option<String>,
}

/// Dashboard table filters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardQuery {
    /// `working` (default) or `resigned`.
    pub tab: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub status: Option<String>,
}

/// One edit to the address of a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum AddressChangeRequest {
    Province(String),
    District(String),
    Ward(String),
    Level(AddressLevel),
}

/// API request to apply an address edit to an unsaved record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressEditRequest {
    /// The record as currently entered.
    pub record: Employee,
    /// The edit to apply.
    pub change: AddressChangeRequest,
}

/// Address choices for a record as currently entered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddressOptionsResponse {
    pub provinces: Vec<LocationItem>,
    pub districts: Vec<LocationItem>,
    pub wards: Vec<LocationItem>,
}

/// API request carrying raw extraction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrefillRequest {
    /// The extraction service's JSON answer, as text.
    pub extraction: String,
}

/// API request filling the recruitment form from extraction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidatePrefillRequest {
    /// The extraction service's JSON answer, as text.
    pub extraction: String,
    /// The form as currently entered; a blank form when absent.
    #[serde(default)]
    pub form: Option<Candidate>,
}

/// An employee record filled from extraction output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrefillResponse {
    /// The filled, unsaved record.
    pub employee: Employee,
    /// Fields that would block saving.
    pub issues: Vec<FieldIssue>,
}

/// Result of validating a record without saving it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResponse {
    /// True if the record could be saved as-is.
    pub valid: bool,
    /// Every rejected field.
    pub issues: Vec<FieldIssue>,
}

/// API response for a successful mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MutationResponse {
    /// The id of the affected record.
    pub id: String,
    /// Collections that changed, by sync tag.
    pub changed: Vec<String>,
    /// A success message.
    pub message: String,
}

/// API response for a promotion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoteCandidateResponse {
    /// The promoted candidate.
    pub candidate_id: String,
    /// The new employee record id.
    pub employee_id: String,
    /// The new employee code.
    pub employee_code: String,
    /// A success message.
    pub message: String,
}

/// A selectable value and its label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionInfo {
    pub value: String,
    pub label: String,
}

/// Static option lists for forms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsResponse {
    pub employee_statuses: Vec<OptionInfo>,
    pub genders: Vec<OptionInfo>,
    pub recruitment_statuses: Vec<OptionInfo>,
}

/// The filtered roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    /// Matching employees, in roster order.
    pub employees: Vec<Employee>,
    /// Number of matching employees.
    pub total: usize,
    /// Statuses the status filter offers for the current department.
    pub status_options: Vec<OptionInfo>,
}

/// The dashboard table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardResponse {
    /// The tab shown.
    pub tab: String,
    /// Matching employees, in roster order.
    pub employees: Vec<Employee>,
}

/// A count for one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupCountInfo {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// Dashboard summary figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub total: usize,
    pub active: usize,
    pub resigned: usize,
    pub total_salary: u64,
    /// Working employees per department.
    pub by_department: Vec<GroupCountInfo>,
    /// Working employees per gender.
    pub by_gender: Vec<GroupCountInfo>,
}

/// One reference item as listed on the maintenance screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    /// Position code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Name of the parent, when it resolves.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    /// Indentation level; non-zero only for departments.
    pub depth: usize,
}

/// All items of one reference kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryListResponse {
    pub kind: String,
    pub items: Vec<CategoryRow>,
}
