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
#![allow(clippy::multiple_crate_versions)]

mod sync;

use axum::{
    Json, Router,
    extract::{FromRef, Path, Query, State as AxumState},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use hrm::{CategoryKind, IdGenerator, InMemoryDraftStore, State, TimestampIds};
use hrm_api::{
    AddressEditRequest, AddressOptionsResponse, ApiError, ApiResult, CandidatePrefillRequest,
    CategoryListResponse,
    DashboardQuery, DashboardResponse, DeleteRequest, DraftResponse, FieldIssue,
    MutationResponse, OptionsResponse, PrefillRequest, PrefillResponse, PromoteCandidateRequest,
    PromoteCandidateResponse, RosterQuery, RosterResponse, SaveCandidateRequest,
    SaveCategoryRequest, SaveDraftRequest, SeedDocument, SetCandidateStatusRequest,
    SummaryResponse, ValidationResponse, address_options, check_record_duplicates, dashboard,
    delete_category, delete_employee, discard_draft, edit_address, export_file_name,
    export_roster, list_categories, list_employees, load_draft, new_employee, options,
    parse_category_kind, prefill_candidate_form, prefill_from_extraction, promote_candidate, sample_state, save_candidate,
    save_category, save_draft, save_employee, set_candidate_status, summary, validate_record,
};
use hrm_audit::{Actor, Cause};
use hrm_domain::{Candidate, Employee};
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use sync::{ChangeBroadcaster, Replicator, SheetReplicator, live_changes_handler};
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// HR record server: employee roster, recruitment pipeline and reference data.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to bind the server to
    #[arg(short, long, env = "HRM_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "HRM_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Spreadsheet endpoint receiving whole-collection updates.
    /// Without it, changes stay local.
    #[arg(long, env = "HRM_SYNC_URL")]
    sync_url: Option<String>,

    /// Timeout for one replication request, in milliseconds
    #[arg(long, env = "HRM_SYNC_TIMEOUT_MS", default_value_t = 10_000)]
    sync_timeout_ms: u64,

    /// JSON seed document. If not provided, built-in sample data is loaded.
    #[arg(short, long, env = "HRM_SEED")]
    seed: Option<String>,

    /// Log level used when `RUST_LOG` is not set
    #[arg(short, long, env = "HRM_LOG", default_value = "info")]
    log_level: String,
}

/// The mutable record set and what goes with it.
struct Records {
    /// Current committed state.
    state: State,
    /// Identifier source for new records.
    ids: Box<dyn IdGenerator + Send>,
    /// Recruitment form drafts.
    drafts: InMemoryDraftStore,
}

/// Application state shared across handlers.
///
/// Records are behind one lock: each request computes and stores its whole
/// transition before the next one starts.
#[derive(Clone)]
struct AppState {
    /// Committed records.
    records: Arc<Mutex<Records>>,
    /// Post-commit fan-out to live subscribers and the sync collaborator.
    broadcaster: Arc<ChangeBroadcaster>,
}

impl FromRef<AppState> for Arc<ChangeBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.broadcaster.clone()
    }
}

impl AppState {
    fn new(state: State, ids: Box<dyn IdGenerator + Send>, broadcaster: ChangeBroadcaster) -> Self {
        Self {
            records: Arc::new(Mutex::new(Records {
                state,
                ids,
                drafts: InMemoryDraftStore::new(),
            })),
            broadcaster: Arc::new(broadcaster),
        }
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
    /// Every rejected field, for validation failures.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    issues: Vec<FieldIssue>,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
    /// Field issues carried over from validation.
    issues: Vec<FieldIssue>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
            issues: self.issues,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = if err.is_conflict() {
            StatusCode::CONFLICT
        } else {
            match &err {
                ApiError::DomainRuleViolation { .. } | ApiError::ValidationFailed { .. } => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
                ApiError::Duplicate { .. } => StatusCode::CONFLICT,
                ApiError::Internal { .. } => {
                    error!(error = %err, "Internal error");
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            }
        };
        let message: String = err.to_string();
        let issues: Vec<FieldIssue> = match err {
            ApiError::ValidationFailed { issues } => issues,
            _ => Vec::new(),
        };
        Self {
            status,
            message,
            issues,
        }
    }
}

/// Actor and cause for a request, taken from optional headers.
fn request_context(headers: &HeaderMap, action: &str) -> (Actor, Cause) {
    let header_value = |name: &str| -> Option<String> {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };
    let actor: Actor = Actor::new(
        header_value("x-actor-id").unwrap_or_else(|| String::from("anonymous")),
        String::from("operator"),
    );
    let cause: Cause = Cause::new(
        header_value("x-request-id").unwrap_or_else(|| String::from("http")),
        format!("HTTP {action}"),
    );
    (actor, cause)
}

fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Stores a successful transition and publishes what changed.
fn commit<T>(app_state: &AppState, records: &mut Records, result: ApiResult<T>) -> T {
    for event in &result.audit_events {
        info!(
            collection = %event.collection,
            action = %event.action.name,
            actor = %event.actor.id,
            before = %event.before.data,
            after = %event.after.data,
            "Committed transition"
        );
    }
    records.state = result.new_state;
    app_state
        .broadcaster
        .publish(&records.state, &result.audit_events);
    result.response
}

/// Handler for GET `/options` endpoint.
async fn handle_options() -> Json<OptionsResponse> {
    Json(options())
}

/// Handler for GET `/categories/{kind}` endpoint.
async fn handle_list_categories(
    AxumState(app_state): AxumState<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<CategoryListResponse>, HttpError> {
    let kind: CategoryKind = parse_category_kind(&kind)?;
    let records = app_state.records.lock().await;
    Ok(Json(list_categories(&records.state, kind)))
}

/// Handler for POST `/categories/{kind}` endpoint.
///
/// Creates an item, or edits one when `editingId` is set.
async fn handle_save_category(
    AxumState(app_state): AxumState<AppState>,
    Path(kind): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SaveCategoryRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    let kind: CategoryKind = parse_category_kind(&kind)?;
    info!(%kind, editing_id = ?req.editing_id, "Handling save_category request");
    let (actor, cause) = request_context(&headers, "save_category");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = save_category(
        &records.state,
        kind,
        req,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for DELETE `/categories/{kind}/{id}` endpoint.
async fn handle_delete_category(
    AxumState(app_state): AxumState<AppState>,
    Path((kind, id)): Path<(String, String)>,
    Query(req): Query<DeleteRequest>,
    headers: HeaderMap,
) -> Result<Json<MutationResponse>, HttpError> {
    let kind: CategoryKind = parse_category_kind(&kind)?;
    info!(%kind, %id, confirmed = req.confirmed, "Handling delete_category request");
    let (actor, cause) = request_context(&headers, "delete_category");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = delete_category(
        &records.state,
        kind,
        &id,
        req,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RosterQuery>,
) -> Result<Json<RosterResponse>, HttpError> {
    let records = app_state.records.lock().await;
    Ok(Json(list_employees(&records.state, &query)?))
}

/// Handler for GET `/employees/new` endpoint.
///
/// Returns an unsaved record with defaults filled in.
async fn handle_new_employee(AxumState(app_state): AxumState<AppState>) -> Json<Employee> {
    let mut records = app_state.records.lock().await;
    Json(new_employee(records.ids.as_mut(), today()))
}

/// Handler for POST `/employees` endpoint.
async fn handle_save_employee(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(employee): Json<Employee>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(id = %employee.id, code = %employee.employee_code, "Handling save_employee request");
    let (actor, cause) = request_context(&headers, "save_employee");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = save_employee(
        &records.state,
        employee,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for DELETE `/employees/{id}` endpoint.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    Query(req): Query<DeleteRequest>,
    headers: HeaderMap,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(%id, confirmed = req.confirmed, "Handling delete_employee request");
    let (actor, cause) = request_context(&headers, "delete_employee");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = delete_employee(
        &records.state,
        &id,
        req,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for POST `/employees/validate` endpoint.
async fn handle_validate_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(employee): Json<Employee>,
) -> Json<ValidationResponse> {
    let records = app_state.records.lock().await;
    Json(validate_record(&records.state, &employee, today()))
}

/// Handler for POST `/employees/duplicates` endpoint.
async fn handle_check_duplicates(
    AxumState(app_state): AxumState<AppState>,
    Json(employee): Json<Employee>,
) -> Json<ValidationResponse> {
    let records = app_state.records.lock().await;
    Json(check_record_duplicates(&records.state, &employee))
}

/// Handler for POST `/employees/address` endpoint.
async fn handle_edit_address(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddressEditRequest>,
) -> Json<Employee> {
    let records = app_state.records.lock().await;
    Json(edit_address(&records.state, req))
}

/// Handler for POST `/employees/address/options` endpoint.
async fn handle_address_options(
    AxumState(app_state): AxumState<AppState>,
    Json(employee): Json<Employee>,
) -> Json<AddressOptionsResponse> {
    let records = app_state.records.lock().await;
    Json(address_options(&records.state, &employee))
}

/// Handler for POST `/employees/prefill` endpoint.
async fn handle_prefill(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PrefillRequest>,
) -> Result<Json<PrefillResponse>, HttpError> {
    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let response: PrefillResponse =
        prefill_from_extraction(&records.state, &req, records.ids.as_mut(), today())?;
    drop(guard);
    info!(issues = response.issues.len(), "Prefilled record from extraction");
    Ok(Json(response))
}

/// Handler for POST `/candidates/prefill` endpoint.
async fn handle_prefill_candidate(
    Json(req): Json<CandidatePrefillRequest>,
) -> Result<Json<Candidate>, HttpError> {
    let candidate: Candidate = prefill_candidate_form(&req)?;
    info!("Prefilled recruitment form from extraction");
    Ok(Json(candidate))
}

/// Handler for GET `/employees/export` endpoint.
///
/// Streams the roster as a spreadsheet-compatible CSV attachment.
async fn handle_export(AxumState(app_state): AxumState<AppState>) -> Result<Response, HttpError> {
    let records = app_state.records.lock().await;
    let body: Vec<u8> = export_roster(&records.state.employees)?;
    let rows: usize = records.state.employees.len();
    drop(records);

    let file_name: String = export_file_name(today());
    info!(rows, %file_name, "Exported roster");
    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        body,
    )
        .into_response())
}

/// Handler for GET `/dashboard` endpoint.
async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, HttpError> {
    let records = app_state.records.lock().await;
    Ok(Json(dashboard(&records.state, &query)?))
}

/// Handler for GET `/summary` endpoint.
async fn handle_summary(AxumState(app_state): AxumState<AppState>) -> Json<SummaryResponse> {
    let records = app_state.records.lock().await;
    Json(summary(&records.state))
}

/// Handler for GET `/candidates` endpoint.
async fn handle_list_candidates(
    AxumState(app_state): AxumState<AppState>,
) -> Json<Vec<Candidate>> {
    let records = app_state.records.lock().await;
    Json(records.state.candidates.clone())
}

/// Handler for POST `/candidates` endpoint.
async fn handle_save_candidate(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<SaveCandidateRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(id = %req.candidate.id, is_new = req.is_new, "Handling save_candidate request");
    let (actor, cause) = request_context(&headers, "save_candidate");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = save_candidate(
        &records.state,
        req,
        &mut records.drafts,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for POST `/candidates/{id}/status` endpoint.
async fn handle_set_candidate_status(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<SetCandidateStatusRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(%id, status = %req.status, "Handling set_candidate_status request");
    let (actor, cause) = request_context(&headers, "set_candidate_status");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<MutationResponse> = set_candidate_status(
        &records.state,
        &id,
        &req,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for POST `/candidates/{id}/promote` endpoint.
async fn handle_promote_candidate(
    AxumState(app_state): AxumState<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    Json(req): Json<PromoteCandidateRequest>,
) -> Result<Json<PromoteCandidateResponse>, HttpError> {
    info!(%id, code = %req.employee_code, "Handling promote_candidate request");
    let (actor, cause) = request_context(&headers, "promote_candidate");

    let mut guard = app_state.records.lock().await;
    let records: &mut Records = &mut guard;
    let result: ApiResult<PromoteCandidateResponse> = promote_candidate(
        &records.state,
        &id,
        req,
        records.ids.as_mut(),
        today(),
        actor,
        cause,
    )?;
    Ok(Json(commit(&app_state, records, result)))
}

/// Handler for GET `/drafts/candidate` endpoint.
async fn handle_load_draft(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DraftResponse>, HttpError> {
    let mut records = app_state.records.lock().await;
    Ok(Json(load_draft(&mut records.drafts)?))
}

/// Handler for PUT `/drafts/candidate` endpoint.
async fn handle_save_draft(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveDraftRequest>,
) -> Result<Json<DraftResponse>, HttpError> {
    let mut records = app_state.records.lock().await;
    let response: DraftResponse =
        save_draft(&mut records.drafts, req, OffsetDateTime::now_utc())?;
    drop(records);
    info!(editing_id = ?response.editing_id, "Saved recruitment draft");
    Ok(Json(response))
}

/// Handler for DELETE `/drafts/candidate` endpoint.
async fn handle_discard_draft(AxumState(app_state): AxumState<AppState>) -> StatusCode {
    let mut records = app_state.records.lock().await;
    if discard_draft(&mut records.drafts) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/options", get(handle_options))
        .route(
            "/categories/{kind}",
            get(handle_list_categories).post(handle_save_category),
        )
        .route(
            "/categories/{kind}/{id}",
            axum::routing::delete(handle_delete_category),
        )
        .route(
            "/employees",
            get(handle_list_employees).post(handle_save_employee),
        )
        .route("/employees/new", get(handle_new_employee))
        .route("/employees/export", get(handle_export))
        .route("/employees/validate", post(handle_validate_employee))
        .route("/employees/duplicates", post(handle_check_duplicates))
        .route("/employees/address", post(handle_edit_address))
        .route("/employees/address/options", post(handle_address_options))
        .route("/employees/prefill", post(handle_prefill))
        .route(
            "/employees/{id}",
            axum::routing::delete(handle_delete_employee),
        )
        .route("/dashboard", get(handle_dashboard))
        .route("/summary", get(handle_summary))
        .route(
            "/candidates",
            get(handle_list_candidates).post(handle_save_candidate),
        )
        .route("/candidates/prefill", post(handle_prefill_candidate))
        .route("/candidates/{id}/status", post(handle_set_candidate_status))
        .route("/candidates/{id}/promote", post(handle_promote_candidate))
        .route(
            "/drafts/candidate",
            get(handle_load_draft)
                .put(handle_save_draft)
                .delete(handle_discard_draft),
        )
        .route("/live", get(live_changes_handler))
        .with_state(app_state)
}

/// Loads the starting state from a seed document, or the built-in sample.
async fn load_initial_state(
    seed: Option<&str>,
    ids: &mut dyn IdGenerator,
) -> Result<State, Box<dyn std::error::Error>> {
    let Some(path) = seed else {
        info!("Using built-in sample data");
        return Ok(sample_state());
    };
    info!("Loading seed document from: {}", path);
    let text: String = tokio::fs::read_to_string(path).await?;
    let state: State = SeedDocument::from_json(&text)?.into_state(ids)?;
    info!(
        employees = state.employees.len(),
        candidates = state.candidates.len(),
        departments = state.departments.len(),
        "Seed loaded"
    );
    Ok(state)
}

fn build_replicator(args: &Args) -> Result<Option<Arc<dyn Replicator>>, sync::SyncTransportError> {
    let Some(url) = args.sync_url.clone() else {
        warn!("No sync URL configured; changes will not be replicated");
        return Ok(None);
    };
    info!(%url, timeout_ms = args.sync_timeout_ms, "Replicating changes");
    let replicator: SheetReplicator =
        SheetReplicator::new(url, Duration::from_millis(args.sync_timeout_ms))?;
    Ok(Some(Arc::new(replicator)))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level)),
        )
        .init();

    info!("Initializing HR record server");

    let mut ids: TimestampIds = TimestampIds::new();
    let state: State = load_initial_state(args.seed.as_deref(), &mut ids).await?;
    let broadcaster: ChangeBroadcaster = ChangeBroadcaster::new(build_replicator(&args)?);
    let app_state: AppState = AppState::new(state, Box::new(ids), broadcaster);

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
