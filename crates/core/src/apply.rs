// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::category;
use crate::command::Command;
use crate::error::CoreError;
use crate::ids::IdGenerator;
use crate::state::{State, TransitionResult};
use hrm_audit::{Action, Actor, AuditEvent, Cause, CollectionKind};
use hrm_domain::{
    Candidate, DomainError, Employee, EmployeeField, FieldError, PromotionDetails,
    RecruitmentStatus, ValidationReport, ensure_promotable, is_duplicate_code,
    is_duplicate_identity, promote_candidate, validate_employee,
};
use time::Date;

fn audit_event(
    before: &State,
    after: &State,
    collection: CollectionKind,
    actor: Actor,
    cause: Cause,
    action: Action,
) -> AuditEvent {
    AuditEvent::new(
        actor,
        cause,
        action,
        collection,
        before.to_snapshot(collection),
        after.to_snapshot(collection),
    )
}

fn single(
    before: &State,
    new_state: State,
    collection: CollectionKind,
    actor: Actor,
    cause: Cause,
    action: Action,
) -> TransitionResult {
    let event: AuditEvent = audit_event(before, &new_state, collection, actor, cause, action);
    TransitionResult {
        new_state,
        audit_events: vec![event],
    }
}

/// Applies a command to the current state, producing a new state and its audit events.
///
/// This function is pure: the input state is never modified, and on error
/// no partial state is produced.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `ids` - Source of identifiers for newly created items
/// * `today` - The current date, used by date validation
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - A reference-data rule is violated (`CoreError::Category`)
/// - An employee record fails validation (`CoreError::Validation`)
/// - A candidate is missing required fields (`CoreError::MissingCandidateFields`)
/// - A referenced item does not exist or a lifecycle rule is violated
///   (`CoreError::DomainViolation`)
/// - A delete was not confirmed (`CoreError::DeleteNotConfirmed`)
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    ids: &mut dyn IdGenerator,
    today: Date,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let action_name: String = command.name().to_string();
    match command {
        Command::SaveCategory {
            kind,
            input,
            editing_id,
        } => {
            let new_state: State =
                category::save(state, kind, &input, editing_id.as_deref(), ids)?;
            let details: String = editing_id.map_or_else(
                || format!("Created {kind} '{}'", input.name.trim()),
                |id| format!("Updated {kind} '{id}'"),
            );
            let action: Action = Action::new(action_name, Some(details));
            Ok(single(
                state,
                new_state,
                kind.collection(),
                actor,
                cause,
                action,
            ))
        }
        Command::DeleteCategory {
            kind,
            id,
            confirmed,
        } => {
            let new_state: State = category::delete(state, kind, &id, confirmed)?;
            let action: Action = Action::new(action_name, Some(format!("Deleted {kind} '{id}'")));
            Ok(single(
                state,
                new_state,
                kind.collection(),
                actor,
                cause,
                action,
            ))
        }
        Command::SaveEmployee { employee } => {
            let report: ValidationReport = validate_employee(&employee, &state.employees, today);
            if !report.is_valid() {
                return Err(CoreError::Validation(report));
            }

            let details: String = format!(
                "Saved employee '{}' ({})",
                employee.id, employee.employee_code
            );
            let mut new_state: State = state.clone();
            match new_state.employees.iter_mut().find(|e| e.id == employee.id) {
                Some(existing) => *existing = employee,
                None => new_state.employees.push(employee),
            }

            let action: Action = Action::new(action_name, Some(details));
            Ok(single(
                state,
                new_state,
                CollectionKind::Employees,
                actor,
                cause,
                action,
            ))
        }
        Command::DeleteEmployee { id } => {
            if !state.employees.iter().any(|e| e.id == id) {
                return Err(DomainError::NotFound {
                    kind: "employee",
                    id,
                }
                .into());
            }
            let mut new_state: State = state.clone();
            new_state.employees.retain(|e| e.id != id);

            let action: Action = Action::new(action_name, Some(format!("Deleted employee '{id}'")));
            Ok(single(
                state,
                new_state,
                CollectionKind::Employees,
                actor,
                cause,
                action,
            ))
        }
        Command::SaveCandidate { candidate, is_new } => {
            let new_state: State = save_candidate(state, candidate, is_new, ids)?;
            let action: Action = Action::new(
                action_name,
                Some(String::from(if is_new {
                    "Added candidate"
                } else {
                    "Updated candidate"
                })),
            );
            Ok(single(
                state,
                new_state,
                CollectionKind::Candidates,
                actor,
                cause,
                action,
            ))
        }
        Command::SetCandidateStatus { id, status } => {
            let current: &Candidate = find_candidate(state, &id)?;
            current.status.validate_transition(status)?;

            let mut new_state: State = state.clone();
            for candidate in &mut new_state.candidates {
                if candidate.id == id {
                    candidate.status = status;
                }
            }

            let action: Action = Action::new(
                action_name,
                Some(format!(
                    "Candidate '{id}' moved from {} to {}",
                    current.status.as_str(),
                    status.as_str()
                )),
            );
            Ok(single(
                state,
                new_state,
                CollectionKind::Candidates,
                actor,
                cause,
                action,
            ))
        }
        Command::PromoteCandidate {
            candidate_id,
            details,
        } => {
            let candidate: &Candidate = find_candidate(state, &candidate_id)?;
            ensure_promotable(candidate)?;
            check_promotion(candidate, &details, &state.employees)?;
            let employee: Employee = promote_candidate(candidate, &details, &ids.next_id())?;

            let summary: String = format!(
                "Promoted candidate '{candidate_id}' to employee '{}' ({})",
                employee.id, employee.employee_code
            );

            // Both collections change in the same new state.
            let mut new_state: State = state.clone();
            new_state.employees.push(employee);
            for c in &mut new_state.candidates {
                if c.id == candidate_id {
                    c.status = RecruitmentStatus::Converted;
                }
            }

            let action: Action = Action::new(action_name, Some(summary));
            let audit_events: Vec<AuditEvent> = vec![
                audit_event(
                    state,
                    &new_state,
                    CollectionKind::Employees,
                    actor.clone(),
                    cause.clone(),
                    action.clone(),
                ),
                audit_event(
                    state,
                    &new_state,
                    CollectionKind::Candidates,
                    actor,
                    cause,
                    action,
                ),
            ];
            Ok(TransitionResult {
                new_state,
                audit_events,
            })
        }
    }
}

fn find_candidate<'a>(state: &'a State, id: &str) -> Result<&'a Candidate, CoreError> {
    state
        .candidates
        .iter()
        .find(|c| c.id == id)
        .ok_or_else(|| {
            DomainError::NotFound {
                kind: "candidate",
                id: id.to_string(),
            }
            .into()
        })
}

/// The hired record must not reuse an employee code or identity card.
fn check_promotion(
    candidate: &Candidate,
    details: &PromotionDetails,
    roster: &[Employee],
) -> Result<(), CoreError> {
    let mut report: ValidationReport = ValidationReport::new();
    if details.employee_code.trim().is_empty() {
        report.insert(EmployeeField::EmployeeCode, FieldError::Required);
    } else if is_duplicate_code(&details.employee_code, "", roster) {
        report.insert(EmployeeField::EmployeeCode, FieldError::DuplicateCode);
    }
    if is_duplicate_identity(&candidate.identity_card, "", roster) {
        report.insert(EmployeeField::IdentityCard, FieldError::DuplicateIdentity);
    }
    if report.is_valid() {
        Ok(())
    } else {
        Err(CoreError::Validation(report))
    }
}

/// Names of the candidate form fields that must not be blank.
fn missing_candidate_fields(candidate: &Candidate) -> Vec<&'static str> {
    [
        ("fullName", candidate.full_name.as_str()),
        ("phone", candidate.phone.as_str()),
        ("appliedPosition", candidate.applied_position.as_str()),
    ]
    .into_iter()
    .filter(|(_, value)| value.trim().is_empty())
    .map(|(field, _)| field)
    .collect()
}

fn save_candidate(
    state: &State,
    mut candidate: Candidate,
    is_new: bool,
    ids: &mut dyn IdGenerator,
) -> Result<State, CoreError> {
    let missing: Vec<&'static str> = missing_candidate_fields(&candidate);
    if !missing.is_empty() {
        return Err(CoreError::MissingCandidateFields(missing));
    }

    let mut new_state: State = state.clone();
    if is_new {
        if candidate.status != RecruitmentStatus::Pending {
            return Err(DomainError::InvalidStatusTransition {
                from: String::from("new"),
                to: candidate.status.as_str().to_string(),
                reason: String::from("new candidates start as pending"),
            }
            .into());
        }
        candidate.id = ids.next_id();
        new_state.candidates.push(candidate);
    } else {
        let existing: &Candidate = find_candidate(state, &candidate.id)?;
        if existing.status != candidate.status {
            existing.status.validate_transition(candidate.status)?;
        }
        if let Some(slot) = new_state
            .candidates
            .iter_mut()
            .find(|c| c.id == candidate.id)
        {
            *slot = candidate;
        }
    }
    Ok(new_state)
}
