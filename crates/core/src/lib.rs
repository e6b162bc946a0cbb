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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod category;
mod command;
mod draft;
mod error;
mod form;
mod ids;
mod recruitment;
mod state;

#[cfg(test)]
mod tests;

use hrm_domain::Employee;
use time::Date;

// Re-export public types and functions
pub use apply::apply;
pub use command::{CategoryInput, CategoryKind, Command};
pub use draft::{CandidateDraft, DraftStore, InMemoryDraftStore, RECRUITMENT_DRAFT_KEY};
pub use error::{CategoryError, CoreError};
pub use form::CategoryForm;
pub use ids::{IdGenerator, SequentialIds, TimestampIds};
pub use recruitment::RecruitmentDesk;
pub use state::{State, TransitionResult};

/// Starts a new employee record with a fresh identifier.
///
/// The employee code is a placeholder derived from the identifier. It is a
/// suggestion only and is checked for uniqueness when the record is saved.
/// This is a read-only operation that does not create audit events.
#[must_use]
pub fn new_employee_draft(ids: &mut dyn IdGenerator, today: Date) -> Employee {
    let id: String = ids.next_id();
    Employee::new_draft(&id, today)
}
