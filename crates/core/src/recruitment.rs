// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::apply::apply;
use crate::command::Command;
use crate::draft::{CandidateDraft, DraftStore, RECRUITMENT_DRAFT_KEY};
use crate::error::CoreError;
use crate::ids::IdGenerator;
use crate::state::{State, TransitionResult};
use hrm_audit::{Actor, Cause};
use hrm_domain::Candidate;
use time::{Date, OffsetDateTime};

/// The recruitment form flow: draft handling plus candidate saves.
///
/// The draft store is owned by the caller and lent to the desk, so the
/// same store can back several flows or be swapped out in tests.
pub struct RecruitmentDesk<'a, S: DraftStore + ?Sized> {
    drafts: &'a mut S,
}

impl<'a, S: DraftStore + ?Sized> RecruitmentDesk<'a, S> {
    /// Creates a desk over the given draft store.
    pub const fn new(drafts: &'a mut S) -> Self {
        Self { drafts }
    }

    /// Returns true if a draft is waiting to be restored.
    #[must_use]
    pub fn has_draft(&self) -> bool {
        self.drafts.load(RECRUITMENT_DRAFT_KEY).is_some()
    }

    /// Saves the current form, replacing any earlier draft.
    pub fn save_draft(
        &mut self,
        form: Candidate,
        editing_id: Option<String>,
        saved_at: OffsetDateTime,
    ) {
        self.drafts.store(
            RECRUITMENT_DRAFT_KEY,
            CandidateDraft {
                form,
                editing_id,
                saved_at,
            },
        );
    }

    /// Returns the saved draft without removing it.
    #[must_use]
    pub fn restore_draft(&self) -> Option<CandidateDraft> {
        self.drafts.load(RECRUITMENT_DRAFT_KEY)
    }

    /// Throws the saved draft away. Returns true if there was one.
    pub fn discard_draft(&mut self) -> bool {
        self.drafts.remove(RECRUITMENT_DRAFT_KEY)
    }

    /// Saves a candidate and, on success, clears the pending draft.
    ///
    /// # Errors
    ///
    /// Returns the error from [`apply`]; the draft is kept in that case.
    #[allow(clippy::too_many_arguments)]
    pub fn save(
        &mut self,
        state: &State,
        candidate: Candidate,
        is_new: bool,
        ids: &mut dyn IdGenerator,
        today: Date,
        actor: Actor,
        cause: Cause,
    ) -> Result<TransitionResult, CoreError> {
        let result: TransitionResult = apply(
            state,
            Command::SaveCandidate { candidate, is_new },
            ids,
            today,
            actor,
            cause,
        )?;
        self.drafts.remove(RECRUITMENT_DRAFT_KEY);
        Ok(result)
    }
}
