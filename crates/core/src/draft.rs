// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hrm_domain::Candidate;
use std::collections::HashMap;
use time::OffsetDateTime;

/// Key under which the in-progress recruitment form is kept.
pub const RECRUITMENT_DRAFT_KEY: &str = "hrm_recruitment_draft";

/// A saved, not yet committed, candidate form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDraft {
    /// The form values as typed.
    pub form: Candidate,
    /// The candidate being edited, or `None` for a new candidate.
    pub editing_id: Option<String>,
    /// When the draft was saved.
    pub saved_at: OffsetDateTime,
}

/// Keyed storage for form drafts. Each key holds at most one draft.
pub trait DraftStore {
    /// Returns the draft stored under `key`.
    fn load(&self, key: &str) -> Option<CandidateDraft>;
    /// Stores `draft` under `key`, replacing any previous draft.
    fn store(&mut self, key: &str, draft: CandidateDraft);
    /// Removes the draft under `key`. Returns true if one was present.
    fn remove(&mut self, key: &str) -> bool;
}

/// A `DraftStore` that lives for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDraftStore {
    drafts: HashMap<String, CandidateDraft>,
}

impl InMemoryDraftStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for InMemoryDraftStore {
    fn load(&self, key: &str) -> Option<CandidateDraft> {
        self.drafts.get(key).cloned()
    }

    fn store(&mut self, key: &str, draft: CandidateDraft) {
        self.drafts.insert(key.to_string(), draft);
    }

    fn remove(&mut self, key: &str) -> bool {
        self.drafts.remove(key).is_some()
    }
}
