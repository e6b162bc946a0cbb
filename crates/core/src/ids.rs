// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Identifier generation for new records.

use time::OffsetDateTime;

/// Source of fresh record identifiers.
pub trait IdGenerator {
    /// Returns an identifier not returned before by this generator.
    fn next_id(&mut self) -> String;
}

/// Counts up from a starting value. Deterministic; used by tests and seeding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// Creates a generator whose first identifier is `start`.
    #[must_use]
    pub const fn starting_at(start: u64) -> Self {
        Self { next: start }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::starting_at(1)
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> String {
        let id: u64 = self.next;
        self.next += 1;
        id.to_string()
    }
}

/// Millisecond wall-clock identifiers.
///
/// Two requests in the same millisecond still get distinct values: the
/// generator never returns a value lower than or equal to its previous one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TimestampIds {
    last: i128,
}

impl TimestampIds {
    /// Creates a new generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { last: 0 }
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> String {
        let now: i128 = OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000;
        self.last = now.max(self.last + 1);
        self.last.to_string()
    }
}
