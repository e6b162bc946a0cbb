// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use hrm::{SequentialIds, State};
use hrm_audit::{Actor, Cause};
use time::Date;
use time::macros::date;

use crate::sample_state;

pub const fn test_today() -> Date {
    date!(2026 - 10 - 18)
}

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("hr-01"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn create_test_ids() -> SequentialIds {
    SequentialIds::starting_at(1000)
}

pub fn create_test_state() -> State {
    sample_state()
}
