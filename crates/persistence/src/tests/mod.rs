// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod audit_tests;
mod ledger_tests;
mod slot_tests;

use crate::Persistence;
use time::{Date, Month};
use turno_audit::{Actor, Cause};
use turno_domain::{GuardId, InstallationId, RolePattern, RolePatternId, Slot};

pub fn test_actor() -> Actor {
    Actor::new(String::from("op-7"), String::from("operator"))
}

pub fn test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test transition"))
}

pub fn guard(id: &str) -> GuardId {
    GuardId::new(id).unwrap()
}

/// A 5-on/2-off day pattern anchored to August 1, 2025.
///
/// August 1 through 5 are work days; 6 and 7 are rest days, and so on.
pub fn test_pattern() -> RolePattern {
    RolePattern::new(
        5,
        2,
        8,
        String::from("07:00"),
        String::from("15:00"),
        Date::from_calendar_date(2025, Month::August, 1).unwrap(),
    )
    .unwrap()
}

pub fn new_slot(installation: &str) -> Slot {
    Slot::new(
        InstallationId::new(installation).unwrap(),
        RolePatternId(String::from("5x2-day")),
        test_pattern(),
    )
}

/// A planned work day under `test_pattern`.
pub fn work_date() -> Date {
    Date::from_calendar_date(2025, Month::August, 1).unwrap()
}

/// A rest day under `test_pattern`.
pub fn rest_date() -> Date {
    Date::from_calendar_date(2025, Month::August, 6).unwrap()
}

/// Creates a slot with titular G1 and its August 2025 plan. Returns the slot ID.
pub fn setup_staffed_slot(persistence: &mut Persistence) -> i64 {
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;
    persistence.assign_titular(slot_id, &guard("G1")).unwrap();
    persistence.generate_month(slot_id, 2025, 8).unwrap();
    slot_id
}

/// Creates a pending-coverage slot (no titular) with its August 2025 plan.
/// Returns the slot ID.
pub fn setup_pending_slot(persistence: &mut Persistence) -> i64 {
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;
    persistence.generate_month(slot_id, 2025, 8).unwrap();
    slot_id
}
