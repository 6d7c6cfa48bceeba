// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::TransitionContext;
use time::{Date, Month};
use turno_audit::{Actor, Cause};
use turno_domain::{
    DaySlotRecord, GuardId, InstallationId, PlannedStatus, RolePattern, RolePatternId, Slot,
    SlotId,
};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("op-7"), String::from("operator"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Operator request"))
}

pub fn create_test_context() -> TransitionContext {
    TransitionContext::new(String::from("2025-08-01T08:00:00Z"))
}

pub fn guard(id: &str) -> GuardId {
    GuardId::new(id).unwrap()
}

pub fn test_date() -> Date {
    Date::from_calendar_date(2025, Month::August, 1).unwrap()
}

pub fn create_test_pattern() -> RolePattern {
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

/// A slot with titular G1, persisted as slot 101.
pub fn slot_with_titular() -> Slot {
    Slot {
        slot_id: Some(SlotId(101)),
        installation: InstallationId::new("INST-01").unwrap(),
        role_pattern_id: RolePatternId(String::from("5x2-day")),
        pattern: create_test_pattern(),
        titular_guard: Some(guard("G1")),
        pending_coverage: false,
        active: true,
    }
}

/// A pending-coverage slot (no titular), persisted as slot 202.
pub fn pending_coverage_slot() -> Slot {
    Slot {
        slot_id: Some(SlotId(202)),
        installation: InstallationId::new("INST-01").unwrap(),
        role_pattern_id: RolePatternId(String::from("5x2-day")),
        pattern: create_test_pattern(),
        titular_guard: None,
        pending_coverage: true,
        active: true,
    }
}

pub fn planned_record(slot: &Slot) -> DaySlotRecord {
    let mut record: DaySlotRecord = DaySlotRecord::baseline(
        slot.slot_id.unwrap(),
        test_date(),
        PlannedStatus::Planned,
    );
    record.record_id = Some(1);
    record
}

pub fn rest_record(slot: &Slot) -> DaySlotRecord {
    let mut record: DaySlotRecord =
        DaySlotRecord::baseline(slot.slot_id.unwrap(), test_date(), PlannedStatus::Rest);
    record.record_id = Some(2);
    record
}
