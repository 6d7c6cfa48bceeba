// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot registry tests: creation defaults, titular assignment rules, and
//! deactivation gating.

use crate::tests::{guard, new_slot, setup_staffed_slot, test_actor, test_cause, work_date};
use crate::{Persistence, PersistenceError};
use turno::Command;
use turno_domain::Slot;

#[test]
fn test_create_slot_starts_pending_and_active() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();

    assert!(slot.slot_id.is_some());
    assert!(slot.pending_coverage);
    assert!(slot.active);
    assert!(slot.titular_guard.is_none());
}

#[test]
fn test_get_unknown_slot_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: PersistenceError = persistence.get_slot(999).unwrap_err();
    assert_eq!(err, PersistenceError::SlotNotFound(999));
}

#[test]
fn test_assign_titular_clears_pending_flag() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;

    let updated: Slot = persistence.assign_titular(slot_id, &guard("G1")).unwrap();

    assert_eq!(updated.titular_guard, Some(guard("G1")));
    assert!(!updated.pending_coverage);
}

#[test]
fn test_assign_same_titular_is_noop() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;
    persistence.assign_titular(slot_id, &guard("G1")).unwrap();

    let updated: Slot = persistence.assign_titular(slot_id, &guard("G1")).unwrap();
    assert_eq!(updated.titular_guard, Some(guard("G1")));
}

#[test]
fn test_assign_titular_over_existing_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;
    persistence.assign_titular(slot_id, &guard("G1")).unwrap();

    let err: PersistenceError = persistence.assign_titular(slot_id, &guard("G2")).unwrap_err();
    assert_eq!(
        err,
        PersistenceError::TitularAlreadyAssigned {
            slot_id,
            titular: String::from("G1"),
        }
    );
}

#[test]
fn test_clear_titular_restores_pending() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;
    persistence.assign_titular(slot_id, &guard("G1")).unwrap();

    let updated: Slot = persistence.clear_titular(slot_id).unwrap();

    assert!(updated.titular_guard.is_none());
    assert!(updated.pending_coverage);
}

#[test]
fn test_deactivate_with_titular_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let err: PersistenceError = persistence.deactivate_slot(slot_id).unwrap_err();
    assert_eq!(err, PersistenceError::SlotHasTitular { slot_id });
}

#[test]
fn test_deactivate_with_unpaid_extra_shift_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    persistence
        .apply_transition(
            slot_id,
            work_date(),
            &Command::MarkReplaced {
                covering_guard: guard("G2"),
                amount_cents: 4_500,
            },
            test_actor(),
            test_cause(),
            None,
            None,
        )
        .unwrap();
    persistence.clear_titular(slot_id).unwrap();

    let err: PersistenceError = persistence.deactivate_slot(slot_id).unwrap_err();
    assert_eq!(err, PersistenceError::UnpaidExtraShifts { slot_id, count: 1 });
}

#[test]
fn test_deactivate_clean_slot() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot: Slot = persistence.create_slot(&new_slot("INST-01")).unwrap();
    let slot_id: i64 = slot.slot_id.unwrap().0;

    let updated: Slot = persistence.deactivate_slot(slot_id).unwrap();
    assert!(!updated.active);
}

#[test]
fn test_list_slots_filters_by_installation() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    persistence.create_slot(&new_slot("INST-01")).unwrap();
    persistence.create_slot(&new_slot("INST-01")).unwrap();
    persistence.create_slot(&new_slot("INST-02")).unwrap();

    let all: Vec<Slot> = persistence.list_slots(None).unwrap();
    assert_eq!(all.len(), 3);

    let filtered: Vec<Slot> = persistence
        .list_slots(Some(&turno_domain::InstallationId::new("INST-01").unwrap()))
        .unwrap();
    assert_eq!(filtered.len(), 2);
}
