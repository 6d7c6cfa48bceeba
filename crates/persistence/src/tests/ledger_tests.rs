// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extra-shift ledger tests: payment batching is all-or-none and paid
//! entries are immutable.

use crate::tests::{guard, new_slot, setup_staffed_slot, test_actor, test_cause};
use crate::{ExtraShift, Persistence, PersistenceError};
use time::{Date, Month};
use turno::Command;
use turno_domain::{InstallationId, Slot};

/// Resolves one work day as replaced and returns the created entry's ID.
fn replaced_entry(persistence: &mut Persistence, slot_id: i64, day: u8, cover: &str) -> i64 {
    persistence
        .apply_transition(
            slot_id,
            Date::from_calendar_date(2025, Month::August, day).unwrap(),
            &Command::MarkReplaced {
                covering_guard: guard(cover),
                amount_cents: 4_500,
            },
            test_actor(),
            test_cause(),
            None,
            None,
        )
        .unwrap()
        .extra_shift
        .unwrap()
        .extra_shift_id
}

#[test]
fn test_mark_paid_sets_batch_reference() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    let first: i64 = replaced_entry(&mut persistence, slot_id, 1, "G2");
    let second: i64 = replaced_entry(&mut persistence, slot_id, 2, "G2");

    let updated: usize = persistence
        .mark_extra_shifts_paid("BATCH-2025-08", &[first, second])
        .unwrap();

    assert_eq!(updated, 2);
    assert!(persistence.list_unpaid_extra_shifts(None).unwrap().is_empty());
}

#[test]
fn test_mark_paid_is_all_or_none() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    let entry_id: i64 = replaced_entry(&mut persistence, slot_id, 1, "G2");

    let err: PersistenceError = persistence
        .mark_extra_shifts_paid("BATCH-2025-08", &[entry_id, 999])
        .unwrap_err();

    assert_eq!(err, PersistenceError::ExtraShiftNotFound(999));
    // The valid entry was not paid either.
    assert_eq!(persistence.list_unpaid_extra_shifts(None).unwrap().len(), 1);
}

#[test]
fn test_mark_paid_twice_rejected() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    let entry_id: i64 = replaced_entry(&mut persistence, slot_id, 1, "G2");
    persistence
        .mark_extra_shifts_paid("BATCH-2025-08", &[entry_id])
        .unwrap();

    let err: PersistenceError = persistence
        .mark_extra_shifts_paid("BATCH-2025-09", &[entry_id])
        .unwrap_err();

    assert_eq!(
        err,
        PersistenceError::ExtraShiftAlreadyPaid {
            extra_shift_id: entry_id,
        }
    );
}

#[test]
fn test_list_unpaid_excludes_paid_entries() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_a: i64 = setup_staffed_slot(&mut persistence);
    let slot_b: i64 = {
        let slot: Slot = persistence.create_slot(&new_slot("INST-02")).unwrap();
        let id: i64 = slot.slot_id.unwrap().0;
        persistence.assign_titular(id, &guard("G3")).unwrap();
        persistence.generate_month(id, 2025, 8).unwrap();
        id
    };
    let paid_id: i64 = replaced_entry(&mut persistence, slot_a, 1, "G2");
    let unpaid_id: i64 = replaced_entry(&mut persistence, slot_b, 1, "G4");
    persistence
        .mark_extra_shifts_paid("BATCH-2025-08", &[paid_id])
        .unwrap();

    let unpaid: Vec<ExtraShift> = persistence.list_unpaid_extra_shifts(None).unwrap();

    assert_eq!(unpaid.len(), 1);
    assert_eq!(unpaid[0].extra_shift_id, unpaid_id);
    assert_eq!(unpaid[0].guard, guard("G4"));
}

#[test]
fn test_list_unpaid_filters_by_installation() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_a: i64 = setup_staffed_slot(&mut persistence);
    let slot_b: i64 = {
        let slot: Slot = persistence.create_slot(&new_slot("INST-02")).unwrap();
        let id: i64 = slot.slot_id.unwrap().0;
        persistence.assign_titular(id, &guard("G3")).unwrap();
        persistence.generate_month(id, 2025, 8).unwrap();
        id
    };
    let entry_a: i64 = replaced_entry(&mut persistence, slot_a, 1, "G2");
    replaced_entry(&mut persistence, slot_b, 1, "G4");

    let filter: InstallationId = InstallationId::new("INST-01").unwrap();
    let unpaid: Vec<ExtraShift> = persistence.list_unpaid_extra_shifts(Some(&filter)).unwrap();

    assert_eq!(unpaid.len(), 1);
    assert_eq!(unpaid[0].extra_shift_id, entry_a);
    assert_eq!(unpaid[0].slot_id.0, slot_a);
}
