// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail tests: events append in order and reconstruct with their
//! structured before/after snapshots.

use crate::tests::{guard, setup_staffed_slot, test_actor, test_cause, work_date};
use crate::{AuditEntry, Persistence, PersistenceError};
use turno::Command;
use turno_domain::OutcomeStatus;

#[test]
fn test_history_chains_before_after_snapshots() {
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
    persistence
        .apply_transition(
            slot_id,
            work_date(),
            &Command::Undo,
            test_actor(),
            test_cause(),
            None,
            None,
        )
        .unwrap();

    let history: Vec<AuditEntry> = persistence.record_history(slot_id, work_date()).unwrap();
    assert_eq!(history.len(), 2);

    let replace: &AuditEntry = &history[0];
    assert_eq!(replace.event.action.name, "MarkReplaced");
    assert_eq!(replace.event.before.outcome_status, OutcomeStatus::Unset);
    assert_eq!(replace.event.before.version, 0);
    assert_eq!(replace.event.after.outcome_status, OutcomeStatus::Replaced);
    assert_eq!(replace.event.after.working_guard, Some(guard("G2")));
    assert_eq!(replace.event.after.version, 1);

    let undo: &AuditEntry = &history[1];
    assert_eq!(undo.event.action.name, "Undo");
    assert_eq!(undo.event.before.outcome_status, OutcomeStatus::Replaced);
    assert_eq!(undo.event.after.outcome_status, OutcomeStatus::Unset);
    assert_eq!(undo.event.after.version, 2);

    // Chained: each event's before matches the previous event's after.
    assert_eq!(undo.event.before, replace.event.after);
}

#[test]
fn test_get_audit_event_by_id() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let event_id: i64 = persistence
        .apply_transition(
            slot_id,
            work_date(),
            &Command::MarkWorked,
            test_actor(),
            test_cause(),
            Some(String::from("double checked with site lead")),
            None,
        )
        .unwrap()
        .event_id;

    let entry: AuditEntry = persistence.get_audit_event(event_id).unwrap();

    assert_eq!(entry.event_id, event_id);
    assert_eq!(entry.event.actor.id, "op-7");
    assert_eq!(entry.event.cause.id, "req-1");
    assert_eq!(entry.event.action.name, "MarkWorked");
}

#[test]
fn test_unknown_event_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: PersistenceError = persistence.get_audit_event(12345).unwrap_err();
    assert_eq!(err, PersistenceError::EventNotFound(12345));
}
