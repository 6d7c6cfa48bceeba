// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::state::{LedgerEffect, LedgerEntryState, TransitionContext, TransitionResult};
use turno_audit::{Action, Actor, AuditEvent, Cause, RecordSnapshot};
use turno_domain::{DaySlotRecord, GuardId, OutcomeStatus, PlannedStatus, Slot, TransitionMetadata};

fn snapshot_of(record: &DaySlotRecord) -> RecordSnapshot {
    RecordSnapshot::new(
        record.planned_status,
        record.outcome_status,
        record.working_guard.clone(),
        record.version,
    )
}

fn invalid(command: &Command, reason: impl Into<String>) -> CoreError {
    CoreError::InvalidTransition {
        action: command.name().to_string(),
        reason: reason.into(),
    }
}

fn conflict(command: &Command, reason: impl Into<String>) -> CoreError {
    CoreError::Conflict {
        action: command.name().to_string(),
        reason: reason.into(),
    }
}

/// Checks the preconditions shared by every resolving transition (everything
/// except `UnassignCoverage` and `Undo`).
///
/// Order matters: the rest-day rule is checked before anything else because
/// it is the invariant this subsystem exists to protect, and a rest-day
/// request must be reported as such even when the record is also resolved.
fn check_resolving_preconditions(
    command: &Command,
    record: &DaySlotRecord,
) -> Result<(), CoreError> {
    if record.planned_status == PlannedStatus::Rest {
        if command.assigns_working_guard() {
            return Err(invalid(
                command,
                "day is a rest day; rest days must never receive a working guard",
            ));
        }
        return Err(invalid(command, "day is a rest day"));
    }
    if record.outcome_status.is_resolved() {
        return Err(conflict(
            command,
            format!(
                "day already resolved as '{}'; undo first",
                record.outcome_status
            ),
        ));
    }
    Ok(())
}

/// Applies a coverage command to a day-slot record, producing the new record,
/// the ledger side effect, and the audit event.
///
/// This is a pure function: it reads the slot, the record, and the context,
/// and declares effects without touching storage. The persistence layer is
/// responsible for calling it inside the transaction that gathered `context`
/// and for executing all declared effects atomically.
///
/// # Arguments
///
/// * `slot` - The slot the record belongs to
/// * `record` - The current day-slot record (as re-read inside the transaction)
/// * `command` - The requested transition
/// * `context` - Competing facts gathered inside the same transaction
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(TransitionResult)` with the new record (version incremented), the
///   ledger effect, and the audit event
/// * `Err(CoreError)` if any precondition is violated; no partial effect
///
/// # Errors
///
/// Returns an error if:
/// - The slot is deactivated (`InvalidTransition`)
/// - The day is a rest day and the command would resolve it (`InvalidTransition`)
/// - The record is already resolved (`Conflict`; undo first)
/// - A command-specific precondition fails (see [`Command`])
#[allow(clippy::too_many_lines)]
pub fn apply(
    slot: &Slot,
    record: &DaySlotRecord,
    command: &Command,
    context: &TransitionContext,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    if !slot.active {
        return Err(invalid(command, "slot is deactivated"));
    }

    let before: RecordSnapshot = snapshot_of(record);

    let (new_outcome, new_working_guard, ledger_effect): (
        OutcomeStatus,
        Option<GuardId>,
        LedgerEffect,
    ) = match command {
        Command::MarkWorked => {
            check_resolving_preconditions(command, record)?;
            let Some(titular) = slot.titular_guard.as_ref() else {
                return Err(invalid(
                    command,
                    "slot has no titular guard; assign coverage instead",
                ));
            };
            (
                OutcomeStatus::Worked,
                Some(titular.clone()),
                LedgerEffect::None,
            )
        }
        Command::MarkReplaced {
            covering_guard,
            amount_cents,
        } => {
            check_resolving_preconditions(command, record)?;
            let Some(titular) = slot.titular_guard.as_ref() else {
                return Err(invalid(
                    command,
                    "slot has no titular guard to replace; assign coverage instead",
                ));
            };
            if covering_guard == titular {
                return Err(invalid(
                    command,
                    "covering guard is the titular; mark the day worked instead",
                ));
            }
            if context.covering_guard_busy {
                return Err(conflict(
                    command,
                    format!("guard '{covering_guard}' is already working another slot that date"),
                ));
            }
            (
                OutcomeStatus::Replaced,
                Some(covering_guard.clone()),
                LedgerEffect::CreateExtraShift {
                    guard: covering_guard.clone(),
                    amount_cents: *amount_cents,
                },
            )
        }
        Command::MarkUncovered => {
            check_resolving_preconditions(command, record)?;
            (OutcomeStatus::Uncovered, None, LedgerEffect::None)
        }
        Command::MarkNoShow => {
            check_resolving_preconditions(command, record)?;
            if !slot.has_titular() {
                return Err(invalid(
                    command,
                    "slot has no titular guard; a no-show requires one",
                ));
            }
            (OutcomeStatus::NoShow, None, LedgerEffect::None)
        }
        Command::AssignCoverage {
            guard,
            amount_cents,
        } => {
            check_resolving_preconditions(command, record)?;
            if !slot.pending_coverage {
                return Err(invalid(
                    command,
                    "slot has a titular guard; mark a replacement instead",
                ));
            }
            if context.covering_guard_busy {
                return Err(conflict(
                    command,
                    format!("guard '{guard}' is already working another slot that date"),
                ));
            }
            (
                OutcomeStatus::Replaced,
                Some(guard.clone()),
                LedgerEffect::CreateExtraShift {
                    guard: guard.clone(),
                    amount_cents: *amount_cents,
                },
            )
        }
        Command::UnassignCoverage => {
            let Some(entry) = context.extra_shift.as_ref() else {
                return Err(CoreError::NotFound {
                    what: format!(
                        "extra shift for slot {} on {}",
                        record.slot_id, record.date
                    ),
                });
            };
            check_ledger_unpaid(command, entry)?;
            (OutcomeStatus::Unset, None, LedgerEffect::DeleteUnpaidExtraShift)
        }
        Command::Undo => {
            if !record.outcome_status.is_resolved() {
                return Err(invalid(command, "nothing to undo; day is at its baseline"));
            }
            let effect: LedgerEffect = match context.extra_shift.as_ref() {
                Some(entry) => {
                    check_ledger_unpaid(command, entry)?;
                    LedgerEffect::DeleteUnpaidExtraShift
                }
                None => LedgerEffect::None,
            };
            (OutcomeStatus::Unset, None, effect)
        }
    };

    // Revert transitions clear the metadata: the record returns to its
    // generated baseline and the audit trail carries the history.
    let new_metadata: Option<TransitionMetadata> = if new_outcome == OutcomeStatus::Unset {
        None
    } else {
        Some(TransitionMetadata {
            actor_id: actor.id.clone(),
            transition: command.name().to_string(),
            applied_at: context.applied_at.clone(),
            note: context.note.clone(),
        })
    };

    let new_record: DaySlotRecord = DaySlotRecord {
        record_id: record.record_id,
        slot_id: record.slot_id,
        date: record.date,
        planned_status: record.planned_status,
        outcome_status: new_outcome,
        working_guard: new_working_guard,
        transition_metadata: new_metadata,
        version: record.version + 1,
    };

    let after: RecordSnapshot = snapshot_of(&new_record);

    let action: Action = Action::new(
        command.name().to_string(),
        Some(format!(
            "slot {} on {}: '{}' -> '{}'",
            record.slot_id, record.date, record.outcome_status, new_record.outcome_status
        )),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionResult {
        new_record,
        ledger_effect,
        audit_event,
    })
}

/// Rejects transitions that would delete a paid ledger entry.
///
/// Once an extra shift is grouped into a payment batch it is immutable; the
/// coverage it paid for can no longer be unassigned or undone.
fn check_ledger_unpaid(command: &Command, entry: &LedgerEntryState) -> Result<(), CoreError> {
    if entry.paid {
        return Err(conflict(
            command,
            format!("extra shift for guard '{}' is already paid", entry.guard),
        ));
    }
    Ok(())
}
