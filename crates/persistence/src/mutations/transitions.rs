// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The transactional coverage-transition pipeline.
//!
//! One transition is one transaction: re-read the slot and record, gather
//! competing facts, run the pure state machine, then commit the record
//! update (version-guarded), the declared ledger effect, and the audit
//! event together. Any failure rolls back all three.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::{debug, info};
use turno::{Command, CoreError, LedgerEffect, TransitionContext, TransitionResult};
use turno_audit::{Actor, Cause};
use turno_domain::{DaySlotRecord, GuardId, Slot};

use crate::data_models::{ExtraShift, NewAuditEventRow, date_to_sql, now_iso};
use crate::diesel_schema::day_slot_records;
use crate::error::{PersistenceError, TransitionError};
use crate::mutations::ledger;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// A committed coverage transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedTransition {
    /// The record after the transition.
    pub record: DaySlotRecord,
    /// The ID of the audit event appended for this transition.
    pub event_id: i64,
    /// The extra-shift entry created by this transition, if any.
    pub extra_shift: Option<ExtraShift>,
}

/// The guard a command proposes as the day's cover, if any.
const fn proposed_cover(command: &Command) -> Option<&GuardId> {
    match command {
        Command::MarkReplaced { covering_guard, .. } => Some(covering_guard),
        Command::AssignCoverage { guard, .. } => Some(guard),
        Command::MarkWorked
        | Command::MarkUncovered
        | Command::MarkNoShow
        | Command::UnassignCoverage
        | Command::Undo => None,
    }
}

/// Applies one coverage command to the (slot, date) record.
///
/// Must be called inside a transaction; every fact this pipeline gathers is
/// re-read on this connection so the state machine and the conditional
/// write see the same snapshot.
///
/// # Arguments
///
/// * `conn` - The transaction's connection
/// * `slot_id` - The slot to transition
/// * `date` - The date to transition
/// * `command` - The requested transition
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
/// * `note` - Optional operator note stored in the record's metadata
/// * `expected_version` - If set, the version the caller read; the
///   transition fails with a conflict if the record has moved on
///
/// # Errors
///
/// Returns a core error if the state machine rejects the command (including
/// version conflicts), or a storage error if the database fails.
#[allow(clippy::too_many_arguments)]
pub fn apply_transition(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
    command: &Command,
    actor: Actor,
    cause: Cause,
    note: Option<String>,
    expected_version: Option<i64>,
) -> Result<AppliedTransition, TransitionError> {
    let slot: Slot = queries::slots::get_slot(conn, slot_id)?;
    let record: DaySlotRecord = queries::records::get_record(conn, slot_id, date)?;
    let record_id: i64 = record
        .record_id
        .ok_or_else(|| PersistenceError::ReconstructionError(String::from("record has no ID")))?;

    if let Some(expected) = expected_version {
        if record.version != expected {
            return Err(CoreError::Conflict {
                action: command.name().to_string(),
                reason: format!(
                    "version mismatch: expected {expected}, record is at {}",
                    record.version
                ),
            }
            .into());
        }
    }

    // Gather competing facts on the same snapshot the write will run against.
    let mut context: TransitionContext = TransitionContext::new(now_iso()?);
    context.note = note;
    if let Some(guard) = proposed_cover(command) {
        context.covering_guard_busy =
            queries::records::guard_works_elsewhere(conn, guard, date, slot_id)?;
    }
    context.extra_shift = queries::ledger::entry_state_for(conn, slot_id, date)?;

    let result: TransitionResult = turno::apply(&slot, &record, command, &context, actor, cause)?;

    // Conditional write: the version check makes a lost update impossible
    // even if another writer slipped in after our reads.
    let metadata = result.new_record.transition_metadata.as_ref();
    let updated: usize = diesel::update(
        day_slot_records::table
            .filter(day_slot_records::record_id.eq(record_id))
            .filter(day_slot_records::version.eq(record.version)),
    )
    .set((
        day_slot_records::outcome_status.eq(result.new_record.outcome_status.as_str()),
        day_slot_records::working_guard.eq(result
            .new_record
            .working_guard
            .as_ref()
            .map(|g| g.value().to_string())),
        day_slot_records::transition_actor.eq(metadata.map(|m| m.actor_id.clone())),
        day_slot_records::transition_name.eq(metadata.map(|m| m.transition.clone())),
        day_slot_records::transition_at.eq(metadata.map(|m| m.applied_at.clone())),
        day_slot_records::transition_note.eq(metadata.and_then(|m| m.note.clone())),
        day_slot_records::version.eq(result.new_record.version),
        day_slot_records::updated_at.eq(now_iso()?),
    ))
    .execute(conn)
    .map_err(PersistenceError::from)?;

    if updated != 1 {
        return Err(CoreError::Conflict {
            action: command.name().to_string(),
            reason: String::from("record was modified by another writer"),
        }
        .into());
    }

    let extra_shift: Option<ExtraShift> = match &result.ledger_effect {
        LedgerEffect::None => None,
        LedgerEffect::CreateExtraShift {
            guard,
            amount_cents,
        } => {
            let extra_shift_id: i64 =
                ledger::insert_extra_shift(conn, slot_id, date, guard, *amount_cents)?;
            Some(queries::ledger::get_extra_shift(conn, extra_shift_id)?)
        }
        LedgerEffect::DeleteUnpaidExtraShift => {
            ledger::delete_unpaid_extra_shift(conn, slot_id, date)?;
            None
        }
    };

    let event_id: i64 = persist_audit_event(conn, record_id, &result)?;
    debug!(event_id, "Persisted audit event");

    info!(
        slot_id,
        date = %date_to_sql(date)?,
        command = command.name(),
        version = result.new_record.version,
        event_id,
        "Committed coverage transition"
    );

    Ok(AppliedTransition {
        record: result.new_record,
        event_id,
        extra_shift,
    })
}

/// Appends the transition's audit event and returns its assigned ID.
fn persist_audit_event(
    conn: &mut SqliteConnection,
    record_id: i64,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let event = &result.audit_event;
    let row = NewAuditEventRow {
        record_id,
        actor_json: serde_json::to_string(&event.actor)?,
        cause_json: serde_json::to_string(&event.cause)?,
        action_json: serde_json::to_string(&event.action)?,
        before_json: serde_json::to_string(&event.before)?,
        after_json: serde_json::to_string(&event.after)?,
        created_at: now_iso()?,
    };

    diesel::insert_into(crate::diesel_schema::audit_events::table)
        .values(&row)
        .execute(conn)?;
    get_last_insert_rowid(conn)
}
