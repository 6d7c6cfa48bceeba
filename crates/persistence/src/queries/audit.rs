// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail queries.
//!
//! The trail is append-only; these reads reconstruct full events from the
//! stored JSON columns.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use turno_audit::{Action, Actor, AuditEvent, Cause, RecordSnapshot};
use turno_domain::DaySlotRecord;

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use crate::queries::records::get_record;

/// A stored audit event with its assigned ID and append timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEntry {
    /// The event's assigned ID, monotonically increasing.
    pub event_id: i64,
    /// The day-slot record the event belongs to.
    pub record_id: i64,
    /// The reconstructed event.
    pub event: AuditEvent,
    /// When the event was appended, RFC 3339.
    pub created_at: String,
}

type EventRow = (i64, i64, String, String, String, String, String, String);

fn row_to_entry(row: EventRow) -> Result<AuditEntry, PersistenceError> {
    let (event_id, record_id, actor_json, cause_json, action_json, before_json, after_json, created_at) =
        row;
    let actor: Actor = serde_json::from_str(&actor_json)?;
    let cause: Cause = serde_json::from_str(&cause_json)?;
    let action: Action = serde_json::from_str(&action_json)?;
    let before: RecordSnapshot = serde_json::from_str(&before_json)?;
    let after: RecordSnapshot = serde_json::from_str(&after_json)?;
    Ok(AuditEntry {
        event_id,
        record_id,
        event: AuditEvent::new(actor, cause, action, before, after),
        created_at,
    })
}

/// Loads one audit event by ID.
///
/// # Errors
///
/// Returns `EventNotFound` if no event exists with the given ID.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEntry, PersistenceError> {
    let row: EventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .first::<EventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;
    row_to_entry(row)
}

/// Lists the audit events for a (slot, date) record, oldest first.
///
/// # Errors
///
/// Returns `RecordNotFound` if no record exists for the pair, or an error if
/// a stored event cannot be reconstructed.
pub fn record_history(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
) -> Result<Vec<AuditEntry>, PersistenceError> {
    let record: DaySlotRecord = get_record(conn, slot_id, date)?;
    let record_id: i64 = record
        .record_id
        .ok_or_else(|| PersistenceError::ReconstructionError(String::from("record has no ID")))?;

    let rows: Vec<EventRow> = audit_events::table
        .filter(audit_events::record_id.eq(record_id))
        .order(audit_events::event_id.asc())
        .load::<EventRow>(conn)?;
    rows.into_iter().map(row_to_entry).collect()
}
