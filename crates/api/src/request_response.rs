// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the API boundary.
//!
//! These are the wire shapes. Domain types never cross this boundary
//! directly; handlers translate in both directions.

use serde::{Deserialize, Serialize};
use turno_domain::{DaySlotRecord, Slot};
use turno_persistence::{AuditEntry, DailyViewRow, ExtraShift};

/// A slot as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInfo {
    /// The slot's assigned ID.
    pub slot_id: i64,
    /// The installation the slot belongs to.
    pub installation_id: String,
    /// Master-data reference for the role pattern.
    pub role_pattern_id: String,
    /// Consecutive work days per cycle.
    pub work_days: u8,
    /// Consecutive rest days per cycle.
    pub rest_days: u8,
    /// Shift length in hours.
    pub shift_hours: u8,
    /// Daily shift start, `HH:MM`.
    pub shift_start: String,
    /// Daily shift end, `HH:MM`.
    pub shift_end: String,
    /// First work day of a cycle, ISO 8601.
    pub pattern_anchor: String,
    /// The titular guard, if assigned.
    pub titular_guard: Option<String>,
    /// Whether the slot is a pending-coverage post.
    pub pending_coverage: bool,
    /// Whether the slot is active.
    pub active: bool,
}

impl SlotInfo {
    pub(crate) fn from_slot(slot: &Slot) -> Self {
        Self {
            slot_id: slot.slot_id.map_or(0, |id| id.0),
            installation_id: slot.installation.value().to_string(),
            role_pattern_id: slot.role_pattern_id.0.clone(),
            work_days: slot.pattern.work_days,
            rest_days: slot.pattern.rest_days,
            shift_hours: slot.pattern.shift_hours,
            shift_start: slot.pattern.shift_start.clone(),
            shift_end: slot.pattern.shift_end.clone(),
            pattern_anchor: slot.pattern.anchor.to_string(),
            titular_guard: slot.titular_guard.as_ref().map(|g| g.value().to_string()),
            pending_coverage: slot.pending_coverage,
            active: slot.active,
        }
    }
}

/// Request to register a new slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSlotRequest {
    /// The installation the slot belongs to.
    pub installation_id: String,
    /// Master-data reference for the role pattern.
    pub role_pattern_id: String,
    /// Consecutive work days per cycle.
    pub work_days: u8,
    /// Consecutive rest days per cycle.
    pub rest_days: u8,
    /// Shift length in hours.
    pub shift_hours: u8,
    /// Daily shift start, `HH:MM`.
    pub shift_start: String,
    /// Daily shift end, `HH:MM`.
    pub shift_end: String,
    /// First work day of a cycle, ISO 8601 (`YYYY-MM-DD`).
    pub pattern_anchor: String,
}

/// Response listing slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSlotsResponse {
    /// The slots, in creation order.
    pub slots: Vec<SlotInfo>,
}

/// Request to assign a titular guard to a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTitularRequest {
    /// The guard to assign.
    pub guard_id: String,
}

/// Transition metadata as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionMetadataInfo {
    /// Who applied the last transition.
    pub actor_id: String,
    /// The transition applied.
    pub transition: String,
    /// When it was applied, ISO 8601.
    pub applied_at: String,
    /// Optional operator note.
    pub note: Option<String>,
}

/// A day-slot record as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecordInfo {
    /// The slot the record belongs to.
    pub slot_id: i64,
    /// The date, ISO 8601.
    pub date: String,
    /// Baseline from the monthly plan.
    pub planned_status: String,
    /// What actually happened so far.
    pub outcome_status: String,
    /// The guard working the day, if any.
    pub working_guard: Option<String>,
    /// Metadata for the last applied transition, if any.
    pub transition: Option<TransitionMetadataInfo>,
    /// The record's optimistic concurrency version.
    pub version: i64,
}

impl DayRecordInfo {
    pub(crate) fn from_record(record: &DaySlotRecord) -> Self {
        Self {
            slot_id: record.slot_id.0,
            date: record.date.to_string(),
            planned_status: record.planned_status.to_string(),
            outcome_status: record.outcome_status.to_string(),
            working_guard: record.working_guard.as_ref().map(|g| g.value().to_string()),
            transition: record
                .transition_metadata
                .as_ref()
                .map(|m| TransitionMetadataInfo {
                    actor_id: m.actor_id.clone(),
                    transition: m.transition.clone(),
                    applied_at: m.applied_at.clone(),
                    note: m.note.clone(),
                }),
            version: record.version,
        }
    }
}

/// Request to generate (or complete) a slot's monthly plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateMonthRequest {
    /// The slot to plan.
    pub slot_id: i64,
    /// The calendar year.
    pub year: i32,
    /// The calendar month (1-12).
    pub month: u8,
}

/// Response with a slot's full month of records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateMonthResponse {
    /// The slot that was planned.
    pub slot_id: i64,
    /// The calendar year.
    pub year: i32,
    /// The calendar month.
    pub month: u8,
    /// The month's records in date order.
    pub days: Vec<DayRecordInfo>,
}

/// Request to apply a coverage transition to a (slot, date).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageTransitionRequest {
    /// The slot to transition.
    pub slot_id: i64,
    /// The date to transition, ISO 8601 (`YYYY-MM-DD`).
    pub date: String,
    /// The transition to apply: `mark_worked`, `mark_replaced`,
    /// `mark_uncovered`, `mark_no_show`, `assign_coverage`,
    /// `unassign_coverage`, or `undo`.
    pub action: String,
    /// The covering guard, required by `mark_replaced` and `assign_coverage`.
    pub covering_guard: Option<String>,
    /// The payable amount in cents, required by `mark_replaced` and
    /// `assign_coverage`.
    pub amount_cents: Option<i64>,
    /// Optional operator note stored in the record's metadata.
    pub note: Option<String>,
    /// If set, the transition fails with a conflict unless the record is
    /// still at this version.
    pub expected_version: Option<i64>,
    /// Caller's request identifier, carried into the audit trail.
    pub request_id: Option<String>,
}

/// An extra-shift ledger entry as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraShiftInfo {
    /// Generated identifier.
    pub extra_shift_id: i64,
    /// The slot the covered day belongs to.
    pub slot_id: i64,
    /// The covered date, ISO 8601.
    pub date: String,
    /// The covering guard the entry pays.
    pub guard: String,
    /// The payable amount in cents.
    pub amount_cents: i64,
    /// Whether the entry has been paid.
    pub paid: bool,
    /// The payment batch reference, if paid.
    pub payment_batch: Option<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

impl ExtraShiftInfo {
    pub(crate) fn from_extra_shift(entry: &ExtraShift) -> Self {
        Self {
            extra_shift_id: entry.extra_shift_id,
            slot_id: entry.slot_id.0,
            date: entry.date.to_string(),
            guard: entry.guard.value().to_string(),
            amount_cents: entry.amount_cents,
            paid: entry.paid,
            payment_batch: entry.payment_batch.clone(),
            created_at: entry.created_at.clone(),
        }
    }
}

/// Response to a committed coverage transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageTransitionResponse {
    /// The record after the transition.
    pub record: DayRecordInfo,
    /// The ID of the audit event appended for this transition.
    pub event_id: i64,
    /// The extra-shift entry created by this transition, if any.
    pub extra_shift: Option<ExtraShiftInfo>,
}

/// One row of the derived daily coverage view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViewEntry {
    /// The slot.
    pub slot_id: i64,
    /// The installation the slot belongs to.
    pub installation_id: String,
    /// Baseline from the monthly plan.
    pub planned_status: String,
    /// What actually happened so far.
    pub outcome_status: String,
    /// The guard working the day, if any.
    pub working_guard: Option<String>,
    /// The slot's titular guard, if any.
    pub titular_guard: Option<String>,
    /// Whether the slot is a pending-coverage post.
    pub pending_coverage: bool,
    /// The record's version, for optimistic transition requests.
    pub version: i64,
}

impl DailyViewEntry {
    pub(crate) fn from_row(row: &DailyViewRow) -> Self {
        Self {
            slot_id: row.slot_id.0,
            installation_id: row.installation.value().to_string(),
            planned_status: row.planned_status.to_string(),
            outcome_status: row.outcome_status.to_string(),
            working_guard: row.working_guard.as_ref().map(|g| g.value().to_string()),
            titular_guard: row.titular_guard.as_ref().map(|g| g.value().to_string()),
            pending_coverage: row.pending_coverage,
            version: row.version,
        }
    }
}

/// Response with the daily coverage view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyViewResponse {
    /// The date the view covers, ISO 8601.
    pub date: String,
    /// The view rows, ordered by installation then slot.
    pub rows: Vec<DailyViewEntry>,
}

/// Response listing unpaid extra shifts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnpaidExtraShiftsResponse {
    /// Unpaid entries, oldest first.
    pub extra_shifts: Vec<ExtraShiftInfo>,
}

/// Request to mark a batch of extra shifts paid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkPaidRequest {
    /// The payment batch reference.
    pub payment_batch: String,
    /// The entries to pay. All-or-none.
    pub extra_shift_ids: Vec<i64>,
}

/// Response to a payment batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkPaidResponse {
    /// The payment batch reference.
    pub payment_batch: String,
    /// How many entries were marked paid.
    pub paid_count: usize,
}

/// A record snapshot as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// Baseline from the monthly plan.
    pub planned_status: String,
    /// The resolved outcome at snapshot time.
    pub outcome_status: String,
    /// The guard working the day at snapshot time, if any.
    pub working_guard: Option<String>,
    /// The record version at snapshot time.
    pub version: i64,
}

/// An audit event as presented over the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    /// The event's assigned ID.
    pub event_id: i64,
    /// Who performed the action.
    pub actor_id: String,
    /// The actor's type.
    pub actor_type: String,
    /// The caller's request identifier.
    pub cause_id: String,
    /// Why the action was performed.
    pub cause_description: String,
    /// The action name.
    pub action: String,
    /// Additional action details.
    pub details: Option<String>,
    /// The record before the action.
    pub before: SnapshotInfo,
    /// The record after the action.
    pub after: SnapshotInfo,
    /// When the event was appended, RFC 3339.
    pub created_at: String,
}

impl AuditEventInfo {
    pub(crate) fn from_entry(entry: &AuditEntry) -> Self {
        let snapshot = |s: &turno_audit::RecordSnapshot| SnapshotInfo {
            planned_status: s.planned_status.to_string(),
            outcome_status: s.outcome_status.to_string(),
            working_guard: s.working_guard.as_ref().map(|g| g.value().to_string()),
            version: s.version,
        };
        Self {
            event_id: entry.event_id,
            actor_id: entry.event.actor.id.clone(),
            actor_type: entry.event.actor.actor_type.clone(),
            cause_id: entry.event.cause.id.clone(),
            cause_description: entry.event.cause.description.clone(),
            action: entry.event.action.name.clone(),
            details: entry.event.action.details.clone(),
            before: snapshot(&entry.event.before),
            after: snapshot(&entry.event.after),
            created_at: entry.created_at.clone(),
        }
    }
}

/// Response with a record's full audit history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHistoryResponse {
    /// The slot the record belongs to.
    pub slot_id: i64,
    /// The date, ISO 8601.
    pub date: String,
    /// The record's events, oldest first.
    pub events: Vec<AuditEventInfo>,
}
