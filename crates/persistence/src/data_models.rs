// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row models and their conversions back into domain types.
//!
//! Legacy status spellings in migrated data are normalized here, at the
//! data-access boundary, via `OutcomeStatus::parse`. Transition logic only
//! ever sees the closed enums.

use crate::error::PersistenceError;
use diesel::prelude::*;
use std::str::FromStr;
use time::Date;
use time::format_description::BorrowedFormatItem;
use turno_domain::{
    DaySlotRecord, GuardId, InstallationId, OutcomeStatus, PlannedStatus, RolePattern,
    RolePatternId, Slot, SlotId, TransitionMetadata,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");

/// Formats a civil date for storage (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if formatting fails.
pub(crate) fn date_to_sql(date: Date) -> Result<String, PersistenceError> {
    date.format(&DATE_FORMAT)
        .map_err(|e| PersistenceError::SerializationError(format!("date format: {e}")))
}

/// Parses a stored civil date (`YYYY-MM-DD`).
///
/// # Errors
///
/// Returns an error if the stored value is not a valid date.
pub(crate) fn date_from_sql(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, &DATE_FORMAT).map_err(|e| {
        PersistenceError::ReconstructionError(format!("invalid stored date '{value}': {e}"))
    })
}

/// Current UTC timestamp, RFC 3339.
///
/// # Errors
///
/// Returns an error if formatting fails.
pub(crate) fn now_iso() -> Result<String, PersistenceError> {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(format!("timestamp format: {e}")))
}

/// New `slots` row for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::slots)]
pub(crate) struct NewSlotRow {
    pub installation_id: String,
    pub role_pattern_id: String,
    pub work_days: i32,
    pub rest_days: i32,
    pub shift_hours: i32,
    pub shift_start: String,
    pub shift_end: String,
    pub pattern_anchor: String,
    pub titular_guard: Option<String>,
    pub pending_coverage: i32,
    pub active: i32,
}

/// New `day_slot_records` row for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::day_slot_records)]
pub(crate) struct NewDayRecordRow {
    pub slot_id: i64,
    pub date: String,
    pub planned_status: String,
    pub outcome_status: String,
    pub working_guard: Option<String>,
    pub transition_actor: Option<String>,
    pub transition_name: Option<String>,
    pub transition_at: Option<String>,
    pub transition_note: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

/// New `extra_shifts` row for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::extra_shifts)]
pub(crate) struct NewExtraShiftRow {
    pub slot_id: i64,
    pub date: String,
    pub guard: String,
    pub amount_cents: i64,
    pub paid: i32,
    pub payment_batch: Option<String>,
    pub created_at: String,
}

/// New `audit_events` row for insertion.
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::diesel_schema::audit_events)]
pub(crate) struct NewAuditEventRow {
    pub record_id: i64,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_json: String,
    pub after_json: String,
    pub created_at: String,
}

/// Raw `slots` row.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct SlotRow {
    pub slot_id: i64,
    pub installation_id: String,
    pub role_pattern_id: String,
    pub work_days: i32,
    pub rest_days: i32,
    pub shift_hours: i32,
    pub shift_start: String,
    pub shift_end: String,
    pub pattern_anchor: String,
    pub titular_guard: Option<String>,
    pub pending_coverage: i32,
    pub active: i32,
}

impl SlotRow {
    /// Converts the row into a domain `Slot`.
    ///
    /// # Errors
    ///
    /// Returns a reconstruction error if any stored field is invalid.
    pub(crate) fn into_domain(self) -> Result<Slot, PersistenceError> {
        let installation: InstallationId = InstallationId::new(&self.installation_id)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let anchor: Date = date_from_sql(&self.pattern_anchor)?;
        let pattern: RolePattern = RolePattern::new(
            u8::try_from(self.work_days).map_err(|_| {
                PersistenceError::ReconstructionError(format!(
                    "stored work_days out of range: {}",
                    self.work_days
                ))
            })?,
            u8::try_from(self.rest_days).map_err(|_| {
                PersistenceError::ReconstructionError(format!(
                    "stored rest_days out of range: {}",
                    self.rest_days
                ))
            })?,
            u8::try_from(self.shift_hours).map_err(|_| {
                PersistenceError::ReconstructionError(format!(
                    "stored shift_hours out of range: {}",
                    self.shift_hours
                ))
            })?,
            self.shift_start,
            self.shift_end,
            anchor,
        )
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        let titular_guard: Option<GuardId> = self
            .titular_guard
            .as_deref()
            .map(GuardId::new)
            .transpose()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        Ok(Slot {
            slot_id: Some(SlotId(self.slot_id)),
            installation,
            role_pattern_id: RolePatternId(self.role_pattern_id),
            pattern,
            titular_guard,
            pending_coverage: self.pending_coverage != 0,
            active: self.active != 0,
        })
    }
}

/// Raw `day_slot_records` row.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct DayRecordRow {
    pub record_id: i64,
    pub slot_id: i64,
    pub date: String,
    pub planned_status: String,
    pub outcome_status: String,
    pub working_guard: Option<String>,
    pub transition_actor: Option<String>,
    pub transition_name: Option<String>,
    pub transition_at: Option<String>,
    pub transition_note: Option<String>,
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl DayRecordRow {
    /// Converts the row into a domain `DaySlotRecord`, normalizing any legacy
    /// outcome spelling to the closed enum.
    ///
    /// # Errors
    ///
    /// Returns a reconstruction error if any stored field is invalid.
    pub(crate) fn into_domain(self) -> Result<DaySlotRecord, PersistenceError> {
        let date: Date = date_from_sql(&self.date)?;
        let planned_status: PlannedStatus = PlannedStatus::from_str(&self.planned_status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let outcome_status: OutcomeStatus = OutcomeStatus::parse(&self.outcome_status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let working_guard: Option<GuardId> = self
            .working_guard
            .as_deref()
            .map(GuardId::new)
            .transpose()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;

        let transition_metadata: Option<TransitionMetadata> =
            match (self.transition_actor, self.transition_name, self.transition_at) {
                (Some(actor_id), Some(transition), Some(applied_at)) => Some(TransitionMetadata {
                    actor_id,
                    transition,
                    applied_at,
                    note: self.transition_note,
                }),
                _ => None,
            };

        Ok(DaySlotRecord {
            record_id: Some(self.record_id),
            slot_id: SlotId(self.slot_id),
            date,
            planned_status,
            outcome_status,
            working_guard,
            transition_metadata,
            version: self.version,
        })
    }
}

/// A payable extra-shift ledger entry as stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraShift {
    /// Generated identifier.
    pub extra_shift_id: i64,
    /// The slot the covered day belongs to.
    pub slot_id: SlotId,
    /// The covered date.
    pub date: Date,
    /// The covering guard the entry pays.
    pub guard: GuardId,
    /// The payable amount in cents, fixed at creation.
    pub amount_cents: i64,
    /// Whether the entry has been paid. Paid entries are immutable.
    pub paid: bool,
    /// The payment batch reference, set by `mark_paid`.
    pub payment_batch: Option<String>,
    /// Creation timestamp, RFC 3339.
    pub created_at: String,
}

/// Raw `extra_shifts` row.
#[derive(Debug, Clone, Queryable)]
pub(crate) struct ExtraShiftRow {
    pub extra_shift_id: i64,
    pub slot_id: i64,
    pub date: String,
    pub guard: String,
    pub amount_cents: i64,
    pub paid: i32,
    pub payment_batch: Option<String>,
    pub created_at: String,
}

impl ExtraShiftRow {
    /// Converts the row into an `ExtraShift`.
    ///
    /// # Errors
    ///
    /// Returns a reconstruction error if any stored field is invalid.
    pub(crate) fn into_domain(self) -> Result<ExtraShift, PersistenceError> {
        Ok(ExtraShift {
            extra_shift_id: self.extra_shift_id,
            slot_id: SlotId(self.slot_id),
            date: date_from_sql(&self.date)?,
            guard: GuardId::new(&self.guard)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            amount_cents: self.amount_cents,
            paid: self.paid != 0,
            payment_batch: self.payment_batch,
            created_at: self.created_at,
        })
    }
}

/// One row of the derived daily view: the operator-facing merge of the
/// monthly plan, the day's resolved outcome, and the slot's staffing state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyViewRow {
    /// The slot.
    pub slot_id: SlotId,
    /// The installation the slot belongs to.
    pub installation: InstallationId,
    /// The date the row covers.
    pub date: Date,
    /// Baseline from the monthly plan.
    pub planned_status: PlannedStatus,
    /// What actually happened so far.
    pub outcome_status: OutcomeStatus,
    /// The guard working the day, if any.
    pub working_guard: Option<GuardId>,
    /// The slot's titular guard, if any.
    pub titular_guard: Option<GuardId>,
    /// Whether the slot is a pending-coverage post.
    pub pending_coverage: bool,
    /// The record's version, for optimistic transition requests.
    pub version: i64,
}
