// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::{OutcomeStatus, PlannedStatus};
use crate::types::{GuardId, SlotId};
use serde::{Deserialize, Serialize};
use time::Date;

/// Structured metadata about the last transition applied to a day record.
///
/// Cleared (set back to `None`) when the record is reverted to its baseline
/// by an undo or unassignment; the audit trail keeps the full history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionMetadata {
    /// Identifier of the actor who performed the transition.
    pub actor_id: String,
    /// Name of the transition (e.g. "MarkWorked").
    pub transition: String,
    /// When the transition was applied, ISO 8601.
    pub applied_at: String,
    /// Optional free-text note supplied by the operator.
    pub note: Option<String>,
}

/// The per-day status record for one slot.
///
/// Exactly one record exists per (slot, date); the pair is unique in the
/// store. Records are created in one batch when a month is opened for a slot
/// and are mutated only through the coverage state machine. They are never
/// deleted, only reverted to baseline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DaySlotRecord {
    /// Canonical identifier. `None` before the record is persisted.
    pub record_id: Option<i64>,
    /// The slot this record belongs to.
    pub slot_id: SlotId,
    /// The calendar date this record covers.
    pub date: Date,
    /// Baseline from the monthly plan. Never overwritten by transitions.
    pub planned_status: PlannedStatus,
    /// What actually happened, as resolved by operators.
    pub outcome_status: OutcomeStatus,
    /// The guard actually covering the day, which may differ from the slot's
    /// titular. `None` unless the outcome has a guard working.
    pub working_guard: Option<GuardId>,
    /// Metadata about the last applied transition.
    pub transition_metadata: Option<TransitionMetadata>,
    /// Optimistic concurrency token. Incremented by every committed
    /// transition; stale writers fail with a conflict.
    pub version: i64,
}

impl DaySlotRecord {
    /// Creates a baseline record as emitted by the monthly plan generator.
    ///
    /// # Arguments
    ///
    /// * `slot_id` - The slot the record belongs to
    /// * `date` - The calendar date
    /// * `planned_status` - The baseline derived from the slot's pattern
    #[must_use]
    pub const fn baseline(slot_id: SlotId, date: Date, planned_status: PlannedStatus) -> Self {
        Self {
            record_id: None,
            slot_id,
            date,
            planned_status,
            outcome_status: OutcomeStatus::Unset,
            working_guard: None,
            transition_metadata: None,
            version: 0,
        }
    }

    /// Returns whether this record is at its generated baseline.
    #[must_use]
    pub const fn is_baseline(&self) -> bool {
        !self.outcome_status.is_resolved()
    }
}
