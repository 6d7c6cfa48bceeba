// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot registry mutations.
//!
//! Registry rules that require reads (occupied titular, unpaid ledger
//! entries blocking deactivation) are enforced here, inside the caller's
//! transaction, so the read and the write see the same snapshot.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;
use turno_domain::{GuardId, Slot};

use crate::data_models::{NewSlotRow, date_to_sql};
use crate::diesel_schema::{extra_shifts, slots};
use crate::error::PersistenceError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Inserts a new slot and returns its generated ID.
///
/// New slots always start as pending-coverage with no titular guard;
/// staffing is a separate, audited step.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_slot(conn: &mut SqliteConnection, slot: &Slot) -> Result<i64, PersistenceError> {
    let row = NewSlotRow {
        installation_id: slot.installation.value().to_string(),
        role_pattern_id: slot.role_pattern_id.0.clone(),
        work_days: i32::from(slot.pattern.work_days),
        rest_days: i32::from(slot.pattern.rest_days),
        shift_hours: i32::from(slot.pattern.shift_hours),
        shift_start: slot.pattern.shift_start.clone(),
        shift_end: slot.pattern.shift_end.clone(),
        pattern_anchor: date_to_sql(slot.pattern.anchor)?,
        titular_guard: None,
        pending_coverage: 1,
        active: 1,
    };

    diesel::insert_into(slots::table).values(&row).execute(conn)?;
    let slot_id: i64 = get_last_insert_rowid(conn)?;
    debug!(slot_id, installation = %row.installation_id, "Inserted slot");
    Ok(slot_id)
}

/// Assigns a titular guard to a slot and clears its pending-coverage flag.
///
/// # Errors
///
/// Returns an error if the slot does not exist or already has a different
/// titular guard assigned.
pub fn assign_titular(
    conn: &mut SqliteConnection,
    slot_id: i64,
    guard: &GuardId,
) -> Result<(), PersistenceError> {
    let slot: Slot = queries::slots::get_slot(conn, slot_id)?;
    if let Some(current) = slot.titular_guard {
        if current.value() != guard.value() {
            return Err(PersistenceError::TitularAlreadyAssigned {
                slot_id,
                titular: current.value().to_string(),
            });
        }
        // Re-assigning the same guard is a no-op.
        return Ok(());
    }

    diesel::update(slots::table.filter(slots::slot_id.eq(slot_id)))
        .set((
            slots::titular_guard.eq(Some(guard.value().to_string())),
            slots::pending_coverage.eq(0),
        ))
        .execute(conn)?;
    debug!(slot_id, guard = guard.value(), "Assigned titular guard");
    Ok(())
}

/// Clears a slot's titular guard, returning it to pending coverage.
///
/// # Errors
///
/// Returns an error if the slot does not exist.
pub fn clear_titular(conn: &mut SqliteConnection, slot_id: i64) -> Result<(), PersistenceError> {
    // Existence check so a bad ID reports NotFound rather than silently
    // updating zero rows.
    let _slot: Slot = queries::slots::get_slot(conn, slot_id)?;

    diesel::update(slots::table.filter(slots::slot_id.eq(slot_id)))
        .set((
            slots::titular_guard.eq(None::<String>),
            slots::pending_coverage.eq(1),
        ))
        .execute(conn)?;
    debug!(slot_id, "Cleared titular guard");
    Ok(())
}

/// Deactivates a slot.
///
/// A slot cannot be deactivated while a titular guard is assigned or while
/// unpaid extra shifts reference it; both represent open obligations.
/// Historical records and paid ledger entries are kept.
///
/// # Errors
///
/// Returns an error if the slot does not exist, still has a titular guard,
/// or has unpaid extra shifts.
pub fn deactivate_slot(conn: &mut SqliteConnection, slot_id: i64) -> Result<(), PersistenceError> {
    let slot: Slot = queries::slots::get_slot(conn, slot_id)?;
    if slot.titular_guard.is_some() {
        return Err(PersistenceError::SlotHasTitular { slot_id });
    }

    let unpaid: i64 = extra_shifts::table
        .filter(extra_shifts::slot_id.eq(slot_id))
        .filter(extra_shifts::paid.eq(0))
        .count()
        .get_result(conn)?;
    if unpaid > 0 {
        return Err(PersistenceError::UnpaidExtraShifts {
            slot_id,
            count: unpaid,
        });
    }

    diesel::update(slots::table.filter(slots::slot_id.eq(slot_id)))
        .set(slots::active.eq(0))
        .execute(conn)?;
    debug!(slot_id, "Deactivated slot");
    Ok(())
}
