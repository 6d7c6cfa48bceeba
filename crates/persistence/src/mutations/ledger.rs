// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extra-shift ledger mutations.
//!
//! Ledger writes are only ever issued from inside a transition transaction
//! (create/delete, driven by the core's declared effect) or from the payment
//! batching operation. `amount_cents` is written once at creation and never
//! updated; paid entries are immutable.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use tracing::debug;
use turno_domain::GuardId;

use crate::data_models::{ExtraShiftRow, NewExtraShiftRow, date_to_sql, now_iso};
use crate::diesel_schema::extra_shifts;
use crate::error::PersistenceError;
use crate::sqlite::get_last_insert_rowid;

/// Inserts an unpaid extra-shift entry and returns its generated ID.
///
/// # Errors
///
/// Returns an error if the insert fails (including the unique (slot, date)
/// constraint).
pub fn insert_extra_shift(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
    guard: &GuardId,
    amount_cents: i64,
) -> Result<i64, PersistenceError> {
    let row = NewExtraShiftRow {
        slot_id,
        date: date_to_sql(date)?,
        guard: guard.value().to_string(),
        amount_cents,
        paid: 0,
        payment_batch: None,
        created_at: now_iso()?,
    };

    diesel::insert_into(extra_shifts::table)
        .values(&row)
        .execute(conn)?;
    let extra_shift_id: i64 = get_last_insert_rowid(conn)?;
    debug!(
        extra_shift_id,
        slot_id,
        guard = guard.value(),
        amount_cents,
        "Created extra-shift entry"
    );
    Ok(extra_shift_id)
}

/// Hard-deletes the unpaid extra-shift entry for a (slot, date).
///
/// The core only declares this effect after verifying the entry exists and
/// is unpaid; the `paid = 0` filter makes the delete refuse to touch a paid
/// entry even if the context it validated has gone stale.
///
/// # Errors
///
/// Returns an error if no unpaid entry was deleted.
pub fn delete_unpaid_extra_shift(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
) -> Result<(), PersistenceError> {
    let date_sql: String = date_to_sql(date)?;
    let deleted: usize = diesel::delete(
        extra_shifts::table
            .filter(extra_shifts::slot_id.eq(slot_id))
            .filter(extra_shifts::date.eq(&date_sql))
            .filter(extra_shifts::paid.eq(0)),
    )
    .execute(conn)?;

    if deleted == 0 {
        return Err(PersistenceError::DatabaseError(format!(
            "no unpaid extra shift to delete for slot {slot_id} on {date_sql}"
        )));
    }
    debug!(slot_id, date = %date_sql, "Deleted unpaid extra-shift entry");
    Ok(())
}

/// Marks a set of extra shifts as paid under one payment batch reference.
///
/// All-or-none: if any listed entry is missing or already paid, nothing is
/// updated.
///
/// # Errors
///
/// Returns an error if any entry does not exist or is already paid.
pub fn mark_extra_shifts_paid(
    conn: &mut SqliteConnection,
    batch_ref: &str,
    extra_shift_ids: &[i64],
) -> Result<usize, PersistenceError> {
    // Validate the whole batch before writing anything.
    for &id in extra_shift_ids {
        let row: ExtraShiftRow = extra_shifts::table
            .filter(extra_shifts::extra_shift_id.eq(id))
            .first::<ExtraShiftRow>(conn)
            .optional()?
            .ok_or(PersistenceError::ExtraShiftNotFound(id))?;
        if row.paid != 0 {
            return Err(PersistenceError::ExtraShiftAlreadyPaid {
                extra_shift_id: id,
            });
        }
    }

    let updated: usize = diesel::update(
        extra_shifts::table.filter(extra_shifts::extra_shift_id.eq_any(extra_shift_ids)),
    )
    .set((
        extra_shifts::paid.eq(1),
        extra_shifts::payment_batch.eq(Some(batch_ref.to_string())),
    ))
    .execute(conn)?;
    debug!(batch_ref, updated, "Marked extra shifts paid");
    Ok(updated)
}
