// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Extra-shift ledger queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use turno::LedgerEntryState;
use turno_domain::{GuardId, InstallationId};

use crate::data_models::{ExtraShift, ExtraShiftRow, date_to_sql};
use crate::diesel_schema::{extra_shifts, slots};
use crate::error::PersistenceError;

/// Loads one extra shift by ID.
///
/// # Errors
///
/// Returns `ExtraShiftNotFound` if no entry exists with the given ID.
pub fn get_extra_shift(
    conn: &mut SqliteConnection,
    extra_shift_id: i64,
) -> Result<ExtraShift, PersistenceError> {
    let row: ExtraShiftRow = extra_shifts::table
        .filter(extra_shifts::extra_shift_id.eq(extra_shift_id))
        .first::<ExtraShiftRow>(conn)
        .optional()?
        .ok_or(PersistenceError::ExtraShiftNotFound(extra_shift_id))?;
    row.into_domain()
}

/// The ledger entry currently recorded for a (slot, date), reduced to the
/// facts the state machine needs.
///
/// # Errors
///
/// Returns an error if the query fails or the stored row is invalid.
pub fn entry_state_for(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
) -> Result<Option<LedgerEntryState>, PersistenceError> {
    let date_sql: String = date_to_sql(date)?;
    let row: Option<ExtraShiftRow> = extra_shifts::table
        .filter(extra_shifts::slot_id.eq(slot_id))
        .filter(extra_shifts::date.eq(&date_sql))
        .first::<ExtraShiftRow>(conn)
        .optional()?;

    row.map(|row| {
        Ok(LedgerEntryState {
            guard: GuardId::new(&row.guard)
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
            amount_cents: row.amount_cents,
            paid: row.paid != 0,
        })
    })
    .transpose()
}

/// Lists unpaid extra shifts, oldest first, for payment batching.
///
/// When an installation is given, only entries whose slot belongs to that
/// installation are returned.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_unpaid(
    conn: &mut SqliteConnection,
    installation: Option<&InstallationId>,
) -> Result<Vec<ExtraShift>, PersistenceError> {
    let rows: Vec<ExtraShiftRow> = match installation {
        Some(installation) => {
            let slot_ids: Vec<i64> = slots::table
                .filter(slots::installation_id.eq(installation.value()))
                .select(slots::slot_id)
                .load::<i64>(conn)?;
            extra_shifts::table
                .filter(extra_shifts::paid.eq(0))
                .filter(extra_shifts::slot_id.eq_any(slot_ids))
                .order(extra_shifts::extra_shift_id.asc())
                .load::<ExtraShiftRow>(conn)?
        }
        None => extra_shifts::table
            .filter(extra_shifts::paid.eq(0))
            .order(extra_shifts::extra_shift_id.asc())
            .load::<ExtraShiftRow>(conn)?,
    };
    rows.into_iter().map(ExtraShiftRow::into_domain).collect()
}
