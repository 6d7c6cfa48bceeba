// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Day-slot record queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use time::Date;
use turno_domain::{DaySlotRecord, GuardId};

use crate::data_models::{DayRecordRow, date_to_sql};
use crate::diesel_schema::day_slot_records;
use crate::error::PersistenceError;

/// Loads the record for a (slot, date).
///
/// # Errors
///
/// Returns `RecordNotFound` if no record exists for the pair.
pub fn get_record(
    conn: &mut SqliteConnection,
    slot_id: i64,
    date: Date,
) -> Result<DaySlotRecord, PersistenceError> {
    let date_sql: String = date_to_sql(date)?;
    let row: DayRecordRow = day_slot_records::table
        .filter(day_slot_records::slot_id.eq(slot_id))
        .filter(day_slot_records::date.eq(&date_sql))
        .first::<DayRecordRow>(conn)
        .optional()?
        .ok_or(PersistenceError::RecordNotFound {
            slot_id,
            date: date_sql,
        })?;
    row.into_domain()
}

/// Whether a guard is already the working guard of a different slot on the
/// given date.
///
/// Only records whose outcome actually puts the guard on post carry a
/// `working_guard`, so matching on the column alone is sufficient.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn guard_works_elsewhere(
    conn: &mut SqliteConnection,
    guard: &GuardId,
    date: Date,
    slot_id: i64,
) -> Result<bool, PersistenceError> {
    let date_sql: String = date_to_sql(date)?;
    let count: i64 = day_slot_records::table
        .filter(day_slot_records::working_guard.eq(guard.value()))
        .filter(day_slot_records::date.eq(&date_sql))
        .filter(day_slot_records::slot_id.ne(slot_id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}
