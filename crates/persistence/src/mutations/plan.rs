// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly plan generation.
//!
//! Generation is idempotent per (slot, month): dates that already have a
//! record are left untouched, including their resolved outcomes and
//! versions; only missing dates receive a baseline row.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::collections::HashSet;
use tracing::{debug, info};
use turno::CoreError;
use turno_domain::{DaySlotRecord, PlannedDay, Slot, SlotId, expand_month};

use crate::data_models::{DayRecordRow, NewDayRecordRow, date_to_sql, now_iso};
use crate::diesel_schema::day_slot_records;
use crate::error::{PersistenceError, TransitionError};

/// Generates (or completes) the monthly plan for one slot.
///
/// Expands the slot's role pattern over the month, inserts baseline records
/// for dates that have none, and returns the full month's records in date
/// order.
///
/// # Errors
///
/// Returns a core error if the year or month is out of range, or a storage
/// error if the database fails.
pub fn generate_month(
    conn: &mut SqliteConnection,
    slot: &Slot,
    year: i32,
    month: u8,
) -> Result<Vec<DaySlotRecord>, TransitionError> {
    let slot_id: SlotId = slot
        .slot_id
        .ok_or_else(|| PersistenceError::ReconstructionError(String::from("slot has no ID")))?;

    let planned: Vec<PlannedDay> =
        expand_month(&slot.pattern, year, month).map_err(CoreError::DomainViolation)?;

    let month_dates: Vec<String> = planned
        .iter()
        .map(|day| date_to_sql(day.date))
        .collect::<Result<Vec<String>, PersistenceError>>()?;

    // Dates that already have a record are skipped, never overwritten.
    let existing: HashSet<String> = day_slot_records::table
        .filter(day_slot_records::slot_id.eq(slot_id.0))
        .filter(day_slot_records::date.eq_any(&month_dates))
        .select(day_slot_records::date)
        .load::<String>(conn)?
        .into_iter()
        .collect();

    let now: String = now_iso()?;
    let new_rows: Vec<NewDayRecordRow> = planned
        .iter()
        .zip(month_dates.iter())
        .filter(|(_, date_sql)| !existing.contains(*date_sql))
        .map(|(day, date_sql)| NewDayRecordRow {
            slot_id: slot_id.0,
            date: date_sql.clone(),
            planned_status: day.planned_status.to_string(),
            outcome_status: String::from("unset"),
            working_guard: None,
            transition_actor: None,
            transition_name: None,
            transition_at: None,
            transition_note: None,
            version: 0,
            created_at: now.clone(),
            updated_at: now.clone(),
        })
        .collect();

    let inserted: usize = if new_rows.is_empty() {
        0
    } else {
        diesel::insert_into(day_slot_records::table)
            .values(&new_rows)
            .execute(conn)
            .map_err(PersistenceError::from)?
    };
    debug!(
        slot_id = slot_id.0,
        year,
        month,
        inserted,
        skipped = existing.len(),
        "Generated monthly plan rows"
    );

    let rows: Vec<DayRecordRow> = day_slot_records::table
        .filter(day_slot_records::slot_id.eq(slot_id.0))
        .filter(day_slot_records::date.eq_any(&month_dates))
        .order(day_slot_records::date.asc())
        .load::<DayRecordRow>(conn)
        .map_err(PersistenceError::from)?;

    let records: Vec<DaySlotRecord> = rows
        .into_iter()
        .map(DayRecordRow::into_domain)
        .collect::<Result<Vec<DaySlotRecord>, PersistenceError>>()?;

    info!(
        slot_id = slot_id.0,
        year,
        month,
        total = records.len(),
        "Monthly plan ready"
    );
    Ok(records)
}
