// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The derived daily coverage view.
//!
//! The view is computed at read time by joining the day's records with
//! their slots. Nothing here is stored; the plan, the outcomes, and the
//! slot registry remain the only sources of truth.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use time::Date;
use turno_domain::{GuardId, InstallationId, OutcomeStatus, PlannedStatus, SlotId};

use crate::data_models::{DailyViewRow, date_to_sql};
use crate::diesel_schema::{day_slot_records, slots};
use crate::error::PersistenceError;

type JoinedRow = (
    i64,
    String,
    String,
    String,
    Option<String>,
    Option<String>,
    i32,
    i64,
);

fn row_to_view(date: Date, row: JoinedRow) -> Result<DailyViewRow, PersistenceError> {
    let (slot_id, installation, planned, outcome, working, titular, pending, version) = row;
    Ok(DailyViewRow {
        slot_id: SlotId(slot_id),
        installation: InstallationId::new(&installation)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        date,
        planned_status: PlannedStatus::from_str(&planned)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        outcome_status: OutcomeStatus::parse(&outcome)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        working_guard: working
            .as_deref()
            .map(GuardId::new)
            .transpose()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        titular_guard: titular
            .as_deref()
            .map(GuardId::new)
            .transpose()
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?,
        pending_coverage: pending != 0,
        version,
    })
}

/// Builds the daily coverage view for one date, optionally filtered by
/// installation, ordered by installation then slot.
///
/// Slots with no record for the date (no plan generated yet) do not appear;
/// absence of a row is itself the signal that planning is missing.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn daily_view(
    conn: &mut SqliteConnection,
    date: Date,
    installation: Option<&InstallationId>,
) -> Result<Vec<DailyViewRow>, PersistenceError> {
    let date_sql: String = date_to_sql(date)?;

    let base = day_slot_records::table
        .inner_join(slots::table)
        .filter(day_slot_records::date.eq(&date_sql))
        .select((
            slots::slot_id,
            slots::installation_id,
            day_slot_records::planned_status,
            day_slot_records::outcome_status,
            day_slot_records::working_guard,
            slots::titular_guard,
            slots::pending_coverage,
            day_slot_records::version,
        ))
        .order((slots::installation_id.asc(), slots::slot_id.asc()));

    let rows: Vec<JoinedRow> = match installation {
        Some(inst) => base
            .filter(slots::installation_id.eq(inst.value()))
            .load::<JoinedRow>(conn)?,
        None => base.load::<JoinedRow>(conn)?,
    };

    rows.into_iter().map(|row| row_to_view(date, row)).collect()
}
