// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Slot registry queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use turno_domain::{InstallationId, Slot};

use crate::data_models::SlotRow;
use crate::diesel_schema::slots;
use crate::error::PersistenceError;

/// Loads one slot by ID.
///
/// # Errors
///
/// Returns `SlotNotFound` if no slot exists with the given ID.
pub fn get_slot(conn: &mut SqliteConnection, slot_id: i64) -> Result<Slot, PersistenceError> {
    let row: SlotRow = slots::table
        .filter(slots::slot_id.eq(slot_id))
        .first::<SlotRow>(conn)
        .optional()?
        .ok_or(PersistenceError::SlotNotFound(slot_id))?;
    row.into_domain()
}

/// Lists slots, optionally filtered by installation, in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a stored row is invalid.
pub fn list_slots(
    conn: &mut SqliteConnection,
    installation: Option<&InstallationId>,
) -> Result<Vec<Slot>, PersistenceError> {
    let rows: Vec<SlotRow> = match installation {
        Some(inst) => slots::table
            .filter(slots::installation_id.eq(inst.value()))
            .order(slots::slot_id.asc())
            .load::<SlotRow>(conn)?,
        None => slots::table.order(slots::slot_id.asc()).load::<SlotRow>(conn)?,
    };
    rows.into_iter().map(SlotRow::into_domain).collect()
}
