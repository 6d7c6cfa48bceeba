// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the shift coverage system.
//!
//! This crate owns the database: the slot registry, the per-day coverage
//! records, the extra-shift ledger, and the append-only audit trail. It is
//! built on Diesel over `SQLite`.
//!
//! ## Transactional shape
//!
//! Every coverage transition runs as one `SQLite` transaction: the slot and
//! record are re-read, competing facts are gathered, the pure state machine
//! in the `turno` crate decides, and the record update (version-guarded),
//! the ledger effect, and the audit event commit together or not at all.
//!
//! ## Testing
//!
//! Tests run against unique in-memory databases. Each `new_in_memory()`
//! call receives a sequential ID from an atomic counter, ensuring
//! deterministic isolation without time-based collisions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;
use turno::Command;
use turno_audit::{Actor, Cause};
use turno_domain::{DaySlotRecord, GuardId, InstallationId, Slot};

mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;
mod sqlite;

#[cfg(test)]
mod tests;

pub use data_models::{DailyViewRow, ExtraShift};
pub use error::{PersistenceError, TransitionError};
pub use mutations::AppliedTransition;
pub use queries::AuditEntry;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based
/// collisions. Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for the coverage store.
///
/// All public methods run their reads and writes on one connection; methods
/// that write wrap the whole operation in a transaction.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("memdb_test_{db_id}");
        let shared_memory_url: String = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = sqlite::initialize_database(&shared_memory_url)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = sqlite::initialize_database(path_str)?;
        sqlite::enable_wal_mode(&mut conn)?;
        sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Registers a new slot and returns it with its assigned ID.
    ///
    /// New slots start active, pending coverage, with no titular guard.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_slot(&mut self, slot: &Slot) -> Result<Slot, PersistenceError> {
        self.conn.transaction(|conn| {
            let slot_id: i64 = mutations::slots::insert_slot(conn, slot)?;
            queries::slots::get_slot(conn, slot_id)
        })
    }

    /// Loads one slot by ID.
    ///
    /// # Errors
    ///
    /// Returns `SlotNotFound` if no slot exists with the given ID.
    pub fn get_slot(&mut self, slot_id: i64) -> Result<Slot, PersistenceError> {
        queries::slots::get_slot(&mut self.conn, slot_id)
    }

    /// Lists slots, optionally filtered by installation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_slots(
        &mut self,
        installation: Option<&InstallationId>,
    ) -> Result<Vec<Slot>, PersistenceError> {
        queries::slots::list_slots(&mut self.conn, installation)
    }

    /// Assigns a titular guard to a slot, clearing its pending-coverage
    /// flag, and returns the updated slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist or already has a
    /// different titular guard.
    pub fn assign_titular(
        &mut self,
        slot_id: i64,
        guard: &GuardId,
    ) -> Result<Slot, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::slots::assign_titular(conn, slot_id, guard)?;
            queries::slots::get_slot(conn, slot_id)
        })
    }

    /// Clears a slot's titular guard, returning it to pending coverage,
    /// and returns the updated slot.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist.
    pub fn clear_titular(&mut self, slot_id: i64) -> Result<Slot, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::slots::clear_titular(conn, slot_id)?;
            queries::slots::get_slot(conn, slot_id)
        })
    }

    /// Deactivates a slot and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot does not exist, still has a titular
    /// guard, or has unpaid extra shifts.
    pub fn deactivate_slot(&mut self, slot_id: i64) -> Result<Slot, PersistenceError> {
        self.conn.transaction(|conn| {
            mutations::slots::deactivate_slot(conn, slot_id)?;
            queries::slots::get_slot(conn, slot_id)
        })
    }

    /// Generates (or completes) the monthly plan for one slot and returns
    /// the full month's records in date order.
    ///
    /// Idempotent per (slot, month): existing records are never touched.
    ///
    /// # Errors
    ///
    /// Returns a core error for an out-of-range year or month, or a storage
    /// error if the database fails.
    pub fn generate_month(
        &mut self,
        slot_id: i64,
        year: i32,
        month: u8,
    ) -> Result<Vec<DaySlotRecord>, TransitionError> {
        self.conn.transaction(|conn| {
            let slot: Slot = queries::slots::get_slot(conn, slot_id)?;
            mutations::plan::generate_month(conn, &slot, year, month)
        })
    }

    /// Applies one coverage command to the (slot, date) record, atomically
    /// committing the record update, the declared ledger effect, and the
    /// audit event.
    ///
    /// # Arguments
    ///
    /// * `slot_id` - The slot to transition
    /// * `date` - The date to transition
    /// * `command` - The requested transition
    /// * `actor` - The actor performing this action
    /// * `cause` - The cause or reason for this action
    /// * `note` - Optional operator note stored in the record's metadata
    /// * `expected_version` - If set, fail with a conflict unless the record
    ///   is still at this version
    ///
    /// # Errors
    ///
    /// Returns a core error if the state machine rejects the command, or a
    /// storage error if the database fails. Nothing is committed on error.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_transition(
        &mut self,
        slot_id: i64,
        date: Date,
        command: &Command,
        actor: Actor,
        cause: Cause,
        note: Option<String>,
        expected_version: Option<i64>,
    ) -> Result<AppliedTransition, TransitionError> {
        self.conn.transaction(|conn| {
            mutations::transitions::apply_transition(
                conn,
                slot_id,
                date,
                command,
                actor,
                cause,
                note,
                expected_version,
            )
        })
    }

    /// Loads the record for a (slot, date).
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record exists for the pair.
    pub fn get_record(
        &mut self,
        slot_id: i64,
        date: Date,
    ) -> Result<DaySlotRecord, PersistenceError> {
        queries::records::get_record(&mut self.conn, slot_id, date)
    }

    /// Builds the daily coverage view for one date, optionally filtered by
    /// installation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn daily_view(
        &mut self,
        date: Date,
        installation: Option<&InstallationId>,
    ) -> Result<Vec<DailyViewRow>, PersistenceError> {
        queries::view::daily_view(&mut self.conn, date, installation)
    }

    /// Lists unpaid extra shifts, oldest first, optionally filtered by
    /// installation.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_unpaid_extra_shifts(
        &mut self,
        installation: Option<&InstallationId>,
    ) -> Result<Vec<ExtraShift>, PersistenceError> {
        queries::ledger::list_unpaid(&mut self.conn, installation)
    }

    /// Marks a set of extra shifts as paid under one payment batch
    /// reference. All-or-none.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry does not exist or is already paid;
    /// nothing is updated in that case.
    pub fn mark_extra_shifts_paid(
        &mut self,
        batch_ref: &str,
        extra_shift_ids: &[i64],
    ) -> Result<usize, PersistenceError> {
        self.conn
            .transaction(|conn| mutations::ledger::mark_extra_shifts_paid(conn, batch_ref, extra_shift_ids))
    }

    /// Lists the audit events for a (slot, date) record, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` if no record exists for the pair.
    pub fn record_history(
        &mut self,
        slot_id: i64,
        date: Date,
    ) -> Result<Vec<AuditEntry>, PersistenceError> {
        queries::audit::record_history(&mut self.conn, slot_id, date)
    }

    /// Loads one audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns `EventNotFound` if no event exists with the given ID.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEntry, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, event_id)
    }
}
