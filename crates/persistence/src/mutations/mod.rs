// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! Most mutations use Diesel DSL, with minimal use of SQLite-specific
//! helpers (e.g., `last_insert_rowid()`).
//!
//! ## Module Organization
//!
//! - `slots` — Slot registry writes (create, titular assignment, deactivation)
//! - `plan` — Monthly plan generation (idempotent baseline inserts)
//! - `transitions` — The transactional coverage-transition pipeline
//! - `ledger` — Extra-shift ledger writes (create, delete-unpaid, mark paid)

pub mod ledger;
pub mod plan;
pub mod slots;
pub mod transitions;

pub use transitions::AppliedTransition;
