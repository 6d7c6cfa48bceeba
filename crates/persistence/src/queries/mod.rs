// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only query modules.
//!
//! ## Module Organization
//!
//! - `slots` — Slot registry reads
//! - `records` — Day-slot record reads, including the cross-slot busy check
//! - `ledger` — Extra-shift ledger reads
//! - `view` — The derived daily coverage view
//! - `audit` — Audit trail reads

pub mod audit;
pub mod ledger;
pub mod records;
pub mod slots;
pub mod view;

pub use audit::AuditEntry;
