// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use turno_audit::AuditEvent;
use turno_domain::{DaySlotRecord, GuardId};

/// The current state of the extra-shift ledger entry for a (slot, date), as
/// read inside the transition transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntryState {
    /// The guard the entry pays.
    pub guard: GuardId,
    /// The payable amount in cents.
    pub amount_cents: i64,
    /// Whether the entry has been grouped into a payment batch and paid.
    /// Paid entries are immutable; transitions that would delete one fail.
    pub paid: bool,
}

/// Facts about the world the state machine needs but cannot derive from the
/// record itself.
///
/// The persistence layer assembles this inside the same transaction that
/// commits the transition, so every fact here is evaluated against the same
/// snapshot the conditional write will run against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionContext {
    /// Whether the covering guard named by the command already works another
    /// slot on the same date (`worked`, `replaced`, or assigned coverage).
    /// A guard cannot cover two posts on the same day.
    pub covering_guard_busy: bool,
    /// The extra-shift ledger entry currently recorded for this (slot, date),
    /// if any.
    pub extra_shift: Option<LedgerEntryState>,
    /// Transition timestamp, ISO 8601. Supplied by the caller so the core
    /// stays a pure function.
    pub applied_at: String,
    /// Optional operator note stored in the record's transition metadata.
    pub note: Option<String>,
}

impl TransitionContext {
    /// Creates a context with no competing facts.
    ///
    /// # Arguments
    ///
    /// * `applied_at` - Transition timestamp, ISO 8601
    #[must_use]
    pub const fn new(applied_at: String) -> Self {
        Self {
            covering_guard_busy: false,
            extra_shift: None,
            applied_at,
            note: None,
        }
    }
}

/// The ledger side effect a successful transition declares.
///
/// The core never touches storage; it declares the effect and the
/// persistence layer executes it inside the same transaction as the record
/// update and the audit append. This is what makes "record shows `replaced`
/// but no ledger entry exists" unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerEffect {
    /// No ledger change.
    None,
    /// Create an unpaid extra-shift entry for the covering guard.
    CreateExtraShift {
        /// The guard the entry pays.
        guard: GuardId,
        /// The payable amount in cents, fixed at creation time.
        amount_cents: i64,
    },
    /// Delete the (unpaid) extra-shift entry for this (slot, date).
    DeleteUnpaidExtraShift,
}

/// The result of a successful coverage transition.
///
/// Transitions are atomic: either all three parts commit or none do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The record after the transition, version already incremented.
    pub new_record: DaySlotRecord,
    /// The ledger side effect to execute in the same transaction.
    pub ledger_effect: LedgerEffect,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
