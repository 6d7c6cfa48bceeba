// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use turno_domain::GuardId;

/// A coverage transition requested against one (slot, date) record.
///
/// Commands carry only caller-supplied data. Everything the transition needs
/// to know about the current state of the world arrives through
/// [`crate::TransitionContext`], assembled by the persistence layer inside
/// the same transaction that commits the effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// The titular guard worked the day as planned.
    MarkWorked,
    /// A covering guard worked the day in place of the absent titular.
    ///
    /// Creates an unpaid extra-shift ledger entry as a side effect.
    MarkReplaced {
        /// The guard who covered the day.
        covering_guard: GuardId,
        /// The payable amount, in cents, supplied by the pricing
        /// collaborator at transition time. Immutable afterward.
        amount_cents: i64,
    },
    /// Nobody covered the day.
    MarkUncovered,
    /// The titular guard failed to show and no replacement was recorded.
    MarkNoShow,
    /// A guard was assigned to cover a pending-coverage slot.
    ///
    /// Creates an unpaid extra-shift ledger entry as a side effect.
    AssignCoverage {
        /// The guard assigned to cover the day.
        guard: GuardId,
        /// The payable amount, in cents. Immutable afterward.
        amount_cents: i64,
    },
    /// Removes a coverage assignment whose extra shift is still unpaid,
    /// returning the record to its baseline and deleting the ledger entry.
    UnassignCoverage,
    /// Reverts the last transition: record back to baseline, any unpaid
    /// extra shift created by the reverted transition deleted.
    Undo,
}

impl Command {
    /// The audit action name of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::MarkWorked => "MarkWorked",
            Self::MarkReplaced { .. } => "MarkReplaced",
            Self::MarkUncovered => "MarkUncovered",
            Self::MarkNoShow => "MarkNoShow",
            Self::AssignCoverage { .. } => "AssignCoverage",
            Self::UnassignCoverage => "UnassignCoverage",
            Self::Undo => "Undo",
        }
    }

    /// Returns whether this command would put a guard to work on the day.
    ///
    /// Commands for which this returns `true` are rejected outright on rest
    /// days: paying an extra shift on a scheduled rest day is the invariant
    /// this subsystem exists to protect.
    #[must_use]
    pub const fn assigns_working_guard(&self) -> bool {
        matches!(
            self,
            Self::MarkWorked | Self::MarkReplaced { .. } | Self::AssignCoverage { .. }
        )
    }
}
