// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use turno_domain::DomainError;

/// Errors that can occur during coverage transitions.
///
/// Every rejection names the invariant it protects, so operator-facing
/// surfaces can explain the refusal instead of showing a generic failure.
/// None of these are retryable: retrying an invalid transition is still
/// invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A precondition of the requested transition does not hold (e.g. the
    /// day is a rest day, the slot has no titular, there is nothing to undo).
    InvalidTransition {
        /// The transition that was attempted.
        action: String,
        /// The invariant that was violated.
        reason: String,
    },
    /// The transition lost against a competing fact: the record is already
    /// resolved, the guard is double-booked, or the ledger entry is paid.
    Conflict {
        /// The transition that was attempted.
        action: String,
        /// The competing fact.
        reason: String,
    },
    /// A referenced entity does not exist.
    NotFound {
        /// Description of what was missing.
        what: String,
    },
    /// A domain rule was violated.
    DomainViolation(DomainError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTransition { action, reason } => {
                write!(f, "Invalid transition '{action}': {reason}")
            }
            Self::Conflict { action, reason } => {
                write!(f, "Conflict applying '{action}': {reason}")
            }
            Self::NotFound { what } => write!(f, "Not found: {what}"),
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
