// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.
//!
//! Domain, core, and persistence errors are translated explicitly into the
//! four-class API contract (not found / invalid transition / conflict /
//! internal) and never leaked directly.

use crate::auth::AuthError;
use turno::CoreError;
use turno_domain::DomainError;
use turno_persistence::{PersistenceError, TransitionError};

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request is well-formed but the transition it names is not legal
    /// from the current state.
    InvalidTransition {
        /// The action that was attempted.
        action: String,
        /// A human-readable description naming the violated rule.
        message: String,
    },
    /// The request raced another change, or the target must be undone or
    /// unwound first.
    Conflict {
        /// The action that was attempted.
        action: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::InvalidTransition { action, message } => {
                write!(f, "Invalid transition '{action}': {message}")
            }
            Self::Conflict { action, message } => {
                write!(f, "Conflict on '{action}': {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidGuard(msg) => ApiError::InvalidInput {
            field: String::from("guard_id"),
            message: msg,
        },
        DomainError::InvalidInstallation(msg) => ApiError::InvalidInput {
            field: String::from("installation_id"),
            message: msg,
        },
        DomainError::InvalidRolePattern { reason } => ApiError::InvalidInput {
            field: String::from("role_pattern"),
            message: reason,
        },
        DomainError::UnknownPlannedStatus(msg) => ApiError::InvalidInput {
            field: String::from("planned_status"),
            message: msg,
        },
        DomainError::UnknownOutcomeStatus(msg) => ApiError::InvalidInput {
            field: String::from("outcome_status"),
            message: msg,
        },
        DomainError::InvalidMonth { month } => ApiError::InvalidInput {
            field: String::from("month"),
            message: format!("Invalid month: {month}. Must be between 1 and 12"),
        },
        DomainError::InvalidYear { year } => ApiError::InvalidInput {
            field: String::from("year"),
            message: format!("Invalid year: {year}. Must be between 2000 and 2100"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Cannot parse date '{date_string}': {error}"),
        },
    }
}

/// Translates a core error into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::InvalidTransition { action, reason } => ApiError::InvalidTransition {
            action,
            message: reason,
        },
        CoreError::Conflict { action, reason } => ApiError::Conflict {
            action,
            message: reason,
        },
        CoreError::NotFound { what } => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: what,
        },
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}

/// Translates a persistence error into an API error.
///
/// Registry gating rules surface as conflicts; missing rows surface as not
/// found; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SlotNotFound(slot_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} does not exist"),
        },
        PersistenceError::RecordNotFound { slot_id, date } => ApiError::ResourceNotFound {
            resource_type: String::from("Day record"),
            message: format!("No record for slot {slot_id} on {date}; generate the month first"),
        },
        PersistenceError::EventNotFound(event_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Audit event"),
            message: format!("Audit event {event_id} does not exist"),
        },
        PersistenceError::ExtraShiftNotFound(extra_shift_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Extra shift"),
            message: format!("Extra shift {extra_shift_id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message,
        },
        PersistenceError::TitularAlreadyAssigned { slot_id, titular } => ApiError::Conflict {
            action: String::from("assign_titular"),
            message: format!("Slot {slot_id} already has titular guard '{titular}'"),
        },
        PersistenceError::SlotHasTitular { slot_id } => ApiError::Conflict {
            action: String::from("deactivate_slot"),
            message: format!("Slot {slot_id} still has a titular guard; clear it first"),
        },
        PersistenceError::UnpaidExtraShifts { slot_id, count } => ApiError::Conflict {
            action: String::from("deactivate_slot"),
            message: format!("Slot {slot_id} has {count} unpaid extra shift(s); settle them first"),
        },
        PersistenceError::ExtraShiftAlreadyPaid { extra_shift_id } => ApiError::Conflict {
            action: String::from("mark_extra_shifts_paid"),
            message: format!("Extra shift {extra_shift_id} is already paid"),
        },
        err => ApiError::Internal {
            message: format!("Persistence failure: {err}"),
        },
    }
}

/// Translates a transition error into an API error.
#[must_use]
pub fn translate_transition_error(err: TransitionError) -> ApiError {
    match err {
        TransitionError::Core(core_err) => translate_core_error(core_err),
        TransitionError::Storage(storage_err) => translate_persistence_error(storage_err),
    }
}
