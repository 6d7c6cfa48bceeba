// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use turno::CoreError;

/// Errors that can occur during persistence operations.
///
/// Slot-registry gating rules (titular occupancy, unpaid ledger entries
/// blocking deactivation, paid ledger immutability) are reported here because
/// the registry has no transition step of its own; the API layer translates
/// these variants into the `Conflict`/`NotFound` taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// Serialization/deserialization error.
    SerializationError(String),
    /// A stored row could not be converted back into domain types.
    ReconstructionError(String),
    /// The requested slot was not found.
    SlotNotFound(i64),
    /// No day record exists for the (slot, date).
    RecordNotFound {
        /// The slot identifier.
        slot_id: i64,
        /// The date, ISO 8601.
        date: String,
    },
    /// The requested audit event was not found.
    EventNotFound(i64),
    /// The requested extra shift was not found.
    ExtraShiftNotFound(i64),
    /// The slot already has a different titular guard.
    TitularAlreadyAssigned {
        /// The slot identifier.
        slot_id: i64,
        /// The currently assigned titular.
        titular: String,
    },
    /// The slot cannot be deactivated while a titular is assigned.
    SlotHasTitular {
        /// The slot identifier.
        slot_id: i64,
    },
    /// The slot cannot be deactivated while unpaid extra shifts exist.
    UnpaidExtraShifts {
        /// The slot identifier.
        slot_id: i64,
        /// How many unpaid entries block the operation.
        count: i64,
    },
    /// The extra shift is already paid and therefore immutable.
    ExtraShiftAlreadyPaid {
        /// The extra shift identifier.
        extra_shift_id: i64,
    },
    /// The requested resource was not found.
    NotFound(String),
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::ReconstructionError(msg) => write!(f, "Row reconstruction error: {msg}"),
            Self::SlotNotFound(id) => write!(f, "Slot not found: {id}"),
            Self::RecordNotFound { slot_id, date } => {
                write!(f, "No day record for slot {slot_id} on {date}")
            }
            Self::EventNotFound(id) => write!(f, "Audit event not found: {id}"),
            Self::ExtraShiftNotFound(id) => write!(f, "Extra shift not found: {id}"),
            Self::TitularAlreadyAssigned { slot_id, titular } => {
                write!(
                    f,
                    "Slot {slot_id} already has titular guard '{titular}' assigned"
                )
            }
            Self::SlotHasTitular { slot_id } => {
                write!(
                    f,
                    "Slot {slot_id} cannot be deactivated: a titular guard is still assigned"
                )
            }
            Self::UnpaidExtraShifts { slot_id, count } => {
                write!(
                    f,
                    "Slot {slot_id} cannot be deactivated: {count} unpaid extra shift(s) exist"
                )
            }
            Self::ExtraShiftAlreadyPaid { extra_shift_id } => {
                write!(f, "Extra shift {extra_shift_id} is already paid")
            }
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Errors returned by operations that run the state machine inside a store
/// transaction: either the business rules rejected the transition, or the
/// store itself failed. The distinction matters to callers because only
/// storage failures are retryable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    /// The state machine rejected the transition. Never retryable.
    Core(CoreError),
    /// The store failed. Callers may retry with backoff.
    Storage(PersistenceError),
}

impl std::fmt::Display for TransitionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Core(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for TransitionError {}

impl From<CoreError> for TransitionError {
    fn from(err: CoreError) -> Self {
        Self::Core(err)
    }
}

impl From<PersistenceError> for TransitionError {
    fn from(err: PersistenceError) -> Self {
        Self::Storage(err)
    }
}

impl From<diesel::result::Error> for TransitionError {
    fn from(err: diesel::result::Error) -> Self {
        Self::Storage(PersistenceError::from(err))
    }
}
