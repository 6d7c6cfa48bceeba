// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use time::Date;

/// Canonical numeric identifier for an operational slot.
///
/// Assigned by the persistence layer when the slot is first stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(pub i64);

impl std::fmt::Display for SlotId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque identifier for a guard, owned by the master-data collaborator.
///
/// Guard identifiers are normalized to uppercase so lookups are
/// case-insensitive against operator input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GuardId {
    value: String,
}

impl GuardId {
    /// Creates a new `GuardId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The guard identifier (will be normalized to uppercase)
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidGuard(String::from(
                "Guard identifier must not be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_uppercase(),
        })
    }

    /// Returns the guard identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for GuardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Opaque identifier for a client installation (site).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstallationId {
    value: String,
}

impl InstallationId {
    /// Creates a new `InstallationId`.
    ///
    /// # Arguments
    ///
    /// * `value` - The installation identifier (will be normalized to uppercase)
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is empty or whitespace-only.
    pub fn new(value: &str) -> Result<Self, DomainError> {
        let trimmed: &str = value.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidInstallation(String::from(
                "Installation identifier must not be empty",
            )));
        }
        Ok(Self {
            value: trimmed.to_uppercase(),
        })
    }

    /// Returns the installation identifier value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for InstallationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Opaque identifier for a service role pattern in the master-data system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RolePatternId(pub String);

impl std::fmt::Display for RolePatternId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The repeating work/rest cycle a slot follows.
///
/// Pattern parameters are snapshotted from the master-data collaborator when
/// the slot is created; the `RolePatternId` stays an opaque reference. The
/// cycle is anchored at `anchor`: that date is the first work day of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePattern {
    /// Consecutive work days per cycle.
    pub work_days: u8,
    /// Consecutive rest days per cycle.
    pub rest_days: u8,
    /// Shift length in hours.
    pub shift_hours: u8,
    /// Daily shift start, `HH:MM` 24-hour format.
    pub shift_start: String,
    /// Daily shift end, `HH:MM` 24-hour format.
    pub shift_end: String,
    /// First work day of a cycle; all expansion is relative to this date.
    pub anchor: Date,
}

impl RolePattern {
    /// Creates a new `RolePattern`, validating the cycle parameters.
    ///
    /// # Arguments
    ///
    /// * `work_days` - Consecutive work days per cycle (at least 1)
    /// * `rest_days` - Consecutive rest days per cycle
    /// * `shift_hours` - Shift length in hours (1 to 24)
    /// * `shift_start` - Daily shift start (`HH:MM`)
    /// * `shift_end` - Daily shift end (`HH:MM`)
    /// * `anchor` - First work day of a cycle
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRolePattern` if `work_days` is zero or
    /// `shift_hours` is outside 1..=24.
    pub fn new(
        work_days: u8,
        rest_days: u8,
        shift_hours: u8,
        shift_start: String,
        shift_end: String,
        anchor: Date,
    ) -> Result<Self, DomainError> {
        if work_days == 0 {
            return Err(DomainError::InvalidRolePattern {
                reason: String::from("work_days must be at least 1"),
            });
        }
        if shift_hours == 0 || shift_hours > 24 {
            return Err(DomainError::InvalidRolePattern {
                reason: format!("shift_hours must be between 1 and 24, got {shift_hours}"),
            });
        }
        Ok(Self {
            work_days,
            rest_days,
            shift_hours,
            shift_start,
            shift_end,
            anchor,
        })
    }

    /// Full cycle length in days.
    #[must_use]
    pub const fn cycle_length(&self) -> u16 {
        self.work_days as u16 + self.rest_days as u16
    }
}

/// An operational post at an installation.
///
/// A slot is the unit of staffing: one guard per slot per day. A slot with no
/// titular guard is a pending-coverage slot and must be staffed day by day
/// through coverage assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Canonical identifier. `None` before the slot is persisted.
    pub slot_id: Option<SlotId>,
    /// The installation this slot belongs to.
    pub installation: InstallationId,
    /// Reference to the service role pattern in master data.
    pub role_pattern_id: RolePatternId,
    /// The work/rest cycle snapshotted at creation time.
    pub pattern: RolePattern,
    /// The guard normally assigned to this slot, if any.
    pub titular_guard: Option<GuardId>,
    /// Whether the slot has no titular and awaits assignment.
    pub pending_coverage: bool,
    /// Whether the slot is operational. Deactivated slots are never deleted
    /// while historical day records exist.
    pub active: bool,
}

impl Slot {
    /// Creates a new slot in its initial state: no titular, pending coverage,
    /// active.
    ///
    /// # Arguments
    ///
    /// * `installation` - The installation the slot belongs to
    /// * `role_pattern_id` - Master-data reference for the role pattern
    /// * `pattern` - The snapshotted cycle parameters
    #[must_use]
    pub const fn new(
        installation: InstallationId,
        role_pattern_id: RolePatternId,
        pattern: RolePattern,
    ) -> Self {
        Self {
            slot_id: None,
            installation,
            role_pattern_id,
            pattern,
            titular_guard: None,
            pending_coverage: true,
            active: true,
        }
    }

    /// Returns whether the slot currently has a titular guard.
    #[must_use]
    pub const fn has_titular(&self) -> bool {
        self.titular_guard.is_some()
    }
}
