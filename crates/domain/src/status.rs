// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The baseline status a day receives from the monthly plan generator.
///
/// Set once per (slot, date) and never overwritten by daily transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlannedStatus {
    /// A scheduled work day for the slot's pattern.
    Planned,
    /// A scheduled rest day. Rest days must never receive a working guard.
    Rest,
}

impl PlannedStatus {
    /// Converts this planned status to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Rest => "rest",
        }
    }
}

impl FromStr for PlannedStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "planned" => Ok(Self::Planned),
            "rest" => Ok(Self::Rest),
            _ => Err(DomainError::UnknownPlannedStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for PlannedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What actually happened on a (slot, date), as resolved by operators.
///
/// This is a closed enumeration. The source system carried several historical
/// spellings for the same outcome; those are accepted by [`OutcomeStatus::parse`]
/// and normalized here, at the data-access boundary, never inside transition
/// logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OutcomeStatus {
    /// No transition has been applied; the day shows its planned baseline.
    #[default]
    Unset,
    /// The titular guard worked the day.
    Worked,
    /// A covering guard worked the day in place of the titular (or on a
    /// pending-coverage slot).
    Replaced,
    /// Nobody covered the day.
    Uncovered,
    /// The titular guard failed to show and no replacement was recorded.
    NoShow,
}

impl OutcomeStatus {
    /// Converts this outcome to its canonical string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unset => "unset",
            Self::Worked => "worked",
            Self::Replaced => "replaced",
            Self::Uncovered => "uncovered",
            Self::NoShow => "no_show",
        }
    }

    /// Parses an outcome status, accepting canonical values and the legacy
    /// spellings found in migrated data.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::UnknownOutcomeStatus` if the string matches
    /// neither a canonical value nor a known legacy alias.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "unset" | "" => Ok(Self::Unset),
            // Legacy aliases: "trabajado"/"laborado" were both used for a
            // worked day, "cubierto"/"reemplazado" for a covered one.
            "worked" | "trabajado" | "laborado" => Ok(Self::Worked),
            "replaced" | "cubierto" | "reemplazado" => Ok(Self::Replaced),
            "uncovered" | "sin_cobertura" => Ok(Self::Uncovered),
            "no_show" | "falta" | "inasistencia" => Ok(Self::NoShow),
            _ => Err(DomainError::UnknownOutcomeStatus(s.to_string())),
        }
    }

    /// Returns whether this outcome has a guard actively working the day.
    #[must_use]
    pub const fn is_working(&self) -> bool {
        matches!(self, Self::Worked | Self::Replaced)
    }

    /// Returns whether a transition has resolved this day.
    ///
    /// A resolved day must be reverted with an undo before any other
    /// transition may be applied.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        !matches!(self, Self::Unset)
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
