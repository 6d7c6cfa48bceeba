// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Guard identifier is empty or invalid.
    InvalidGuard(String),
    /// Installation identifier is empty or invalid.
    InvalidInstallation(String),
    /// Role pattern parameters are invalid.
    InvalidRolePattern {
        /// Description of the validation error.
        reason: String,
    },
    /// Outcome status string is not a recognized value or legacy alias.
    UnknownOutcomeStatus(String),
    /// Planned status string is not a recognized value.
    UnknownPlannedStatus(String),
    /// Calendar month value is out of range.
    InvalidMonth {
        /// The invalid month number.
        month: u8,
    },
    /// Calendar year value is out of range.
    InvalidYear {
        /// The invalid year value.
        year: i32,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidGuard(msg) => write!(f, "Invalid guard: {msg}"),
            Self::InvalidInstallation(msg) => write!(f, "Invalid installation: {msg}"),
            Self::InvalidRolePattern { reason } => write!(f, "Invalid role pattern: {reason}"),
            Self::UnknownOutcomeStatus(value) => {
                write!(f, "Unknown outcome status: '{value}'")
            }
            Self::UnknownPlannedStatus(value) => {
                write!(f, "Unknown planned status: '{value}'")
            }
            Self::InvalidMonth { month } => {
                write!(f, "Invalid month: {month}. Must be between 1 and 12")
            }
            Self::InvalidYear { year } => {
                write!(f, "Invalid year: {year}. Must be between 2000 and 2100")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
