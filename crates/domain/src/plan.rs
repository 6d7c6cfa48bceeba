// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Monthly plan expansion.
//!
//! Given a slot's role pattern and a calendar month, derives the baseline
//! planned/rest status for every day of the month. This is pure calendar
//! arithmetic; the idempotent insertion of the resulting rows is the
//! persistence layer's job.

use crate::error::DomainError;
use crate::status::PlannedStatus;
use time::{Date, Month};

use crate::types::RolePattern;

/// One day of an expanded monthly plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlannedDay {
    /// The calendar date.
    pub date: Date,
    /// The baseline status derived from the pattern.
    pub planned_status: PlannedStatus,
}

/// Expands a role pattern over a calendar month.
///
/// The pattern's cycle (`work_days` work, then `rest_days` rest) is anchored
/// at `pattern.anchor`: that date is day zero of a cycle. Dates before the
/// anchor are projected backwards along the same cycle, so re-anchoring a
/// pattern never shifts months that were already generated.
///
/// # Arguments
///
/// * `pattern` - The slot's work/rest cycle
/// * `year` - The calendar year (2000 to 2100)
/// * `month` - The calendar month (1 to 12)
///
/// # Returns
///
/// One `PlannedDay` per day of the month, in date order.
///
/// # Errors
///
/// Returns an error if the year or month is out of range or a date cannot be
/// constructed.
pub fn expand_month(
    pattern: &RolePattern,
    year: i32,
    month: u8,
) -> Result<Vec<PlannedDay>, DomainError> {
    if !(2000..=2100).contains(&year) {
        return Err(DomainError::InvalidYear { year });
    }
    let month: Month = Month::try_from(month).map_err(|_| DomainError::InvalidMonth { month })?;

    let days_in_month: u8 = month.length(year);
    let cycle: i64 = i64::from(pattern.cycle_length());

    let mut days: Vec<PlannedDay> = Vec::with_capacity(usize::from(days_in_month));
    for day in 1..=days_in_month {
        let date: Date = Date::from_calendar_date(year, month, day).map_err(|e| {
            DomainError::DateParseError {
                date_string: format!("{year}-{month:?}-{day}"),
                error: e.to_string(),
            }
        })?;

        // rem_euclid keeps the cycle position correct for dates before the anchor.
        let offset: i64 = i64::from(date.to_julian_day() - pattern.anchor.to_julian_day());
        let position: i64 = offset.rem_euclid(cycle);

        let planned_status: PlannedStatus = if position < i64::from(pattern.work_days) {
            PlannedStatus::Planned
        } else {
            PlannedStatus::Rest
        };

        days.push(PlannedDay {
            date,
            planned_status,
        });
    }

    Ok(days)
}
