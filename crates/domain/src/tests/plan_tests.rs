// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, PlannedDay, PlannedStatus, RolePattern, expand_month};
use time::{Date, Month};

fn pattern_5x2(anchor: Date) -> RolePattern {
    RolePattern::new(
        5,
        2,
        8,
        String::from("07:00"),
        String::from("15:00"),
        anchor,
    )
    .unwrap()
}

#[test]
fn test_expand_month_covers_every_day_in_order() {
    let anchor: Date = Date::from_calendar_date(2025, Month::August, 1).unwrap();
    let days: Vec<PlannedDay> = expand_month(&pattern_5x2(anchor), 2025, 8).unwrap();

    assert_eq!(days.len(), 31);
    assert_eq!(days[0].date.day(), 1);
    assert_eq!(days[30].date.day(), 31);
}

#[test]
fn test_expand_month_follows_work_rest_cycle_from_anchor() {
    let anchor: Date = Date::from_calendar_date(2025, Month::August, 1).unwrap();
    let days: Vec<PlannedDay> = expand_month(&pattern_5x2(anchor), 2025, 8).unwrap();

    // Aug 1-5 work, Aug 6-7 rest, Aug 8-12 work, ...
    for day in &days[0..5] {
        assert_eq!(day.planned_status, PlannedStatus::Planned);
    }
    assert_eq!(days[5].planned_status, PlannedStatus::Rest);
    assert_eq!(days[6].planned_status, PlannedStatus::Rest);
    assert_eq!(days[7].planned_status, PlannedStatus::Planned);
    // Aug 9 is position 8 in the cycle (second work block).
    assert_eq!(days[8].planned_status, PlannedStatus::Planned);
}

#[test]
fn test_expand_month_projects_cycle_backwards_before_anchor() {
    // Anchor in September; expanding August must still be cycle-consistent.
    let anchor: Date = Date::from_calendar_date(2025, Month::September, 1).unwrap();
    let days: Vec<PlannedDay> = expand_month(&pattern_5x2(anchor), 2025, 8).unwrap();

    // Aug 31 is one day before the anchor: last rest day of the prior cycle.
    assert_eq!(days[30].planned_status, PlannedStatus::Rest);
    assert_eq!(days[29].planned_status, PlannedStatus::Rest);
    // Aug 29 is three days before the anchor: a work day of the prior cycle.
    assert_eq!(days[28].planned_status, PlannedStatus::Planned);
}

#[test]
fn test_expand_month_handles_leap_february() {
    let anchor: Date = Date::from_calendar_date(2024, Month::February, 1).unwrap();
    let days: Vec<PlannedDay> = expand_month(&pattern_5x2(anchor), 2024, 2).unwrap();
    assert_eq!(days.len(), 29);
}

#[test]
fn test_expand_month_pattern_with_no_rest_days() {
    let anchor: Date = Date::from_calendar_date(2025, Month::August, 1).unwrap();
    let pattern: RolePattern = RolePattern::new(
        7,
        0,
        12,
        String::from("19:00"),
        String::from("07:00"),
        anchor,
    )
    .unwrap();

    let days: Vec<PlannedDay> = expand_month(&pattern, 2025, 8).unwrap();
    assert!(
        days.iter()
            .all(|d| d.planned_status == PlannedStatus::Planned)
    );
}

#[test]
fn test_expand_month_rejects_invalid_month() {
    let anchor: Date = Date::from_calendar_date(2025, Month::August, 1).unwrap();
    assert_eq!(
        expand_month(&pattern_5x2(anchor), 2025, 13),
        Err(DomainError::InvalidMonth { month: 13 })
    );
}

#[test]
fn test_expand_month_rejects_out_of_range_year() {
    let anchor: Date = Date::from_calendar_date(2025, Month::August, 1).unwrap();
    assert_eq!(
        expand_month(&pattern_5x2(anchor), 1999, 8),
        Err(DomainError::InvalidYear { year: 1999 })
    );
}
