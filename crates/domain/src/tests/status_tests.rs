// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, OutcomeStatus, PlannedStatus};
use std::str::FromStr;

#[test]
fn test_outcome_status_canonical_round_trip() {
    let all: [OutcomeStatus; 5] = [
        OutcomeStatus::Unset,
        OutcomeStatus::Worked,
        OutcomeStatus::Replaced,
        OutcomeStatus::Uncovered,
        OutcomeStatus::NoShow,
    ];

    for status in all {
        assert_eq!(OutcomeStatus::parse(status.as_str()).unwrap(), status);
    }
}

#[test]
fn test_outcome_status_normalizes_legacy_worked_spellings() {
    assert_eq!(
        OutcomeStatus::parse("trabajado").unwrap(),
        OutcomeStatus::Worked
    );
    assert_eq!(
        OutcomeStatus::parse("laborado").unwrap(),
        OutcomeStatus::Worked
    );
}

#[test]
fn test_outcome_status_normalizes_legacy_covered_spellings() {
    assert_eq!(
        OutcomeStatus::parse("cubierto").unwrap(),
        OutcomeStatus::Replaced
    );
    assert_eq!(
        OutcomeStatus::parse("reemplazado").unwrap(),
        OutcomeStatus::Replaced
    );
    assert_eq!(
        OutcomeStatus::parse("sin_cobertura").unwrap(),
        OutcomeStatus::Uncovered
    );
    assert_eq!(
        OutcomeStatus::parse("falta").unwrap(),
        OutcomeStatus::NoShow
    );
    assert_eq!(
        OutcomeStatus::parse("inasistencia").unwrap(),
        OutcomeStatus::NoShow
    );
}

#[test]
fn test_outcome_status_empty_string_is_unset() {
    assert_eq!(OutcomeStatus::parse("").unwrap(), OutcomeStatus::Unset);
}

#[test]
fn test_outcome_status_rejects_unknown_value() {
    let result: Result<OutcomeStatus, DomainError> = OutcomeStatus::parse("covered_maybe");
    assert_eq!(
        result,
        Err(DomainError::UnknownOutcomeStatus(String::from(
            "covered_maybe"
        )))
    );
}

#[test]
fn test_outcome_status_working_predicate() {
    assert!(OutcomeStatus::Worked.is_working());
    assert!(OutcomeStatus::Replaced.is_working());
    assert!(!OutcomeStatus::Uncovered.is_working());
    assert!(!OutcomeStatus::NoShow.is_working());
    assert!(!OutcomeStatus::Unset.is_working());
}

#[test]
fn test_outcome_status_resolved_predicate() {
    assert!(!OutcomeStatus::Unset.is_resolved());
    assert!(OutcomeStatus::Worked.is_resolved());
    assert!(OutcomeStatus::Uncovered.is_resolved());
}

#[test]
fn test_planned_status_round_trip() {
    assert_eq!(
        PlannedStatus::from_str("planned").unwrap(),
        PlannedStatus::Planned
    );
    assert_eq!(PlannedStatus::from_str("rest").unwrap(), PlannedStatus::Rest);
    assert_eq!(PlannedStatus::Planned.as_str(), "planned");
    assert_eq!(PlannedStatus::Rest.as_str(), "rest");
}

#[test]
fn test_planned_status_rejects_unknown_value() {
    assert_eq!(
        PlannedStatus::from_str("holiday"),
        Err(DomainError::UnknownPlannedStatus(String::from("holiday")))
    );
}
