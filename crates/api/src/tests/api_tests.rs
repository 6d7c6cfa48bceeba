// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! End-to-end handler tests: request translation, error translation, and
//! the full create/plan/transition/pay flow.

use crate::error::ApiError;
use crate::handlers;
use crate::request_response::{
    CoverageTransitionRequest, CoverageTransitionResponse, DailyViewResponse,
    GenerateMonthRequest, MarkPaidRequest, RecordHistoryResponse, SlotInfo,
};
use crate::tests::{admin, operator, setup_staffed_slot, slot_request, transition_request};
use turno_persistence::Persistence;

fn replace_request(slot_id: i64, date: &str) -> CoverageTransitionRequest {
    CoverageTransitionRequest {
        covering_guard: Some(String::from("G2")),
        amount_cents: Some(4_500),
        ..transition_request(slot_id, date, "mark_replaced")
    }
}

#[test]
fn test_create_slot_returns_pending_slot() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let slot: SlotInfo =
        handlers::create_slot(&mut persistence, &slot_request("INST-01"), &admin()).unwrap();

    assert!(slot.pending_coverage);
    assert!(slot.active);
    assert!(slot.titular_guard.is_none());
    assert_eq!(slot.work_days, 5);
}

#[test]
fn test_create_slot_rejects_bad_pattern() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut request = slot_request("INST-01");
    request.work_days = 0;

    let err: ApiError = handlers::create_slot(&mut persistence, &request, &admin()).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "role_pattern"));
}

#[test]
fn test_generate_month_returns_full_month() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let response = handlers::generate_month(
        &mut persistence,
        &GenerateMonthRequest {
            slot_id,
            year: 2025,
            month: 8,
        },
        &admin(),
    )
    .unwrap();

    assert_eq!(response.days.len(), 31);
    assert_eq!(response.days[0].date, "2025-08-01");
    assert_eq!(response.days[0].planned_status, "planned");
    assert_eq!(response.days[5].planned_status, "rest");
}

#[test]
fn test_transition_unknown_slot_is_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: ApiError = handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(404, "2025-08-01", "mark_worked"),
        &operator(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::ResourceNotFound { .. }));
}

#[test]
fn test_transition_unknown_action_is_invalid_input() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let err: ApiError = handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(slot_id, "2025-08-01", "mark_everything"),
        &operator(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "action"));
}

#[test]
fn test_replacement_requires_guard_and_amount() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let err: ApiError = handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(slot_id, "2025-08-01", "mark_replaced"),
        &operator(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "covering_guard"));
}

#[test]
fn test_rest_day_is_invalid_transition() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let err: ApiError = handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(slot_id, "2025-08-06", "mark_worked"),
        &operator(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::InvalidTransition { .. }));
}

#[test]
fn test_double_resolution_is_conflict() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(slot_id, "2025-08-01", "mark_worked"),
        &operator(),
    )
    .unwrap();

    let err: ApiError = handlers::apply_coverage_transition(
        &mut persistence,
        &transition_request(slot_id, "2025-08-01", "mark_no_show"),
        &operator(),
    )
    .unwrap_err();

    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_replace_pay_flow() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);

    let response: CoverageTransitionResponse = handlers::apply_coverage_transition(
        &mut persistence,
        &replace_request(slot_id, "2025-08-01"),
        &operator(),
    )
    .unwrap();

    let entry = response.extra_shift.unwrap();
    assert_eq!(entry.guard, "G2");
    assert_eq!(entry.amount_cents, 4_500);
    assert!(!entry.paid);

    let unpaid = handlers::list_unpaid_extra_shifts(&mut persistence, None).unwrap();
    assert_eq!(unpaid.extra_shifts.len(), 1);

    let paid = handlers::mark_extra_shifts_paid(
        &mut persistence,
        &MarkPaidRequest {
            payment_batch: String::from("BATCH-2025-08"),
            extra_shift_ids: vec![entry.extra_shift_id],
        },
        &admin(),
    )
    .unwrap();
    assert_eq!(paid.paid_count, 1);
    assert!(
        handlers::list_unpaid_extra_shifts(&mut persistence, None)
            .unwrap()
            .extra_shifts
            .is_empty()
    );
}

#[test]
fn test_daily_view_and_history() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let slot_id: i64 = setup_staffed_slot(&mut persistence);
    handlers::apply_coverage_transition(
        &mut persistence,
        &replace_request(slot_id, "2025-08-01"),
        &operator(),
    )
    .unwrap();

    let view: DailyViewResponse =
        handlers::daily_view(&mut persistence, "2025-08-01", None).unwrap();
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.rows[0].outcome_status, "replaced");
    assert_eq!(view.rows[0].working_guard.as_deref(), Some("G2"));
    assert_eq!(view.rows[0].titular_guard.as_deref(), Some("G1"));

    let history: RecordHistoryResponse =
        handlers::record_history(&mut persistence, slot_id, "2025-08-01").unwrap();
    assert_eq!(history.events.len(), 1);
    assert_eq!(history.events[0].action, "MarkReplaced");
    assert_eq!(history.events[0].actor_id, "bob");
    assert_eq!(history.events[0].cause_id, "req-1");
    assert_eq!(history.events[0].before.outcome_status, "unset");
    assert_eq!(history.events[0].after.outcome_status, "replaced");

    let event = handlers::get_audit_event(&mut persistence, history.events[0].event_id).unwrap();
    assert_eq!(event.action, "MarkReplaced");
}

#[test]
fn test_bad_date_is_invalid_input() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let err: ApiError =
        handlers::daily_view(&mut persistence, "08/01/2025", None).unwrap_err();

    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date"));
}
