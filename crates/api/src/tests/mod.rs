// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod api_tests;

use crate::auth::{AuthenticatedActor, Role};
use crate::handlers;
use crate::request_response::{
    AssignTitularRequest, CoverageTransitionRequest, CreateSlotRequest, GenerateMonthRequest,
    SlotInfo,
};
use turno_persistence::Persistence;

pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("alice"), Role::Admin)
}

pub fn operator() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("bob"), Role::Operator)
}

/// A 5-on/2-off slot request anchored to August 1, 2025.
pub fn slot_request(installation: &str) -> CreateSlotRequest {
    CreateSlotRequest {
        installation_id: installation.to_string(),
        role_pattern_id: String::from("5x2-day"),
        work_days: 5,
        rest_days: 2,
        shift_hours: 8,
        shift_start: String::from("07:00"),
        shift_end: String::from("15:00"),
        pattern_anchor: String::from("2025-08-01"),
    }
}

pub fn transition_request(slot_id: i64, date: &str, action: &str) -> CoverageTransitionRequest {
    CoverageTransitionRequest {
        slot_id,
        date: date.to_string(),
        action: action.to_string(),
        covering_guard: None,
        amount_cents: None,
        note: None,
        expected_version: None,
        request_id: Some(String::from("req-1")),
    }
}

/// Creates a slot with titular G1 and its August 2025 plan via the API
/// handlers. Returns the slot ID.
pub fn setup_staffed_slot(persistence: &mut Persistence) -> i64 {
    let slot: SlotInfo =
        handlers::create_slot(persistence, &slot_request("INST-01"), &admin()).unwrap();
    handlers::assign_titular(
        persistence,
        slot.slot_id,
        &AssignTitularRequest {
            guard_id: String::from("G1"),
        },
        &admin(),
    )
    .unwrap();
    handlers::generate_month(
        persistence,
        &GenerateMonthRequest {
            slot_id: slot.slot_id,
            year: 2025,
            month: 8,
        },
        &admin(),
    )
    .unwrap();
    slot.slot_id
}
