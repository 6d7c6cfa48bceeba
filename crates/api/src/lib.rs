// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary layer for the shift coverage system.
//!
//! This crate sits between the HTTP server and the persistence layer. It
//! owns the wire request/response shapes, role-based authorization, and the
//! explicit translation of domain, core, and persistence errors into the
//! API contract.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthError, AuthenticatedActor, AuthorizationService, Role, authenticate};
pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
    translate_transition_error,
};
pub use handlers::{
    apply_coverage_transition, assign_titular, clear_titular, create_slot, daily_view,
    deactivate_slot, generate_month, get_audit_event, list_slots, list_unpaid_extra_shifts,
    mark_extra_shifts_paid, record_history,
};
pub use request_response::{
    AssignTitularRequest, AuditEventInfo, CoverageTransitionRequest, CoverageTransitionResponse,
    CreateSlotRequest, DailyViewEntry, DailyViewResponse, DayRecordInfo, ExtraShiftInfo,
    GenerateMonthRequest, GenerateMonthResponse, ListSlotsResponse, MarkPaidRequest,
    MarkPaidResponse, RecordHistoryResponse, SlotInfo, SnapshotInfo, TransitionMetadataInfo,
    UnpaidExtraShiftsResponse,
};
