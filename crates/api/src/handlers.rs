// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Each state-changing handler verifies authorization, translates the wire
//! request into domain/core types, delegates to persistence, and translates
//! any error into the API contract.

use time::Date;
use time::format_description::BorrowedFormatItem;
use tracing::info;
use turno::Command;
use turno_audit::Cause;
use turno_domain::{GuardId, InstallationId, RolePattern, RolePatternId, Slot};
use turno_persistence::{AppliedTransition, Persistence};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_transition_error,
};
use crate::request_response::{
    AssignTitularRequest, AuditEventInfo, CoverageTransitionRequest, CoverageTransitionResponse,
    CreateSlotRequest, DailyViewEntry, DailyViewResponse, DayRecordInfo, ExtraShiftInfo,
    GenerateMonthRequest, GenerateMonthResponse, ListSlotsResponse, MarkPaidRequest,
    MarkPaidResponse, RecordHistoryResponse, SlotInfo, UnpaidExtraShiftsResponse,
};

const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]");

fn parse_date(value: &str) -> Result<Date, ApiError> {
    Date::parse(value, &DATE_FORMAT).map_err(|e| ApiError::InvalidInput {
        field: String::from("date"),
        message: format!("Cannot parse date '{value}': {e}"),
    })
}

fn parse_installation(value: Option<&str>) -> Result<Option<InstallationId>, ApiError> {
    value
        .map(InstallationId::new)
        .transpose()
        .map_err(translate_domain_error)
}

/// Builds the audit cause for a transition request.
///
/// The caller's request ID rides along so replays are diagnosable from the
/// trail; callers that send none get a fixed marker.
fn cause_from_request(request: &CoverageTransitionRequest) -> Cause {
    Cause::new(
        request
            .request_id
            .clone()
            .unwrap_or_else(|| String::from("unspecified")),
        format!("Coverage transition '{}' requested", request.action),
    )
}

/// Translates a transition request's action into a core command.
fn parse_command(request: &CoverageTransitionRequest) -> Result<Command, ApiError> {
    let covering_guard = || -> Result<GuardId, ApiError> {
        let value: &str = request.covering_guard.as_deref().ok_or_else(|| {
            ApiError::InvalidInput {
                field: String::from("covering_guard"),
                message: format!("'{}' requires a covering guard", request.action),
            }
        })?;
        GuardId::new(value).map_err(translate_domain_error)
    };
    let amount_cents = || -> Result<i64, ApiError> {
        let amount: i64 = request.amount_cents.ok_or_else(|| ApiError::InvalidInput {
            field: String::from("amount_cents"),
            message: format!("'{}' requires an amount", request.action),
        })?;
        if amount <= 0 {
            return Err(ApiError::InvalidInput {
                field: String::from("amount_cents"),
                message: format!("amount must be positive, got {amount}"),
            });
        }
        Ok(amount)
    };

    match request.action.as_str() {
        "mark_worked" => Ok(Command::MarkWorked),
        "mark_replaced" => Ok(Command::MarkReplaced {
            covering_guard: covering_guard()?,
            amount_cents: amount_cents()?,
        }),
        "mark_uncovered" => Ok(Command::MarkUncovered),
        "mark_no_show" => Ok(Command::MarkNoShow),
        "assign_coverage" => Ok(Command::AssignCoverage {
            guard: covering_guard()?,
            amount_cents: amount_cents()?,
        }),
        "unassign_coverage" => Ok(Command::UnassignCoverage),
        "undo" => Ok(Command::Undo),
        other => Err(ApiError::InvalidInput {
            field: String::from("action"),
            message: format!("Unknown transition action: '{other}'"),
        }),
    }
}

/// Registers a new slot.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the request is invalid,
/// or persistence fails.
pub fn create_slot(
    persistence: &mut Persistence,
    request: &CreateSlotRequest,
    actor: &AuthenticatedActor,
) -> Result<SlotInfo, ApiError> {
    AuthorizationService::authorize_manage_slots(actor)?;

    let anchor: Date = parse_date(&request.pattern_anchor)?;
    let pattern: RolePattern = RolePattern::new(
        request.work_days,
        request.rest_days,
        request.shift_hours,
        request.shift_start.clone(),
        request.shift_end.clone(),
        anchor,
    )
    .map_err(translate_domain_error)?;
    let slot: Slot = Slot::new(
        InstallationId::new(&request.installation_id).map_err(translate_domain_error)?,
        RolePatternId(request.role_pattern_id.clone()),
        pattern,
    );

    let created: Slot = persistence
        .create_slot(&slot)
        .map_err(translate_persistence_error)?;
    info!(
        slot_id = created.slot_id.map_or(0, |id| id.0),
        installation = %request.installation_id,
        actor = %actor.id,
        "Slot registered"
    );
    Ok(SlotInfo::from_slot(&created))
}

/// Lists slots, optionally filtered by installation.
///
/// # Errors
///
/// Returns an error if the filter is invalid or persistence fails.
pub fn list_slots(
    persistence: &mut Persistence,
    installation: Option<&str>,
) -> Result<ListSlotsResponse, ApiError> {
    let filter: Option<InstallationId> = parse_installation(installation)?;
    let slots: Vec<Slot> = persistence
        .list_slots(filter.as_ref())
        .map_err(translate_persistence_error)?;
    Ok(ListSlotsResponse {
        slots: slots.iter().map(SlotInfo::from_slot).collect(),
    })
}

/// Assigns a titular guard to a slot.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the slot does not exist,
/// or the slot already has a different titular guard.
pub fn assign_titular(
    persistence: &mut Persistence,
    slot_id: i64,
    request: &AssignTitularRequest,
    actor: &AuthenticatedActor,
) -> Result<SlotInfo, ApiError> {
    AuthorizationService::authorize_manage_slots(actor)?;

    let guard: GuardId = GuardId::new(&request.guard_id).map_err(translate_domain_error)?;
    let slot: Slot = persistence
        .assign_titular(slot_id, &guard)
        .map_err(translate_persistence_error)?;
    info!(slot_id, guard = guard.value(), actor = %actor.id, "Titular assigned");
    Ok(SlotInfo::from_slot(&slot))
}

/// Clears a slot's titular guard, returning it to pending coverage.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin or the slot does not exist.
pub fn clear_titular(
    persistence: &mut Persistence,
    slot_id: i64,
    actor: &AuthenticatedActor,
) -> Result<SlotInfo, ApiError> {
    AuthorizationService::authorize_manage_slots(actor)?;

    let slot: Slot = persistence
        .clear_titular(slot_id)
        .map_err(translate_persistence_error)?;
    info!(slot_id, actor = %actor.id, "Titular cleared");
    Ok(SlotInfo::from_slot(&slot))
}

/// Deactivates a slot.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the slot does not exist,
/// or the slot still has open obligations.
pub fn deactivate_slot(
    persistence: &mut Persistence,
    slot_id: i64,
    actor: &AuthenticatedActor,
) -> Result<SlotInfo, ApiError> {
    AuthorizationService::authorize_manage_slots(actor)?;

    let slot: Slot = persistence
        .deactivate_slot(slot_id)
        .map_err(translate_persistence_error)?;
    info!(slot_id, actor = %actor.id, "Slot deactivated");
    Ok(SlotInfo::from_slot(&slot))
}

/// Generates (or completes) a slot's monthly plan.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the slot does not exist,
/// or the year/month is out of range.
pub fn generate_month(
    persistence: &mut Persistence,
    request: &GenerateMonthRequest,
    actor: &AuthenticatedActor,
) -> Result<GenerateMonthResponse, ApiError> {
    AuthorizationService::authorize_generate_plan(actor)?;

    let records = persistence
        .generate_month(request.slot_id, request.year, request.month)
        .map_err(translate_transition_error)?;
    info!(
        slot_id = request.slot_id,
        year = request.year,
        month = request.month,
        days = records.len(),
        actor = %actor.id,
        "Monthly plan generated"
    );
    Ok(GenerateMonthResponse {
        slot_id: request.slot_id,
        year: request.year,
        month: request.month,
        days: records.iter().map(DayRecordInfo::from_record).collect(),
    })
}

/// Applies a coverage transition to a (slot, date).
///
/// # Errors
///
/// Returns an error if the request is invalid, the state machine rejects
/// the transition, or persistence fails.
pub fn apply_coverage_transition(
    persistence: &mut Persistence,
    request: &CoverageTransitionRequest,
    actor: &AuthenticatedActor,
) -> Result<CoverageTransitionResponse, ApiError> {
    AuthorizationService::authorize_coverage_transition(actor)?;

    let date: Date = parse_date(&request.date)?;
    let command: Command = parse_command(request)?;
    let cause: Cause = cause_from_request(request);

    let applied: AppliedTransition = persistence
        .apply_transition(
            request.slot_id,
            date,
            &command,
            actor.to_audit_actor(),
            cause,
            request.note.clone(),
            request.expected_version,
        )
        .map_err(translate_transition_error)?;
    info!(
        slot_id = request.slot_id,
        date = %request.date,
        action = %request.action,
        event_id = applied.event_id,
        actor = %actor.id,
        "Coverage transition applied"
    );

    Ok(CoverageTransitionResponse {
        record: DayRecordInfo::from_record(&applied.record),
        event_id: applied.event_id,
        extra_shift: applied
            .extra_shift
            .as_ref()
            .map(ExtraShiftInfo::from_extra_shift),
    })
}

/// Builds the daily coverage view.
///
/// # Errors
///
/// Returns an error if the date or filter is invalid, or persistence fails.
pub fn daily_view(
    persistence: &mut Persistence,
    date: &str,
    installation: Option<&str>,
) -> Result<DailyViewResponse, ApiError> {
    let parsed: Date = parse_date(date)?;
    let filter: Option<InstallationId> = parse_installation(installation)?;

    let rows = persistence
        .daily_view(parsed, filter.as_ref())
        .map_err(translate_persistence_error)?;
    Ok(DailyViewResponse {
        date: date.to_string(),
        rows: rows.iter().map(DailyViewEntry::from_row).collect(),
    })
}

/// Lists unpaid extra shifts for payment batching, optionally filtered by
/// installation.
///
/// # Errors
///
/// Returns an error if the installation filter is invalid or persistence
/// fails.
pub fn list_unpaid_extra_shifts(
    persistence: &mut Persistence,
    installation: Option<&str>,
) -> Result<UnpaidExtraShiftsResponse, ApiError> {
    let filter: Option<InstallationId> = parse_installation(installation)?;
    let entries = persistence
        .list_unpaid_extra_shifts(filter.as_ref())
        .map_err(translate_persistence_error)?;
    Ok(UnpaidExtraShiftsResponse {
        extra_shifts: entries.iter().map(ExtraShiftInfo::from_extra_shift).collect(),
    })
}

/// Marks a batch of extra shifts paid. All-or-none.
///
/// # Errors
///
/// Returns an error if the actor is not an Admin, the request is empty, or
/// any listed entry is missing or already paid.
pub fn mark_extra_shifts_paid(
    persistence: &mut Persistence,
    request: &MarkPaidRequest,
    actor: &AuthenticatedActor,
) -> Result<MarkPaidResponse, ApiError> {
    AuthorizationService::authorize_mark_paid(actor)?;

    if request.payment_batch.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("payment_batch"),
            message: String::from("payment batch reference must not be empty"),
        });
    }
    if request.extra_shift_ids.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("extra_shift_ids"),
            message: String::from("at least one extra shift is required"),
        });
    }

    let paid: usize = persistence
        .mark_extra_shifts_paid(&request.payment_batch, &request.extra_shift_ids)
        .map_err(translate_persistence_error)?;
    info!(
        payment_batch = %request.payment_batch,
        paid,
        actor = %actor.id,
        "Extra shifts marked paid"
    );
    Ok(MarkPaidResponse {
        payment_batch: request.payment_batch.clone(),
        paid_count: paid,
    })
}

/// Lists the audit events for a (slot, date) record, oldest first.
///
/// # Errors
///
/// Returns an error if the date is invalid, the record does not exist, or
/// persistence fails.
pub fn record_history(
    persistence: &mut Persistence,
    slot_id: i64,
    date: &str,
) -> Result<RecordHistoryResponse, ApiError> {
    let parsed: Date = parse_date(date)?;
    let entries = persistence
        .record_history(slot_id, parsed)
        .map_err(translate_persistence_error)?;
    Ok(RecordHistoryResponse {
        slot_id,
        date: date.to_string(),
        events: entries.iter().map(AuditEventInfo::from_entry).collect(),
    })
}

/// Loads one audit event by ID.
///
/// # Errors
///
/// Returns an error if the event does not exist or persistence fails.
pub fn get_audit_event(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    let entry = persistence
        .get_audit_event(event_id)
        .map_err(translate_persistence_error)?;
    Ok(AuditEventInfo::from_entry(&entry))
}
