// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;
use turno_api::{
    ApiError, AssignTitularRequest, AuditEventInfo, AuthenticatedActor, CoverageTransitionRequest,
    CoverageTransitionResponse, CreateSlotRequest, DailyViewResponse, GenerateMonthRequest,
    GenerateMonthResponse, ListSlotsResponse, MarkPaidRequest, MarkPaidResponse,
    RecordHistoryResponse, Role, SlotInfo, UnpaidExtraShiftsResponse, apply_coverage_transition,
    assign_titular, authenticate, clear_titular, create_slot, daily_view, deactivate_slot,
    generate_month, get_audit_event, list_slots, list_unpaid_extra_shifts,
    mark_extra_shifts_paid, record_history,
};
use turno_persistence::Persistence;

/// Turno Server - HTTP server for the shift coverage system
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for the registry, records, ledger, and audit trail.
    persistence: Arc<Mutex<Persistence>>,
}

/// API request for registering a slot.
///
/// This includes authentication information in addition to the slot data.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateSlotApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The installation the slot belongs to.
    installation_id: String,
    /// Master-data reference for the role pattern.
    role_pattern_id: String,
    /// Consecutive work days per cycle.
    work_days: u8,
    /// Consecutive rest days per cycle.
    rest_days: u8,
    /// Shift length in hours.
    shift_hours: u8,
    /// Daily shift start, `HH:MM`.
    shift_start: String,
    /// Daily shift end, `HH:MM`.
    shift_end: String,
    /// First work day of a cycle, ISO 8601 (`YYYY-MM-DD`).
    pattern_anchor: String,
}

/// API request for assigning a titular guard to a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AssignTitularApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The guard to assign.
    guard_id: String,
}

/// API request for actions that carry no payload beyond the actor.
///
/// Used for clearing a titular and deactivating a slot.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// API request for generating a slot's monthly plan.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct GenerateMonthApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The slot to plan.
    slot_id: i64,
    /// The calendar year.
    year: i32,
    /// The calendar month (1-12).
    month: u8,
}

/// API request for applying a coverage transition.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CoverageTransitionApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The slot to transition.
    slot_id: i64,
    /// The date to transition, ISO 8601 (`YYYY-MM-DD`).
    date: String,
    /// The transition to apply.
    action: String,
    /// The covering guard, required by `mark_replaced` and `assign_coverage`.
    covering_guard: Option<String>,
    /// The payable amount in cents, required by `mark_replaced` and
    /// `assign_coverage`.
    amount_cents: Option<i64>,
    /// Optional operator note stored in the record's metadata.
    note: Option<String>,
    /// If set, the transition fails with a conflict unless the record is
    /// still at this version.
    expected_version: Option<i64>,
    /// Caller's request identifier, carried into the audit trail.
    request_id: Option<String>,
}

/// API request for marking a batch of extra shifts paid.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct MarkPaidApiRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The payment batch reference.
    payment_batch: String,
    /// The entries to pay. All-or-none.
    extra_shift_ids: Vec<i64>,
}

/// Query parameters for GET `/slots`.
#[derive(Debug, Clone, Deserialize)]
struct ListSlotsQuery {
    /// Optional installation filter.
    installation: Option<String>,
}

/// Query parameters for GET `/coverage/daily`.
#[derive(Debug, Clone, Deserialize)]
struct DailyViewQuery {
    /// The date to view, ISO 8601 (`YYYY-MM-DD`).
    date: String,
    /// Optional installation filter.
    installation: Option<String>,
}

/// Query parameters for GET `/extra_shifts/unpaid`.
#[derive(Debug, Clone, Deserialize)]
struct UnpaidExtraShiftsQuery {
    /// Optional installation filter.
    installation: Option<String>,
}

/// Query parameters for GET `/audit/record`.
#[derive(Debug, Clone, Deserialize)]
struct RecordHistoryQuery {
    /// The slot the record belongs to.
    slot_id: i64,
    /// The record's date, ISO 8601 (`YYYY-MM-DD`).
    date: String,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::InvalidTransition { .. } => Self {
                status: StatusCode::UNPROCESSABLE_ENTITY,
                message: err.to_string(),
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: err.to_string(),
            },
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str.to_lowercase().as_str() {
        "admin" => Ok(Role::Admin),
        "operator" => Ok(Role::Operator),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: '{role_str}'. Must be 'admin' or 'operator'"),
        }),
    }
}

/// Parses and authenticates the actor carried in a request body.
fn authenticate_request(actor_id: &str, actor_role: &str) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(actor_role)?;
    authenticate(actor_id.to_string(), role).map_err(|e| HttpError {
        status: StatusCode::UNAUTHORIZED,
        message: e.to_string(),
    })
}

/// Handler for POST `/slots` endpoint.
///
/// Registers a new slot in pending-coverage state.
async fn handle_create_slot(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateSlotApiRequest>,
) -> Result<Json<SlotInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        installation_id = %req.installation_id,
        "Handling create_slot request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let create_request: CreateSlotRequest = CreateSlotRequest {
        installation_id: req.installation_id,
        role_pattern_id: req.role_pattern_id,
        work_days: req.work_days,
        rest_days: req.rest_days,
        shift_hours: req.shift_hours,
        shift_start: req.shift_start,
        shift_end: req.shift_end,
        pattern_anchor: req.pattern_anchor,
    };

    let mut persistence = app_state.persistence.lock().await;
    let slot: SlotInfo = create_slot(&mut persistence, &create_request, &actor)?;
    drop(persistence);

    info!(slot_id = slot.slot_id, "Successfully created slot");

    Ok(Json(slot))
}

/// Handler for GET `/slots` endpoint.
///
/// Lists slots, optionally filtered by installation.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListSlotsQuery>,
) -> Result<Json<ListSlotsResponse>, HttpError> {
    info!("Handling list_slots request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListSlotsResponse = list_slots(&mut persistence, query.installation.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/slots/{slot_id}/titular` endpoint.
///
/// Assigns a titular guard to a slot.
async fn handle_assign_titular(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<AssignTitularApiRequest>,
) -> Result<Json<SlotInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        slot_id = slot_id,
        guard_id = %req.guard_id,
        "Handling assign_titular request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let assign_request: AssignTitularRequest = AssignTitularRequest {
        guard_id: req.guard_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let slot: SlotInfo = assign_titular(&mut persistence, slot_id, &assign_request, &actor)?;
    drop(persistence);

    info!(slot_id = slot_id, "Successfully assigned titular");

    Ok(Json(slot))
}

/// Handler for DELETE `/slots/{slot_id}/titular` endpoint.
///
/// Clears a slot's titular guard, returning the slot to pending coverage.
async fn handle_clear_titular(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<SlotInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        slot_id = slot_id,
        "Handling clear_titular request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let slot: SlotInfo = clear_titular(&mut persistence, slot_id, &actor)?;
    drop(persistence);

    info!(slot_id = slot_id, "Successfully cleared titular");

    Ok(Json(slot))
}

/// Handler for POST `/slots/{slot_id}/deactivate` endpoint.
///
/// Deactivates a slot. The slot must have no titular and no unpaid extra shifts.
async fn handle_deactivate_slot(
    AxumState(app_state): AxumState<AppState>,
    Path(slot_id): Path<i64>,
    Json(req): Json<ActorApiRequest>,
) -> Result<Json<SlotInfo>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        slot_id = slot_id,
        "Handling deactivate_slot request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let mut persistence = app_state.persistence.lock().await;
    let slot: SlotInfo = deactivate_slot(&mut persistence, slot_id, &actor)?;
    drop(persistence);

    info!(slot_id = slot_id, "Successfully deactivated slot");

    Ok(Json(slot))
}

/// Handler for POST `/plan/generate` endpoint.
///
/// Generates (or completes) a slot's monthly plan.
async fn handle_generate_month(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<GenerateMonthApiRequest>,
) -> Result<Json<GenerateMonthResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        slot_id = req.slot_id,
        year = req.year,
        month = req.month,
        "Handling generate_month request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let generate_request: GenerateMonthRequest = GenerateMonthRequest {
        slot_id: req.slot_id,
        year: req.year,
        month: req.month,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: GenerateMonthResponse =
        generate_month(&mut persistence, &generate_request, &actor)?;
    drop(persistence);

    info!(
        slot_id = req.slot_id,
        days = response.days.len(),
        "Successfully generated monthly plan"
    );

    Ok(Json(response))
}

/// Handler for POST `/coverage/transition` endpoint.
///
/// Applies a coverage transition to a (slot, date) record.
async fn handle_coverage_transition(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CoverageTransitionApiRequest>,
) -> Result<Json<CoverageTransitionResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        slot_id = req.slot_id,
        date = %req.date,
        action = %req.action,
        "Handling coverage_transition request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let transition_request: CoverageTransitionRequest = CoverageTransitionRequest {
        slot_id: req.slot_id,
        date: req.date,
        action: req.action,
        covering_guard: req.covering_guard,
        amount_cents: req.amount_cents,
        note: req.note,
        expected_version: req.expected_version,
        request_id: req.request_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CoverageTransitionResponse =
        apply_coverage_transition(&mut persistence, &transition_request, &actor)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        slot_id = response.record.slot_id,
        "Successfully applied coverage transition"
    );

    Ok(Json(response))
}

/// Handler for GET `/coverage/daily` endpoint.
///
/// Returns the derived daily coverage view for a date.
async fn handle_daily_view(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<DailyViewQuery>,
) -> Result<Json<DailyViewResponse>, HttpError> {
    info!(date = %query.date, "Handling daily_view request");

    let mut persistence = app_state.persistence.lock().await;
    let response: DailyViewResponse =
        daily_view(&mut persistence, &query.date, query.installation.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/extra_shifts/unpaid` endpoint.
///
/// Lists unpaid extra-shift ledger entries, oldest first.
async fn handle_list_unpaid_extra_shifts(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<UnpaidExtraShiftsQuery>,
) -> Result<Json<UnpaidExtraShiftsResponse>, HttpError> {
    info!("Handling list_unpaid_extra_shifts request");

    let mut persistence = app_state.persistence.lock().await;
    let response: UnpaidExtraShiftsResponse =
        list_unpaid_extra_shifts(&mut persistence, query.installation.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/extra_shifts/mark_paid` endpoint.
///
/// Marks a batch of extra shifts paid. All-or-none.
async fn handle_mark_extra_shifts_paid(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<MarkPaidApiRequest>,
) -> Result<Json<MarkPaidResponse>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        role = %req.actor_role,
        payment_batch = %req.payment_batch,
        count = req.extra_shift_ids.len(),
        "Handling mark_extra_shifts_paid request"
    );

    let actor: AuthenticatedActor = authenticate_request(&req.actor_id, &req.actor_role)?;

    let mark_request: MarkPaidRequest = MarkPaidRequest {
        payment_batch: req.payment_batch,
        extra_shift_ids: req.extra_shift_ids,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: MarkPaidResponse = mark_extra_shifts_paid(&mut persistence, &mark_request, &actor)?;
    drop(persistence);

    info!(
        payment_batch = %response.payment_batch,
        paid_count = response.paid_count,
        "Successfully marked extra shifts paid"
    );

    Ok(Json(response))
}

/// Handler for GET `/audit/record` endpoint.
///
/// Returns the full audit history of a (slot, date) record, oldest first.
async fn handle_record_history(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RecordHistoryQuery>,
) -> Result<Json<RecordHistoryResponse>, HttpError> {
    info!(
        slot_id = query.slot_id,
        date = %query.date,
        "Handling record_history request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response: RecordHistoryResponse =
        record_history(&mut persistence, query.slot_id, &query.date)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/event/{event_id}` endpoint.
///
/// Returns a single audit event by ID.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    info!(event_id = event_id, "Handling get_audit_event request");

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventInfo = get_audit_event(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/slots", post(handle_create_slot))
        .route("/slots", get(handle_list_slots))
        .route("/slots/{slot_id}/titular", post(handle_assign_titular))
        .route("/slots/{slot_id}/titular", delete(handle_clear_titular))
        .route("/slots/{slot_id}/deactivate", post(handle_deactivate_slot))
        .route("/plan/generate", post(handle_generate_month))
        .route("/coverage/transition", post(handle_coverage_transition))
        .route("/coverage/daily", get(handle_daily_view))
        .route("/extra_shifts/unpaid", get(handle_list_unpaid_extra_shifts))
        .route("/extra_shifts/mark_paid", post(handle_mark_extra_shifts_paid))
        .route("/audit/record", get(handle_record_history))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Turno Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
