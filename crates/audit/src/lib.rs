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

use serde::{Deserialize, Serialize};
use turno_domain::{GuardId, OutcomeStatus, PlannedStatus};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change.
/// This could be an operator, a system process, or an automated trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "admin", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated. The `id` carries the
/// caller's request identifier, which makes replayed requests diagnosable
/// from the audit trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`MarkWorked`", "`AssignCoverage`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A snapshot of one day-slot record at a point in time.
///
/// Before/after snapshots are structured rather than free text because undo
/// correctness checks and operator history screens read them back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    /// The baseline status from the monthly plan.
    pub planned_status: PlannedStatus,
    /// The resolved outcome at snapshot time.
    pub outcome_status: OutcomeStatus,
    /// The guard working the day at snapshot time, if any.
    pub working_guard: Option<GuardId>,
    /// The record's optimistic concurrency version at snapshot time.
    pub version: i64,
}

impl RecordSnapshot {
    /// Creates a new `RecordSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `planned_status` - The baseline status
    /// * `outcome_status` - The resolved outcome
    /// * `working_guard` - The guard working the day, if any
    /// * `version` - The record version
    #[must_use]
    pub const fn new(
        planned_status: PlannedStatus,
        outcome_status: OutcomeStatus,
        working_guard: Option<GuardId>,
        version: i64,
    ) -> Self {
        Self {
            planned_status,
            outcome_status,
            working_guard,
            version,
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful transition must produce exactly one audit event. Audit
/// events are immutable once created and capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - The record before the transition (before)
/// - The record after the transition (after)
///
/// Undo transitions produce their own audit event; the reverted event is
/// never mutated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The record state before the transition.
    pub before: RecordSnapshot,
    /// The record state after the transition.
    pub after: RecordSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The record state before the transition
    /// * `after` - The record state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: RecordSnapshot,
        after: RecordSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}
