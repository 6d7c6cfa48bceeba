// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authorization types and services.

use thiserror::Error;
use turno_audit::Actor;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Roles apply to system operators, never to the guards they schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: operators with structural authority.
    ///
    /// Admins may perform:
    /// - slot registration, staffing, and deactivation
    /// - monthly plan generation
    /// - payment batching
    /// - everything an operator may do
    Admin,
    /// Operator role: day-to-day coverage operators.
    ///
    /// Operators resolve daily coverage: mark days worked, replaced,
    /// uncovered, or no-show, assign and unassign coverage, and undo.
    Operator,
}

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The actor does not have the role the action requires.
    #[error("Unauthorized: '{action}' requires {required_role} role")]
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The actor could not be authenticated.
    #[error("Authentication failed: {reason}")]
    AuthenticationFailed {
        /// Why authentication failed.
        reason: String,
    },
}

/// An authenticated actor with an associated role.
///
/// Authentication itself happens upstream; this type represents its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    ///
    /// This is used when recording audit events to attribute actions
    /// to the authenticated operator.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Admin => String::from("admin"),
            Role::Operator => String::from("operator"),
        };
        Actor::new(self.id.clone(), actor_type)
    }
}

/// Authenticates an actor by identifier and role.
///
/// There is no credential store yet; callers supply the role alongside the
/// identifier and this validates the identifier shape.
///
/// # Arguments
///
/// * `actor_id` - The unique identifier for the actor
/// * `role` - The role claimed by the actor
///
/// # Errors
///
/// Returns an error if the actor identifier is empty.
pub fn authenticate(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    fn require_admin(actor: &AuthenticatedActor, action: &str) -> Result<(), AuthError> {
        match actor.role {
            Role::Admin => Ok(()),
            Role::Operator => Err(AuthError::Unauthorized {
                action: action.to_string(),
                required_role: String::from("Admin"),
            }),
        }
    }

    /// Checks if an actor is authorized to manage the slot registry
    /// (create slots, assign or clear titulars, deactivate).
    ///
    /// Only Admin actors may manage slots.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_manage_slots(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "manage_slots")
    }

    /// Checks if an actor is authorized to generate monthly plans.
    ///
    /// Only Admin actors may generate plans.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_generate_plan(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "generate_plan")
    }

    /// Checks if an actor is authorized to apply coverage transitions.
    ///
    /// Both Admin and Operator actors may resolve daily coverage.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have permission.
    pub const fn authorize_coverage_transition(
        _actor: &AuthenticatedActor,
    ) -> Result<(), AuthError> {
        // Both roles resolve daily coverage
        Ok(())
    }

    /// Checks if an actor is authorized to mark extra shifts paid.
    ///
    /// Only Admin actors may batch payments.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Admin role.
    pub fn authorize_mark_paid(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        Self::require_admin(actor, "mark_extra_shifts_paid")
    }
}
