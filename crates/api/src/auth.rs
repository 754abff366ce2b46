// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use evreg_audit::Actor;
use evreg_domain::ParticipantId;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Identity verification happens upstream in the platform gateway; by
/// the time a request reaches this layer the actor id and role are
/// already trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Participant role: ordinary attendees of the platform.
    ///
    /// Participants may:
    /// - register for published events
    /// - place merchandise orders
    /// - form, join, and leave teams
    /// - view their own tickets, orders, teams, and invites
    Participant,
    /// Organizer role: actors who run events.
    ///
    /// Organizers may additionally:
    /// - create events and configure their capacity
    /// - publish and close events
    /// - decide pending orders
    /// - scan tickets at the door
    /// - view the orders, teams, and audit trail of their own events
    Organizer,
}

/// An authenticated actor with an associated role.
///
/// This represents a platform user whose identity was verified upstream
/// and who may perform certain actions based on their role.
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
    /// to the authenticated platform user.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        let actor_type: String = match self.role {
            Role::Participant => String::from("participant"),
            Role::Organizer => String::from("organizer"),
        };
        Actor::new(self.id.clone(), actor_type)
    }

    /// Returns this actor's identity as a domain participant id.
    #[must_use]
    pub fn participant_id(&self) -> ParticipantId {
        ParticipantId::new(&self.id)
    }
}

/// Authorization service for enforcing role-based access control.
///
/// This service determines whether an authenticated actor has permission
/// to perform a specific action based on their role.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor is authorized to create an event.
    ///
    /// Only Organizer actors may create events.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_create_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("create_event"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to add a merchandise variant.
    ///
    /// Only Organizer actors may add variants.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_add_variant(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("add_variant"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to publish an event.
    ///
    /// Only Organizer actors may publish events.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_publish_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("publish_event"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to close an event.
    ///
    /// Only Organizer actors may close events.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_close_event(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("close_event"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to decide a pending order.
    ///
    /// Only Organizer actors may approve or reject orders. Ownership of
    /// the order's event is enforced separately by the core operation.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_decide_order(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("decide_order"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to scan a ticket.
    ///
    /// Only Organizer actors may scan tickets at the door.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_scan_ticket(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("scan_ticket"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to view the records of an event.
    ///
    /// Only Organizer actors may list an event's orders, teams, and
    /// audit trail. Ownership of the event is enforced by the handler.
    ///
    /// # Arguments
    ///
    /// * `actor` - The authenticated actor
    ///
    /// # Errors
    ///
    /// Returns an error if the actor does not have the Organizer role.
    pub fn authorize_view_event_records(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        match actor.role {
            Role::Organizer => Ok(()),
            Role::Participant => Err(AuthError::Unauthorized {
                action: String::from("view_event_records"),
                required_role: String::from("Organizer"),
            }),
        }
    }

    /// Checks if an actor is authorized to use the self-service surface.
    ///
    /// # Errors
    ///
    /// Never fails. Registration, ordering, and team formation are open
    /// to every authenticated actor; record-level checks live in the
    /// core operations.
    pub const fn authorize_self_service(_actor: &AuthenticatedActor) -> Result<(), AuthError> {
        // Both Participant and Organizer may act on their own behalf
        Ok(())
    }
}
