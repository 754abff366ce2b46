// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Organizer-facing event configuration.
//!
//! These operations cover the capacity-relevant slice of an event:
//! creation with limits, stock, and deadlines, variant setup while the
//! event is still in draft, and the `draft -> published -> closed`
//! lifecycle. Everything else about an event lives outside this core.

use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::{
    Event, EventId, EventKind, EventPhase, ParticipantId, ParticipationMode, Variant,
    format_timestamp, validate_capacity_config, validate_event_name, validate_team_size,
    validate_variant_config,
};
use evreg_persistence::data_models::{NewEvent, NewVariant};
use evreg_persistence::{Persistence, mutations, queries};
use time::OffsetDateTime;
use tracing::info;

use crate::error::CoreError;
use crate::timestamp_now;

/// Capacity configuration for a new event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventConfig {
    /// Display name.
    pub name: String,
    /// The kind of event.
    pub kind: EventKind,
    /// Maximum number of registrations. 0 means unlimited.
    pub registration_limit: i64,
    /// Base stock for merch events with no variants. `None` elsewhere.
    pub stock: Option<i64>,
    /// Base fee in minor currency units.
    pub fee: i64,
    /// How hackathon participants take part.
    pub participation_mode: ParticipationMode,
    /// Default team size for team-mode hackathons.
    pub team_size: Option<i64>,
    /// Registrations and orders are rejected after this instant.
    pub registration_deadline: Option<OffsetDateTime>,
}

/// Configuration for a new merchandise variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantConfig {
    /// Display name (e.g., "Hoodie L / Black").
    pub name: String,
    /// Initial stock.
    pub stock: i64,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Maximum cumulative quantity one participant may be allocated.
    /// 0 means no per-participant limit.
    pub per_participant_limit: i64,
}

fn event_snapshot(event: &Event) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "name": event.name,
            "kind": event.kind.as_str(),
            "phase": event.phase.as_str(),
            "registration_limit": event.registration_limit,
            "stock": event.stock,
        })
        .to_string(),
    )
}

fn variant_snapshot(variant: &Variant) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "name": variant.name,
            "stock": variant.stock,
            "price": variant.price,
            "per_participant_limit": variant.per_participant_limit,
        })
        .to_string(),
    )
}

fn phase_snapshot(phase: EventPhase) -> StateSnapshot {
    StateSnapshot::new(serde_json::json!({ "phase": phase.as_str() }).to_string())
}

/// Creates an event in the `Draft` phase.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `organizer` - The organizer who will own the event
/// * `config` - The event's capacity configuration
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The created event.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] or [`CoreError::DomainViolation`]
/// if the configuration is inconsistent, or a persistence error if the
/// insert fails.
pub fn create_event(
    persistence: &mut Persistence,
    organizer: &ParticipantId,
    config: EventConfig,
    actor: Actor,
    cause: Cause,
) -> Result<Event, CoreError> {
    validate_event_name(&config.name)?;
    validate_capacity_config(config.registration_limit, config.stock, config.fee)?;

    if config.participation_mode == ParticipationMode::Team && config.kind != EventKind::Hackathon {
        return Err(CoreError::Validation(String::from(
            "Only hackathon events form teams",
        )));
    }
    if config.stock.is_some() && config.kind != EventKind::Merch {
        return Err(CoreError::Validation(String::from(
            "Only merchandise events carry stock",
        )));
    }
    if let Some(size) = config.team_size {
        if config.kind != EventKind::Hackathon
            || config.participation_mode != ParticipationMode::Team
        {
            return Err(CoreError::Validation(String::from(
                "Only team-mode hackathons set a team size",
            )));
        }
        validate_team_size(size)?;
    }

    let registration_deadline: Option<String> = match config.registration_deadline {
        Some(deadline) => Some(format_timestamp(deadline)?),
        None => None,
    };

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let row: NewEvent = NewEvent {
            name: config.name,
            kind: config.kind.as_str().to_string(),
            phase: EventPhase::Draft.as_str().to_string(),
            organizer_id: organizer.value().to_string(),
            registration_limit: config.registration_limit,
            stock: config.stock,
            fee: config.fee,
            participation_mode: config.participation_mode.as_str().to_string(),
            team_size: config.team_size,
            registration_deadline,
            created_at: recorded_at.clone(),
        };

        let event_id: i64 = mutations::events::insert_event(conn, &row)?;
        let event: Event = queries::events::get_event(conn, event_id)?;

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("CreateEvent"),
                Some(format!("kind={}", event.kind)),
            ),
            Some(event.id),
            StateSnapshot::none(),
            event_snapshot(&event),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(event = %event.id, kind = %event.kind, "Created event");

        Ok(event)
    })
}

/// Adds a merchandise variant to a draft merch event.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to add the variant to
/// * `organizer` - The requesting organizer
/// * `config` - The variant configuration
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The created variant.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event does not exist or is
/// not owned by `organizer`, [`CoreError::Validation`] if the event is
/// not a merch event or the configuration is invalid, and
/// [`CoreError::Conflict`] if the event has left the draft phase.
pub fn add_variant(
    persistence: &mut Persistence,
    event_id: EventId,
    organizer: &ParticipantId,
    config: VariantConfig,
    actor: Actor,
    cause: Cause,
) -> Result<Variant, CoreError> {
    validate_variant_config(
        &config.name,
        config.stock,
        config.price,
        config.per_participant_limit,
    )?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id.value())?;
        if event.organizer != *organizer {
            return Err(CoreError::NotFound(format!("Event {event_id}")));
        }
        if event.kind != EventKind::Merch {
            return Err(CoreError::Validation(String::from(
                "Only merchandise events have variants",
            )));
        }
        if event.phase != EventPhase::Draft {
            return Err(CoreError::Conflict(format!(
                "Variants can only be added while event {event_id} is in draft"
            )));
        }

        let row: NewVariant = NewVariant {
            event_id: event_id.value(),
            name: config.name,
            stock: config.stock,
            price: config.price,
            per_participant_limit: config.per_participant_limit,
        };

        let variant_id: i64 = mutations::events::insert_variant(conn, &row)?;
        let variant: Variant = queries::events::get_variant(conn, variant_id)?;

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("AddVariant"),
                Some(format!("name={}", variant.name)),
            ),
            Some(event_id),
            StateSnapshot::none(),
            variant_snapshot(&variant),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(event = %event_id, variant = variant.id.value(), "Added variant");

        Ok(variant)
    })
}

struct PhaseShift {
    from: EventPhase,
    to: EventPhase,
    action: &'static str,
}

fn shift_phase(
    persistence: &mut Persistence,
    event_id: EventId,
    organizer: &ParticipantId,
    shift: &PhaseShift,
    actor: Actor,
    cause: Cause,
) -> Result<Event, CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id.value())?;
        if event.organizer != *organizer {
            return Err(CoreError::NotFound(format!("Event {event_id}")));
        }

        let flipped: bool = mutations::events::update_event_phase(
            conn,
            event_id.value(),
            shift.from.as_str(),
            shift.to.as_str(),
        )?;
        if !flipped {
            return Err(CoreError::Conflict(format!(
                "Event {event_id} is not in the {} phase",
                shift.from
            )));
        }

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(shift.action.to_string(), None),
            Some(event_id),
            phase_snapshot(shift.from),
            phase_snapshot(shift.to),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(event = %event_id, from = %shift.from, to = %shift.to, "Event phase shift");

        queries::events::get_event(conn, event_id.value()).map_err(CoreError::from)
    })
}

/// Moves an event from `Draft` to `Published`, opening it for
/// registration and ordering.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to publish
/// * `organizer` - The requesting organizer
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The published event.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event does not exist or is
/// not owned by `organizer`, and [`CoreError::Conflict`] if the event
/// is not in the draft phase.
pub fn publish_event(
    persistence: &mut Persistence,
    event_id: EventId,
    organizer: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Event, CoreError> {
    shift_phase(
        persistence,
        event_id,
        organizer,
        &PhaseShift {
            from: EventPhase::Draft,
            to: EventPhase::Published,
            action: "PublishEvent",
        },
        actor,
        cause,
    )
}

/// Moves an event from `Published` to `Closed`, ending all allocation
/// activity.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to close
/// * `organizer` - The requesting organizer
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The closed event.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event does not exist or is
/// not owned by `organizer`, and [`CoreError::Conflict`] if the event
/// is not in the published phase.
pub fn close_event(
    persistence: &mut Persistence,
    event_id: EventId,
    organizer: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Event, CoreError> {
    shift_phase(
        persistence,
        event_id,
        organizer,
        &PhaseShift {
            from: EventPhase::Published,
            to: EventPhase::Closed,
            action: "CloseEvent",
        },
        actor,
        cause,
    )
}
