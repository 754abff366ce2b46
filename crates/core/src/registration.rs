// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Individual event registration.

use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::{
    Event, EventId, ParticipantId, Ticket, TicketStatus, validate_participant_id,
};
use evreg_persistence::{Persistence, mutations, queries};
use time::OffsetDateTime;
use tracing::info;

use crate::error::CoreError;
use crate::tickets::{self, IssueOutcome, ticket_snapshot};
use crate::{timestamp_now, validate_registration_open};

/// Registers a participant for an event and issues their ticket.
///
/// Registration is idempotent: if the participant already holds a
/// ticket for the event, that ticket is returned unchanged and no new
/// allocation happens. A cancelled ticket blocks re-registration.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to register for
/// * `participant` - The registering participant
/// * `form_responses` - Registration form responses as JSON text
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The participant's ticket for the event.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event does not exist,
/// [`CoreError::Conflict`] if the event is not accepting registrations
/// or the participant's prior ticket was cancelled,
/// [`CoreError::Validation`] if the event registers through team
/// formation, and [`CoreError::Capacity`] if the registration limit is
/// reached.
pub fn register_for_event(
    persistence: &mut Persistence,
    event_id: EventId,
    participant: &ParticipantId,
    form_responses: Option<&str>,
    actor: Actor,
    cause: Cause,
) -> Result<Ticket, CoreError> {
    validate_participant_id(participant.value())?;

    let (now, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id.value())?;
        validate_registration_open(&event, now)?;
        if event.is_team_based() {
            return Err(CoreError::Validation(format!(
                "Event {event_id} registers through team formation"
            )));
        }

        if let Some(existing) = queries::tickets::find_ticket_for_participant(
            conn,
            event_id.value(),
            participant.value(),
        )? {
            if existing.status == TicketStatus::Cancelled {
                return Err(CoreError::Conflict(format!(
                    "Registration for event {event_id} was cancelled"
                )));
            }
            return Ok(existing);
        }

        let outcome: IssueOutcome = if event.registration_limit == 0 {
            tickets::issue_ticket(conn, &event, participant, None, form_responses, &recorded_at)?
        } else {
            tickets::issue_ticket_within_limit(
                conn,
                &event,
                participant,
                form_responses,
                &recorded_at,
            )?
        };

        if outcome.created {
            let audit: AuditEvent = AuditEvent::new(
                actor,
                cause,
                Action::new(
                    String::from("RegisterForEvent"),
                    Some(format!("ticket_ref={}", outcome.ticket.ticket_ref)),
                ),
                Some(event_id),
                StateSnapshot::none(),
                ticket_snapshot(&outcome.ticket),
            );
            mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

            info!(
                event = %event_id,
                %participant,
                ticket_ref = %outcome.ticket.ticket_ref,
                "Registered for event"
            );
        }

        Ok(outcome.ticket)
    })
}
