// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Check-in scanning.
//!
//! A scan consumes a ticket exactly once. The `active -> used` flip is
//! conditional on the ticket still being active, so two racing scans of
//! the same ticket admit one holder and turn the other away.

use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::{
    Event, EventId, ParticipantId, ScanCode, Ticket, TicketStatus,
};
use evreg_persistence::{Persistence, mutations, queries};
use time::OffsetDateTime;
use tracing::info;

use crate::error::CoreError;
use crate::timestamp_now;

fn scan_snapshot(status: TicketStatus) -> StateSnapshot {
    StateSnapshot::new(serde_json::json!({ "status": status.as_str() }).to_string())
}

/// Checks a ticket in, consuming it.
///
/// Accepts a full encoded payload or a bare ticket reference. When an
/// explicit `event_scope` is given it takes precedence over the event
/// embedded in a payload; the scan fails if the ticket belongs to a
/// different event than the one being scanned for.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `raw_code` - The scanner input, payload or bare reference
/// * `event_scope` - The event the scanner is admitting for, if pinned
/// * `scanner` - The scanning organizer
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The consumed ticket with its check-in timestamp set.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the input does not decode,
/// [`CoreError::NotFound`] if no ticket carries the reference, the
/// ticket belongs to another event, or the event is not owned by
/// `scanner`, and [`CoreError::Conflict`] if the ticket was already
/// used or cancelled.
pub fn scan_ticket(
    persistence: &mut Persistence,
    raw_code: &str,
    event_scope: Option<EventId>,
    scanner: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Ticket, CoreError> {
    let scan: ScanCode =
        ScanCode::parse(raw_code).map_err(|err| CoreError::Validation(err.to_string()))?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let ticket: Ticket = queries::tickets::find_ticket_by_ref(conn, scan.ticket_ref())?
            .ok_or_else(|| {
                CoreError::NotFound(format!("No ticket with reference {}", scan.ticket_ref()))
            })?;

        let embedded_event: Option<EventId> = match &scan {
            ScanCode::Payload(payload) => Some(payload.event),
            ScanCode::TicketRef(_) => None,
        };
        if let Some(expected) = event_scope.or(embedded_event) {
            if ticket.event != expected {
                return Err(CoreError::NotFound(format!(
                    "Ticket {} does not belong to event {expected}",
                    ticket.ticket_ref
                )));
            }
        }

        let event: Event = queries::events::get_event(conn, ticket.event.value())?;
        if event.organizer != *scanner {
            return Err(CoreError::NotFound(format!(
                "No ticket with reference {}",
                ticket.ticket_ref
            )));
        }

        if ticket.status == TicketStatus::Cancelled {
            return Err(CoreError::Conflict(format!(
                "Ticket {} has been cancelled",
                ticket.ticket_ref
            )));
        }

        let consumed: bool = mutations::tickets::mark_ticket_used(conn, ticket.id, &recorded_at)?;
        if !consumed {
            let current: Ticket = queries::tickets::get_ticket(conn, ticket.id)?;
            if current.status == TicketStatus::Used {
                return Err(CoreError::Conflict(format!(
                    "Ticket {} has already been checked in",
                    ticket.ticket_ref
                )));
            }
            return Err(CoreError::Conflict(format!(
                "Ticket {} is not active",
                ticket.ticket_ref
            )));
        }

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("CheckInTicket"),
                Some(format!("ticket_ref={}", ticket.ticket_ref)),
            ),
            Some(ticket.event),
            scan_snapshot(TicketStatus::Active),
            scan_snapshot(TicketStatus::Used),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(
            event = %ticket.event,
            ticket_ref = %ticket.ticket_ref,
            "Ticket checked in"
        );

        queries::tickets::get_ticket(conn, ticket.id).map_err(CoreError::from)
    })
}
