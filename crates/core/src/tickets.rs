// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The ticket issuer.
//!
//! A ticket is the record that one `(event, participant)` pair holds an
//! allocation, and at most one exists per pair no matter which flow
//! produced it. Issuance is an upsert keyed by that pair: re-issuing
//! returns the existing ticket instead of failing, which is what makes
//! batch-order approval and double registration collapse to one ticket.
//!
//! Ticket references are generated propose-then-verify. A draw is never
//! trusted to be unique; the insert verifies it against the unique
//! index and a collision simply means another draw.

use diesel::SqliteConnection;
use evreg_audit::StateSnapshot;
use evreg_domain::{
    Event, EventKind, ParticipantId, TeamId, Ticket, TicketPayload, TicketRefKind, TicketStatus,
    propose_ticket_ref,
};
use evreg_persistence::data_models::NewTicket;
use evreg_persistence::{PersistenceError, mutations, queries};
use tracing::debug;

use crate::error::CoreError;

/// Redraw budget for reference collisions. With an eight-character
/// suffix a single collision is already vanishingly rare.
const MAX_REF_ATTEMPTS: usize = 5;

/// The result of an issuance call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct IssueOutcome {
    /// The ticket held by the pair after the call.
    pub ticket: Ticket,
    /// Whether this call created the ticket. `false` means the pair
    /// already held one and it was returned unchanged.
    pub created: bool,
}

/// Renders the audit snapshot for a ticket.
pub(crate) fn ticket_snapshot(ticket: &Ticket) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "ticket_ref": ticket.ticket_ref,
            "status": ticket.status.as_str(),
            "team": ticket.team.map(TeamId::value),
        })
        .to_string(),
    )
}

fn new_ticket_row(
    event: &Event,
    participant: &ParticipantId,
    team: Option<TeamId>,
    form_responses: Option<&str>,
    issued_at: &str,
) -> NewTicket {
    let kind: TicketRefKind = if event.kind == EventKind::Merch {
        TicketRefKind::Merch
    } else {
        TicketRefKind::Registration
    };
    let ticket_ref: String = propose_ticket_ref(kind);
    let payload: String =
        TicketPayload::new(ticket_ref.clone(), event.id, participant.clone()).encode();

    NewTicket {
        event_id: event.id.value(),
        participant_id: participant.value().to_string(),
        ticket_ref,
        payload,
        status: TicketStatus::Active.as_str().to_string(),
        team_id: team.map(TeamId::value),
        form_responses: form_responses.map(ToString::to_string),
        issued_at: issued_at.to_string(),
    }
}

fn fetch_pair_ticket(
    conn: &mut SqliteConnection,
    event: &Event,
    participant: &ParticipantId,
) -> Result<Ticket, CoreError> {
    queries::tickets::find_ticket_for_participant(conn, event.id.value(), participant.value())?
        .ok_or_else(|| {
            CoreError::Persistence(PersistenceError::Other(format!(
                "Ticket for event {} and participant {participant} missing after upsert",
                event.id
            )))
        })
}

/// Issues a ticket for `(event, participant)`, or returns the one that
/// already exists.
///
/// # Errors
///
/// Returns [`CoreError::Conflict`] if a unique reference could not be
/// minted within the redraw budget, or a persistence error if a
/// statement fails.
pub(crate) fn issue_ticket(
    conn: &mut SqliteConnection,
    event: &Event,
    participant: &ParticipantId,
    team: Option<TeamId>,
    form_responses: Option<&str>,
    issued_at: &str,
) -> Result<IssueOutcome, CoreError> {
    if let Some(existing) =
        queries::tickets::find_ticket_for_participant(conn, event.id.value(), participant.value())?
    {
        return Ok(IssueOutcome {
            ticket: existing,
            created: false,
        });
    }

    for _ in 0..MAX_REF_ATTEMPTS {
        let row: NewTicket = new_ticket_row(event, participant, team, form_responses, issued_at);
        match mutations::tickets::insert_ticket(conn, &row) {
            Ok(rows_affected) => {
                // Zero rows means a racing writer seated the pair first;
                // either way the pair's ticket now exists.
                let ticket: Ticket = fetch_pair_ticket(conn, event, participant)?;
                return Ok(IssueOutcome {
                    ticket,
                    created: rows_affected == 1,
                });
            }
            Err(PersistenceError::DuplicateTicketRef(message)) => {
                debug!(event = %event.id, %participant, %message, "Ticket reference collision, redrawing");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(CoreError::Conflict(format!(
        "Could not mint a unique ticket reference for event {} after {MAX_REF_ATTEMPTS} attempts",
        event.id
    )))
}

/// Issues a ticket only while the event's live ticket count is below
/// its registration limit.
///
/// The limit check is part of the insert statement itself, so the slot
/// count and the new ticket row land (or don't) atomically.
///
/// # Errors
///
/// Returns [`CoreError::Capacity`] if the limit is reached, or
/// [`CoreError::Conflict`] if a unique reference could not be minted
/// within the redraw budget.
pub(crate) fn issue_ticket_within_limit(
    conn: &mut SqliteConnection,
    event: &Event,
    participant: &ParticipantId,
    form_responses: Option<&str>,
    issued_at: &str,
) -> Result<IssueOutcome, CoreError> {
    if let Some(existing) =
        queries::tickets::find_ticket_for_participant(conn, event.id.value(), participant.value())?
    {
        return Ok(IssueOutcome {
            ticket: existing,
            created: false,
        });
    }

    for _ in 0..MAX_REF_ATTEMPTS {
        let row: NewTicket = new_ticket_row(event, participant, None, form_responses, issued_at);
        match mutations::tickets::insert_ticket_within_limit(conn, &row, event.registration_limit) {
            Ok(1) => {
                let ticket: Ticket = fetch_pair_ticket(conn, event, participant)?;
                return Ok(IssueOutcome {
                    ticket,
                    created: true,
                });
            }
            Ok(_) => {
                // Zero rows is ambiguous: either the pair already holds a
                // ticket (idempotent success) or the limit guard refused
                // the insert. The re-read disambiguates.
                if let Some(existing) = queries::tickets::find_ticket_for_participant(
                    conn,
                    event.id.value(),
                    participant.value(),
                )? {
                    return Ok(IssueOutcome {
                        ticket: existing,
                        created: false,
                    });
                }
                return Err(CoreError::Capacity(format!(
                    "Event {} has reached its registration limit of {}",
                    event.id, event.registration_limit
                )));
            }
            Err(PersistenceError::DuplicateTicketRef(message)) => {
                debug!(event = %event.id, %participant, %message, "Ticket reference collision, redrawing");
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(CoreError::Conflict(format!(
        "Could not mint a unique ticket reference for event {} after {MAX_REF_ATTEMPTS} attempts",
        event.id
    )))
}
