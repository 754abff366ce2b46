// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::{EventId, ParticipantId, TeamId, Ticket, TicketStatus, parse_timestamp};

use crate::diesel_schema::tickets;
use crate::error::PersistenceError;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
struct TicketRow {
    ticket_id: i64,
    event_id: i64,
    participant_id: String,
    ticket_ref: String,
    payload: String,
    status: String,
    team_id: Option<i64>,
    form_responses: Option<String>,
    checked_in_at: Option<String>,
    issued_at: String,
}

fn row_to_ticket(row: TicketRow) -> Result<Ticket, PersistenceError> {
    let checked_in_at = row
        .checked_in_at
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    Ok(Ticket {
        id: row.ticket_id,
        event: EventId::new(row.event_id),
        participant: ParticipantId::new(&row.participant_id),
        ticket_ref: row.ticket_ref,
        payload: row.payload,
        status: TicketStatus::from_str(&row.status)?,
        team: row.team_id.map(TeamId::new),
        form_responses: row.form_responses,
        checked_in_at,
        issued_at: parse_timestamp(&row.issued_at)?,
    })
}

/// Retrieves a ticket by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_id` - The ticket ID to retrieve
///
/// # Errors
///
/// Returns an error if the ticket is not found or a stored value cannot
/// be decoded.
pub fn get_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> Result<Ticket, PersistenceError> {
    let result = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first::<TicketRow>(conn);

    let row: TicketRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Ticket {ticket_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_ticket(row)
}

/// Finds the ticket held by a participant for an event, if any.
///
/// At most one such ticket can exist; the pair is unique in storage.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
/// * `participant_id` - The holder
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_ticket_for_participant(
    conn: &mut SqliteConnection,
    event_id: i64,
    participant_id: &str,
) -> Result<Option<Ticket>, PersistenceError> {
    let row: Option<TicketRow> = tickets::table
        .filter(tickets::event_id.eq(event_id))
        .filter(tickets::participant_id.eq(participant_id))
        .select(TicketRow::as_select())
        .first::<TicketRow>(conn)
        .optional()?;

    row.map(row_to_ticket).transpose()
}

/// Finds a ticket by its globally unique reference, if it exists.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_ref` - The ticket reference
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_ticket_by_ref(
    conn: &mut SqliteConnection,
    ticket_ref: &str,
) -> Result<Option<Ticket>, PersistenceError> {
    let row: Option<TicketRow> = tickets::table
        .filter(tickets::ticket_ref.eq(ticket_ref))
        .select(TicketRow::as_select())
        .first::<TicketRow>(conn)
        .optional()?;

    row.map(row_to_ticket).transpose()
}

/// Lists all tickets held by a participant, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The holder
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_tickets_for_participant(
    conn: &mut SqliteConnection,
    participant_id: &str,
) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .filter(tickets::participant_id.eq(participant_id))
        .order(tickets::ticket_id.asc())
        .select(TicketRow::as_select())
        .load::<TicketRow>(conn)?;

    rows.into_iter().map(row_to_ticket).collect()
}

/// Lists all tickets issued for an event, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_tickets_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .filter(tickets::event_id.eq(event_id))
        .order(tickets::ticket_id.asc())
        .select(TicketRow::as_select())
        .load::<TicketRow>(conn)?;

    rows.into_iter().map(row_to_ticket).collect()
}

/// Counts the tickets issued for an event.
///
/// This count is what `registration_limit` is enforced against.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_tickets_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(tickets::table
        .filter(tickets::event_id.eq(event_id))
        .count()
        .get_result::<i64>(conn)?)
}
