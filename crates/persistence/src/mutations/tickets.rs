// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket mutations.
//!
//! Ticket issuance is an upsert keyed on `(event_id, participant_id)`:
//! the insert targets that constraint with `DO NOTHING`, so an existing
//! ticket for the pair silently wins and the caller re-reads it. A
//! `ticket_ref` collision is NOT absorbed by the upsert target and
//! surfaces as [`PersistenceError::DuplicateTicketRef`], which the
//! caller resolves by drawing a fresh reference.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Nullable, Text};
use evreg_domain::TicketStatus;
use tracing::debug;

use crate::data_models::NewTicket;
use crate::diesel_schema::tickets;
use crate::error::PersistenceError;

/// Inserts a ticket, yielding to an existing `(event, participant)`
/// ticket.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket` - The ticket row to insert
///
/// # Returns
///
/// The number of rows inserted: 1, or 0 when the pair already holds a
/// ticket.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateTicketRef`] if the proposed
/// reference collides with another ticket, or another error if the
/// insert fails.
pub fn insert_ticket(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::insert_into(tickets::table)
        .values(ticket)
        .on_conflict((tickets::event_id, tickets::participant_id))
        .do_nothing()
        .execute(conn)?;

    debug!(
        event_id = ticket.event_id,
        participant_id = ticket.participant_id.as_str(),
        rows_affected,
        "Ticket insert"
    );

    Ok(rows_affected)
}

/// Inserts a ticket only while the event still has a free registration
/// slot.
///
/// The live ticket count is compared against `registration_limit`
/// inside the insert statement itself, so the capacity check and the
/// insert are one atomic statement. The upsert target still yields to
/// an existing `(event, participant)` ticket.
///
/// Zero rows affected is ambiguous between "pair already holds a
/// ticket" and "event is full"; the caller disambiguates by re-reading
/// the pair.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket` - The ticket row to insert
/// * `registration_limit` - The event's slot limit. Must be positive;
///   unlimited events use [`insert_ticket`].
///
/// # Returns
///
/// The number of rows inserted: 1, or 0 when the guard or the upsert
/// target suppressed the insert.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateTicketRef`] if the proposed
/// reference collides with another ticket, or another error if the
/// insert fails.
pub fn insert_ticket_within_limit(
    conn: &mut SqliteConnection,
    ticket: &NewTicket,
    registration_limit: i64,
) -> Result<usize, PersistenceError> {
    // NOTE: INSERT .. SELECT with an upsert clause is raw SQL
    // (justified - Diesel cannot attach ON CONFLICT to an
    // insert-from-select statement)
    let rows_affected: usize = diesel::sql_query(
        "INSERT INTO tickets \
         (event_id, participant_id, ticket_ref, payload, status, team_id, form_responses, issued_at) \
         SELECT ?, ?, ?, ?, ?, ?, ?, ? \
         WHERE (SELECT COUNT(*) FROM tickets WHERE event_id = ?) < ? \
         ON CONFLICT (event_id, participant_id) DO NOTHING",
    )
    .bind::<BigInt, _>(ticket.event_id)
    .bind::<Text, _>(&ticket.participant_id)
    .bind::<Text, _>(&ticket.ticket_ref)
    .bind::<Text, _>(&ticket.payload)
    .bind::<Text, _>(&ticket.status)
    .bind::<Nullable<BigInt>, _>(ticket.team_id)
    .bind::<Nullable<Text>, _>(ticket.form_responses.as_deref())
    .bind::<Text, _>(&ticket.issued_at)
    .bind::<BigInt, _>(ticket.event_id)
    .bind::<BigInt, _>(registration_limit)
    .execute(conn)?;

    debug!(
        event_id = ticket.event_id,
        participant_id = ticket.participant_id.as_str(),
        registration_limit,
        rows_affected,
        "Slot-guarded ticket insert"
    );

    Ok(rows_affected)
}

/// Marks a ticket used, conditionally.
///
/// The flip only lands if the ticket is still `active` when the
/// statement runs, so a ticket can be consumed exactly once.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `ticket_id` - The ticket to consume
/// * `checked_in_at` - The check-in timestamp to record
///
/// # Returns
///
/// `true` if the ticket was consumed, `false` if it was no longer
/// `active`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_ticket_used(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    checked_in_at: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        tickets::table
            .filter(tickets::ticket_id.eq(ticket_id))
            .filter(tickets::status.eq(TicketStatus::Active.as_str())),
    )
    .set((
        tickets::status.eq(TicketStatus::Used.as_str()),
        tickets::checked_in_at.eq(Some(checked_in_at)),
    ))
    .execute(conn)?;

    debug!(ticket_id, rows_affected, "Ticket check-in flip");

    Ok(rows_affected == 1)
}
