// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and variant queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::{
    Event, EventId, EventKind, EventPhase, ParticipantId, ParticipationMode, Variant, VariantId,
    parse_timestamp,
};

use crate::diesel_schema::{events, variants};
use crate::error::PersistenceError;

/// Diesel Queryable struct for event rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = events)]
struct EventRow {
    event_id: i64,
    name: String,
    kind: String,
    phase: String,
    organizer_id: String,
    registration_limit: i64,
    stock: Option<i64>,
    fee: i64,
    participation_mode: String,
    team_size: Option<i64>,
    registration_deadline: Option<String>,
    #[allow(dead_code)]
    created_at: String,
}

/// Diesel Queryable struct for variant rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = variants)]
struct VariantRow {
    variant_id: i64,
    event_id: i64,
    name: String,
    stock: i64,
    price: i64,
    per_participant_limit: i64,
}

fn row_to_event(row: EventRow) -> Result<Event, PersistenceError> {
    let registration_deadline = row
        .registration_deadline
        .as_deref()
        .map(parse_timestamp)
        .transpose()?;

    Ok(Event {
        id: EventId::new(row.event_id),
        name: row.name,
        kind: EventKind::from_str(&row.kind)?,
        phase: EventPhase::from_str(&row.phase)?,
        organizer: ParticipantId::new(&row.organizer_id),
        registration_limit: row.registration_limit,
        stock: row.stock,
        fee: row.fee,
        participation_mode: ParticipationMode::from_str(&row.participation_mode)?,
        team_size: row.team_size,
        registration_deadline,
    })
}

fn row_to_variant(row: VariantRow) -> Variant {
    Variant {
        id: VariantId::new(row.variant_id),
        event: EventId::new(row.event_id),
        name: row.name,
        stock: row.stock,
        price: row.price,
        per_participant_limit: row.per_participant_limit,
    }
}

/// Retrieves an event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or a stored value cannot
/// be decoded.
pub fn get_event(conn: &mut SqliteConnection, event_id: i64) -> Result<Event, PersistenceError> {
    let result = events::table
        .filter(events::event_id.eq(event_id))
        .select(EventRow::as_select())
        .first::<EventRow>(conn);

    let row: EventRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Event {event_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_event(row)
}

/// Lists all events, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_events(conn: &mut SqliteConnection) -> Result<Vec<Event>, PersistenceError> {
    let rows: Vec<EventRow> = events::table
        .order(events::event_id.asc())
        .select(EventRow::as_select())
        .load::<EventRow>(conn)?;

    rows.into_iter().map(row_to_event).collect()
}

/// Retrieves a variant by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `variant_id` - The variant ID to retrieve
///
/// # Errors
///
/// Returns an error if the variant is not found.
pub fn get_variant(
    conn: &mut SqliteConnection,
    variant_id: i64,
) -> Result<Variant, PersistenceError> {
    let result = variants::table
        .filter(variants::variant_id.eq(variant_id))
        .select(VariantRow::as_select())
        .first::<VariantRow>(conn);

    let row: VariantRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Variant {variant_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    Ok(row_to_variant(row))
}

/// Lists all variants of an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The owning event
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_variants_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Variant>, PersistenceError> {
    let rows: Vec<VariantRow> = variants::table
        .filter(variants::event_id.eq(event_id))
        .order(variants::variant_id.asc())
        .select(VariantRow::as_select())
        .load::<VariantRow>(conn)?;

    Ok(rows.into_iter().map(row_to_variant).collect())
}

/// Counts the variants of an event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The owning event
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_variants_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(variants::table
        .filter(variants::event_id.eq(event_id))
        .count()
        .get_result::<i64>(conn)?)
}
