// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Event and variant mutations.
//!
//! Stock reservation is a single conditional decrement: the statement
//! filters on `stock >= quantity` and decrements in the same UPDATE, so
//! the check and the write cannot be separated by another writer. Zero
//! rows affected means the reservation lost; the stock row is never
//! read first and written second.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewEvent, NewVariant};
use crate::diesel_schema::{events, variants};
use crate::error::PersistenceError;

/// Inserts a new event.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event` - The event row to insert
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &NewEvent,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(events::table)
        .values(event)
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;

    debug!(event_id, kind = event.kind.as_str(), "Inserted event");

    Ok(event_id)
}

/// Inserts a new merchandise variant.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `variant` - The variant row to insert
///
/// # Returns
///
/// The variant ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_variant(
    conn: &mut SqliteConnection,
    variant: &NewVariant,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(variants::table)
        .values(variant)
        .execute(conn)?;

    let variant_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        variant_id,
        event_id = variant.event_id,
        "Inserted variant"
    );

    Ok(variant_id)
}

/// Moves an event from one phase to another, conditionally.
///
/// The flip only lands if the event is still in `from_phase` when the
/// statement runs.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event to move
/// * `from_phase` - The phase the event must still be in
/// * `to_phase` - The phase to move to
///
/// # Returns
///
/// `true` if the event moved, `false` if it was no longer in
/// `from_phase` (or does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_event_phase(
    conn: &mut SqliteConnection,
    event_id: i64,
    from_phase: &str,
    to_phase: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        events::table
            .filter(events::event_id.eq(event_id))
            .filter(events::phase.eq(from_phase)),
    )
    .set(events::phase.eq(to_phase))
    .execute(conn)?;

    debug!(event_id, from_phase, to_phase, rows_affected, "Event phase flip");

    Ok(rows_affected == 1)
}

/// Reserves `quantity` units of an event's base stock.
///
/// Single conditional decrement. A `NULL` stock column never matches
/// the filter, so events without base stock cannot be reserved against.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event whose base stock to reserve
/// * `quantity` - Units to reserve. Must be positive.
///
/// # Returns
///
/// `true` if the reservation landed, `false` if remaining stock was
/// insufficient.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn reserve_event_stock(
    conn: &mut SqliteConnection,
    event_id: i64,
    quantity: i64,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        events::table
            .filter(events::event_id.eq(event_id))
            .filter(events::stock.ge(quantity)),
    )
    .set(events::stock.eq(events::stock - quantity))
    .execute(conn)?;

    debug!(event_id, quantity, rows_affected, "Event stock reservation");

    Ok(rows_affected == 1)
}

/// Reserves `quantity` units of a variant's stock.
///
/// Single conditional decrement, same shape as
/// [`reserve_event_stock`].
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `variant_id` - The variant whose stock to reserve
/// * `quantity` - Units to reserve. Must be positive.
///
/// # Returns
///
/// `true` if the reservation landed, `false` if remaining stock was
/// insufficient.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn reserve_variant_stock(
    conn: &mut SqliteConnection,
    variant_id: i64,
    quantity: i64,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        variants::table
            .filter(variants::variant_id.eq(variant_id))
            .filter(variants::stock.ge(quantity)),
    )
    .set(variants::stock.eq(variants::stock - quantity))
    .execute(conn)?;

    debug!(
        variant_id,
        quantity, rows_affected, "Variant stock reservation"
    );

    Ok(rows_affected == 1)
}
