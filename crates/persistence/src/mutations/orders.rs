// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order mutations.
//!
//! An order decision is a single conditional flip: the UPDATE filters
//! on `status = 'pending'` and writes the terminal status in the same
//! statement, so two organizers racing on the same order cannot both
//! win. Zero rows affected means the order was already decided.

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::OrderStatus;
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::NewOrder;
use crate::diesel_schema::orders;
use crate::error::PersistenceError;

/// Inserts a new order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order` - The order row to insert
///
/// # Returns
///
/// The order ID assigned by the database.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_order(
    conn: &mut SqliteConnection,
    order: &NewOrder,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(orders::table)
        .values(order)
        .execute(conn)?;

    let order_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        order_id,
        event_id = order.event_id,
        participant_id = order.participant_id.as_str(),
        quantity = order.quantity,
        "Inserted order"
    );

    Ok(order_id)
}

/// Moves a pending order to a terminal status, conditionally.
///
/// The flip only lands if the order is still `pending` when the
/// statement runs. The decision note, deciding organizer, and decision
/// timestamp are written in the same statement.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order_id` - The order to decide
/// * `to_status` - The terminal status to write
/// * `decision_note` - Optional note from the deciding organizer
/// * `decided_by` - The deciding organizer's identity
/// * `decided_at` - The decision timestamp to record
///
/// # Returns
///
/// `true` if the decision landed, `false` if the order was no longer
/// `pending` (or does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn decide_order(
    conn: &mut SqliteConnection,
    order_id: i64,
    to_status: &str,
    decision_note: Option<&str>,
    decided_by: &str,
    decided_at: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        orders::table
            .filter(orders::order_id.eq(order_id))
            .filter(orders::status.eq(OrderStatus::Pending.as_str())),
    )
    .set((
        orders::status.eq(to_status),
        orders::decision_note.eq(decision_note),
        orders::decided_by.eq(Some(decided_by)),
        orders::decided_at.eq(Some(decided_at)),
    ))
    .execute(conn)?;

    debug!(order_id, to_status, rows_affected, "Order decision flip");

    Ok(rows_affected == 1)
}
