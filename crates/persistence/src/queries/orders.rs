// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order queries and allocation aggregates.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::{
    EventId, Order, OrderId, OrderStatus, ParticipantId, VariantId, parse_timestamp,
};

use crate::diesel_schema::orders;
use crate::error::PersistenceError;

/// Diesel Queryable struct for order rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = orders)]
struct OrderRow {
    order_id: i64,
    event_id: i64,
    participant_id: String,
    variant_id: Option<i64>,
    quantity: i64,
    amount: i64,
    status: String,
    batch_id: Option<String>,
    decision_note: Option<String>,
    decided_by: Option<String>,
    decided_at: Option<String>,
    created_at: String,
}

fn row_to_order(row: OrderRow) -> Result<Order, PersistenceError> {
    let decided_at = row.decided_at.as_deref().map(parse_timestamp).transpose()?;

    Ok(Order {
        id: OrderId::new(row.order_id),
        event: EventId::new(row.event_id),
        participant: ParticipantId::new(&row.participant_id),
        variant: row.variant_id.map(VariantId::new),
        quantity: row.quantity,
        amount: row.amount,
        status: OrderStatus::from_str(&row.status)?,
        batch_id: row.batch_id,
        decision_note: row.decision_note,
        decided_by: row.decided_by.as_deref().map(ParticipantId::new),
        decided_at,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

/// Retrieves an order by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `order_id` - The order ID to retrieve
///
/// # Errors
///
/// Returns an error if the order is not found or a stored value cannot
/// be decoded.
pub fn get_order(conn: &mut SqliteConnection, order_id: i64) -> Result<Order, PersistenceError> {
    let result = orders::table
        .filter(orders::order_id.eq(order_id))
        .select(OrderRow::as_select())
        .first::<OrderRow>(conn);

    let row: OrderRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Order {order_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_order(row)
}

/// Lists all orders placed against an event, oldest first.
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
pub fn list_orders_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::event_id.eq(event_id))
        .order(orders::order_id.asc())
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;

    rows.into_iter().map(row_to_order).collect()
}

/// Lists all orders placed by a participant, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The ordering participant
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_orders_for_participant(
    conn: &mut SqliteConnection,
    participant_id: &str,
) -> Result<Vec<Order>, PersistenceError> {
    let rows: Vec<OrderRow> = orders::table
        .filter(orders::participant_id.eq(participant_id))
        .order(orders::order_id.asc())
        .select(OrderRow::as_select())
        .load::<OrderRow>(conn)?;

    rows.into_iter().map(row_to_order).collect()
}

/// Sums the quantity a participant already has on the books for a
/// variant, over pending and approved orders.
///
/// Rejected orders never held an allocation, so they do not count
/// against the per-participant limit.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `variant_id` - The variant
/// * `participant_id` - The ordering participant
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn allocated_quantity_for_variant(
    conn: &mut SqliteConnection,
    variant_id: i64,
    participant_id: &str,
) -> Result<i64, PersistenceError> {
    let quantities: Vec<i64> = orders::table
        .filter(orders::variant_id.eq(variant_id))
        .filter(orders::participant_id.eq(participant_id))
        .filter(orders::status.ne(OrderStatus::Rejected.as_str()))
        .select(orders::quantity)
        .load::<i64>(conn)?;

    Ok(quantities.iter().sum())
}
