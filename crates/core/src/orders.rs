// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The merchandise order approval workflow.
//!
//! Orders hold no capacity while pending. Stock moves exactly once, at
//! the `pending -> approved` transition, inside the same transaction as
//! the status flip and the pickup-ticket upsert. Rejection flips the
//! status and touches nothing else.

use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::{
    Event, EventId, EventKind, Order, OrderId, OrderStatus, ParticipantId, Variant, VariantId,
    validate_participant_id, validate_quantity,
};
use evreg_persistence::data_models::NewOrder;
use evreg_persistence::{Persistence, mutations, queries};
use time::OffsetDateTime;
use tracing::info;

use crate::error::CoreError;
use crate::tickets::{self, IssueOutcome};
use crate::{capacity, timestamp_now, validate_registration_open};

/// A participant's merchandise allocation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRequest {
    /// The variant ordered, or `None` to order against base stock.
    pub variant: Option<VariantId>,
    /// Units requested.
    pub quantity: i64,
    /// Groups orders placed together in one checkout.
    pub batch_id: Option<String>,
}

fn order_snapshot(order: &Order) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "status": order.status.as_str(),
            "quantity": order.quantity,
            "amount": order.amount,
            "variant": order.variant.map(VariantId::value),
        })
        .to_string(),
    )
}

/// Places a pending merchandise order.
///
/// The order's amount is fixed here as `quantity` times the variant
/// price (or the event fee when ordering base stock). Stock checks at
/// this point fail fast against obviously unfillable requests; the
/// authoritative reservation happens at approval.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The merch event ordered from
/// * `participant` - The ordering participant
/// * `request` - The variant, quantity, and batch grouping
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The pending order.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the event or variant does not
/// exist, [`CoreError::Validation`] if the event is not a merch event
/// or the request exceeds a per-participant limit,
/// [`CoreError::Conflict`] if the event is not accepting orders, and
/// [`CoreError::Capacity`] if remaining stock cannot cover the request.
pub fn create_order(
    persistence: &mut Persistence,
    event_id: EventId,
    participant: &ParticipantId,
    request: OrderRequest,
    actor: Actor,
    cause: Cause,
) -> Result<Order, CoreError> {
    validate_participant_id(participant.value())?;
    validate_quantity(request.quantity)?;

    let (now, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id.value())?;
        if event.kind != EventKind::Merch {
            return Err(CoreError::Validation(String::from(
                "Orders are only available for merchandise events",
            )));
        }
        validate_registration_open(&event, now)?;

        let unit_price: i64 = match request.variant {
            Some(variant_id) => {
                let variant: Variant = capacity::resolve_variant(conn, event_id, variant_id)?;
                capacity::check_per_participant_limit(
                    conn,
                    &variant,
                    participant.value(),
                    request.quantity,
                )?;
                if variant.stock < request.quantity {
                    return Err(CoreError::Capacity(format!(
                        "Variant '{}' has fewer than {} units in stock",
                        variant.name, request.quantity
                    )));
                }
                variant.price
            }
            None => {
                if let Some(stock) = event.stock {
                    if stock < request.quantity {
                        return Err(CoreError::Capacity(format!(
                            "Event {event_id} has fewer than {} units in stock",
                            request.quantity
                        )));
                    }
                }
                event.fee
            }
        };

        let row: NewOrder = NewOrder {
            event_id: event_id.value(),
            participant_id: participant.value().to_string(),
            variant_id: request.variant.map(VariantId::value),
            quantity: request.quantity,
            amount: request.quantity * unit_price,
            status: OrderStatus::Pending.as_str().to_string(),
            batch_id: request.batch_id,
            created_at: recorded_at.clone(),
        };

        let order_id: i64 = mutations::orders::insert_order(conn, &row)?;
        let order: Order = queries::orders::get_order(conn, order_id)?;

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("CreateOrder"),
                Some(format!(
                    "quantity={}, amount={}",
                    order.quantity, order.amount
                )),
            ),
            Some(event_id),
            StateSnapshot::none(),
            order_snapshot(&order),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(
            event = %event_id,
            %participant,
            order = order_id,
            quantity = order.quantity,
            "Created order"
        );

        Ok(order)
    })
}

/// Decides a pending order, approving or rejecting it.
///
/// Approval reserves the order's stock, flips the status, and issues
/// the participant's pickup ticket, all in one transaction. If any step
/// fails the whole decision rolls back, so stock is never consumed by a
/// decision that did not land. Batch siblings share one pickup ticket
/// through issuance idempotency.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `order_id` - The order to decide
/// * `decider` - The requesting organizer
/// * `approve` - `true` to approve, `false` to reject
/// * `note` - Optional note recorded with the decision
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The decided order.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the order does not exist or its
/// event is not owned by `decider`, [`CoreError::Conflict`] if the
/// order has already been decided, and [`CoreError::Capacity`] if
/// approval finds insufficient stock.
pub fn decide_order(
    persistence: &mut Persistence,
    order_id: OrderId,
    decider: &ParticipantId,
    approve: bool,
    note: Option<&str>,
    actor: Actor,
    cause: Cause,
) -> Result<Order, CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let order: Order = queries::orders::get_order(conn, order_id.value())?;
        let event: Event = queries::events::get_event(conn, order.event.value())?;
        if event.organizer != *decider {
            return Err(CoreError::NotFound(format!("Order {}", order_id.value())));
        }
        if order.status != OrderStatus::Pending {
            return Err(CoreError::Conflict(format!(
                "Order {} has already been decided",
                order_id.value()
            )));
        }

        let to_status: OrderStatus = if approve {
            OrderStatus::Approved
        } else {
            OrderStatus::Rejected
        };

        if approve {
            match order.variant {
                Some(variant_id) => {
                    let variant: Variant =
                        queries::events::get_variant(conn, variant_id.value())?;
                    capacity::reserve_variant_stock(conn, &variant, order.quantity)?;
                }
                None => {
                    // Events without tracked base stock have nothing to
                    // reserve.
                    if event.stock.is_some() {
                        capacity::reserve_event_stock(conn, event.id, order.quantity)?;
                    }
                }
            }
        }

        let flipped: bool = mutations::orders::decide_order(
            conn,
            order_id.value(),
            to_status.as_str(),
            note,
            decider.value(),
            &recorded_at,
        )?;
        if !flipped {
            // A racing decision won; the Err rolls back any reservation
            // made above.
            return Err(CoreError::Conflict(format!(
                "Order {} has already been decided",
                order_id.value()
            )));
        }

        let ticket_ref: Option<String> = if approve {
            let outcome: IssueOutcome =
                tickets::issue_ticket(conn, &event, &order.participant, None, None, &recorded_at)?;
            Some(outcome.ticket.ticket_ref)
        } else {
            None
        };

        let decided: Order = queries::orders::get_order(conn, order_id.value())?;

        let details: String = ticket_ref.map_or_else(
            || format!("quantity={}", order.quantity),
            |ticket_ref| format!("quantity={}, ticket_ref={ticket_ref}", order.quantity),
        );
        let action_name: &str = if approve { "ApproveOrder" } else { "RejectOrder" };
        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(action_name.to_string(), Some(details)),
            Some(order.event),
            order_snapshot(&order),
            order_snapshot(&decided),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(
            order = order_id.value(),
            decision = %to_status,
            "Order decided"
        );

        Ok(decided)
    })
}
