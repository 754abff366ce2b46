// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The capacity ledger.
//!
//! Remaining stock is authoritative in the store, and every reservation
//! is one conditional decrement executed by the store (`decrement where
//! stock >= quantity`). The statement's row count decides the outcome;
//! there is no separate read, so a reservation can never be granted
//! against stale stock. Registration slots are guarded the same way,
//! but that condition is compiled into the ticket insert itself (see
//! [`crate::tickets`]), keeping slot count and ticket row in one
//! statement.
//!
//! There is no release operation. Capacity is consumed at approval, so
//! a rejection has nothing to return.

use diesel::SqliteConnection;
use evreg_domain::{EventId, Variant, VariantId};
use evreg_persistence::mutations;

use crate::error::CoreError;

/// Reserves `quantity` units of an event's base stock.
///
/// Used for merch events that track stock on the event itself rather
/// than per variant. Events with untracked stock (`stock` is NULL)
/// must not be passed here; the conditional update would never match.
///
/// # Errors
///
/// Returns [`CoreError::Capacity`] if fewer than `quantity` units
/// remain, or a persistence error if the statement fails.
pub(crate) fn reserve_event_stock(
    conn: &mut SqliteConnection,
    event: EventId,
    quantity: i64,
) -> Result<(), CoreError> {
    let reserved: bool = mutations::events::reserve_event_stock(conn, event.value(), quantity)?;
    if !reserved {
        return Err(CoreError::Capacity(format!(
            "Event {event} has fewer than {quantity} units in stock"
        )));
    }
    Ok(())
}

/// Reserves `quantity` units of a variant's stock.
///
/// # Errors
///
/// Returns [`CoreError::Capacity`] if fewer than `quantity` units
/// remain, or a persistence error if the statement fails.
pub(crate) fn reserve_variant_stock(
    conn: &mut SqliteConnection,
    variant: &Variant,
    quantity: i64,
) -> Result<(), CoreError> {
    let reserved: bool =
        mutations::events::reserve_variant_stock(conn, variant.id.value(), quantity)?;
    if !reserved {
        return Err(CoreError::Capacity(format!(
            "Variant '{}' has fewer than {quantity} units in stock",
            variant.name
        )));
    }
    Ok(())
}

/// Checks a participant's cumulative allocation against a variant's
/// per-participant limit.
///
/// Pending and approved orders both count, so a participant cannot
/// stage several pending orders that individually fit but jointly
/// exceed the limit. A limit of 0 means unlimited.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the new quantity would push the
/// participant past the limit.
pub(crate) fn check_per_participant_limit(
    conn: &mut SqliteConnection,
    variant: &Variant,
    participant_id: &str,
    quantity: i64,
) -> Result<(), CoreError> {
    if variant.per_participant_limit == 0 {
        return Ok(());
    }

    let allocated: i64 = evreg_persistence::queries::orders::allocated_quantity_for_variant(
        conn,
        variant.id.value(),
        participant_id,
    )?;

    if allocated + quantity > variant.per_participant_limit {
        return Err(CoreError::Validation(format!(
            "Ordering {quantity} more of variant '{}' would exceed the per-participant limit of {} ({allocated} already allocated)",
            variant.name, variant.per_participant_limit
        )));
    }
    Ok(())
}

/// Widens a `VariantId` lookup into the owning event's variant.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if the variant does not exist or
/// belongs to a different event.
pub(crate) fn resolve_variant(
    conn: &mut SqliteConnection,
    event: EventId,
    variant_id: VariantId,
) -> Result<Variant, CoreError> {
    let variant: Variant =
        evreg_persistence::queries::events::get_variant(conn, variant_id.value())?;

    if variant.event != event {
        return Err(CoreError::NotFound(format!(
            "Variant {} does not belong to event {event}",
            variant_id.value()
        )));
    }
    Ok(variant)
}
