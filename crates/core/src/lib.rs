// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capacity;
mod error;
mod events;
mod orders;
mod registration;
mod scan;
mod teams;
mod tickets;

#[cfg(test)]
mod tests;

use evreg_domain::{Event, format_timestamp};
use time::OffsetDateTime;

// Re-export public types and operations
pub use error::CoreError;
pub use events::{
    EventConfig, VariantConfig, add_variant, close_event, create_event, publish_event,
};
pub use orders::{OrderRequest, create_order, decide_order};
pub use registration::register_for_event;
pub use scan::scan_ticket;
pub use teams::{
    FinalizeOutcome, InviteResponse, create_team, finalize_team, invite_member, join_by_code,
    join_by_link, leave_team, remove_member, respond_to_invite,
};

/// Validates that an event is currently accepting registrations and
/// orders.
///
/// This is a read-only validation that does not create audit events.
///
/// # Arguments
///
/// * `event` - The event to check
/// * `now` - The instant to evaluate the deadline against
///
/// # Returns
///
/// * `Ok(())` if the event is published and its deadline has not passed
/// * `Err(CoreError::Conflict)` otherwise
///
/// # Errors
///
/// Returns an error if the event is not in the published phase or its
/// registration deadline has passed.
pub fn validate_registration_open(event: &Event, now: OffsetDateTime) -> Result<(), CoreError> {
    if !event.phase.accepts_registrations() {
        return Err(CoreError::Conflict(format!(
            "Event {} is not accepting registrations",
            event.id
        )));
    }
    if event.deadline_passed(now) {
        return Err(CoreError::Conflict(format!(
            "Registration for event {} closed at its deadline",
            event.id
        )));
    }
    Ok(())
}

/// Captures the current instant and its stored rendering.
pub(crate) fn timestamp_now() -> Result<(OffsetDateTime, String), CoreError> {
    let now: OffsetDateTime = OffsetDateTime::now_utc();
    let recorded_at: String = format_timestamp(now)?;
    Ok((now, recorded_at))
}
