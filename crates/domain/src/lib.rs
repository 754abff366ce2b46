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

mod codes;
mod error;
mod payload;
mod timestamps;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use codes::{
    TicketRefKind, propose_invite_code, propose_invite_token, propose_ticket_ref,
};
pub use error::DomainError;
pub use payload::{PayloadError, ScanCode, TicketPayload};
pub use timestamps::{format_timestamp, parse_timestamp};
pub use types::{
    Event, EventId, EventKind, EventPhase, InviteStatus, Order, OrderId, OrderStatus, Participant,
    ParticipantId, ParticipationMode, Team, TeamId, TeamInvite, TeamMember, TeamStatus, Ticket,
    TicketStatus, Variant, VariantId,
};
pub use validation::{
    TEAM_SIZE_DEFAULT, TEAM_SIZE_MAX, TEAM_SIZE_MIN, validate_capacity_config,
    validate_event_name, validate_participant_id, validate_quantity, validate_stock,
    validate_team_name, validate_team_size, validate_variant_config, validate_variant_name,
};
