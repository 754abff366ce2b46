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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    add_variant, close_event, create_event, create_order, create_team, decide_order,
    event_audit_trail, finalize_team, invite_member, join_by_code, join_by_link, leave_team,
    list_event_orders, list_event_teams, list_event_variants, list_events, list_my_invites,
    list_my_orders, list_my_teams, list_my_tickets, publish_event, register_for_event,
    remove_member, respond_to_invite, scan_ticket,
};
pub use request_response::{
    AddVariantRequest, AddVariantResponse, AuditEntryInfo, CloseEventResponse, CreateEventRequest,
    CreateEventResponse, CreateOrderRequest, CreateOrderResponse, CreateTeamRequest,
    CreateTeamResponse, DecideOrderRequest, DecideOrderResponse, EventAuditTrailResponse,
    EventInfo, EventOrdersResponse, EventTeamsResponse, FinalizeTeamResponse, InviteInfo,
    InviteMemberRequest, InviteMemberResponse, JoinTeamResponse, LeaveTeamResponse,
    ListEventsResponse, ListInvitesResponse, ListOrdersResponse, ListTeamsResponse,
    ListTicketsResponse, ListVariantsResponse, OrderInfo, PublishEventResponse,
    RegisterForEventRequest, RegisterForEventResponse, RemoveMemberRequest, RemoveMemberResponse,
    RespondInviteRequest, RespondInviteResponse, ScanTicketRequest, ScanTicketResponse, TeamInfo,
    TicketInfo, VariantInfo,
};
