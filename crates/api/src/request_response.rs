// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

/// API request to create a new event in the draft phase.
///
/// This DTO is distinct from domain types and represents the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateEventRequest {
    /// The event name.
    pub name: String,
    /// The event kind ('normal', 'merch', or 'hackathon').
    pub kind: String,
    /// The registration limit. Zero means unlimited.
    pub registration_limit: i64,
    /// The total merchandise stock. Only meaningful for merch events.
    pub stock: Option<i64>,
    /// The participation fee in minor currency units. Zero means free.
    pub fee: i64,
    /// The participation mode ('solo' or 'team').
    pub participation_mode: String,
    /// The maximum team size. Only meaningful for team events.
    pub team_size: Option<i64>,
    /// The registration deadline (RFC 3339), if any.
    pub registration_deadline: Option<String>,
}

/// API response for a successful event creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateEventResponse {
    /// The canonical numeric identifier of the created event.
    pub event_id: i64,
    /// The event name.
    pub name: String,
    /// The event kind.
    pub kind: String,
    /// The event phase. Always 'draft' on creation.
    pub phase: String,
    /// A success message.
    pub message: String,
}

/// API request to add a merchandise variant to a draft event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddVariantRequest {
    /// The event to add the variant to.
    pub event_id: i64,
    /// The variant name.
    pub name: String,
    /// The variant's own stock pool.
    pub stock: i64,
    /// The variant price in minor currency units.
    pub price: i64,
    /// Per-participant allocation cap. Zero means uncapped.
    pub per_participant_limit: i64,
}

/// API response for a successful variant creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AddVariantResponse {
    /// The canonical numeric identifier of the created variant.
    pub variant_id: i64,
    /// The event the variant belongs to.
    pub event_id: i64,
    /// The variant name.
    pub name: String,
    /// The variant's stock pool.
    pub stock: i64,
    /// A success message.
    pub message: String,
}

/// API response for a successful event publication.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PublishEventResponse {
    /// The published event.
    pub event_id: i64,
    /// The event phase after the transition.
    pub phase: String,
    /// A success message.
    pub message: String,
}

/// API response for a successful event closure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CloseEventResponse {
    /// The closed event.
    pub event_id: i64,
    /// The event phase after the transition.
    pub phase: String,
    /// A success message.
    pub message: String,
}

/// API request to register the calling participant for an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterForEventRequest {
    /// The event to register for.
    pub event_id: i64,
    /// Registration form responses as a JSON document, if the event
    /// collects any.
    pub form_responses: Option<String>,
}

/// API response for a successful registration.
///
/// Registration is idempotent; re-registering returns the ticket that
/// the first registration issued.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterForEventResponse {
    /// The event registered for.
    pub event_id: i64,
    /// The issued ticket reference.
    pub ticket_ref: String,
    /// The scannable ticket payload.
    pub payload: String,
    /// The ticket status.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to place a merchandise order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateOrderRequest {
    /// The merch event to order from.
    pub event_id: i64,
    /// The variant to order, or `None` to draw from event-level stock.
    pub variant_id: Option<i64>,
    /// The number of units requested.
    pub quantity: i64,
    /// Client-supplied batch identifier grouping related orders.
    pub batch_id: Option<String>,
}

/// API response for a successfully placed order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateOrderResponse {
    /// The canonical numeric identifier of the created order.
    pub order_id: i64,
    /// The event the order belongs to.
    pub event_id: i64,
    /// The ordered variant, if any.
    pub variant_id: Option<i64>,
    /// The ordered quantity.
    pub quantity: i64,
    /// The total amount in minor currency units.
    pub amount: i64,
    /// The order status. Always 'pending' on creation.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to approve or reject a pending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecideOrderRequest {
    /// The order to decide.
    pub order_id: i64,
    /// `true` to approve, `false` to reject.
    pub approve: bool,
    /// An optional note recorded with the decision.
    pub note: Option<String>,
}

/// API response for a decided order.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DecideOrderResponse {
    /// The decided order.
    pub order_id: i64,
    /// The order status after the decision.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to found a team for a hackathon event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTeamRequest {
    /// The team event to found the team for.
    pub event_id: i64,
    /// The team name.
    pub name: String,
    /// The team's own size cap, or `None` to use the event's team size.
    pub max_size: Option<i64>,
}

/// API response for a successfully founded team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateTeamResponse {
    /// The canonical numeric identifier of the created team.
    pub team_id: i64,
    /// The event the team belongs to.
    pub event_id: i64,
    /// The team name.
    pub name: String,
    /// The human-readable code teammates can join with.
    pub invite_code: String,
    /// The opaque token behind the shareable join link.
    pub invite_token: String,
    /// The team status. Always 'forming' on creation.
    pub status: String,
    /// A success message.
    pub message: String,
}

/// API request to invite a participant to a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteMemberRequest {
    /// The team to invite into.
    pub team_id: i64,
    /// The participant identity to invite.
    pub invitee: String,
}

/// API response for a recorded invitation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InviteMemberResponse {
    /// The team invited into.
    pub team_id: i64,
    /// The invited participant.
    pub invitee: String,
    /// A success message.
    pub message: String,
}

/// API request to accept or decline a pending invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RespondInviteRequest {
    /// The team whose invitation is being answered.
    pub team_id: i64,
    /// `true` to accept and take a seat, `false` to decline.
    pub accept: bool,
}

/// API response for an answered invitation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RespondInviteResponse {
    /// The team whose invitation was answered.
    pub team_id: i64,
    /// Whether the caller now holds a seat in the team.
    pub joined: bool,
    /// A success message.
    pub message: String,
}

/// API response for joining a team by invite code or join link.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct JoinTeamResponse {
    /// The joined team.
    pub team_id: i64,
    /// The event the team belongs to.
    pub event_id: i64,
    /// The team name.
    pub name: String,
    /// A success message.
    pub message: String,
}

/// API response for leaving a team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LeaveTeamResponse {
    /// The team that was left.
    pub team_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to remove a member from a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveMemberRequest {
    /// The team to remove from.
    pub team_id: i64,
    /// The participant identity to remove.
    pub member: String,
}

/// API response for a removed member.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RemoveMemberResponse {
    /// The team removed from.
    pub team_id: i64,
    /// The removed participant.
    pub member: String,
    /// A success message.
    pub message: String,
}

/// API response for a finalized team.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FinalizeTeamResponse {
    /// The finalized team.
    pub team_id: i64,
    /// The team status after finalization.
    pub status: String,
    /// One ticket per member, issued atomically with the finalization.
    pub tickets: Vec<TicketInfo>,
    /// A success message.
    pub message: String,
}

/// API request to scan a ticket at the door.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTicketRequest {
    /// The scanned code: either a bare ticket reference or a full
    /// ticket payload.
    pub code: String,
    /// The event the scanning station is bound to, if any. When set,
    /// tickets for other events are rejected.
    pub event_id: Option<i64>,
}

/// API response for an accepted scan.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScanTicketResponse {
    /// The scanned ticket reference.
    pub ticket_ref: String,
    /// The event the ticket admits to.
    pub event_id: i64,
    /// The participant the ticket belongs to.
    pub participant: String,
    /// The ticket status after the scan.
    pub status: String,
    /// The check-in timestamp recorded by the scan.
    pub checked_in_at: Option<String>,
    /// A success message.
    pub message: String,
}

/// A ticket as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    /// The ticket reference.
    pub ticket_ref: String,
    /// The scannable ticket payload.
    pub payload: String,
    /// The event the ticket admits to.
    pub event_id: i64,
    /// The participant the ticket belongs to.
    pub participant: String,
    /// The ticket status.
    pub status: String,
    /// The team the ticket was issued through, if any.
    pub team_id: Option<i64>,
    /// The check-in timestamp, if the ticket has been scanned.
    pub checked_in_at: Option<String>,
    /// The issue timestamp.
    pub issued_at: String,
}

/// An order as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderInfo {
    /// The order identifier.
    pub order_id: i64,
    /// The event the order belongs to.
    pub event_id: i64,
    /// The participant who placed the order.
    pub participant: String,
    /// The ordered variant, if any.
    pub variant_id: Option<i64>,
    /// The ordered quantity.
    pub quantity: i64,
    /// The total amount in minor currency units.
    pub amount: i64,
    /// The order status.
    pub status: String,
    /// The batch the order belongs to, if any.
    pub batch_id: Option<String>,
    /// The note recorded with the decision, if any.
    pub decision_note: Option<String>,
    /// The identity that decided the order, if decided.
    pub decided_by: Option<String>,
    /// The decision timestamp, if decided.
    pub decided_at: Option<String>,
    /// The creation timestamp.
    pub created_at: String,
}

/// A team as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TeamInfo {
    /// The team identifier.
    pub team_id: i64,
    /// The event the team belongs to.
    pub event_id: i64,
    /// The team name.
    pub name: String,
    /// The team leader.
    pub leader: String,
    /// The team's size cap.
    pub max_size: i64,
    /// The team status.
    pub status: String,
    /// The human-readable code teammates can join with.
    pub invite_code: String,
    /// The number of seats currently taken.
    pub member_count: i64,
    /// The creation timestamp.
    pub created_at: String,
}

/// A pending invitation as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InviteInfo {
    /// The inviting team.
    pub team_id: i64,
    /// The inviting team's name.
    pub team_name: String,
    /// The event the team belongs to.
    pub event_id: i64,
    /// The invitation status.
    pub status: String,
    /// The invitation timestamp.
    pub invited_at: String,
}

/// An event as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventInfo {
    /// The event identifier.
    pub event_id: i64,
    /// The event name.
    pub name: String,
    /// The event kind.
    pub kind: String,
    /// The event phase.
    pub phase: String,
    /// The organizer who owns the event.
    pub organizer: String,
    /// The registration limit. Zero means unlimited.
    pub registration_limit: i64,
    /// The event-level stock pool, if any.
    pub stock: Option<i64>,
    /// The participation fee in minor currency units.
    pub fee: i64,
    /// The participation mode.
    pub participation_mode: String,
    /// The maximum team size, if the event forms teams.
    pub team_size: Option<i64>,
    /// The registration deadline, if any.
    pub registration_deadline: Option<String>,
}

/// A merchandise variant as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct VariantInfo {
    /// The variant identifier.
    pub variant_id: i64,
    /// The event the variant belongs to.
    pub event_id: i64,
    /// The variant name.
    pub name: String,
    /// The variant's remaining stock pool.
    pub stock: i64,
    /// The variant price in minor currency units.
    pub price: i64,
    /// Per-participant allocation cap. Zero means uncapped.
    pub per_participant_limit: i64,
}

/// One audit trail entry as presented by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AuditEntryInfo {
    /// The actor who initiated the change.
    pub actor_id: String,
    /// The actor's type ('participant' or 'organizer').
    pub actor_type: String,
    /// The cause identifier supplied with the request.
    pub cause_id: String,
    /// The cause description supplied with the request.
    pub cause_description: String,
    /// The action that was performed.
    pub action: String,
    /// Structured action details, if any.
    pub details: Option<String>,
    /// The affected record before the change, as JSON.
    pub before: String,
    /// The affected record after the change, as JSON.
    pub after: String,
}

/// API response listing the calling participant's tickets.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTicketsResponse {
    /// The participant the tickets belong to.
    pub participant: String,
    /// The tickets, oldest first.
    pub tickets: Vec<TicketInfo>,
}

/// API response listing the calling participant's orders.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListOrdersResponse {
    /// The participant the orders belong to.
    pub participant: String,
    /// The orders, oldest first.
    pub orders: Vec<OrderInfo>,
}

/// API response listing the teams the calling participant sits in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListTeamsResponse {
    /// The participant the teams belong to.
    pub participant: String,
    /// The teams, oldest first.
    pub teams: Vec<TeamInfo>,
}

/// API response listing the calling participant's pending invitations.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListInvitesResponse {
    /// The participant the invitations are addressed to.
    pub participant: String,
    /// The pending invitations, oldest first.
    pub invites: Vec<InviteInfo>,
}

/// API response listing all events.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListEventsResponse {
    /// The events, oldest first.
    pub events: Vec<EventInfo>,
}

/// API response listing an event's merchandise variants.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListVariantsResponse {
    /// The event the variants belong to.
    pub event_id: i64,
    /// The variants, oldest first.
    pub variants: Vec<VariantInfo>,
}

/// API response listing the orders of an event the caller organizes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventOrdersResponse {
    /// The event the orders belong to.
    pub event_id: i64,
    /// The orders, oldest first.
    pub orders: Vec<OrderInfo>,
}

/// API response listing the teams of an event the caller organizes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventTeamsResponse {
    /// The event the teams belong to.
    pub event_id: i64,
    /// The teams, oldest first.
    pub teams: Vec<TeamInfo>,
}

/// API response carrying the audit trail of an event the caller
/// organizes.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EventAuditTrailResponse {
    /// The event the trail belongs to.
    pub event_id: i64,
    /// The audit entries, oldest first.
    pub entries: Vec<AuditEntryInfo>,
}
