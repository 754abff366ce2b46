// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use evreg::{EventConfig, FinalizeOutcome, InviteResponse, OrderRequest, VariantConfig};
use evreg_audit::{Actor, AuditEvent, Cause};
use evreg_domain::{
    DomainError, Event, EventId, EventKind, Order, OrderId, ParticipantId, ParticipationMode, Team,
    TeamId, TeamInvite, Ticket, Variant, VariantId, format_timestamp, parse_timestamp,
};
use evreg_persistence::data_models::NewParticipant;
use evreg_persistence::{Persistence, mutations, queries};
use time::OffsetDateTime;

use crate::auth::{AuthenticatedActor, AuthorizationService, Role};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
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

/// Records the calling identity in the participant registry.
///
/// Identity arrives already verified from the platform gateway. The row
/// is upserted on every call so that invitations can name the
/// participant and foreign keys hold for records created later.
fn record_actor_identity(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    let recorded_at: String =
        format_timestamp(OffsetDateTime::now_utc()).map_err(translate_domain_error)?;
    let role: String = match authenticated_actor.role {
        Role::Participant => String::from("participant"),
        Role::Organizer => String::from("organizer"),
    };
    let row: NewParticipant = NewParticipant {
        participant_id: authenticated_actor.id.clone(),
        display_name: authenticated_actor.id.clone(),
        role,
        created_at: recorded_at,
    };
    mutations::participants::upsert_participant(persistence.connection(), &row)
        .map_err(translate_persistence_error)
}

/// Parses an optional RFC 3339 deadline from the API request.
fn parse_deadline(value: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    match value {
        Some(raw) => {
            let parsed: OffsetDateTime = parse_timestamp(raw).map_err(|err| match err {
                DomainError::TimestampParseError { timestamp, error } => ApiError::InvalidInput {
                    field: String::from("registration_deadline"),
                    message: format!("Failed to parse timestamp '{timestamp}': {error}"),
                },
                other => translate_domain_error(other),
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Renders an optional timestamp into its API form.
fn format_optional_timestamp(value: Option<OffsetDateTime>) -> Result<Option<String>, ApiError> {
    value
        .map(format_timestamp)
        .transpose()
        .map_err(translate_domain_error)
}

/// Loads an event and verifies the caller organizes it.
///
/// Whether the event exists is not revealed to non-owners; both a
/// missing event and someone else's event surface as not-found.
fn owned_event(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<Event, ApiError> {
    let event: Event = queries::events::get_event(persistence.connection(), event_id)
        .map_err(translate_persistence_error)?;
    if event.organizer != authenticated_actor.participant_id() {
        return Err(ApiError::NotFound {
            message: format!("Event {event_id}"),
        });
    }
    Ok(event)
}

fn ticket_to_info(ticket: &Ticket) -> Result<TicketInfo, ApiError> {
    Ok(TicketInfo {
        ticket_ref: ticket.ticket_ref.clone(),
        payload: ticket.payload.clone(),
        event_id: ticket.event.value(),
        participant: ticket.participant.to_string(),
        status: String::from(ticket.status.as_str()),
        team_id: ticket.team.map(TeamId::value),
        checked_in_at: format_optional_timestamp(ticket.checked_in_at)?,
        issued_at: format_timestamp(ticket.issued_at).map_err(translate_domain_error)?,
    })
}

fn order_to_info(order: &Order) -> Result<OrderInfo, ApiError> {
    Ok(OrderInfo {
        order_id: order.id.value(),
        event_id: order.event.value(),
        participant: order.participant.to_string(),
        variant_id: order.variant.map(VariantId::value),
        quantity: order.quantity,
        amount: order.amount,
        status: String::from(order.status.as_str()),
        batch_id: order.batch_id.clone(),
        decision_note: order.decision_note.clone(),
        decided_by: order.decided_by.as_ref().map(ToString::to_string),
        decided_at: format_optional_timestamp(order.decided_at)?,
        created_at: format_timestamp(order.created_at).map_err(translate_domain_error)?,
    })
}

fn team_to_info(persistence: &mut Persistence, team: &Team) -> Result<TeamInfo, ApiError> {
    let member_count: i64 =
        queries::teams::count_team_members(persistence.connection(), team.id.value())
            .map_err(translate_persistence_error)?;
    Ok(TeamInfo {
        team_id: team.id.value(),
        event_id: team.event.value(),
        name: team.name.clone(),
        leader: team.leader.to_string(),
        max_size: team.max_size,
        status: String::from(team.status.as_str()),
        invite_code: team.invite_code.clone(),
        member_count,
        created_at: format_timestamp(team.created_at).map_err(translate_domain_error)?,
    })
}

fn invite_to_info(
    persistence: &mut Persistence,
    invite: &TeamInvite,
) -> Result<InviteInfo, ApiError> {
    let team: Team = queries::teams::get_team(persistence.connection(), invite.team.value())
        .map_err(translate_persistence_error)?;
    Ok(InviteInfo {
        team_id: team.id.value(),
        team_name: team.name,
        event_id: team.event.value(),
        status: String::from(invite.status.as_str()),
        invited_at: format_timestamp(invite.invited_at).map_err(translate_domain_error)?,
    })
}

fn event_to_info(event: &Event) -> Result<EventInfo, ApiError> {
    Ok(EventInfo {
        event_id: event.id.value(),
        name: event.name.clone(),
        kind: String::from(event.kind.as_str()),
        phase: String::from(event.phase.as_str()),
        organizer: event.organizer.to_string(),
        registration_limit: event.registration_limit,
        stock: event.stock,
        fee: event.fee,
        participation_mode: String::from(event.participation_mode.as_str()),
        team_size: event.team_size,
        registration_deadline: format_optional_timestamp(event.registration_deadline)?,
    })
}

fn variant_to_info(variant: &Variant) -> VariantInfo {
    VariantInfo {
        variant_id: variant.id.value(),
        event_id: variant.event.value(),
        name: variant.name.clone(),
        stock: variant.stock,
        price: variant.price,
        per_participant_limit: variant.per_participant_limit,
    }
}

fn audit_to_entry(entry: AuditEvent) -> AuditEntryInfo {
    AuditEntryInfo {
        actor_id: entry.actor.id,
        actor_type: entry.actor.actor_type,
        cause_id: entry.cause.id,
        cause_description: entry.cause.description,
        action: entry.action.name,
        details: entry.action.details,
        before: entry.before.data,
        after: entry.after.data,
    }
}

/// Creates a new event via the API boundary with authorization.
///
/// This function:
/// - Verifies the actor is authorized (Organizer role required)
/// - Translates the API request into a core event configuration
/// - Runs the core operation, which records the audit event
/// - Translates any errors to API errors
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to create an event
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Returns
///
/// * `Ok(CreateEventResponse)` with the created event in the draft phase
/// * `Err(ApiError)` if unauthorized, the request is invalid, or a rule is violated
///
/// # Errors
///
/// Returns an error if:
/// - The actor is not authorized (not an Organizer)
/// - The kind, participation mode, or deadline cannot be parsed
/// - The capacity configuration is inconsistent
pub fn create_event(
    persistence: &mut Persistence,
    request: CreateEventRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateEventResponse, ApiError> {
    // Enforce authorization before touching state
    AuthorizationService::authorize_create_event(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    // Translate API request into domain types
    let kind: EventKind = request.kind.parse().map_err(translate_domain_error)?;
    let participation_mode: ParticipationMode = request
        .participation_mode
        .parse()
        .map_err(translate_domain_error)?;
    let registration_deadline: Option<OffsetDateTime> =
        parse_deadline(request.registration_deadline.as_deref())?;

    let config: EventConfig = EventConfig {
        name: request.name,
        kind,
        registration_limit: request.registration_limit,
        stock: request.stock,
        fee: request.fee,
        participation_mode,
        team_size: request.team_size,
        registration_deadline,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let organizer: ParticipantId = authenticated_actor.participant_id();

    let event: Event = evreg::create_event(persistence, &organizer, config, actor, cause)
        .map_err(translate_core_error)?;

    let message: String = format!("Successfully created event '{}' in draft phase", event.name);
    Ok(CreateEventResponse {
        event_id: event.id.value(),
        name: event.name,
        kind: String::from(event.kind.as_str()),
        phase: String::from(event.phase.as_str()),
        message,
    })
}

/// Adds a merchandise variant to a draft event.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to add a variant
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, the event is not
/// a merch event owned by the caller, the event has left the draft
/// phase, or the variant configuration is invalid.
pub fn add_variant(
    persistence: &mut Persistence,
    request: AddVariantRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<AddVariantResponse, ApiError> {
    AuthorizationService::authorize_add_variant(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let config: VariantConfig = VariantConfig {
        name: request.name,
        stock: request.stock,
        price: request.price,
        per_participant_limit: request.per_participant_limit,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let organizer: ParticipantId = authenticated_actor.participant_id();

    let variant: Variant = evreg::add_variant(
        persistence,
        EventId::new(request.event_id),
        &organizer,
        config,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Successfully added variant '{}' to event {}",
        variant.name, request.event_id
    );
    Ok(AddVariantResponse {
        variant_id: variant.id.value(),
        event_id: variant.event.value(),
        name: variant.name,
        stock: variant.stock,
        message,
    })
}

/// Publishes a draft event, opening it for registrations and orders.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to publish
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, the event does
/// not exist or is not owned by the caller, or the event has already
/// left the draft phase.
pub fn publish_event(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<PublishEventResponse, ApiError> {
    AuthorizationService::authorize_publish_event(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let organizer: ParticipantId = authenticated_actor.participant_id();

    let event: Event = evreg::publish_event(
        persistence,
        EventId::new(event_id),
        &organizer,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    Ok(PublishEventResponse {
        event_id: event.id.value(),
        phase: String::from(event.phase.as_str()),
        message: format!("Successfully published event '{}'", event.name),
    })
}

/// Closes a published event, ending all registrations and orders.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The event to close
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, the event does
/// not exist or is not owned by the caller, or the event is not in the
/// published phase.
pub fn close_event(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CloseEventResponse, ApiError> {
    AuthorizationService::authorize_close_event(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let organizer: ParticipantId = authenticated_actor.participant_id();

    let event: Event = evreg::close_event(
        persistence,
        EventId::new(event_id),
        &organizer,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    Ok(CloseEventResponse {
        event_id: event.id.value(),
        phase: String::from(event.phase.as_str()),
        message: format!("Successfully closed event '{}'", event.name),
    })
}

/// Registers the calling participant for an event and issues a ticket.
///
/// Registration is idempotent: if the caller already holds a ticket for
/// the event, that ticket is returned and no capacity is consumed.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to register
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the event does not exist, is not accepting
/// registrations, forms teams instead of registering individuals, or
/// the registration limit is reached.
pub fn register_for_event(
    persistence: &mut Persistence,
    request: RegisterForEventRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RegisterForEventResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let participant: ParticipantId = authenticated_actor.participant_id();

    let ticket: Ticket = evreg::register_for_event(
        persistence,
        EventId::new(request.event_id),
        &participant,
        request.form_responses.as_deref(),
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Successfully registered for event {} with ticket {}",
        request.event_id, ticket.ticket_ref
    );
    Ok(RegisterForEventResponse {
        event_id: ticket.event.value(),
        ticket_ref: ticket.ticket_ref,
        payload: ticket.payload,
        status: String::from(ticket.status.as_str()),
        message,
    })
}

/// Places a merchandise order for the calling participant.
///
/// Orders against a variant with a per-participant limit count the
/// caller's pending and approved quantity toward that limit. Orders
/// without a variant draw from the event-level stock and reserve it
/// immediately.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to place an order
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the event is not an open merch event, the
/// variant does not belong to it, the quantity is not positive, the
/// per-participant limit would be exceeded, or stock cannot cover the
/// request.
pub fn create_order(
    persistence: &mut Persistence,
    request: CreateOrderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateOrderResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let order_request: OrderRequest = OrderRequest {
        variant: request.variant_id.map(VariantId::new),
        quantity: request.quantity,
        batch_id: request.batch_id,
    };

    let actor: Actor = authenticated_actor.to_audit_actor();
    let participant: ParticipantId = authenticated_actor.participant_id();

    let order: Order = evreg::create_order(
        persistence,
        EventId::new(request.event_id),
        &participant,
        order_request,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Successfully placed order {} for event {}",
        order.id.value(),
        request.event_id
    );
    Ok(CreateOrderResponse {
        order_id: order.id.value(),
        event_id: order.event.value(),
        variant_id: order.variant.map(VariantId::value),
        quantity: order.quantity,
        amount: order.amount,
        status: String::from(order.status.as_str()),
        message,
    })
}

/// Approves or rejects a pending order.
///
/// Approval reserves stock at decision time; rejection flips the
/// status and touches no stock. Either way the order leaves the
/// pending state exactly once.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request carrying the verdict
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, the order does
/// not exist or belongs to an event the caller does not organize, the
/// order has already been decided, or approval finds insufficient
/// stock.
pub fn decide_order(
    persistence: &mut Persistence,
    request: DecideOrderRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<DecideOrderResponse, ApiError> {
    AuthorizationService::authorize_decide_order(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let decider: ParticipantId = authenticated_actor.participant_id();

    let order: Order = evreg::decide_order(
        persistence,
        OrderId::new(request.order_id),
        &decider,
        request.approve,
        request.note.as_deref(),
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let verdict: &str = if request.approve {
        "approved"
    } else {
        "rejected"
    };
    Ok(DecideOrderResponse {
        order_id: order.id.value(),
        status: String::from(order.status.as_str()),
        message: format!("Successfully {verdict} order {}", order.id.value()),
    })
}

/// Founds a team for a hackathon event with the caller as leader.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request to found a team
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the event does not form teams, is not accepting
/// registrations, the caller already belongs to a team for the event,
/// or the requested size cap exceeds the event's team size.
pub fn create_team(
    persistence: &mut Persistence,
    request: CreateTeamRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<CreateTeamResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let leader: ParticipantId = authenticated_actor.participant_id();

    let team: Team = evreg::create_team(
        persistence,
        EventId::new(request.event_id),
        &leader,
        &request.name,
        request.max_size,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Successfully founded team '{}' for event {}",
        team.name, request.event_id
    );
    Ok(CreateTeamResponse {
        team_id: team.id.value(),
        event_id: team.event.value(),
        name: team.name,
        invite_code: team.invite_code,
        invite_token: team.invite_token,
        status: String::from(team.status.as_str()),
        message,
    })
}

/// Invites a participant to the caller's team.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request naming the invitee
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the caller is not the team leader, the invitee
/// is unknown or already has a pending invite, the team is full, or
/// membership is frozen.
pub fn invite_member(
    persistence: &mut Persistence,
    request: InviteMemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<InviteMemberResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let inviter: ParticipantId = authenticated_actor.participant_id();
    let invitee: ParticipantId = ParticipantId::new(&request.invitee);

    let team: Team = evreg::invite_member(
        persistence,
        TeamId::new(request.team_id),
        &inviter,
        &invitee,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!("Successfully invited '{invitee}' to team '{}'", team.name);
    Ok(InviteMemberResponse {
        team_id: team.id.value(),
        invitee: request.invitee,
        message,
    })
}

/// Accepts or declines a pending invitation addressed to the caller.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request carrying the answer
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if no pending invite exists for the caller on the
/// team, the caller joined another team in the meantime, or acceptance
/// finds the team full or frozen.
pub fn respond_to_invite(
    persistence: &mut Persistence,
    request: RespondInviteRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RespondInviteResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let invitee: ParticipantId = authenticated_actor.participant_id();

    let response: InviteResponse = evreg::respond_to_invite(
        persistence,
        TeamId::new(request.team_id),
        &invitee,
        request.accept,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    match response {
        InviteResponse::Joined(team) => Ok(RespondInviteResponse {
            team_id: team.id.value(),
            joined: true,
            message: format!("Successfully joined team '{}'", team.name),
        }),
        InviteResponse::Declined => Ok(RespondInviteResponse {
            team_id: request.team_id,
            joined: false,
            message: String::from("Successfully declined the invitation"),
        }),
    }
}

/// Joins a team using its human-readable invite code.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `code` - The invite code shared by the team
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if no team carries the code, the caller already
/// holds a seat in a team for the event, or the team is full or frozen.
pub fn join_by_code(
    persistence: &mut Persistence,
    code: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<JoinTeamResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let participant: ParticipantId = authenticated_actor.participant_id();

    let team: Team = evreg::join_by_code(persistence, code, &participant, actor, cause)
        .map_err(translate_core_error)?;

    let message: String = format!("Successfully joined team '{}'", team.name);
    Ok(JoinTeamResponse {
        team_id: team.id.value(),
        event_id: team.event.value(),
        name: team.name,
        message,
    })
}

/// Joins a team using the opaque token behind its shareable link.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `token` - The join link token
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if no team carries the token, the caller already
/// holds a seat in a team for the event, or the team is full or frozen.
pub fn join_by_link(
    persistence: &mut Persistence,
    token: &str,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<JoinTeamResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let participant: ParticipantId = authenticated_actor.participant_id();

    let team: Team = evreg::join_by_link(persistence, token, &participant, actor, cause)
        .map_err(translate_core_error)?;

    let message: String = format!("Successfully joined team '{}'", team.name);
    Ok(JoinTeamResponse {
        team_id: team.id.value(),
        event_id: team.event.value(),
        name: team.name,
        message,
    })
}

/// Gives up the caller's seat in a forming team.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to leave
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the caller is the leader, holds no seat in the
/// team, or the team is already finalized.
pub fn leave_team(
    persistence: &mut Persistence,
    team_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<LeaveTeamResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let member: ParticipantId = authenticated_actor.participant_id();

    evreg::leave_team(persistence, TeamId::new(team_id), &member, actor, cause)
        .map_err(translate_core_error)?;

    Ok(LeaveTeamResponse {
        team_id,
        message: format!("Successfully left team {team_id}"),
    })
}

/// Removes a member from the caller's team, freeing the seat.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request naming the member
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the caller is not the team leader, names
/// themselves, the target holds no seat, or the team is already
/// finalized.
pub fn remove_member(
    persistence: &mut Persistence,
    request: RemoveMemberRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<RemoveMemberResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let leader: ParticipantId = authenticated_actor.participant_id();
    let target: ParticipantId = ParticipantId::new(&request.member);

    evreg::remove_member(
        persistence,
        TeamId::new(request.team_id),
        &leader,
        &target,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let message: String = format!(
        "Successfully removed '{target}' from team {}",
        request.team_id
    );
    Ok(RemoveMemberResponse {
        team_id: request.team_id,
        member: request.member,
        message,
    })
}

/// Finalizes the caller's team, issuing one ticket per member.
///
/// Finalization freezes membership and issues every ticket in the same
/// transaction; a failure on any member issues none.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to finalize
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the caller is not the team leader, the team has
/// fewer than two members, or it is already finalized.
pub fn finalize_team(
    persistence: &mut Persistence,
    team_id: i64,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<FinalizeTeamResponse, ApiError> {
    AuthorizationService::authorize_self_service(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let leader: ParticipantId = authenticated_actor.participant_id();

    let outcome: FinalizeOutcome =
        evreg::finalize_team(persistence, TeamId::new(team_id), &leader, actor, cause)
            .map_err(translate_core_error)?;

    let tickets: Vec<TicketInfo> = outcome
        .tickets
        .iter()
        .map(ticket_to_info)
        .collect::<Result<_, _>>()?;
    let message: String = format!(
        "Successfully finalized team '{}' and issued {} tickets",
        outcome.team.name,
        tickets.len()
    );
    Ok(FinalizeTeamResponse {
        team_id: outcome.team.id.value(),
        status: String::from(outcome.team.status.as_str()),
        tickets,
        message,
    })
}

/// Scans a ticket at the door and marks it used.
///
/// The code may be a bare ticket reference or a full ticket payload.
/// When the scanning station is bound to an event, tickets for other
/// events are rejected without revealing whether they exist.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The API request carrying the scanned code
/// * `authenticated_actor` - The authenticated actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, the code is
/// malformed, no matching ticket exists within the caller's events and
/// scope, or the ticket was already used or cancelled.
pub fn scan_ticket(
    persistence: &mut Persistence,
    request: ScanTicketRequest,
    authenticated_actor: &AuthenticatedActor,
    cause: Cause,
) -> Result<ScanTicketResponse, ApiError> {
    AuthorizationService::authorize_scan_ticket(authenticated_actor)?;
    record_actor_identity(persistence, authenticated_actor)?;

    let actor: Actor = authenticated_actor.to_audit_actor();
    let scanner: ParticipantId = authenticated_actor.participant_id();
    let event_scope: Option<EventId> = request.event_id.map(EventId::new);

    let ticket: Ticket = evreg::scan_ticket(
        persistence,
        &request.code,
        event_scope,
        &scanner,
        actor,
        cause,
    )
    .map_err(translate_core_error)?;

    let checked_in_at: Option<String> = format_optional_timestamp(ticket.checked_in_at)?;
    let message: String = format!(
        "Successfully admitted ticket {} to event {}",
        ticket.ticket_ref,
        ticket.event.value()
    );
    Ok(ScanTicketResponse {
        ticket_ref: ticket.ticket_ref,
        event_id: ticket.event.value(),
        participant: ticket.participant.to_string(),
        status: String::from(ticket.status.as_str()),
        checked_in_at,
        message,
    })
}

/// Lists all events in the catalogue, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_events(persistence: &mut Persistence) -> Result<ListEventsResponse, ApiError> {
    let events: Vec<Event> =
        queries::events::list_events(persistence.connection()).map_err(translate_persistence_error)?;
    let infos: Vec<EventInfo> = events
        .iter()
        .map(event_to_info)
        .collect::<Result<_, _>>()?;
    Ok(ListEventsResponse { events: infos })
}

/// Lists the merchandise variants of an event.
///
/// # Errors
///
/// Returns an error if the event does not exist or the query fails.
pub fn list_event_variants(
    persistence: &mut Persistence,
    event_id: i64,
) -> Result<ListVariantsResponse, ApiError> {
    queries::events::get_event(persistence.connection(), event_id)
        .map_err(translate_persistence_error)?;
    let variants: Vec<Variant> =
        queries::events::list_variants_for_event(persistence.connection(), event_id)
            .map_err(translate_persistence_error)?;
    Ok(ListVariantsResponse {
        event_id,
        variants: variants.iter().map(variant_to_info).collect(),
    })
}

/// Lists the calling participant's tickets, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_tickets(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListTicketsResponse, ApiError> {
    let tickets: Vec<Ticket> = queries::tickets::list_tickets_for_participant(
        persistence.connection(),
        &authenticated_actor.id,
    )
    .map_err(translate_persistence_error)?;
    let infos: Vec<TicketInfo> = tickets
        .iter()
        .map(ticket_to_info)
        .collect::<Result<_, _>>()?;
    Ok(ListTicketsResponse {
        participant: authenticated_actor.id.clone(),
        tickets: infos,
    })
}

/// Lists the calling participant's orders, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_orders(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListOrdersResponse, ApiError> {
    let orders: Vec<Order> = queries::orders::list_orders_for_participant(
        persistence.connection(),
        &authenticated_actor.id,
    )
    .map_err(translate_persistence_error)?;
    let infos: Vec<OrderInfo> = orders
        .iter()
        .map(order_to_info)
        .collect::<Result<_, _>>()?;
    Ok(ListOrdersResponse {
        participant: authenticated_actor.id.clone(),
        orders: infos,
    })
}

/// Lists the teams the calling participant holds a seat in.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_teams(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListTeamsResponse, ApiError> {
    let teams: Vec<Team> = queries::teams::list_teams_for_participant(
        persistence.connection(),
        &authenticated_actor.id,
    )
    .map_err(translate_persistence_error)?;
    let infos: Vec<TeamInfo> = teams
        .iter()
        .map(|team| team_to_info(persistence, team))
        .collect::<Result<_, _>>()?;
    Ok(ListTeamsResponse {
        participant: authenticated_actor.id.clone(),
        teams: infos,
    })
}

/// Lists the calling participant's pending invitations.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_my_invites(
    persistence: &mut Persistence,
    authenticated_actor: &AuthenticatedActor,
) -> Result<ListInvitesResponse, ApiError> {
    let invites: Vec<TeamInvite> = queries::teams::list_pending_invites_for_participant(
        persistence.connection(),
        &authenticated_actor.id,
    )
    .map_err(translate_persistence_error)?;
    let infos: Vec<InviteInfo> = invites
        .iter()
        .map(|invite| invite_to_info(persistence, invite))
        .collect::<Result<_, _>>()?;
    Ok(ListInvitesResponse {
        participant: authenticated_actor.id.clone(),
        invites: infos,
    })
}

/// Lists the orders of an event the caller organizes.
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, or the event does
/// not exist or is not owned by the caller.
pub fn list_event_orders(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventOrdersResponse, ApiError> {
    AuthorizationService::authorize_view_event_records(authenticated_actor)?;
    owned_event(persistence, event_id, authenticated_actor)?;

    let orders: Vec<Order> =
        queries::orders::list_orders_for_event(persistence.connection(), event_id)
            .map_err(translate_persistence_error)?;
    let infos: Vec<OrderInfo> = orders
        .iter()
        .map(order_to_info)
        .collect::<Result<_, _>>()?;
    Ok(EventOrdersResponse {
        event_id,
        orders: infos,
    })
}

/// Lists the teams of an event the caller organizes.
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, or the event does
/// not exist or is not owned by the caller.
pub fn list_event_teams(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventTeamsResponse, ApiError> {
    AuthorizationService::authorize_view_event_records(authenticated_actor)?;
    owned_event(persistence, event_id, authenticated_actor)?;

    let teams: Vec<Team> = queries::teams::list_teams_for_event(persistence.connection(), event_id)
        .map_err(translate_persistence_error)?;
    let infos: Vec<TeamInfo> = teams
        .iter()
        .map(|team| team_to_info(persistence, team))
        .collect::<Result<_, _>>()?;
    Ok(EventTeamsResponse {
        event_id,
        teams: infos,
    })
}

/// Returns the ordered audit trail of an event the caller organizes.
///
/// # Errors
///
/// Returns an error if the actor is not an Organizer, or the event does
/// not exist or is not owned by the caller.
pub fn event_audit_trail(
    persistence: &mut Persistence,
    event_id: i64,
    authenticated_actor: &AuthenticatedActor,
) -> Result<EventAuditTrailResponse, ApiError> {
    AuthorizationService::authorize_view_event_records(authenticated_actor)?;
    owned_event(persistence, event_id, authenticated_actor)?;

    let entries: Vec<AuditEvent> =
        queries::audit::list_audit_events_for_event(persistence.connection(), event_id)
            .map_err(translate_persistence_error)?;
    Ok(EventAuditTrailResponse {
        event_id,
        entries: entries.into_iter().map(audit_to_entry).collect(),
    })
}
