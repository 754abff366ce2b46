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
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

use evreg_api::{
    AddVariantRequest, AddVariantResponse, ApiError, AuthenticatedActor, CloseEventResponse,
    CreateEventRequest, CreateEventResponse, CreateOrderRequest, CreateOrderResponse,
    CreateTeamRequest, CreateTeamResponse, DecideOrderRequest, DecideOrderResponse,
    EventAuditTrailResponse, EventOrdersResponse, EventTeamsResponse, FinalizeTeamResponse,
    InviteMemberRequest, InviteMemberResponse, JoinTeamResponse, LeaveTeamResponse,
    ListEventsResponse, ListInvitesResponse, ListOrdersResponse, ListTeamsResponse,
    ListTicketsResponse, ListVariantsResponse, PublishEventResponse, RegisterForEventRequest,
    RegisterForEventResponse, RemoveMemberRequest, RemoveMemberResponse, RespondInviteRequest,
    RespondInviteResponse, Role, ScanTicketRequest, ScanTicketResponse,
};
use evreg_audit::Cause;
use evreg_persistence::Persistence;

/// EvReg Server - HTTP server for the event registration platform.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access.
#[derive(Clone)]
struct AppState {
    /// The persistence layer behind every allocation decision.
    persistence: Arc<Mutex<Persistence>>,
}

/// Identity and cause fields carried by every mutating request.
///
/// Identity verification happens upstream in the platform gateway; by
/// the time a request reaches this server the actor id and role are
/// trusted as-is.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ActorContext {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor ('participant' or 'organizer').
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

/// API request for creating an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateEventApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The event name.
    name: String,
    /// The event kind ('normal', 'merch', or 'hackathon').
    kind: String,
    /// The registration limit. Zero means unlimited.
    registration_limit: i64,
    /// The total merchandise stock, if the event sells from one pool.
    stock: Option<i64>,
    /// The participation fee in minor currency units.
    fee: i64,
    /// The participation mode ('solo' or 'team').
    participation_mode: String,
    /// The maximum team size, for team events.
    team_size: Option<i64>,
    /// The registration deadline (RFC 3339), if any.
    registration_deadline: Option<String>,
}

/// API request for adding a merchandise variant.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct AddVariantApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The event to add the variant to.
    event_id: i64,
    /// The variant name.
    name: String,
    /// The variant's own stock pool.
    stock: i64,
    /// The variant price in minor currency units.
    price: i64,
    /// Per-participant allocation cap. Zero means uncapped.
    per_participant_limit: i64,
}

/// API request for an event phase transition (publish or close).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct EventPhaseApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The event to transition.
    event_id: i64,
}

/// API request for registering the caller for an event.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RegisterApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The event to register for.
    event_id: i64,
    /// Registration form responses as a JSON document, if any.
    form_responses: Option<String>,
}

/// API request for placing a merchandise order.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateOrderApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The merch event to order from.
    event_id: i64,
    /// The variant to order, or `None` to draw from event-level stock.
    variant_id: Option<i64>,
    /// The number of units requested.
    quantity: i64,
    /// Client-supplied batch identifier grouping related orders.
    batch_id: Option<String>,
}

/// API request for deciding a pending order.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct DecideOrderApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The order to decide.
    order_id: i64,
    /// `true` to approve, `false` to reject.
    approve: bool,
    /// An optional note recorded with the decision.
    note: Option<String>,
}

/// API request for founding a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct CreateTeamApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The team event to found the team for.
    event_id: i64,
    /// The team name.
    name: String,
    /// The team's own size cap, or `None` to use the event's team size.
    max_size: Option<i64>,
}

/// API request for inviting a participant to a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct InviteMemberApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The team to invite into.
    team_id: i64,
    /// The participant identity to invite.
    invitee: String,
}

/// API request for answering a pending invitation.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RespondInviteApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The team whose invitation is being answered.
    team_id: i64,
    /// `true` to accept and take a seat, `false` to decline.
    accept: bool,
}

/// API request for joining a team by its invite code.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct JoinByCodeApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The human-readable invite code.
    code: String,
}

/// API request for joining a team through its shareable link token.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct JoinByLinkApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The opaque join-link token.
    token: String,
}

/// API request naming a team the caller acts on (leave, finalize).
#[derive(Debug, Clone, Deserialize, Serialize)]
struct TeamActionApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The team acted on.
    team_id: i64,
}

/// API request for removing a member from a team.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct RemoveMemberApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The team to remove from.
    team_id: i64,
    /// The participant identity to remove.
    member: String,
}

/// API request for scanning a ticket at the door.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ScanTicketApiRequest {
    /// The acting identity and cause.
    #[serde(flatten)]
    context: ActorContext,
    /// The scanned code: a bare ticket reference or a full payload.
    code: String,
    /// The event the scanning station is bound to, if any.
    event_id: Option<i64>,
}

/// Query parameters identifying the caller of a read-only endpoint.
#[derive(Debug, Deserialize)]
struct ActorQuery {
    /// The actor ID performing this query.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Always true for error responses.
    error: bool,
    /// A human-readable error message.
    message: String,
}

/// An HTTP error with a status code and message.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Conflict { .. } | ApiError::CapacityExhausted { .. } => StatusCode::CONFLICT,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error while handling request");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// Parses a role string into a Role enum.
fn parse_role(role_str: &str) -> Result<Role, HttpError> {
    match role_str {
        "participant" => Ok(Role::Participant),
        "organizer" => Ok(Role::Organizer),
        _ => Err(HttpError {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid role: {role_str}"),
        }),
    }
}

/// Builds the authenticated actor and cause from a request's context.
fn authenticate(context: ActorContext) -> Result<(AuthenticatedActor, Cause), HttpError> {
    let role: Role = parse_role(&context.actor_role)?;
    let actor: AuthenticatedActor = AuthenticatedActor::new(context.actor_id, role);
    let cause: Cause = Cause::new(context.cause_id, context.cause_description);
    Ok((actor, cause))
}

/// Builds the authenticated actor from read-only query parameters.
fn authenticate_query(params: &ActorQuery) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = parse_role(&params.actor_role)?;
    Ok(AuthenticatedActor::new(params.actor_id.clone(), role))
}

/// Handler for POST `/events` endpoint.
///
/// Creates a new event in the draft phase.
async fn handle_create_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEventApiRequest>,
) -> Result<Json<CreateEventResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        role = %req.context.actor_role,
        name = %req.name,
        kind = %req.kind,
        "Handling create_event request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: CreateEventRequest = CreateEventRequest {
        name: req.name,
        kind: req.kind,
        registration_limit: req.registration_limit,
        stock: req.stock,
        fee: req.fee,
        participation_mode: req.participation_mode,
        team_size: req.team_size,
        registration_deadline: req.registration_deadline,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateEventResponse =
        evreg_api::create_event(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(event_id = response.event_id, "Successfully created event");

    Ok(Json(response))
}

/// Handler for POST `/variants` endpoint.
///
/// Adds a merchandise variant to a draft event.
async fn handle_add_variant(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AddVariantApiRequest>,
) -> Result<Json<AddVariantResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        name = %req.name,
        "Handling add_variant request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: AddVariantRequest = AddVariantRequest {
        event_id: req.event_id,
        name: req.name,
        stock: req.stock,
        price: req.price,
        per_participant_limit: req.per_participant_limit,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: AddVariantResponse =
        evreg_api::add_variant(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        variant_id = response.variant_id,
        "Successfully added variant"
    );

    Ok(Json(response))
}

/// Handler for POST `/events/publish` endpoint.
///
/// Opens an event for registration.
async fn handle_publish_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EventPhaseApiRequest>,
) -> Result<Json<PublishEventResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        "Handling publish_event request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: PublishEventResponse =
        evreg_api::publish_event(&mut persistence, req.event_id, &actor, cause)?;
    drop(persistence);

    info!(event_id = req.event_id, "Successfully published event");

    Ok(Json(response))
}

/// Handler for POST `/events/close` endpoint.
///
/// Closes an event to further registration.
async fn handle_close_event(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EventPhaseApiRequest>,
) -> Result<Json<CloseEventResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        "Handling close_event request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: CloseEventResponse =
        evreg_api::close_event(&mut persistence, req.event_id, &actor, cause)?;
    drop(persistence);

    info!(event_id = req.event_id, "Successfully closed event");

    Ok(Json(response))
}

/// Handler for GET `/events` endpoint.
///
/// Lists all events in the catalogue.
async fn handle_list_events(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEventsResponse>, HttpError> {
    info!("Handling list_events request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListEventsResponse = evreg_api::list_events(&mut persistence)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/variants` endpoint.
///
/// Lists an event's merchandise variants.
async fn handle_list_variants(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
) -> Result<Json<ListVariantsResponse>, HttpError> {
    info!(event_id = event_id, "Handling list_variants request");

    let mut persistence = app_state.persistence.lock().await;
    let response: ListVariantsResponse =
        evreg_api::list_event_variants(&mut persistence, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/register` endpoint.
///
/// Registers the calling participant for an event and issues a ticket.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<Json<RegisterForEventResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        "Handling register request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: RegisterForEventRequest = RegisterForEventRequest {
        event_id: req.event_id,
        form_responses: req.form_responses,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RegisterForEventResponse =
        evreg_api::register_for_event(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        ticket_ref = %response.ticket_ref,
        "Successfully registered for event"
    );

    Ok(Json(response))
}

/// Handler for POST `/orders` endpoint.
///
/// Places a pending merchandise order.
async fn handle_create_order(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateOrderApiRequest>,
) -> Result<Json<CreateOrderResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        quantity = req.quantity,
        "Handling create_order request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: CreateOrderRequest = CreateOrderRequest {
        event_id: req.event_id,
        variant_id: req.variant_id,
        quantity: req.quantity,
        batch_id: req.batch_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateOrderResponse =
        evreg_api::create_order(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(order_id = response.order_id, "Successfully created order");

    Ok(Json(response))
}

/// Handler for POST `/orders/decide` endpoint.
///
/// Approves or rejects a pending order. Approval consumes stock.
async fn handle_decide_order(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<DecideOrderApiRequest>,
) -> Result<Json<DecideOrderResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        order_id = req.order_id,
        approve = req.approve,
        "Handling decide_order request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: DecideOrderRequest = DecideOrderRequest {
        order_id: req.order_id,
        approve: req.approve,
        note: req.note,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: DecideOrderResponse =
        evreg_api::decide_order(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        order_id = response.order_id,
        status = %response.status,
        "Successfully decided order"
    );

    Ok(Json(response))
}

/// Handler for POST `/teams` endpoint.
///
/// Founds a team with the caller as leader.
async fn handle_create_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateTeamApiRequest>,
) -> Result<Json<CreateTeamResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        event_id = req.event_id,
        name = %req.name,
        "Handling create_team request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: CreateTeamRequest = CreateTeamRequest {
        event_id: req.event_id,
        name: req.name,
        max_size: req.max_size,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: CreateTeamResponse =
        evreg_api::create_team(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(team_id = response.team_id, "Successfully created team");

    Ok(Json(response))
}

/// Handler for POST `/teams/invite` endpoint.
///
/// Records a pending invitation from a team leader.
async fn handle_invite_member(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<InviteMemberApiRequest>,
) -> Result<Json<InviteMemberResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        team_id = req.team_id,
        invitee = %req.invitee,
        "Handling invite_member request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: InviteMemberRequest = InviteMemberRequest {
        team_id: req.team_id,
        invitee: req.invitee,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: InviteMemberResponse =
        evreg_api::invite_member(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        team_id = response.team_id,
        "Successfully recorded invitation"
    );

    Ok(Json(response))
}

/// Handler for POST `/teams/respond` endpoint.
///
/// Accepts or declines a pending invitation addressed to the caller.
async fn handle_respond_invite(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RespondInviteApiRequest>,
) -> Result<Json<RespondInviteResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        team_id = req.team_id,
        accept = req.accept,
        "Handling respond_invite request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: RespondInviteRequest = RespondInviteRequest {
        team_id: req.team_id,
        accept: req.accept,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RespondInviteResponse =
        evreg_api::respond_to_invite(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        team_id = response.team_id,
        joined = response.joined,
        "Successfully answered invitation"
    );

    Ok(Json(response))
}

/// Handler for POST `/teams/join_by_code` endpoint.
///
/// Joins a team by its human-readable invite code.
async fn handle_join_by_code(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<JoinByCodeApiRequest>,
) -> Result<Json<JoinTeamResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        code = %req.code,
        "Handling join_by_code request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: JoinTeamResponse =
        evreg_api::join_by_code(&mut persistence, &req.code, &actor, cause)?;
    drop(persistence);

    info!(
        team_id = response.team_id,
        "Successfully joined team by code"
    );

    Ok(Json(response))
}

/// Handler for POST `/teams/join_by_link` endpoint.
///
/// Joins a team through its shareable link token.
async fn handle_join_by_link(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<JoinByLinkApiRequest>,
) -> Result<Json<JoinTeamResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        "Handling join_by_link request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: JoinTeamResponse =
        evreg_api::join_by_link(&mut persistence, &req.token, &actor, cause)?;
    drop(persistence);

    info!(
        team_id = response.team_id,
        "Successfully joined team by link"
    );

    Ok(Json(response))
}

/// Handler for POST `/teams/leave` endpoint.
///
/// Gives up the caller's seat in a forming team.
async fn handle_leave_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TeamActionApiRequest>,
) -> Result<Json<LeaveTeamResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        team_id = req.team_id,
        "Handling leave_team request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: LeaveTeamResponse =
        evreg_api::leave_team(&mut persistence, req.team_id, &actor, cause)?;
    drop(persistence);

    info!(team_id = response.team_id, "Successfully left team");

    Ok(Json(response))
}

/// Handler for POST `/teams/remove` endpoint.
///
/// Removes a member from a forming team on the leader's behalf.
async fn handle_remove_member(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RemoveMemberApiRequest>,
) -> Result<Json<RemoveMemberResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        team_id = req.team_id,
        member = %req.member,
        "Handling remove_member request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: RemoveMemberRequest = RemoveMemberRequest {
        team_id: req.team_id,
        member: req.member,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: RemoveMemberResponse =
        evreg_api::remove_member(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(team_id = response.team_id, "Successfully removed member");

    Ok(Json(response))
}

/// Handler for POST `/teams/finalize` endpoint.
///
/// Freezes a team's membership and issues a ticket per member.
async fn handle_finalize_team(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<TeamActionApiRequest>,
) -> Result<Json<FinalizeTeamResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        team_id = req.team_id,
        "Handling finalize_team request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: FinalizeTeamResponse =
        evreg_api::finalize_team(&mut persistence, req.team_id, &actor, cause)?;
    drop(persistence);

    info!(
        team_id = response.team_id,
        tickets = response.tickets.len(),
        "Successfully finalized team"
    );

    Ok(Json(response))
}

/// Handler for POST `/scan` endpoint.
///
/// Checks a ticket in at the door, consuming it.
async fn handle_scan_ticket(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ScanTicketApiRequest>,
) -> Result<Json<ScanTicketResponse>, HttpError> {
    info!(
        actor_id = %req.context.actor_id,
        "Handling scan_ticket request"
    );

    let (actor, cause) = authenticate(req.context)?;

    let request: ScanTicketRequest = ScanTicketRequest {
        code: req.code,
        event_id: req.event_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: ScanTicketResponse =
        evreg_api::scan_ticket(&mut persistence, request, &actor, cause)?;
    drop(persistence);

    info!(
        ticket_ref = %response.ticket_ref,
        event_id = response.event_id,
        "Successfully admitted ticket"
    );

    Ok(Json(response))
}

/// Handler for GET `/my/tickets` endpoint.
///
/// Lists the calling participant's tickets.
async fn handle_list_my_tickets(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    info!(actor_id = %params.actor_id, "Handling list_my_tickets request");

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListTicketsResponse = evreg_api::list_my_tickets(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/my/orders` endpoint.
///
/// Lists the calling participant's orders.
async fn handle_list_my_orders(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<ListOrdersResponse>, HttpError> {
    info!(actor_id = %params.actor_id, "Handling list_my_orders request");

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListOrdersResponse = evreg_api::list_my_orders(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/my/teams` endpoint.
///
/// Lists the teams the calling participant sits in.
async fn handle_list_my_teams(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<ListTeamsResponse>, HttpError> {
    info!(actor_id = %params.actor_id, "Handling list_my_teams request");

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListTeamsResponse = evreg_api::list_my_teams(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/my/invites` endpoint.
///
/// Lists the calling participant's pending invitations.
async fn handle_list_my_invites(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<ListInvitesResponse>, HttpError> {
    info!(actor_id = %params.actor_id, "Handling list_my_invites request");

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListInvitesResponse = evreg_api::list_my_invites(&mut persistence, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/orders` endpoint.
///
/// Lists the orders of an event the caller organizes.
async fn handle_event_orders(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<EventOrdersResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        event_id = event_id,
        "Handling event_orders request"
    );

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: EventOrdersResponse =
        evreg_api::list_event_orders(&mut persistence, event_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/teams` endpoint.
///
/// Lists the teams of an event the caller organizes.
async fn handle_event_teams(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<EventTeamsResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        event_id = event_id,
        "Handling event_teams request"
    );

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: EventTeamsResponse =
        evreg_api::list_event_teams(&mut persistence, event_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/events/{event_id}/audit` endpoint.
///
/// Returns the ordered audit trail of an event the caller organizes.
async fn handle_event_audit(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(params): Query<ActorQuery>,
) -> Result<Json<EventAuditTrailResponse>, HttpError> {
    info!(
        actor_id = %params.actor_id,
        event_id = event_id,
        "Handling event_audit request"
    );

    let actor: AuthenticatedActor = authenticate_query(&params)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: EventAuditTrailResponse =
        evreg_api::event_audit_trail(&mut persistence, event_id, &actor)?;
    drop(persistence);

    Ok(Json(response))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/events", post(handle_create_event))
        .route("/events", get(handle_list_events))
        .route("/events/publish", post(handle_publish_event))
        .route("/events/close", post(handle_close_event))
        .route("/events/{event_id}/variants", get(handle_list_variants))
        .route("/events/{event_id}/orders", get(handle_event_orders))
        .route("/events/{event_id}/teams", get(handle_event_teams))
        .route("/events/{event_id}/audit", get(handle_event_audit))
        .route("/variants", post(handle_add_variant))
        .route("/register", post(handle_register))
        .route("/orders", post(handle_create_order))
        .route("/orders/decide", post(handle_decide_order))
        .route("/teams", post(handle_create_team))
        .route("/teams/invite", post(handle_invite_member))
        .route("/teams/respond", post(handle_respond_invite))
        .route("/teams/join_by_code", post(handle_join_by_code))
        .route("/teams/join_by_link", post(handle_join_by_link))
        .route("/teams/leave", post(handle_leave_team))
        .route("/teams/remove", post(handle_remove_member))
        .route("/teams/finalize", post(handle_finalize_team))
        .route("/scan", post(handle_scan_ticket))
        .route("/my/tickets", get(handle_list_my_tickets))
        .route("/my/orders", get(handle_list_my_orders))
        .route("/my/teams", get(handle_list_my_teams))
        .route("/my/invites", get(handle_list_my_invites))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing EvReg Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
