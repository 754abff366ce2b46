// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Identifies a persisted event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(i64);

impl EventId {
    /// Creates an `EventId` from its database identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a persisted merchandise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantId(i64);

impl VariantId {
    /// Creates a `VariantId` from its database identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Identifies a persisted order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates an `OrderId` from its database identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Identifies a persisted team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamId(i64);

impl TeamId {
    /// Creates a `TeamId` from its database identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the numeric identifier.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

/// Identifies a participant.
///
/// Participant identities are issued and verified by the platform's
/// authentication service; this core only stores the opaque identifier
/// it receives with each request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParticipantId {
    /// The opaque identity value.
    value: String,
}

impl ParticipantId {
    /// Creates a `ParticipantId` from an already-verified identity value.
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.to_string(),
        }
    }

    /// Returns the identity value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// The kind of event, which determines which allocation flows apply.
///
/// - `Normal` events allocate registration slots directly.
/// - `Merch` events allocate stock through the order approval flow.
/// - `Hackathon` events allocate through registration or team formation,
///   depending on the event's participation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    Normal,
    Merch,
    Hackathon,
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "merch" => Ok(Self::Merch),
            "hackathon" => Ok(Self::Hackathon),
            _ => Err(DomainError::InvalidEventKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventKind {
    /// Converts this kind to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Merch => "merch",
            Self::Hackathon => "hackathon",
        }
    }
}

/// How participants take part in a hackathon event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ParticipationMode {
    /// Individual registration; no teams.
    #[default]
    Solo,
    /// Team registration; tickets are issued at team finalize.
    Team,
}

impl FromStr for ParticipationMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "solo" => Ok(Self::Solo),
            "team" => Ok(Self::Team),
            _ => Err(DomainError::InvalidParticipationMode(s.to_string())),
        }
    }
}

impl std::fmt::Display for ParticipationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ParticipationMode {
    /// Converts this mode to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Team => "team",
        }
    }
}

/// Represents the lifecycle state of an event.
///
/// Registration and ordering are only permitted while the event is
/// `Published`; `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EventPhase {
    /// Initial state after creation. Not visible to participants.
    #[default]
    Draft,
    /// Open for registration and ordering.
    Published,
    /// No further allocation activity.
    Closed,
}

impl FromStr for EventPhase {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "published" => Ok(Self::Published),
            "closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidEventPhase(s.to_string())),
        }
    }
}

impl std::fmt::Display for EventPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EventPhase {
    /// Converts this phase to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Closed => "closed",
        }
    }

    /// Checks if a transition from this phase to another is valid.
    ///
    /// Valid transitions are:
    /// - Draft → Published
    /// - Published → Closed
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Draft, Self::Published) | (Self::Published, Self::Closed)
        )
    }

    /// Returns whether participants may register or order in this phase.
    #[must_use]
    pub const fn accepts_registrations(&self) -> bool {
        matches!(self, Self::Published)
    }
}

/// Represents the lifecycle state of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    /// Issued and valid for check-in.
    #[default]
    Active,
    /// Consumed by a check-in scan.
    Used,
    /// Revoked; no longer valid for check-in.
    Cancelled,
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "used" => Ok(Self::Used),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidTicketStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TicketStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Used => "used",
            Self::Cancelled => "cancelled",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Active → Used
    /// - Active → Cancelled
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Active, Self::Used) | (Self::Active, Self::Cancelled)
        )
    }
}

/// Represents the decision state of a merchandise order.
///
/// Orders are created `Pending`; `Approved` and `Rejected` are terminal
/// and immutable. Stock moves only on the `Pending` → `Approved`
/// transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    /// Awaiting an organizer decision. No capacity is held.
    #[default]
    Pending,
    /// Decision accepted; stock was consumed at decision time.
    Approved,
    /// Decision declined; no capacity was ever consumed.
    Rejected,
}

impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(DomainError::InvalidOrderStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl OrderStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Approved
    /// - Pending → Rejected
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Approved) | (Self::Pending, Self::Rejected)
        )
    }

    /// Returns whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Represents the lifecycle state of a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TeamStatus {
    /// Membership may change through invites, joins, leaves, and removals.
    #[default]
    Forming,
    /// Membership is frozen and tickets have been issued.
    Finalized,
}

impl FromStr for TeamStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "forming" => Ok(Self::Forming),
            "finalized" => Ok(Self::Finalized),
            _ => Err(DomainError::InvalidTeamStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TeamStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TeamStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Forming => "forming",
            Self::Finalized => "finalized",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// The only valid transition is Forming → Finalized; there is no
    /// reverse transition.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Forming, Self::Finalized))
    }
}

/// Represents the state of a team invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InviteStatus {
    /// Awaiting a response from the invitee.
    #[default]
    Pending,
    /// Accepted; the invitee became a member at acceptance time.
    Accepted,
    /// Declined. A declined invite does not block a later re-invite.
    Declined,
}

impl FromStr for InviteStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "declined" => Ok(Self::Declined),
            _ => Err(DomainError::InvalidInviteStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for InviteStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl InviteStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Declined => "declined",
        }
    }

    /// Checks if a transition from this status to another is valid.
    ///
    /// Valid transitions are:
    /// - Pending → Accepted
    /// - Pending → Declined
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Accepted) | (Self::Pending, Self::Declined)
        )
    }
}

/// A merchandise variant belonging to a merch event.
///
/// Variants are stored as their own rows so stock can be decremented
/// with a single conditional update against one row, never by rewriting
/// the parent event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// The variant's database identifier.
    pub id: VariantId,
    /// The owning event.
    pub event: EventId,
    /// Display name (e.g., "Hoodie L / Black").
    pub name: String,
    /// Remaining stock. Never negative.
    pub stock: i64,
    /// Unit price in minor currency units.
    pub price: i64,
    /// Maximum cumulative quantity one participant may be allocated.
    /// 0 means no per-participant limit.
    pub per_participant_limit: i64,
}

/// An event's allocation-relevant configuration.
///
/// Everything else about an event (description, venue, imagery) is
/// owned by the platform's CRUD service and never enters this core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// The event's database identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// The kind of event.
    pub kind: EventKind,
    /// Lifecycle phase.
    pub phase: EventPhase,
    /// The organizer who owns this event.
    pub organizer: ParticipantId,
    /// Maximum number of registrations. 0 means unlimited.
    pub registration_limit: i64,
    /// Remaining base stock for merch events with no variants.
    /// `None` for non-merch events.
    pub stock: Option<i64>,
    /// Base fee in minor currency units, used when a variant has no price.
    pub fee: i64,
    /// How hackathon participants take part.
    pub participation_mode: ParticipationMode,
    /// Default team size for team-mode hackathons.
    pub team_size: Option<i64>,
    /// Registrations and orders are rejected after this instant.
    pub registration_deadline: Option<OffsetDateTime>,
}

impl Event {
    /// Returns whether the registration deadline has passed at `now`.
    ///
    /// Events without a deadline never close by time.
    #[must_use]
    pub fn deadline_passed(&self, now: OffsetDateTime) -> bool {
        self.registration_deadline.is_some_and(|deadline| now > deadline)
    }

    /// Returns whether this event forms teams rather than registering
    /// participants individually.
    #[must_use]
    pub fn is_team_based(&self) -> bool {
        self.kind == EventKind::Hackathon && self.participation_mode == ParticipationMode::Team
    }
}

/// A confirmed allocation of one event place to one participant.
///
/// At most one ticket exists per `(event, participant)` pair, no matter
/// which flow produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// The ticket's database identifier.
    pub id: i64,
    /// The event this ticket admits to.
    pub event: EventId,
    /// The holder.
    pub participant: ParticipantId,
    /// Globally unique ticket reference (e.g., "TKT-7F3K2Q9D").
    pub ticket_ref: String,
    /// Encoded payload binding reference, event, and participant.
    pub payload: String,
    /// Lifecycle status.
    pub status: TicketStatus,
    /// The team this ticket was issued through, if any.
    pub team: Option<TeamId>,
    /// Registration form responses captured at issue time, as JSON text.
    pub form_responses: Option<String>,
    /// When the ticket was scanned, if it has been.
    pub checked_in_at: Option<OffsetDateTime>,
    /// When the ticket was issued.
    pub issued_at: OffsetDateTime,
}

/// A merchandise allocation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// The order's database identifier.
    pub id: OrderId,
    /// The merch event ordered from.
    pub event: EventId,
    /// The ordering participant.
    pub participant: ParticipantId,
    /// The variant ordered, or `None` when ordering against base stock.
    pub variant: Option<VariantId>,
    /// Units requested. Always positive.
    pub quantity: i64,
    /// Total amount in minor currency units, fixed at creation.
    pub amount: i64,
    /// Decision state.
    pub status: OrderStatus,
    /// Groups orders placed together in one checkout.
    pub batch_id: Option<String>,
    /// Organizer note recorded with the decision.
    pub decision_note: Option<String>,
    /// The organizer who decided this order.
    pub decided_by: Option<ParticipantId>,
    /// When the decision was made.
    pub decided_at: Option<OffsetDateTime>,
    /// When the order was placed.
    pub created_at: OffsetDateTime,
}

/// A hackathon team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// The team's database identifier.
    pub id: TeamId,
    /// The hackathon event this team belongs to.
    pub event: EventId,
    /// Display name.
    pub name: String,
    /// The leader. Always also a member.
    pub leader: ParticipantId,
    /// Maximum member count, between 2 and 20.
    pub max_size: i64,
    /// Lifecycle status.
    pub status: TeamStatus,
    /// Short shareable join code (e.g., "TEAM-4QX9ZP").
    pub invite_code: String,
    /// Opaque join-link token.
    pub invite_token: String,
    /// When the team was created.
    pub created_at: OffsetDateTime,
}

/// One team membership.
///
/// Memberships are their own rows so joining is a single conditional
/// insert and "one team per participant per event" is a uniqueness
/// constraint, not a scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// The team joined.
    pub team: TeamId,
    /// The event the team belongs to.
    pub event: EventId,
    /// The member.
    pub participant: ParticipantId,
    /// When the member joined.
    pub joined_at: OffsetDateTime,
}

/// One invitation to join a team.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamInvite {
    /// The invite's database identifier.
    pub id: i64,
    /// The inviting team.
    pub team: TeamId,
    /// The invited participant.
    pub participant: ParticipantId,
    /// Response state.
    pub status: InviteStatus,
    /// When the invitation was extended.
    pub invited_at: OffsetDateTime,
}

/// A participant identity as recorded from the authentication context.
///
/// The platform's authentication service owns these identities; a row is
/// kept here only so invitations can name a known participant and so
/// foreign keys hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The opaque identity value.
    pub id: ParticipantId,
    /// Display name as reported by the identity context.
    pub display_name: String,
    /// Role as reported by the identity context.
    pub role: String,
}
