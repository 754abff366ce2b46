// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The team formation engine.
//!
//! Teams assemble through leader invitations, shareable join codes,
//! and join links. Membership changes are guarded conditional writes:
//! a seat is taken only while the team is still forming and below its
//! seat cap, and a participant holds at most one seat per event. The
//! losing side of any race gets an explicit conflict, never a silent
//! retry. Finalizing freezes membership and issues every member's
//! ticket in the same transaction as the status flip.

use diesel::SqliteConnection;
use evreg_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use evreg_domain::{
    Event, EventId, InviteStatus, ParticipantId, TEAM_SIZE_DEFAULT, Team, TeamId, TeamInvite,
    TeamMember, TeamStatus, Ticket, propose_invite_code, propose_invite_token,
    validate_participant_id, validate_team_name, validate_team_size,
};
use evreg_persistence::data_models::{NewTeam, NewTeamInvite};
use evreg_persistence::{Persistence, PersistenceError, mutations, queries};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::tickets::{self, IssueOutcome};
use crate::timestamp_now;

/// Redraw budget for invite code and token collisions.
const MAX_CODE_ATTEMPTS: usize = 5;

/// The outcome of responding to an invitation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InviteResponse {
    /// The invite was accepted and the responder took a seat.
    Joined(Team),
    /// The invite was declined; the team is unchanged.
    Declined,
}

/// The outcome of finalizing a team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizeOutcome {
    /// The finalized team.
    pub team: Team,
    /// One ticket per member, in join order.
    pub tickets: Vec<Ticket>,
}

fn team_snapshot(team: &Team) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "name": team.name,
            "status": team.status.as_str(),
            "max_size": team.max_size,
        })
        .to_string(),
    )
}

fn membership_snapshot(team: &Team, member_count: i64) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "status": team.status.as_str(),
            "member_count": member_count,
        })
        .to_string(),
    )
}

fn invite_snapshot(invitee: &ParticipantId, status: InviteStatus) -> StateSnapshot {
    StateSnapshot::new(
        serde_json::json!({
            "invitee": invitee.value(),
            "status": status.as_str(),
        })
        .to_string(),
    )
}

/// Creates a forming team for a team-mode hackathon, with the leader
/// seated as its first member.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `event_id` - The hackathon event the team competes in
/// * `leader` - The founding participant
/// * `name` - Display name for the team
/// * `max_size` - Seat cap; defaults to the event's team size
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The created team.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the event does not form teams
/// or the size is out of range, and [`CoreError::Conflict`] if the
/// event is not accepting registrations or the leader already belongs
/// to a team for the event.
pub fn create_team(
    persistence: &mut Persistence,
    event_id: EventId,
    leader: &ParticipantId,
    name: &str,
    max_size: Option<i64>,
    actor: Actor,
    cause: Cause,
) -> Result<Team, CoreError> {
    validate_participant_id(leader.value())?;
    validate_team_name(name)?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let event: Event = queries::events::get_event(conn, event_id.value())?;
        if !event.is_team_based() {
            return Err(CoreError::Validation(format!(
                "Event {event_id} does not form teams"
            )));
        }
        if !event.phase.accepts_registrations() {
            return Err(CoreError::Conflict(format!(
                "Event {event_id} is not accepting registrations"
            )));
        }

        let resolved_size: i64 = max_size.or(event.team_size).unwrap_or(TEAM_SIZE_DEFAULT);
        validate_team_size(resolved_size)?;
        if let Some(cap) = event.team_size {
            if resolved_size > cap {
                return Err(CoreError::Validation(format!(
                    "Team size {resolved_size} exceeds the event's team size of {cap}"
                )));
            }
        }

        if queries::teams::find_team_for_participant(conn, event_id.value(), leader.value())?
            .is_some()
        {
            return Err(CoreError::Conflict(format!(
                "Participant {leader} already belongs to a team for event {event_id}"
            )));
        }

        let mut inserted: Option<i64> = None;
        for _ in 0..MAX_CODE_ATTEMPTS {
            let row: NewTeam = NewTeam {
                event_id: event_id.value(),
                name: name.to_string(),
                leader_id: leader.value().to_string(),
                max_size: resolved_size,
                status: TeamStatus::Forming.as_str().to_string(),
                invite_code: propose_invite_code(),
                invite_token: propose_invite_token(),
                created_at: recorded_at.clone(),
            };
            match mutations::teams::insert_team(conn, &row) {
                Ok(team_id) => {
                    inserted = Some(team_id);
                    break;
                }
                Err(
                    PersistenceError::DuplicateInviteCode(message)
                    | PersistenceError::DuplicateInviteToken(message),
                ) => {
                    debug!(event = %event_id, %message, "Invite identifier collision, redrawing");
                }
                Err(err) => return Err(err.into()),
            }
        }
        let Some(team_id) = inserted else {
            return Err(CoreError::Conflict(format!(
                "Could not mint unique invite identifiers for event {event_id} after {MAX_CODE_ATTEMPTS} attempts"
            )));
        };

        let seated: usize = mutations::teams::append_team_member(
            conn,
            team_id,
            event_id.value(),
            leader.value(),
            resolved_size,
            &recorded_at,
        )?;
        if seated != 1 {
            return Err(CoreError::Conflict(format!(
                "Participant {leader} already belongs to a team for event {event_id}"
            )));
        }

        let team: Team = queries::teams::get_team(conn, team_id)?;

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("CreateTeam"),
                Some(format!("name={}, max_size={}", team.name, team.max_size)),
            ),
            Some(event_id),
            StateSnapshot::none(),
            team_snapshot(&team),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(event = %event_id, team = team_id, %leader, "Created team");

        Ok(team)
    })
}

/// Invites a participant to a forming team. Leader only.
///
/// A declined invite does not block a later re-invite; a still-pending
/// one does.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The inviting team
/// * `inviter` - The requesting participant; must be the leader
/// * `invitee` - The participant to invite
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The team, unchanged; membership moves only when the invite is
/// accepted.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the inviter is not the leader
/// or invites themselves, [`CoreError::NotFound`] if the team or the
/// invitee is unknown, [`CoreError::Conflict`] if the team is
/// finalized, the invitee already holds a seat somewhere, or a pending
/// invite already exists, and [`CoreError::Capacity`] if the team is
/// full.
pub fn invite_member(
    persistence: &mut Persistence,
    team_id: TeamId,
    inviter: &ParticipantId,
    invitee: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Team, CoreError> {
    validate_participant_id(invitee.value())?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::get_team(conn, team_id.value())?;
        if team.leader != *inviter {
            return Err(CoreError::Validation(String::from(
                "Only the team leader can invite members",
            )));
        }
        if invitee == inviter {
            return Err(CoreError::Validation(String::from(
                "The team leader cannot invite themselves",
            )));
        }
        if team.status != TeamStatus::Forming {
            return Err(CoreError::Conflict(format!(
                "Team '{}' is already finalized",
                team.name
            )));
        }
        if queries::participants::get_participant(conn, invitee.value())?.is_none() {
            return Err(CoreError::NotFound(format!("Participant {invitee}")));
        }

        if let Some(existing) =
            queries::teams::find_team_for_participant(conn, team.event.value(), invitee.value())?
        {
            if existing.id == team.id {
                return Err(CoreError::Conflict(format!(
                    "Participant {invitee} is already a member of team '{}'",
                    team.name
                )));
            }
            return Err(CoreError::Conflict(format!(
                "Participant {invitee} already belongs to another team for this event"
            )));
        }

        let member_count: i64 = queries::teams::count_team_members(conn, team_id.value())?;
        if member_count >= team.max_size {
            return Err(CoreError::Capacity(format!("Team '{}' is full", team.name)));
        }

        let row: NewTeamInvite = NewTeamInvite {
            team_id: team_id.value(),
            participant_id: invitee.value().to_string(),
            status: InviteStatus::Pending.as_str().to_string(),
            invited_at: recorded_at.clone(),
        };
        mutations::teams::insert_invite(conn, &row)?;

        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("InviteMember"),
                Some(format!("invitee={invitee}")),
            ),
            Some(team.event),
            StateSnapshot::none(),
            invite_snapshot(invitee, InviteStatus::Pending),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(team = team_id.value(), %invitee, "Invited member");

        Ok(team)
    })
}

/// Takes a seat on a team, with every guard re-checked at join time.
fn join_team(
    conn: &mut SqliteConnection,
    team: &Team,
    participant: &ParticipantId,
    joined_at: &str,
) -> Result<(), CoreError> {
    if team.status != TeamStatus::Forming {
        return Err(CoreError::Conflict(format!(
            "Team '{}' is already finalized",
            team.name
        )));
    }

    if let Some(existing) =
        queries::teams::find_team_for_participant(conn, team.event.value(), participant.value())?
    {
        if existing.id == team.id {
            return Err(CoreError::Conflict(format!(
                "Participant {participant} is already a member of team '{}'",
                team.name
            )));
        }
        return Err(CoreError::Conflict(format!(
            "Participant {participant} already belongs to another team for this event"
        )));
    }

    let seated: usize = mutations::teams::append_team_member(
        conn,
        team.id.value(),
        team.event.value(),
        participant.value(),
        team.max_size,
        joined_at,
    )?;
    if seated == 0 {
        // The guarded append refused; re-read to tell which guard.
        let current: Team = queries::teams::get_team(conn, team.id.value())?;
        if current.status != TeamStatus::Forming {
            return Err(CoreError::Conflict(format!(
                "Team '{}' is already finalized",
                team.name
            )));
        }
        return Err(CoreError::Capacity(format!("Team '{}' is full", team.name)));
    }

    Ok(())
}

/// Responds to a pending invitation.
///
/// Accepting re-validates the team's status, capacity, and the
/// responder's exclusivity at accept time; the invitation's existence
/// guarantees nothing by the time it is answered. Declining resolves
/// the invite and touches nothing else.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The inviting team
/// * `invitee` - The responding participant
/// * `accept` - `true` to accept, `false` to decline
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// [`InviteResponse::Joined`] with the team on accept,
/// [`InviteResponse::Declined`] on decline.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if no pending invite exists,
/// [`CoreError::Conflict`] if the team finalized or the responder
/// joined another team in the meantime, and [`CoreError::Capacity`] if
/// the team filled up.
pub fn respond_to_invite(
    persistence: &mut Persistence,
    team_id: TeamId,
    invitee: &ParticipantId,
    accept: bool,
    actor: Actor,
    cause: Cause,
) -> Result<InviteResponse, CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::get_team(conn, team_id.value())?;
        let invite: TeamInvite =
            queries::teams::find_pending_invite(conn, team_id.value(), invitee.value())?
                .ok_or_else(|| {
                    CoreError::NotFound(format!(
                        "No pending invite for participant {invitee} on team '{}'",
                        team.name
                    ))
                })?;

        if accept {
            join_team(conn, &team, invitee, &recorded_at)?;
        }

        let to_status: InviteStatus = if accept {
            InviteStatus::Accepted
        } else {
            InviteStatus::Declined
        };
        let resolved: bool =
            mutations::teams::update_invite_status(conn, invite.id, to_status.as_str())?;
        if !resolved {
            return Err(CoreError::Conflict(format!(
                "The invite for participant {invitee} has already been resolved"
            )));
        }

        let action_name: &str = if accept { "AcceptInvite" } else { "DeclineInvite" };
        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(action_name.to_string(), Some(format!("invitee={invitee}"))),
            Some(team.event),
            invite_snapshot(invitee, InviteStatus::Pending),
            invite_snapshot(invitee, to_status),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(team = team_id.value(), %invitee, response = %to_status, "Invite answered");

        if accept {
            let joined: Team = queries::teams::get_team(conn, team_id.value())?;
            Ok(InviteResponse::Joined(joined))
        } else {
            Ok(InviteResponse::Declined)
        }
    })
}

fn complete_join(
    conn: &mut SqliteConnection,
    team: &Team,
    participant: &ParticipantId,
    action_name: &str,
    actor: Actor,
    cause: Cause,
    recorded_at: &str,
) -> Result<Team, CoreError> {
    join_team(conn, team, participant, recorded_at)?;

    // A matching pending invite is accepted as a side effect, so it
    // cannot dangle after the seat is taken.
    let swept: bool = mutations::teams::resolve_pending_invite(
        conn,
        team.id.value(),
        participant.value(),
        InviteStatus::Accepted.as_str(),
    )?;

    let member_count: i64 = queries::teams::count_team_members(conn, team.id.value())?;
    let audit: AuditEvent = AuditEvent::new(
        actor,
        cause,
        Action::new(
            action_name.to_string(),
            Some(format!("participant={participant}")),
        ),
        Some(team.event),
        membership_snapshot(team, member_count - 1),
        membership_snapshot(team, member_count),
    );
    mutations::audit::insert_audit_event(conn, &audit, recorded_at)?;

    info!(
        team = team.id.value(),
        %participant,
        swept_invite = swept,
        "Joined team"
    );

    queries::teams::get_team(conn, team.id.value()).map_err(CoreError::from)
}

/// Joins a team by its shareable invite code.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `code` - The team's invite code
/// * `participant` - The joining participant
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The joined team.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if no team carries the code,
/// [`CoreError::Conflict`] if the team is finalized or the participant
/// already holds a seat somewhere, and [`CoreError::Capacity`] if the
/// team is full.
pub fn join_by_code(
    persistence: &mut Persistence,
    code: &str,
    participant: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Team, CoreError> {
    validate_participant_id(participant.value())?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::find_team_by_code(conn, code)?
            .ok_or_else(|| CoreError::NotFound(format!("No team with invite code {code}")))?;
        complete_join(
            conn,
            &team,
            participant,
            "JoinTeamByCode",
            actor,
            cause,
            &recorded_at,
        )
    })
}

/// Joins a team by its join-link token.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `token` - The team's join-link token
/// * `participant` - The joining participant
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The joined team.
///
/// # Errors
///
/// Returns [`CoreError::NotFound`] if no team carries the token,
/// [`CoreError::Conflict`] if the team is finalized or the participant
/// already holds a seat somewhere, and [`CoreError::Capacity`] if the
/// team is full.
pub fn join_by_link(
    persistence: &mut Persistence,
    token: &str,
    participant: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<Team, CoreError> {
    validate_participant_id(participant.value())?;

    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::find_team_by_token(conn, token)?
            .ok_or_else(|| CoreError::NotFound(String::from("No team for this join link")))?;
        complete_join(
            conn,
            &team,
            participant,
            "JoinTeamByLink",
            actor,
            cause,
            &recorded_at,
        )
    })
}

/// Gives up a seat on a forming team.
///
/// The leader cannot leave; there is deliberately no disband
/// operation. A leaver's pending invite record, if one exists, is
/// marked declined so it cannot be answered later.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to leave
/// * `member` - The departing participant
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Errors
///
/// Returns [`CoreError::Conflict`] if the member is the leader or the
/// team is finalized, and [`CoreError::NotFound`] if the participant
/// holds no seat in the team.
pub fn leave_team(
    persistence: &mut Persistence,
    team_id: TeamId,
    member: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<(), CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::get_team(conn, team_id.value())?;
        if team.leader == *member {
            return Err(CoreError::Conflict(String::from(
                "The team leader cannot leave the team",
            )));
        }
        if team.status != TeamStatus::Forming {
            return Err(CoreError::Conflict(format!(
                "Team '{}' is already finalized",
                team.name
            )));
        }

        let removed: bool =
            mutations::teams::remove_team_member(conn, team_id.value(), member.value())?;
        if !removed {
            return Err(CoreError::NotFound(format!(
                "Participant {member} is not a member of team '{}'",
                team.name
            )));
        }

        let swept: bool = mutations::teams::resolve_pending_invite(
            conn,
            team_id.value(),
            member.value(),
            InviteStatus::Declined.as_str(),
        )?;

        let member_count: i64 = queries::teams::count_team_members(conn, team_id.value())?;
        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(String::from("LeaveTeam"), Some(format!("member={member}"))),
            Some(team.event),
            membership_snapshot(&team, member_count + 1),
            membership_snapshot(&team, member_count),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(
            team = team_id.value(),
            %member,
            swept_invite = swept,
            "Left team"
        );

        Ok(())
    })
}

/// Removes a member from a forming team. Leader only.
///
/// Removal clears the seat and nothing else; the removed participant's
/// invite history is left as it stands.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to remove from
/// * `leader` - The requesting participant; must be the leader
/// * `target` - The member to remove
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the requester is not the
/// leader or targets themselves, [`CoreError::Conflict`] if the team
/// is finalized, and [`CoreError::NotFound`] if the target holds no
/// seat in the team.
pub fn remove_member(
    persistence: &mut Persistence,
    team_id: TeamId,
    leader: &ParticipantId,
    target: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<(), CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::get_team(conn, team_id.value())?;
        if team.leader != *leader {
            return Err(CoreError::Validation(String::from(
                "Only the team leader can remove members",
            )));
        }
        if target == leader {
            return Err(CoreError::Validation(String::from(
                "The team leader cannot remove themselves",
            )));
        }
        if team.status != TeamStatus::Forming {
            return Err(CoreError::Conflict(format!(
                "Team '{}' is already finalized",
                team.name
            )));
        }

        let removed: bool =
            mutations::teams::remove_team_member(conn, team_id.value(), target.value())?;
        if !removed {
            return Err(CoreError::NotFound(format!(
                "Participant {target} is not a member of team '{}'",
                team.name
            )));
        }

        let member_count: i64 = queries::teams::count_team_members(conn, team_id.value())?;
        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("RemoveMember"),
                Some(format!("target={target}")),
            ),
            Some(team.event),
            membership_snapshot(&team, member_count + 1),
            membership_snapshot(&team, member_count),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(team = team_id.value(), %target, "Removed member");

        Ok(())
    })
}

/// Finalizes a team, freezing membership and issuing every member's
/// ticket. Leader only.
///
/// The status flip is conditional on the team still forming, so two
/// racing finalizes produce exactly one set of tickets; issuance
/// itself is idempotent per member on top of that.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `team_id` - The team to finalize
/// * `leader` - The requesting participant; must be the leader
/// * `actor` - The actor performing the operation
/// * `cause` - The reason for the operation
///
/// # Returns
///
/// The finalized team and its members' tickets.
///
/// # Errors
///
/// Returns [`CoreError::Validation`] if the requester is not the
/// leader or the team has fewer than two members, and
/// [`CoreError::Conflict`] if the team is already finalized.
pub fn finalize_team(
    persistence: &mut Persistence,
    team_id: TeamId,
    leader: &ParticipantId,
    actor: Actor,
    cause: Cause,
) -> Result<FinalizeOutcome, CoreError> {
    let (_, recorded_at): (OffsetDateTime, String) = timestamp_now()?;

    persistence.connection().immediate_transaction(|conn| {
        let team: Team = queries::teams::get_team(conn, team_id.value())?;
        if team.leader != *leader {
            return Err(CoreError::Validation(String::from(
                "Only the team leader can finalize the team",
            )));
        }

        let member_count: i64 = queries::teams::count_team_members(conn, team_id.value())?;
        if member_count < 2 {
            return Err(CoreError::Validation(format!(
                "Team '{}' needs at least two members to finalize",
                team.name
            )));
        }

        let flipped: bool = mutations::teams::update_team_status(
            conn,
            team_id.value(),
            TeamStatus::Forming.as_str(),
            TeamStatus::Finalized.as_str(),
        )?;
        if !flipped {
            return Err(CoreError::Conflict(format!(
                "Team '{}' is already finalized",
                team.name
            )));
        }

        let event: Event = queries::events::get_event(conn, team.event.value())?;
        let members: Vec<TeamMember> = queries::teams::list_team_members(conn, team_id.value())?;

        let mut issued: Vec<Ticket> = Vec::with_capacity(members.len());
        for member in &members {
            let outcome: IssueOutcome = tickets::issue_ticket(
                conn,
                &event,
                &member.participant,
                Some(team.id),
                None,
                &recorded_at,
            )?;
            issued.push(outcome.ticket);
        }

        let finalized: Team = queries::teams::get_team(conn, team_id.value())?;
        let audit: AuditEvent = AuditEvent::new(
            actor,
            cause,
            Action::new(
                String::from("FinalizeTeam"),
                Some(format!("members={member_count}")),
            ),
            Some(team.event),
            team_snapshot(&team),
            team_snapshot(&finalized),
        );
        mutations::audit::insert_audit_event(conn, &audit, &recorded_at)?;

        info!(
            team = team_id.value(),
            members = member_count,
            "Finalized team"
        );

        Ok(FinalizeOutcome {
            team: finalized,
            tickets: issued,
        })
    })
}
