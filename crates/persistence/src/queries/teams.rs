// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team, membership, and invitation queries.

use std::str::FromStr;

use diesel::SqliteConnection;
use diesel::prelude::*;
use evreg_domain::{
    EventId, InviteStatus, ParticipantId, Team, TeamId, TeamInvite, TeamMember, TeamStatus,
    parse_timestamp,
};

use crate::diesel_schema::{team_invites, team_members, teams};
use crate::error::PersistenceError;

/// Diesel Queryable struct for team rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = teams)]
struct TeamRow {
    team_id: i64,
    event_id: i64,
    name: String,
    leader_id: String,
    max_size: i64,
    status: String,
    invite_code: String,
    invite_token: String,
    created_at: String,
}

/// Diesel Queryable struct for team member rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = team_members)]
struct TeamMemberRow {
    #[allow(dead_code)]
    team_member_id: i64,
    team_id: i64,
    event_id: i64,
    participant_id: String,
    joined_at: String,
}

/// Diesel Queryable struct for team invite rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = team_invites)]
struct TeamInviteRow {
    invite_id: i64,
    team_id: i64,
    participant_id: String,
    status: String,
    invited_at: String,
}

fn row_to_team(row: TeamRow) -> Result<Team, PersistenceError> {
    Ok(Team {
        id: TeamId::new(row.team_id),
        event: EventId::new(row.event_id),
        name: row.name,
        leader: ParticipantId::new(&row.leader_id),
        max_size: row.max_size,
        status: TeamStatus::from_str(&row.status)?,
        invite_code: row.invite_code,
        invite_token: row.invite_token,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

fn row_to_member(row: TeamMemberRow) -> Result<TeamMember, PersistenceError> {
    Ok(TeamMember {
        team: TeamId::new(row.team_id),
        event: EventId::new(row.event_id),
        participant: ParticipantId::new(&row.participant_id),
        joined_at: parse_timestamp(&row.joined_at)?,
    })
}

fn row_to_invite(row: TeamInviteRow) -> Result<TeamInvite, PersistenceError> {
    Ok(TeamInvite {
        id: row.invite_id,
        team: TeamId::new(row.team_id),
        participant: ParticipantId::new(&row.participant_id),
        status: InviteStatus::from_str(&row.status)?,
        invited_at: parse_timestamp(&row.invited_at)?,
    })
}

/// Retrieves a team by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team ID to retrieve
///
/// # Errors
///
/// Returns an error if the team is not found or a stored value cannot
/// be decoded.
pub fn get_team(conn: &mut SqliteConnection, team_id: i64) -> Result<Team, PersistenceError> {
    let result = teams::table
        .filter(teams::team_id.eq(team_id))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn);

    let row: TeamRow = match result {
        Ok(r) => r,
        Err(diesel::result::Error::NotFound) => {
            return Err(PersistenceError::NotFound(format!(
                "Team {team_id} not found"
            )));
        }
        Err(e) => return Err(PersistenceError::from(e)),
    };

    row_to_team(row)
}

/// Finds a team by its shareable join code, if one matches.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `invite_code` - The join code
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_team_by_code(
    conn: &mut SqliteConnection,
    invite_code: &str,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = teams::table
        .filter(teams::invite_code.eq(invite_code))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()?;

    row.map(row_to_team).transpose()
}

/// Finds a team by its join-link token, if one matches.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `invite_token` - The join-link token
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_team_by_token(
    conn: &mut SqliteConnection,
    invite_token: &str,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = teams::table
        .filter(teams::invite_token.eq(invite_token))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()?;

    row.map(row_to_team).transpose()
}

/// Finds the team a participant belongs to for an event, if any.
///
/// At most one such team can exist; membership is unique per
/// `(event, participant)` in storage.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
/// * `participant_id` - The participant
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_team_for_participant(
    conn: &mut SqliteConnection,
    event_id: i64,
    participant_id: &str,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<TeamRow> = team_members::table
        .inner_join(teams::table)
        .filter(team_members::event_id.eq(event_id))
        .filter(team_members::participant_id.eq(participant_id))
        .select(TeamRow::as_select())
        .first::<TeamRow>(conn)
        .optional()?;

    row.map(row_to_team).transpose()
}

/// Lists all teams formed for an event, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_teams_for_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = teams::table
        .filter(teams::event_id.eq(event_id))
        .order(teams::team_id.asc())
        .select(TeamRow::as_select())
        .load::<TeamRow>(conn)?;

    rows.into_iter().map(row_to_team).collect()
}

/// Lists all teams a participant belongs to, oldest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The participant
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_teams_for_participant(
    conn: &mut SqliteConnection,
    participant_id: &str,
) -> Result<Vec<Team>, PersistenceError> {
    let rows: Vec<TeamRow> = team_members::table
        .inner_join(teams::table)
        .filter(team_members::participant_id.eq(participant_id))
        .order(teams::team_id.asc())
        .select(TeamRow::as_select())
        .load::<TeamRow>(conn)?;

    rows.into_iter().map(row_to_team).collect()
}

/// Lists a team's members in join order. The leader joins first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_team_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<TeamMember>, PersistenceError> {
    let rows: Vec<TeamMemberRow> = team_members::table
        .filter(team_members::team_id.eq(team_id))
        .order(team_members::team_member_id.asc())
        .select(TeamMemberRow::as_select())
        .load::<TeamMemberRow>(conn)?;

    rows.into_iter().map(row_to_member).collect()
}

/// Counts a team's members.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn count_team_members(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(team_members::table
        .filter(team_members::team_id.eq(team_id))
        .count()
        .get_result::<i64>(conn)?)
}

/// Finds a participant's pending invite for a team, if one exists.
///
/// The storage layer permits at most one pending invite per
/// `(team, participant)`; resolved invites stay behind as history.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team
/// * `participant_id` - The invited participant
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn find_pending_invite(
    conn: &mut SqliteConnection,
    team_id: i64,
    participant_id: &str,
) -> Result<Option<TeamInvite>, PersistenceError> {
    let row: Option<TeamInviteRow> = team_invites::table
        .filter(team_invites::team_id.eq(team_id))
        .filter(team_invites::participant_id.eq(participant_id))
        .filter(team_invites::status.eq(InviteStatus::Pending.as_str()))
        .select(TeamInviteRow::as_select())
        .first::<TeamInviteRow>(conn)
        .optional()?;

    row.map(row_to_invite).transpose()
}

/// Lists a participant's pending invites across all teams, oldest
/// first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant_id` - The invited participant
///
/// # Errors
///
/// Returns an error if the query fails or a stored value cannot be
/// decoded.
pub fn list_pending_invites_for_participant(
    conn: &mut SqliteConnection,
    participant_id: &str,
) -> Result<Vec<TeamInvite>, PersistenceError> {
    let rows: Vec<TeamInviteRow> = team_invites::table
        .filter(team_invites::participant_id.eq(participant_id))
        .filter(team_invites::status.eq(InviteStatus::Pending.as_str()))
        .order(team_invites::invite_id.asc())
        .select(TeamInviteRow::as_select())
        .load::<TeamInviteRow>(conn)?;

    rows.into_iter().map(row_to_invite).collect()
}
