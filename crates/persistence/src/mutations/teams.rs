// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team mutations.
//!
//! Membership appends are guarded inside the insert statement: the row
//! only lands while the team is still `forming` and below its size
//! cap, so two joiners racing for the last seat cannot both win. The
//! one-team-per-event rule is not checked here at all; the UNIQUE
//! constraint on `team_members (event_id, participant_id)` raises it
//! as [`PersistenceError::DuplicateMembership`].

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Text};
use evreg_domain::{InviteStatus, TeamStatus};
use tracing::debug;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewTeam, NewTeamInvite};
use crate::diesel_schema::{team_invites, team_members, teams};
use crate::error::PersistenceError;

/// Inserts a new team.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team` - The team row to insert
///
/// # Returns
///
/// The team ID assigned by the database.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateInviteCode`] or
/// [`PersistenceError::DuplicateInviteToken`] if a proposed join
/// credential collides with another team, or another error if the
/// insert fails.
pub fn insert_team(conn: &mut SqliteConnection, team: &NewTeam) -> Result<i64, PersistenceError> {
    diesel::insert_into(teams::table)
        .values(team)
        .execute(conn)?;

    let team_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        team_id,
        event_id = team.event_id,
        leader_id = team.leader_id.as_str(),
        "Inserted team"
    );

    Ok(team_id)
}

/// Appends a member to a team while it is still `forming` and has a
/// free seat.
///
/// The seat count and the team status are checked inside the insert
/// statement itself, so the guard and the write are one atomic
/// statement. Zero rows affected is ambiguous between "team full" and
/// "team no longer forming"; the caller disambiguates by re-reading
/// the team.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team to join
/// * `event_id` - The event the team belongs to
/// * `participant_id` - The joining participant
/// * `max_size` - The team's seat cap
/// * `joined_at` - The join timestamp to record
///
/// # Returns
///
/// The number of rows inserted: 1, or 0 when the guard suppressed the
/// insert.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicateMembership`] if the
/// participant already holds a seat in some team for this event, or
/// another error if the insert fails.
pub fn append_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    event_id: i64,
    participant_id: &str,
    max_size: i64,
    joined_at: &str,
) -> Result<usize, PersistenceError> {
    // NOTE: INSERT .. SELECT with correlated guards is raw SQL
    // (justified - Diesel cannot express an insert whose row source is
    // a filtered scalar select)
    let rows_affected: usize = diesel::sql_query(
        "INSERT INTO team_members (team_id, event_id, participant_id, joined_at) \
         SELECT ?, ?, ?, ? \
         WHERE (SELECT COUNT(*) FROM team_members WHERE team_id = ?) < ? \
         AND (SELECT status FROM teams WHERE team_id = ?) = ?",
    )
    .bind::<BigInt, _>(team_id)
    .bind::<BigInt, _>(event_id)
    .bind::<Text, _>(participant_id)
    .bind::<Text, _>(joined_at)
    .bind::<BigInt, _>(team_id)
    .bind::<BigInt, _>(max_size)
    .bind::<BigInt, _>(team_id)
    .bind::<Text, _>(TeamStatus::Forming.as_str())
    .execute(conn)?;

    debug!(
        team_id,
        participant_id, max_size, rows_affected, "Guarded member append"
    );

    Ok(rows_affected)
}

/// Removes a member's seat from a team.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team to remove from
/// * `participant_id` - The member to remove
///
/// # Returns
///
/// `true` if a seat was removed, `false` if the participant held no
/// seat in the team.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn remove_team_member(
    conn: &mut SqliteConnection,
    team_id: i64,
    participant_id: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::delete(
        team_members::table
            .filter(team_members::team_id.eq(team_id))
            .filter(team_members::participant_id.eq(participant_id)),
    )
    .execute(conn)?;

    debug!(team_id, participant_id, rows_affected, "Member removal");

    Ok(rows_affected == 1)
}

/// Moves a team from one status to another, conditionally.
///
/// The flip only lands if the team is still in `from_status` when the
/// statement runs.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team to move
/// * `from_status` - The status the team must still be in
/// * `to_status` - The status to move to
///
/// # Returns
///
/// `true` if the team moved, `false` if it was no longer in
/// `from_status` (or does not exist).
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_team_status(
    conn: &mut SqliteConnection,
    team_id: i64,
    from_status: &str,
    to_status: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        teams::table
            .filter(teams::team_id.eq(team_id))
            .filter(teams::status.eq(from_status)),
    )
    .set(teams::status.eq(to_status))
    .execute(conn)?;

    debug!(team_id, from_status, to_status, rows_affected, "Team status flip");

    Ok(rows_affected == 1)
}

/// Inserts a new team invitation.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `invite` - The invitation row to insert
///
/// # Returns
///
/// The invitation ID assigned by the database.
///
/// # Errors
///
/// Returns [`PersistenceError::DuplicatePendingInvite`] if the
/// participant already has a pending invitation to this team, or
/// another error if the insert fails.
pub fn insert_invite(
    conn: &mut SqliteConnection,
    invite: &NewTeamInvite,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(team_invites::table)
        .values(invite)
        .execute(conn)?;

    let invite_id: i64 = get_last_insert_rowid(conn)?;

    debug!(
        invite_id,
        team_id = invite.team_id,
        participant_id = invite.participant_id.as_str(),
        "Inserted invitation"
    );

    Ok(invite_id)
}

/// Moves a pending invitation to a terminal status, conditionally.
///
/// The flip only lands if the invitation is still `pending` when the
/// statement runs, so an invitation can be answered exactly once.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `invite_id` - The invitation to resolve
/// * `to_status` - The terminal status to write
///
/// # Returns
///
/// `true` if the invitation was resolved, `false` if it was no longer
/// `pending`.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_invite_status(
    conn: &mut SqliteConnection,
    invite_id: i64,
    to_status: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        team_invites::table
            .filter(team_invites::invite_id.eq(invite_id))
            .filter(team_invites::status.eq(InviteStatus::Pending.as_str())),
    )
    .set(team_invites::status.eq(to_status))
    .execute(conn)?;

    debug!(invite_id, to_status, rows_affected, "Invitation flip");

    Ok(rows_affected == 1)
}

/// Resolves a pending invitation keyed by `(team, participant)`
/// instead of by ID.
///
/// Used when a membership change must sweep up an outstanding
/// invitation whose ID the caller never saw, such as an invited
/// participant who joined by code instead of answering.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The inviting team
/// * `participant_id` - The invited participant
/// * `to_status` - The terminal status to write
///
/// # Returns
///
/// `true` if a pending invitation was resolved, `false` if none
/// existed.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn resolve_pending_invite(
    conn: &mut SqliteConnection,
    team_id: i64,
    participant_id: &str,
    to_status: &str,
) -> Result<bool, PersistenceError> {
    let rows_affected: usize = diesel::update(
        team_invites::table
            .filter(team_invites::team_id.eq(team_id))
            .filter(team_invites::participant_id.eq(participant_id))
            .filter(team_invites::status.eq(InviteStatus::Pending.as_str())),
    )
    .set(team_invites::status.eq(to_status))
    .execute(conn)?;

    debug!(
        team_id,
        participant_id, to_status, rows_affected, "Pending invitation sweep"
    );

    Ok(rows_affected == 1)
}
