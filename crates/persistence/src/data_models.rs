// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::{events, orders, participants, team_invites, teams, tickets, variants};

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// Serializable representation of a `StateSnapshot`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshotData {
    pub data: String,
}

/// Insertable row for a participant identity mirror.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = participants)]
pub struct NewParticipant {
    pub participant_id: String,
    pub display_name: String,
    pub role: String,
    pub created_at: String,
}

/// Insertable row for a new event.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = events)]
pub struct NewEvent {
    pub name: String,
    pub kind: String,
    pub phase: String,
    pub organizer_id: String,
    pub registration_limit: i64,
    pub stock: Option<i64>,
    pub fee: i64,
    pub participation_mode: String,
    pub team_size: Option<i64>,
    pub registration_deadline: Option<String>,
    pub created_at: String,
}

/// Insertable row for a new merchandise variant.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = variants)]
pub struct NewVariant {
    pub event_id: i64,
    pub name: String,
    pub stock: i64,
    pub price: i64,
    pub per_participant_limit: i64,
}

/// Insertable row for a new ticket.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tickets)]
pub struct NewTicket {
    pub event_id: i64,
    pub participant_id: String,
    pub ticket_ref: String,
    pub payload: String,
    pub status: String,
    pub team_id: Option<i64>,
    pub form_responses: Option<String>,
    pub issued_at: String,
}

/// Insertable row for a new order.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub event_id: i64,
    pub participant_id: String,
    pub variant_id: Option<i64>,
    pub quantity: i64,
    pub amount: i64,
    pub status: String,
    pub batch_id: Option<String>,
    pub created_at: String,
}

/// Insertable row for a new team.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = teams)]
pub struct NewTeam {
    pub event_id: i64,
    pub name: String,
    pub leader_id: String,
    pub max_size: i64,
    pub status: String,
    pub invite_code: String,
    pub invite_token: String,
    pub created_at: String,
}

/// Insertable row for a new team invitation.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = team_invites)]
pub struct NewTeamInvite {
    pub team_id: i64,
    pub participant_id: String,
    pub status: String,
    pub invited_at: String,
}
