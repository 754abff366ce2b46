// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod audit_trail_tests;
mod order_tests;

use evreg_audit::{Actor, Cause};

use crate::data_models::{
    NewEvent, NewOrder, NewParticipant, NewTeam, NewTeamInvite, NewTicket, NewVariant,
};

/// Fixed timestamp used across persistence tests.
pub const TEST_TIME: &str = "2026-03-01T10:00:00Z";

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("test-actor"), String::from("system"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

/// A published normal event with a registration limit and no base stock.
pub fn create_test_event(registration_limit: i64) -> NewEvent {
    NewEvent {
        name: String::from("Spring Conference"),
        kind: String::from("normal"),
        phase: String::from("published"),
        organizer_id: String::from("org-1"),
        registration_limit,
        stock: None,
        fee: 0,
        participation_mode: String::from("solo"),
        team_size: None,
        registration_deadline: None,
        created_at: String::from(TEST_TIME),
    }
}

/// A published merch event carrying base stock.
pub fn create_test_merch_event(stock: i64) -> NewEvent {
    NewEvent {
        name: String::from("Merch Drop"),
        kind: String::from("merch"),
        phase: String::from("published"),
        organizer_id: String::from("org-1"),
        registration_limit: 0,
        stock: Some(stock),
        fee: 0,
        participation_mode: String::from("solo"),
        team_size: None,
        registration_deadline: None,
        created_at: String::from(TEST_TIME),
    }
}

/// A published team-based event.
pub fn create_test_team_event(team_size: i64) -> NewEvent {
    NewEvent {
        name: String::from("Hackathon"),
        kind: String::from("hackathon"),
        phase: String::from("published"),
        organizer_id: String::from("org-1"),
        registration_limit: 0,
        stock: None,
        fee: 0,
        participation_mode: String::from("team"),
        team_size: Some(team_size),
        registration_deadline: None,
        created_at: String::from(TEST_TIME),
    }
}

pub fn create_test_variant(event_id: i64, stock: i64) -> NewVariant {
    NewVariant {
        event_id,
        name: String::from("T-Shirt L"),
        stock,
        price: 1500,
        per_participant_limit: 2,
    }
}

pub fn create_test_participant(participant_id: &str) -> NewParticipant {
    NewParticipant {
        participant_id: participant_id.to_string(),
        display_name: format!("Participant {participant_id}"),
        role: String::from("participant"),
        created_at: String::from(TEST_TIME),
    }
}

pub fn create_test_ticket(event_id: i64, participant_id: &str, ticket_ref: &str) -> NewTicket {
    NewTicket {
        event_id,
        participant_id: participant_id.to_string(),
        ticket_ref: ticket_ref.to_string(),
        payload: format!("{ticket_ref}|{event_id}|{participant_id}"),
        status: String::from("active"),
        team_id: None,
        form_responses: None,
        issued_at: String::from(TEST_TIME),
    }
}

pub fn create_test_order(
    event_id: i64,
    participant_id: &str,
    variant_id: Option<i64>,
    quantity: i64,
) -> NewOrder {
    NewOrder {
        event_id,
        participant_id: participant_id.to_string(),
        variant_id,
        quantity,
        amount: quantity * 1500,
        status: String::from("pending"),
        batch_id: None,
        created_at: String::from(TEST_TIME),
    }
}

pub fn create_test_team(event_id: i64, leader_id: &str, code: &str, token: &str) -> NewTeam {
    NewTeam {
        event_id,
        name: String::from("Rustaceans"),
        leader_id: leader_id.to_string(),
        max_size: 3,
        status: String::from("forming"),
        invite_code: code.to_string(),
        invite_token: token.to_string(),
        created_at: String::from(TEST_TIME),
    }
}

pub fn create_test_invite(team_id: i64, participant_id: &str) -> NewTeamInvite {
    NewTeamInvite {
        team_id,
        participant_id: participant_id.to_string(),
        status: String::from("pending"),
        invited_at: String::from(TEST_TIME),
    }
}
