// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use evreg_audit::Cause;
use evreg_persistence::Persistence;
use evreg_persistence::data_models::NewParticipant;
use evreg_persistence::mutations;

use crate::{AuthenticatedActor, CreateEventRequest, Role};

pub fn create_test_organizer() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("org-1"), Role::Organizer)
}

pub fn create_test_participant() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("alice"), Role::Participant)
}

pub fn participant_actor(id: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(String::from(id), Role::Participant)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-1"), String::from("API request"))
}

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// Registers an identity that has never called the API, so that
/// invitations can name it.
pub fn seed_participant(persistence: &mut Persistence, id: &str) {
    let row: NewParticipant = NewParticipant {
        participant_id: id.to_string(),
        display_name: format!("Participant {id}"),
        role: String::from("participant"),
        created_at: String::from("2026-03-01T10:00:00Z"),
    };
    mutations::participants::upsert_participant(persistence.connection(), &row)
        .expect("seed participant");
}

pub fn normal_event_request(registration_limit: i64) -> CreateEventRequest {
    CreateEventRequest {
        name: String::from("Spring Meetup"),
        kind: String::from("normal"),
        registration_limit,
        stock: None,
        fee: 0,
        participation_mode: String::from("solo"),
        team_size: None,
        registration_deadline: None,
    }
}

pub fn merch_event_request(stock: Option<i64>) -> CreateEventRequest {
    CreateEventRequest {
        name: String::from("Merch Drop"),
        kind: String::from("merch"),
        registration_limit: 0,
        stock,
        fee: 1000,
        participation_mode: String::from("solo"),
        team_size: None,
        registration_deadline: None,
    }
}

pub fn hackathon_event_request(team_size: i64) -> CreateEventRequest {
    CreateEventRequest {
        name: String::from("Hackathon"),
        kind: String::from("hackathon"),
        registration_limit: 0,
        stock: None,
        fee: 0,
        participation_mode: String::from("team"),
        team_size: Some(team_size),
        registration_deadline: None,
    }
}

/// Creates and publishes an event through the API surface, owned by
/// the test organizer. Returns the event id.
pub fn published_event(persistence: &mut Persistence, request: CreateEventRequest) -> i64 {
    let organizer: AuthenticatedActor = create_test_organizer();
    let created = crate::create_event(persistence, request, &organizer, create_test_cause())
        .expect("create event");
    crate::publish_event(
        persistence,
        created.event_id,
        &organizer,
        create_test_cause(),
    )
    .expect("publish event");
    created.event_id
}
