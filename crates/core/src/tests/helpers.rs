// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::RunQueryDsl;
use evreg_audit::{Actor, Cause};
use evreg_domain::{Event, EventKind, ParticipantId, ParticipationMode};
use evreg_persistence::data_models::NewParticipant;
use evreg_persistence::{Persistence, mutations};

use crate::{EventConfig, create_event, publish_event};

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("org-1"), String::from("organizer"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-1"), String::from("Test request"))
}

pub fn test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn participant(id: &str) -> ParticipantId {
    ParticipantId::new(id)
}

pub fn organizer() -> ParticipantId {
    ParticipantId::new("org-1")
}

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

pub fn normal_config(registration_limit: i64) -> EventConfig {
    EventConfig {
        name: String::from("Spring Meetup"),
        kind: EventKind::Normal,
        registration_limit,
        stock: None,
        fee: 0,
        participation_mode: ParticipationMode::Solo,
        team_size: None,
        registration_deadline: None,
    }
}

pub fn merch_config(stock: Option<i64>) -> EventConfig {
    EventConfig {
        name: String::from("Merch Drop"),
        kind: EventKind::Merch,
        registration_limit: 0,
        stock,
        fee: 1000,
        participation_mode: ParticipationMode::Solo,
        team_size: None,
        registration_deadline: None,
    }
}

pub fn team_config(team_size: i64) -> EventConfig {
    EventConfig {
        name: String::from("Hackathon"),
        kind: EventKind::Hackathon,
        registration_limit: 0,
        stock: None,
        fee: 0,
        participation_mode: ParticipationMode::Team,
        team_size: Some(team_size),
        registration_deadline: None,
    }
}

/// Creates and publishes an event owned by `org-1`.
pub fn published_event(persistence: &mut Persistence, config: EventConfig) -> Event {
    seed_participant(persistence, "org-1");
    let event: Event = create_event(
        persistence,
        &organizer(),
        config,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");
    publish_event(
        persistence,
        event.id,
        &organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("publish event")
}

/// Cancellation arrives from outside the allocation surface; stage it
/// directly.
pub fn cancel_ticket(persistence: &mut Persistence, ticket_id: i64) {
    diesel::sql_query("UPDATE tickets SET status = 'cancelled' WHERE ticket_id = ?")
        .bind::<diesel::sql_types::BigInt, _>(ticket_id)
        .execute(persistence.connection())
        .expect("cancel ticket");
}
