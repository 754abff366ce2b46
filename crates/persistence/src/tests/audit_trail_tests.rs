// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit trail persistence tests.
//!
//! The trail is append-only and rides in the same transaction as the
//! mutation it describes; a rolled-back transaction must take its audit
//! row down with it.

use evreg_audit::{Action, AuditEvent, StateSnapshot};
use evreg_domain::EventId;

use crate::tests::{
    TEST_TIME, create_test_actor, create_test_cause, create_test_event, create_test_participant,
};
use crate::{Persistence, PersistenceError, mutations, queries};

fn seed_event(persistence: &mut Persistence) -> i64 {
    mutations::participants::upsert_participant(
        persistence.connection(),
        &create_test_participant("org-1"),
    )
    .expect("Upsert failed");
    mutations::events::insert_event(persistence.connection(), &create_test_event(100))
        .expect("Insert failed")
}

fn sample_event(event_id: Option<i64>, action_name: &str) -> AuditEvent {
    AuditEvent::new(
        create_test_actor(),
        create_test_cause(),
        Action::new(action_name.to_string(), Some(String::from("unit test"))),
        event_id.map(EventId::new),
        StateSnapshot::none(),
        StateSnapshot::new(String::from("{\"status\":\"active\"}")),
    )
}

#[test]
fn test_audit_event_round_trip() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let event_id = seed_event(&mut persistence);

    let recorded = sample_event(Some(event_id), "RegisterForEvent");
    let audit_event_id =
        mutations::audit::insert_audit_event(persistence.connection(), &recorded, TEST_TIME)
            .expect("Insert failed");

    let loaded = queries::audit::get_audit_event(persistence.connection(), audit_event_id)
        .expect("Get failed");
    assert_eq!(loaded, recorded);
}

#[test]
fn test_get_missing_audit_event_is_not_found() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");

    let result = queries::audit::get_audit_event(persistence.connection(), 999);
    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_trail_is_scoped_and_ordered() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let event_id = seed_event(&mut persistence);
    let other_event_id =
        mutations::events::insert_event(persistence.connection(), &create_test_event(100))
            .expect("Insert failed");

    for action in ["PublishEvent", "RegisterForEvent", "CheckInTicket"] {
        mutations::audit::insert_audit_event(
            persistence.connection(),
            &sample_event(Some(event_id), action),
            TEST_TIME,
        )
        .expect("Insert failed");
    }
    mutations::audit::insert_audit_event(
        persistence.connection(),
        &sample_event(Some(other_event_id), "PublishEvent"),
        TEST_TIME,
    )
    .expect("Insert failed");
    // A platform-level entry belongs to no event trail.
    mutations::audit::insert_audit_event(
        persistence.connection(),
        &sample_event(None, "CreateEvent"),
        TEST_TIME,
    )
    .expect("Insert failed");

    let trail = queries::audit::list_audit_events_for_event(persistence.connection(), event_id)
        .expect("List failed");
    assert_eq!(trail.len(), 3);
    let names: Vec<&str> = trail.iter().map(|e| e.action.name.as_str()).collect();
    assert_eq!(names, ["PublishEvent", "RegisterForEvent", "CheckInTicket"]);
}

#[test]
fn test_rolled_back_transaction_drops_its_audit_row() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let event_id = seed_event(&mut persistence);

    let result: Result<(), PersistenceError> =
        persistence.connection().immediate_transaction(|conn| {
            mutations::audit::insert_audit_event(
                conn,
                &sample_event(Some(event_id), "ApproveOrder"),
                TEST_TIME,
            )?;
            Err(PersistenceError::NotFound(String::from(
                "simulated downstream failure",
            )))
        });
    assert!(result.is_err());

    let trail = queries::audit::list_audit_events_for_event(persistence.connection(), event_id)
        .expect("List failed");
    assert!(trail.is_empty());
}
