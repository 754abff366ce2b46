// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for individual registration and the registration slot guard.

use evreg_domain::{DomainError, Event, Ticket, TicketStatus};
use evreg_persistence::{Persistence, queries};
use time::macros::datetime;

use crate::{CoreError, create_event, register_for_event};

use super::helpers::{
    cancel_ticket, create_test_actor, create_test_cause, normal_config, organizer, participant,
    published_event, seed_participant, team_config, test_persistence,
};

#[test]
fn test_register_issues_active_ticket() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(5));
    seed_participant(&mut persistence, "alice");

    let ticket: Ticket = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        Some("{\"shirt\":\"M\"}"),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("register");

    assert_eq!(ticket.event, event.id);
    assert_eq!(ticket.participant, participant("alice"));
    assert_eq!(ticket.status, TicketStatus::Active);
    assert!(ticket.ticket_ref.starts_with("TKT-"));
    assert_eq!(
        ticket.payload,
        format!("{}|{}|alice", ticket.ticket_ref, event.id.value())
    );
    assert_eq!(ticket.form_responses.as_deref(), Some("{\"shirt\":\"M\"}"));
    assert_eq!(ticket.team, None);
}

#[test]
fn test_register_requires_published_event() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");
    seed_participant(&mut persistence, "alice");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(5),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_register_rejects_after_deadline() {
    let mut persistence: Persistence = test_persistence();
    let mut config = normal_config(5);
    config.registration_deadline = Some(datetime!(2020-01-01 00:00 UTC));
    let event: Event = published_event(&mut persistence, config);
    seed_participant(&mut persistence, "alice");

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_register_honors_future_deadline() {
    let mut persistence: Persistence = test_persistence();
    let mut config = normal_config(5);
    config.registration_deadline = Some(datetime!(2030-01-01 00:00 UTC));
    let event: Event = published_event(&mut persistence, config);
    seed_participant(&mut persistence, "alice");

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_register_rejects_team_based_event() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, team_config(3));
    seed_participant(&mut persistence, "alice");

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_register_rejects_malformed_participant_id() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(5));

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("al|ice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidParticipantId(_))
    ));
}

#[test]
fn test_registration_limit_caps_ticket_count() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(2));
    seed_participant(&mut persistence, "alice");
    seed_participant(&mut persistence, "bob");
    seed_participant(&mut persistence, "carol");

    for id in ["alice", "bob"] {
        register_for_event(
            &mut persistence,
            event.id,
            &participant(id),
            None,
            create_test_actor(),
            create_test_cause(),
        )
        .expect("register within limit");
    }

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("carol"),
        None,
        create_test_actor(),
        create_test_cause(),
    );
    assert!(matches!(result.unwrap_err(), CoreError::Capacity(_)));

    let count: i64 =
        queries::tickets::count_tickets_for_event(persistence.connection(), event.id.value())
            .expect("count tickets");
    assert_eq!(count, 2);
}

#[test]
fn test_zero_limit_means_unlimited() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(0));

    for id in ["alice", "bob", "carol", "dave"] {
        seed_participant(&mut persistence, id);
        register_for_event(
            &mut persistence,
            event.id,
            &participant(id),
            None,
            create_test_actor(),
            create_test_cause(),
        )
        .expect("register without limit");
    }

    let count: i64 =
        queries::tickets::count_tickets_for_event(persistence.connection(), event.id.value())
            .expect("count tickets");
    assert_eq!(count, 4);
}

#[test]
fn test_double_register_returns_same_ticket() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(5));
    seed_participant(&mut persistence, "alice");

    let first: Ticket = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("first registration");

    let second: Ticket = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("second registration");

    assert_eq!(first.id, second.id);
    assert_eq!(first.ticket_ref, second.ticket_ref);

    let count: i64 =
        queries::tickets::count_tickets_for_event(persistence.connection(), event.id.value())
            .expect("count tickets");
    assert_eq!(count, 1);
}

#[test]
fn test_idempotent_register_writes_no_second_audit_row() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(5));
    seed_participant(&mut persistence, "alice");

    for _ in 0..2 {
        register_for_event(
            &mut persistence,
            event.id,
            &participant("alice"),
            None,
            create_test_actor(),
            create_test_cause(),
        )
        .expect("register");
    }

    let trail = queries::audit::list_audit_events_for_event(
        persistence.connection(),
        event.id.value(),
    )
    .expect("audit trail");
    let registrations = trail
        .iter()
        .filter(|entry| entry.action.name == "RegisterForEvent")
        .count();
    assert_eq!(registrations, 1);
}

#[test]
fn test_cancelled_ticket_blocks_reregistration() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(5));
    seed_participant(&mut persistence, "alice");

    let ticket: Ticket = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("register");
    cancel_ticket(&mut persistence, ticket.id);

    let result = register_for_event(
        &mut persistence,
        event.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_registrations_isolated_per_event() {
    let mut persistence: Persistence = test_persistence();
    let first: Event = published_event(&mut persistence, normal_config(1));
    seed_participant(&mut persistence, "alice");

    let mut other_config = normal_config(1);
    other_config.name = String::from("Autumn Meetup");
    let second: Event = published_event(&mut persistence, other_config);

    register_for_event(
        &mut persistence,
        first.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("register for first event");

    let ticket: Ticket = register_for_event(
        &mut persistence,
        second.id,
        &participant("alice"),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("register for second event");

    assert_eq!(ticket.event, second.id);

    let mine = queries::tickets::list_tickets_for_participant(persistence.connection(), "alice")
        .expect("list tickets");
    assert_eq!(mine.len(), 2);
}
