// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for ticket check-in: code parsing, scope checks, and the
//! single-use guarantee.

use evreg_domain::{Event, Ticket, TicketStatus};
use evreg_persistence::{Persistence, queries};

use crate::{CoreError, register_for_event, scan_ticket};

use super::helpers::{
    cancel_ticket, create_test_actor, create_test_cause, merch_config, normal_config, participant,
    published_event, seed_participant, test_persistence,
};

fn registered_ticket(persistence: &mut Persistence, event: &Event, id: &str) -> Ticket {
    seed_participant(persistence, id);
    register_for_event(
        persistence,
        event.id,
        &participant(id),
        None,
        create_test_actor(),
        create_test_cause(),
    )
    .expect("register")
}

fn reload_ticket(persistence: &mut Persistence, ticket_ref: &str) -> Ticket {
    queries::tickets::find_ticket_by_ref(persistence.connection(), ticket_ref)
        .expect("lookup")
        .expect("ticket exists")
}

// ============================================================================
// Successful Check-in Tests
// ============================================================================

#[test]
fn test_scan_bare_reference_consumes_ticket() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    let scanned: Ticket = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("scan");

    assert_eq!(scanned.status, TicketStatus::Used);
    assert!(scanned.checked_in_at.is_some());
}

#[test]
fn test_scan_full_payload_consumes_ticket() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    let scanned: Ticket = scan_ticket(
        &mut persistence,
        &ticket.payload,
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("scan payload");

    assert_eq!(scanned.status, TicketStatus::Used);
}

#[test]
fn test_scan_with_matching_scope_consumes_ticket() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    let scanned: Ticket = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        Some(event.id),
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("scan with scope");

    assert_eq!(scanned.status, TicketStatus::Used);
}

// ============================================================================
// Rejection Tests
// ============================================================================

#[test]
fn test_double_scan_conflicts() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("first scan");

    let result = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
    let reloaded: Ticket = reload_ticket(&mut persistence, &ticket.ticket_ref);
    assert_eq!(reloaded.status, TicketStatus::Used);
}

#[test]
fn test_scan_unknown_reference_not_found() {
    let mut persistence: Persistence = test_persistence();
    published_event(&mut persistence, normal_config(10));

    let result = scan_ticket(
        &mut persistence,
        "TKT-DOESNOTEXIST",
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
}

#[test]
fn test_scan_rejects_wrong_event_scope() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let other: Event = published_event(&mut persistence, merch_config(Some(5)));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    let result = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        Some(other.id),
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    let reloaded: Ticket = reload_ticket(&mut persistence, &ticket.ticket_ref);
    assert_eq!(reloaded.status, TicketStatus::Active);
}

#[test]
fn test_explicit_scope_overrides_payload_event() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let other: Event = published_event(&mut persistence, merch_config(Some(5)));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");

    // The payload names the right event, but the scanner's station is
    // scoped to a different one.
    let result = scan_ticket(
        &mut persistence,
        &ticket.payload,
        Some(other.id),
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
}

#[test]
fn test_scan_by_non_organizer_not_found() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");
    seed_participant(&mut persistence, "mallory");

    let result = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        None,
        &participant("mallory"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    let reloaded: Ticket = reload_ticket(&mut persistence, &ticket.ticket_ref);
    assert_eq!(reloaded.status, TicketStatus::Active);
}

#[test]
fn test_scan_cancelled_ticket_conflicts() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));
    let ticket: Ticket = registered_ticket(&mut persistence, &event, "alice");
    cancel_ticket(&mut persistence, ticket.id);

    let result = scan_ticket(
        &mut persistence,
        &ticket.ticket_ref,
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

// ============================================================================
// Code Parsing Tests
// ============================================================================

#[test]
fn test_scan_rejects_empty_code() {
    let mut persistence: Persistence = test_persistence();
    published_event(&mut persistence, normal_config(10));

    let result = scan_ticket(
        &mut persistence,
        "  ",
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_scan_rejects_malformed_payload() {
    let mut persistence: Persistence = test_persistence();
    published_event(&mut persistence, normal_config(10));

    let result = scan_ticket(
        &mut persistence,
        "TKT-ABC123|42",
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_scan_rejects_non_numeric_event_in_payload() {
    let mut persistence: Persistence = test_persistence();
    published_event(&mut persistence, normal_config(10));

    let result = scan_ticket(
        &mut persistence,
        "TKT-ABC123|not-a-number|alice",
        None,
        &super::helpers::organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}
