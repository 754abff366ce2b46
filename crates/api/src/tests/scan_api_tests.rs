// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the door-scanning API surface.

use crate::{
    ApiError, AuthenticatedActor, RegisterForEventRequest, Role, ScanTicketRequest,
    register_for_event, scan_ticket,
};

use super::helpers::{
    create_test_cause, create_test_participant, normal_event_request, published_event,
    test_persistence,
};

use evreg_persistence::Persistence;

/// Registers the default test participant and returns the payload and
/// bare reference of the issued ticket.
fn issued_ticket(persistence: &mut Persistence, event_id: i64) -> (String, String) {
    let alice = create_test_participant();
    let request = RegisterForEventRequest {
        event_id,
        form_responses: None,
    };
    let response = register_for_event(persistence, request, &alice, create_test_cause())
        .expect("register");
    (response.payload, response.ticket_ref)
}

fn scanning_organizer() -> AuthenticatedActor {
    // Matches the owner of events created by `published_event`.
    AuthenticatedActor::new(String::from("org-1"), Role::Organizer)
}

// ============================================================================
// Accepted scans
// ============================================================================

#[test]
fn test_scan_full_payload_marks_ticket_used() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (payload, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: payload,
        event_id: None,
    };
    let response = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    )
    .expect("scan");

    assert_eq!(response.ticket_ref, ticket_ref);
    assert_eq!(response.event_id, event_id);
    assert_eq!(response.participant, "alice");
    assert_eq!(response.status, "used");
    assert!(response.checked_in_at.is_some());
}

#[test]
fn test_scan_bare_reference_marks_ticket_used() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (_, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: ticket_ref.clone(),
        event_id: None,
    };
    let response = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    )
    .expect("scan by bare ref");

    assert_eq!(response.ticket_ref, ticket_ref);
    assert_eq!(response.status, "used");
}

#[test]
fn test_scan_with_matching_event_scope_succeeds() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (payload, _) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: payload,
        event_id: Some(event_id),
    };
    let response = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    )
    .expect("scoped scan");

    assert_eq!(response.status, "used");
}

// ============================================================================
// Rejected scans
// ============================================================================

#[test]
fn test_scan_twice_conflicts() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (_, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: ticket_ref,
        event_id: None,
    };
    scan_ticket(
        &mut persistence,
        request.clone(),
        &scanning_organizer(),
        create_test_cause(),
    )
    .expect("first scan");

    let result = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    );

    match result.unwrap_err() {
        ApiError::Conflict { message } => {
            assert!(message.contains("already been checked in"));
        }
        other => panic!("Expected Conflict error, got: {other:?}"),
    }
}

#[test]
fn test_scan_as_participant_unauthorized() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (_, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: ticket_ref,
        event_id: None,
    };
    let result = scan_ticket(
        &mut persistence,
        request,
        &create_test_participant(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::Unauthorized { .. }));
}

#[test]
fn test_scan_unknown_reference_not_found() {
    let mut persistence = test_persistence();
    published_event(&mut persistence, normal_event_request(10));

    let request = ScanTicketRequest {
        code: String::from("TKT-NOSUCH"),
        event_id: None,
    };
    let result = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}

#[test]
fn test_scan_against_wrong_event_scope_not_found() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let other_event = published_event(&mut persistence, normal_event_request(10));
    let (_, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let request = ScanTicketRequest {
        code: ticket_ref,
        event_id: Some(other_event),
    };
    let result = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}

#[test]
fn test_scan_by_foreign_organizer_not_found() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, normal_event_request(10));
    let (_, ticket_ref) = issued_ticket(&mut persistence, event_id);

    let stranger = AuthenticatedActor::new(String::from("org-2"), Role::Organizer);
    let request = ScanTicketRequest {
        code: ticket_ref,
        event_id: None,
    };
    let result = scan_ticket(&mut persistence, request, &stranger, create_test_cause());

    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}

#[test]
fn test_scan_malformed_payload_rejected() {
    let mut persistence = test_persistence();
    published_event(&mut persistence, normal_event_request(10));

    let request = ScanTicketRequest {
        code: String::from("TKT-ABC|not-a-number|alice"),
        event_id: None,
    };
    let result = scan_ticket(
        &mut persistence,
        request,
        &scanning_organizer(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}
