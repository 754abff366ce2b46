// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for event creation, variant setup, and the phase lifecycle.

use evreg_domain::{
    DomainError, Event, EventKind, EventPhase, ParticipationMode, Variant,
};
use evreg_persistence::{Persistence, queries};

use crate::{CoreError, VariantConfig, add_variant, close_event, create_event, publish_event};

use super::helpers::{
    create_test_actor, create_test_cause, merch_config, normal_config, organizer, participant,
    published_event, seed_participant, team_config, test_persistence,
};

// ============================================================================
// Event Creation Tests
// ============================================================================

#[test]
fn test_create_event_starts_in_draft() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    assert_eq!(event.phase, EventPhase::Draft);
    assert_eq!(event.kind, EventKind::Normal);
    assert_eq!(event.registration_limit, 10);
    assert_eq!(event.organizer, organizer());
    assert_eq!(event.stock, None);
}

#[test]
fn test_create_team_event_carries_team_size() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        team_config(4),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    assert_eq!(event.kind, EventKind::Hackathon);
    assert_eq!(event.participation_mode, ParticipationMode::Team);
    assert_eq!(event.team_size, Some(4));
    assert!(event.is_team_based());
}

#[test]
fn test_create_event_rejects_blank_name() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let mut config = normal_config(10);
    config.name = String::from("   ");

    let result = create_event(
        &mut persistence,
        &organizer(),
        config,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidEventName(_))
    ));
}

#[test]
fn test_create_event_rejects_stock_on_non_merch_event() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let mut config = normal_config(10);
    config.stock = Some(5);

    let result = create_event(
        &mut persistence,
        &organizer(),
        config,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_create_event_rejects_team_mode_outside_hackathons() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let mut config = normal_config(10);
    config.participation_mode = ParticipationMode::Team;

    let result = create_event(
        &mut persistence,
        &organizer(),
        config,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_create_event_rejects_team_size_without_team_mode() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let mut config = normal_config(10);
    config.team_size = Some(3);

    let result = create_event(
        &mut persistence,
        &organizer(),
        config,
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_create_event_rejects_out_of_range_team_size() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let result = create_event(
        &mut persistence,
        &organizer(),
        team_config(1),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        CoreError::DomainViolation(DomainError::InvalidTeamSize { .. })
    ));
}

#[test]
fn test_create_event_writes_audit_row() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let trail = queries::audit::list_audit_events_for_event(
        persistence.connection(),
        event.id.value(),
    )
    .expect("audit trail");

    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].action.name, "CreateEvent");
    assert_eq!(trail[0].actor.id, "org-1");
}

// ============================================================================
// Phase Lifecycle Tests
// ============================================================================

#[test]
fn test_publish_moves_draft_to_published() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let published: Event = publish_event(
        &mut persistence,
        event.id,
        &organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("publish event");

    assert_eq!(published.phase, EventPhase::Published);
    assert!(published.phase.accepts_registrations());
}

#[test]
fn test_publish_twice_conflicts() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));

    let result = publish_event(
        &mut persistence,
        event.id,
        &organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_close_requires_published_phase() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let result = close_event(
        &mut persistence,
        event.id,
        &organizer(),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_close_published_event() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, normal_config(10));

    let closed: Event = close_event(
        &mut persistence,
        event.id,
        &organizer(),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("close event");

    assert_eq!(closed.phase, EventPhase::Closed);
    assert!(!closed.phase.accepts_registrations());
}

#[test]
fn test_phase_shift_requires_owner() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");
    seed_participant(&mut persistence, "mallory");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let result = publish_event(
        &mut persistence,
        event.id,
        &participant("mallory"),
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
}

// ============================================================================
// Variant Tests
// ============================================================================

#[test]
fn test_add_variant_to_draft_merch_event() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        merch_config(None),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let variant: Variant = add_variant(
        &mut persistence,
        event.id,
        &organizer(),
        VariantConfig {
            name: String::from("Hoodie L / Black"),
            stock: 25,
            price: 4500,
            per_participant_limit: 2,
        },
        create_test_actor(),
        create_test_cause(),
    )
    .expect("add variant");

    assert_eq!(variant.event, event.id);
    assert_eq!(variant.name, "Hoodie L / Black");
    assert_eq!(variant.stock, 25);
    assert_eq!(variant.price, 4500);
    assert_eq!(variant.per_participant_limit, 2);
}

#[test]
fn test_add_variant_rejects_non_merch_event() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        normal_config(10),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let result = add_variant(
        &mut persistence,
        event.id,
        &organizer(),
        VariantConfig {
            name: String::from("Sticker"),
            stock: 5,
            price: 100,
            per_participant_limit: 0,
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Validation(_)));
}

#[test]
fn test_add_variant_after_publish_conflicts() {
    let mut persistence: Persistence = test_persistence();
    let event: Event = published_event(&mut persistence, merch_config(None));

    let result = add_variant(
        &mut persistence,
        event.id,
        &organizer(),
        VariantConfig {
            name: String::from("Sticker"),
            stock: 5,
            price: 100,
            per_participant_limit: 0,
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::Conflict(_)));
}

#[test]
fn test_add_variant_requires_owner() {
    let mut persistence: Persistence = test_persistence();
    seed_participant(&mut persistence, "org-1");
    seed_participant(&mut persistence, "mallory");

    let event: Event = create_event(
        &mut persistence,
        &organizer(),
        merch_config(None),
        create_test_actor(),
        create_test_cause(),
    )
    .expect("create event");

    let result = add_variant(
        &mut persistence,
        event.id,
        &participant("mallory"),
        VariantConfig {
            name: String::from("Sticker"),
            stock: 5,
            price: 100,
            per_participant_limit: 0,
        },
        create_test_actor(),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
}
