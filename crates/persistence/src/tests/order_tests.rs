// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Order decision tests.
//!
//! A decision is a single conditional flip away from pending. Whichever
//! statement matches the pending row wins; every later decision matches
//! nothing and reports zero rows.

use evreg_domain::OrderStatus;

use crate::tests::{
    TEST_TIME, create_test_merch_event, create_test_order, create_test_participant,
    create_test_variant,
};
use crate::{Persistence, mutations, queries};

/// Seeds an organizer, a buyer, a merch event, and one variant.
fn seed_storefront(persistence: &mut Persistence) -> (i64, i64) {
    for id in ["org-1", "alice"] {
        mutations::participants::upsert_participant(
            persistence.connection(),
            &create_test_participant(id),
        )
        .expect("Upsert failed");
    }
    let event_id =
        mutations::events::insert_event(persistence.connection(), &create_test_merch_event(50))
            .expect("Insert failed");
    let variant_id = mutations::events::insert_variant(
        persistence.connection(),
        &create_test_variant(event_id, 10),
    )
    .expect("Insert failed");
    (event_id, variant_id)
}

#[test]
fn test_insert_order_round_trip() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (event_id, variant_id) = seed_storefront(&mut persistence);

    let order_id = mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 2),
    )
    .expect("Insert failed");

    let order = queries::orders::get_order(persistence.connection(), order_id).expect("Get failed");
    assert_eq!(order.event.value(), event_id);
    assert_eq!(order.participant.value(), "alice");
    assert_eq!(order.variant.map(evreg_domain::VariantId::value), Some(variant_id));
    assert_eq!(order.quantity, 2);
    assert_eq!(order.amount, 3000);
    assert_eq!(order.status, OrderStatus::Pending);
    assert!(order.decided_by.is_none());
    assert!(order.decided_at.is_none());
}

#[test]
fn test_decide_order_wins_exactly_once() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (event_id, variant_id) = seed_storefront(&mut persistence);

    let order_id = mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 1),
    )
    .expect("Insert failed");

    let approved = mutations::orders::decide_order(
        persistence.connection(),
        order_id,
        OrderStatus::Approved.as_str(),
        None,
        "org-1",
        TEST_TIME,
    )
    .expect("Decide failed");
    assert!(approved);

    // The racing rejection arrives second and matches nothing.
    let rejected = mutations::orders::decide_order(
        persistence.connection(),
        order_id,
        OrderStatus::Rejected.as_str(),
        Some("too late"),
        "org-1",
        TEST_TIME,
    )
    .expect("Decide failed");
    assert!(!rejected);

    let order = queries::orders::get_order(persistence.connection(), order_id).expect("Get failed");
    assert_eq!(order.status, OrderStatus::Approved);
    assert_eq!(
        order.decided_by.as_ref().map(evreg_domain::ParticipantId::value),
        Some("org-1")
    );
    assert!(order.decided_at.is_some());
    assert!(order.decision_note.is_none());
}

#[test]
fn test_reject_records_the_note() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (event_id, variant_id) = seed_storefront(&mut persistence);

    let order_id = mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 1),
    )
    .expect("Insert failed");

    let rejected = mutations::orders::decide_order(
        persistence.connection(),
        order_id,
        OrderStatus::Rejected.as_str(),
        Some("size out of production"),
        "org-1",
        TEST_TIME,
    )
    .expect("Decide failed");
    assert!(rejected);

    let order = queries::orders::get_order(persistence.connection(), order_id).expect("Get failed");
    assert_eq!(order.status, OrderStatus::Rejected);
    assert_eq!(order.decision_note.as_deref(), Some("size out of production"));
}

#[test]
fn test_allocated_quantity_skips_rejected_orders() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (event_id, variant_id) = seed_storefront(&mut persistence);

    let approved_id = mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 1),
    )
    .expect("Insert failed");
    mutations::orders::decide_order(
        persistence.connection(),
        approved_id,
        OrderStatus::Approved.as_str(),
        None,
        "org-1",
        TEST_TIME,
    )
    .expect("Decide failed");

    let rejected_id = mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 2),
    )
    .expect("Insert failed");
    mutations::orders::decide_order(
        persistence.connection(),
        rejected_id,
        OrderStatus::Rejected.as_str(),
        None,
        "org-1",
        TEST_TIME,
    )
    .expect("Decide failed");

    // A still-pending order counts against the per-participant limit too.
    mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 1),
    )
    .expect("Insert failed");

    let allocated = queries::orders::allocated_quantity_for_variant(
        persistence.connection(),
        variant_id,
        "alice",
    )
    .expect("Query failed");
    assert_eq!(allocated, 2);
}

#[test]
fn test_allocated_quantity_zero_without_orders() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (_, variant_id) = seed_storefront(&mut persistence);

    let allocated = queries::orders::allocated_quantity_for_variant(
        persistence.connection(),
        variant_id,
        "alice",
    )
    .expect("Query failed");
    assert_eq!(allocated, 0);
}

#[test]
fn test_order_listings_are_scoped() {
    let mut persistence = Persistence::new_in_memory().expect("Failed to create persistence");
    let (event_id, variant_id) = seed_storefront(&mut persistence);
    mutations::participants::upsert_participant(
        persistence.connection(),
        &create_test_participant("bob"),
    )
    .expect("Upsert failed");

    mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "alice", Some(variant_id), 1),
    )
    .expect("Insert failed");
    mutations::orders::insert_order(
        persistence.connection(),
        &create_test_order(event_id, "bob", Some(variant_id), 2),
    )
    .expect("Insert failed");

    let for_event = queries::orders::list_orders_for_event(persistence.connection(), event_id)
        .expect("List failed");
    assert_eq!(for_event.len(), 2);

    let for_alice = queries::orders::list_orders_for_participant(persistence.connection(), "alice")
        .expect("List failed");
    assert_eq!(for_alice.len(), 1);
    assert_eq!(for_alice[0].participant.value(), "alice");
}
