// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the team formation API surface.

use evreg_persistence::Persistence;

use crate::{
    ApiError, AuthenticatedActor, CreateTeamRequest, CreateTeamResponse, InviteMemberRequest,
    RemoveMemberRequest, RespondInviteRequest, Role, create_team, finalize_team, invite_member,
    join_by_code, join_by_link, leave_team, list_event_teams, list_my_invites, list_my_teams,
    remove_member, respond_to_invite,
};

use super::helpers::{
    create_test_cause, hackathon_event_request, participant_actor, published_event,
    seed_participant, test_persistence,
};

/// Founds a team led by `leader` on a fresh published hackathon.
/// Returns the event id and the creation response.
fn founded_team(
    persistence: &mut Persistence,
    leader: &AuthenticatedActor,
    max_size: Option<i64>,
) -> (i64, CreateTeamResponse) {
    let event_id = published_event(persistence, hackathon_event_request(4));
    let response = create_team(
        persistence,
        CreateTeamRequest {
            event_id,
            name: String::from("Rustaceans"),
            max_size,
        },
        leader,
        create_test_cause(),
    )
    .expect("create team");
    (event_id, response)
}

fn invite(persistence: &mut Persistence, leader: &AuthenticatedActor, team_id: i64, who: &str) {
    seed_participant(persistence, who);
    invite_member(
        persistence,
        InviteMemberRequest {
            team_id,
            invitee: String::from(who),
        },
        leader,
        create_test_cause(),
    )
    .expect("invite member");
}

// ============================================================================
// Team Creation
// ============================================================================

#[test]
fn test_create_team_returns_join_codes() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");

    let (event_id, response) = founded_team(&mut persistence, &alice, None);

    assert!(response.team_id > 0);
    assert_eq!(response.event_id, event_id);
    assert_eq!(response.name, "Rustaceans");
    assert!(response.invite_code.starts_with("TEAM-"));
    assert!(!response.invite_token.is_empty());
    assert_eq!(response.status, "forming");
    assert!(response.message.contains("Successfully founded"));
}

#[test]
fn test_create_team_on_solo_event_rejected() {
    let mut persistence = test_persistence();
    let event_id = published_event(
        &mut persistence,
        super::helpers::normal_event_request(10),
    );
    let alice = participant_actor("alice");

    let result = create_team(
        &mut persistence,
        CreateTeamRequest {
            event_id,
            name: String::from("Rustaceans"),
            max_size: None,
        },
        &alice,
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}

#[test]
fn test_create_team_size_above_event_cap_rejected() {
    let mut persistence = test_persistence();
    let event_id = published_event(&mut persistence, hackathon_event_request(4));
    let alice = participant_actor("alice");

    let result = create_team(
        &mut persistence,
        CreateTeamRequest {
            event_id,
            name: String::from("Rustaceans"),
            max_size: Some(6),
        },
        &alice,
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}

// ============================================================================
// Invitations
// ============================================================================

#[test]
fn test_invite_and_accept_flow() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let bob = participant_actor("bob");
    let (_, team) = founded_team(&mut persistence, &alice, None);

    seed_participant(&mut persistence, "bob");
    let invited = invite_member(
        &mut persistence,
        InviteMemberRequest {
            team_id: team.team_id,
            invitee: String::from("bob"),
        },
        &alice,
        create_test_cause(),
    )
    .expect("invite bob");
    assert_eq!(invited.invitee, "bob");

    let answer = respond_to_invite(
        &mut persistence,
        RespondInviteRequest {
            team_id: team.team_id,
            accept: true,
        },
        &bob,
        create_test_cause(),
    )
    .expect("accept invite");
    assert!(answer.joined);
    assert_eq!(answer.team_id, team.team_id);

    let listing = list_my_teams(&mut persistence, &bob).expect("list teams");
    assert_eq!(listing.teams.len(), 1);
    assert_eq!(listing.teams[0].team_id, team.team_id);
    assert_eq!(listing.teams[0].member_count, 2);
    assert_eq!(listing.teams[0].leader, "alice");
}

#[test]
fn test_decline_leaves_member_count_unchanged() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let bob = participant_actor("bob");
    let (_, team) = founded_team(&mut persistence, &alice, None);
    invite(&mut persistence, &alice, team.team_id, "bob");

    let answer = respond_to_invite(
        &mut persistence,
        RespondInviteRequest {
            team_id: team.team_id,
            accept: false,
        },
        &bob,
        create_test_cause(),
    )
    .expect("decline invite");
    assert!(!answer.joined);

    let listing = list_my_teams(&mut persistence, &alice).expect("list teams");
    assert_eq!(listing.teams[0].member_count, 1);
}

#[test]
fn test_invite_by_non_leader_rejected() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, None);
    invite(&mut persistence, &alice, team.team_id, "bob");
    respond_to_invite(
        &mut persistence,
        RespondInviteRequest {
            team_id: team.team_id,
            accept: true,
        },
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob joins");

    seed_participant(&mut persistence, "carol");
    let result = invite_member(
        &mut persistence,
        InviteMemberRequest {
            team_id: team.team_id,
            invitee: String::from("carol"),
        },
        &participant_actor("bob"),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}

#[test]
fn test_invite_unknown_participant_not_found() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, None);

    let result = invite_member(
        &mut persistence,
        InviteMemberRequest {
            team_id: team.team_id,
            invitee: String::from("nobody"),
        },
        &alice,
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}

#[test]
fn test_list_my_invites_shows_pending_only() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let bob = participant_actor("bob");
    let (event_id, team) = founded_team(&mut persistence, &alice, None);
    invite(&mut persistence, &alice, team.team_id, "bob");

    let pending = list_my_invites(&mut persistence, &bob).expect("list invites");
    assert_eq!(pending.participant, "bob");
    assert_eq!(pending.invites.len(), 1);
    assert_eq!(pending.invites[0].team_id, team.team_id);
    assert_eq!(pending.invites[0].team_name, "Rustaceans");
    assert_eq!(pending.invites[0].event_id, event_id);
    assert_eq!(pending.invites[0].status, "pending");

    respond_to_invite(
        &mut persistence,
        RespondInviteRequest {
            team_id: team.team_id,
            accept: true,
        },
        &bob,
        create_test_cause(),
    )
    .expect("accept invite");

    let after = list_my_invites(&mut persistence, &bob).expect("list invites again");
    assert!(after.invites.is_empty());
}

// ============================================================================
// Joining by Code and Link
// ============================================================================

#[test]
fn test_join_by_code_and_link() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (event_id, team) = founded_team(&mut persistence, &alice, None);

    let by_code = join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("carol"),
        create_test_cause(),
    )
    .expect("join by code");
    assert_eq!(by_code.team_id, team.team_id);
    assert_eq!(by_code.event_id, event_id);
    assert_eq!(by_code.name, "Rustaceans");

    let by_link = join_by_link(
        &mut persistence,
        &team.invite_token,
        &participant_actor("dave"),
        create_test_cause(),
    )
    .expect("join by link");
    assert_eq!(by_link.team_id, team.team_id);

    let listing = list_my_teams(&mut persistence, &alice).expect("list teams");
    assert_eq!(listing.teams[0].member_count, 3);
}

#[test]
fn test_join_with_unknown_code_not_found() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    founded_team(&mut persistence, &alice, None);

    let result = join_by_code(
        &mut persistence,
        "TEAM-NOSUCH",
        &participant_actor("carol"),
        create_test_cause(),
    );

    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}

#[test]
fn test_join_full_team_capacity() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, Some(2));

    join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob takes the last seat");

    let result = join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("carol"),
        create_test_cause(),
    );

    assert!(matches!(
        result.unwrap_err(),
        ApiError::CapacityExhausted { .. }
    ));
}

// ============================================================================
// Leaving and Removal
// ============================================================================

#[test]
fn test_leave_team_frees_seat() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, Some(2));

    join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob joins");

    let left = leave_team(
        &mut persistence,
        team.team_id,
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob leaves");
    assert_eq!(left.team_id, team.team_id);

    join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("carol"),
        create_test_cause(),
    )
    .expect("carol takes the freed seat");
}

#[test]
fn test_leader_cannot_leave() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, None);

    let result = leave_team(&mut persistence, team.team_id, &alice, create_test_cause());

    assert!(matches!(result.unwrap_err(), ApiError::Conflict { .. }));
}

#[test]
fn test_remove_member() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let bob = participant_actor("bob");
    let (_, team) = founded_team(&mut persistence, &alice, None);
    join_by_code(
        &mut persistence,
        &team.invite_code,
        &bob,
        create_test_cause(),
    )
    .expect("bob joins");

    let removed = remove_member(
        &mut persistence,
        RemoveMemberRequest {
            team_id: team.team_id,
            member: String::from("bob"),
        },
        &alice,
        create_test_cause(),
    )
    .expect("remove bob");
    assert_eq!(removed.member, "bob");

    let listing = list_my_teams(&mut persistence, &bob).expect("list teams");
    assert!(listing.teams.is_empty());
}

// ============================================================================
// Finalization
// ============================================================================

#[test]
fn test_finalize_issues_member_tickets() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (event_id, team) = founded_team(&mut persistence, &alice, None);
    join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob joins");

    let response = finalize_team(&mut persistence, team.team_id, &alice, create_test_cause())
        .expect("finalize team");

    assert_eq!(response.team_id, team.team_id);
    assert_eq!(response.status, "finalized");
    assert_eq!(response.tickets.len(), 2);
    for ticket in &response.tickets {
        assert!(ticket.ticket_ref.starts_with("TKT-"));
        assert_eq!(ticket.event_id, event_id);
        assert_eq!(ticket.status, "active");
        assert_eq!(ticket.team_id, Some(team.team_id));
    }
    assert!(response.message.contains("issued 2 tickets"));
}

#[test]
fn test_finalize_requires_leader() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let bob = participant_actor("bob");
    let (_, team) = founded_team(&mut persistence, &alice, None);
    join_by_code(
        &mut persistence,
        &team.invite_code,
        &bob,
        create_test_cause(),
    )
    .expect("bob joins");

    let result = finalize_team(&mut persistence, team.team_id, &bob, create_test_cause());

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}

#[test]
fn test_finalize_solo_team_rejected() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (_, team) = founded_team(&mut persistence, &alice, None);

    let result = finalize_team(&mut persistence, team.team_id, &alice, create_test_cause());

    assert!(matches!(result.unwrap_err(), ApiError::Validation { .. }));
}

// ============================================================================
// Organizer Team Listings
// ============================================================================

#[test]
fn test_event_teams_listing() {
    let mut persistence = test_persistence();
    let alice = participant_actor("alice");
    let (event_id, team) = founded_team(&mut persistence, &alice, None);
    join_by_code(
        &mut persistence,
        &team.invite_code,
        &participant_actor("bob"),
        create_test_cause(),
    )
    .expect("bob joins");

    let organizer = super::helpers::create_test_organizer();
    let listing = list_event_teams(&mut persistence, event_id, &organizer)
        .expect("list event teams");

    assert_eq!(listing.event_id, event_id);
    assert_eq!(listing.teams.len(), 1);
    assert_eq!(listing.teams[0].name, "Rustaceans");
    assert_eq!(listing.teams[0].member_count, 2);
    assert_eq!(listing.teams[0].status, "forming");

    let other = AuthenticatedActor::new(String::from("org-2"), Role::Organizer);
    let result = list_event_teams(&mut persistence, event_id, &other);
    assert!(matches!(result.unwrap_err(), ApiError::NotFound { .. }));
}
