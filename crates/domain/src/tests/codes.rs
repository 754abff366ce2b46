// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{TicketRefKind, propose_invite_code, propose_invite_token, propose_ticket_ref};

#[test]
fn test_ticket_ref_carries_registration_prefix() {
    let ticket_ref: String = propose_ticket_ref(TicketRefKind::Registration);
    assert!(ticket_ref.starts_with("TKT-"));
    assert_eq!(ticket_ref.len(), "TKT-".len() + 8);
}

#[test]
fn test_ticket_ref_carries_merch_prefix() {
    let ticket_ref: String = propose_ticket_ref(TicketRefKind::Merch);
    assert!(ticket_ref.starts_with("MER-"));
}

#[test]
fn test_ticket_ref_suffix_is_uppercase_alphanumeric() {
    let ticket_ref: String = propose_ticket_ref(TicketRefKind::Registration);
    let suffix: &str = &ticket_ref["TKT-".len()..];
    assert!(
        suffix
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
    );
}

#[test]
fn test_invite_code_shape() {
    let code: String = propose_invite_code();
    assert!(code.starts_with("TEAM-"));
    assert_eq!(code.len(), "TEAM-".len() + 6);
}

#[test]
fn test_invite_token_shape() {
    let token: String = propose_invite_token();
    assert_eq!(token.len(), 22);
    assert!(
        token
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    );
}

#[test]
fn test_proposals_vary_across_draws() {
    // Not a uniqueness guarantee, just a sanity check that the
    // generator is not constant.
    let first: String = propose_ticket_ref(TicketRefKind::Registration);
    let second: String = propose_ticket_ref(TicketRefKind::Registration);
    let third: String = propose_ticket_ref(TicketRefKind::Registration);
    assert!(!(first == second && second == third));
}
