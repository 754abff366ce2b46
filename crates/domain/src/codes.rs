// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Generation of ticket references, invite codes, and join-link tokens.
//!
//! Generation is propose-only: a random draw is never trusted to be
//! unique. Callers must verify the generated value against the store
//! before committing it and draw again on collision.

use rand::RngExt;

/// Alphabet for human-facing codes. Uppercase alphanumerics only so
/// codes survive being read aloud or typed.
const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Alphabet for join-link tokens, which only travel inside URLs.
const TOKEN_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random suffix of a ticket reference.
const TICKET_REF_SUFFIX_LEN: usize = 8;

/// Length of the random suffix of a team invite code.
const INVITE_CODE_SUFFIX_LEN: usize = 6;

/// Length of a join-link token.
const INVITE_TOKEN_LEN: usize = 22;

/// Which flow a ticket reference is minted for.
///
/// The prefix makes the issuing flow visible on the printed ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketRefKind {
    /// Direct registration or team finalize.
    Registration,
    /// Merchandise order approval.
    Merch,
}

impl TicketRefKind {
    /// Returns the reference prefix for this kind.
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Registration => "TKT",
            Self::Merch => "MER",
        }
    }
}

fn random_string(alphabet: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(alphabet[rng.random_range(0..alphabet.len())]))
        .collect()
}

/// Proposes a new ticket reference such as `TKT-7F3K2Q9D`.
#[must_use]
pub fn propose_ticket_ref(kind: TicketRefKind) -> String {
    format!(
        "{}-{}",
        kind.prefix(),
        random_string(CODE_ALPHABET, TICKET_REF_SUFFIX_LEN)
    )
}

/// Proposes a new team invite code such as `TEAM-4QX9ZP`.
#[must_use]
pub fn propose_invite_code() -> String {
    format!("TEAM-{}", random_string(CODE_ALPHABET, INVITE_CODE_SUFFIX_LEN))
}

/// Proposes a new join-link token.
#[must_use]
pub fn propose_invite_token() -> String {
    random_string(TOKEN_ALPHABET, INVITE_TOKEN_LEN)
}
