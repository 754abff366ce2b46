// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared builders for domain tests.

use crate::{Event, EventId, EventKind, EventPhase, ParticipantId, ParticipationMode};
use time::macros::datetime;

/// Builds a published event of the given kind with a mid-2026 deadline.
pub fn published_event(kind: EventKind) -> Event {
    Event {
        id: EventId::new(1),
        name: String::from("Test Event"),
        kind,
        phase: EventPhase::Published,
        organizer: ParticipantId::new("org-1"),
        registration_limit: 0,
        stock: if kind == EventKind::Merch { Some(50) } else { None },
        fee: 0,
        participation_mode: ParticipationMode::Solo,
        team_size: None,
        registration_deadline: Some(datetime!(2026-05-01 0:00 UTC)),
    }
}
