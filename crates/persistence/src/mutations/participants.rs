// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Participant identity mirror upserts.
//!
//! Participant identities are owned by the platform's authentication
//! service. A row is mirrored here on each authenticated request so
//! that foreign keys hold and invitations can name a known participant.

use diesel::SqliteConnection;
use diesel::prelude::*;
use tracing::debug;

use crate::data_models::NewParticipant;
use crate::diesel_schema::participants;
use crate::error::PersistenceError;

/// Records or refreshes a participant identity mirror.
///
/// An existing row is updated in place; the recorded `created_at` of
/// the first sighting is preserved.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `participant` - The identity row to record
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_participant(
    conn: &mut SqliteConnection,
    participant: &NewParticipant,
) -> Result<(), PersistenceError> {
    diesel::insert_into(participants::table)
        .values(participant)
        .on_conflict(participants::participant_id)
        .do_update()
        .set((
            participants::display_name.eq(&participant.display_name),
            participants::role.eq(&participant.role),
        ))
        .execute(conn)?;

    debug!(
        participant_id = participant.participant_id.as_str(),
        "Recorded participant identity"
    );

    Ok(())
}
